use std::fmt;

use super::{Overrides, SegmentFormat, SegmentFormatter};

/// Literal value that replaces a segment's name when rendered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SegmentValue {
    /// A string value, emitted verbatim.
    Text(String),
    /// An integer value, emitted in decimal.
    Integer(i128),
}

impl fmt::Display for SegmentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Integer(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for SegmentValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SegmentValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for SegmentValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

macro_rules! integer_value {
    ($($int:ty),* $(,)?) => {
        $(
            impl From<$int> for SegmentValue {
                fn from(value: $int) -> Self {
                    Self::Integer(value as i128)
                }
            }
        )*
    };
}

integer_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// One element of a request path: a name, the convention used to render it,
/// and an optional literal value that takes precedence over both.
///
/// Segments are never mutated; the `with_*` methods return modified copies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment {
    name: String,
    format: SegmentFormat,
    value: Option<SegmentValue>,
}

impl PathSegment {
    /// Creates an unvalued segment.
    pub fn new(name: impl Into<String>, format: SegmentFormat) -> Self {
        Self {
            name: name.into(),
            format,
            value: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn format(&self) -> SegmentFormat {
        self.format
    }

    pub fn value(&self) -> Option<&SegmentValue> {
        self.value.as_ref()
    }

    /// Returns a copy rendered with a different convention.
    pub fn with_format(&self, format: SegmentFormat) -> Self {
        Self {
            format,
            ..self.clone()
        }
    }

    /// Returns a copy carrying a literal value.
    pub fn with_value(&self, value: SegmentValue) -> Self {
        Self {
            value: Some(value),
            ..self.clone()
        }
    }

    /// Renders the segment: the value if set, otherwise the formatted name.
    pub fn render(&self, overrides: &Overrides) -> String {
        match &self.value {
            Some(value) => value.to_string(),
            None => SegmentFormatter::new(self.format, overrides).transform(&self.name),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{value}"),
            None => f.write_str(&self.name),
        }
    }
}
