//! Dynamic path builder.
//!
//! [`DynamicPath`] accumulates [`PathSegment`]s through chained calls and
//! resolves them into a slash-joined path. Every call returns a new builder;
//! the segment list is a persistent linked list, so builders derived from a
//! common prefix share it without interfering with one another.
//!
//! ## Examples
//!
//! ```rust
//! use dynamix_lib::{DynamicPath, SegmentFormat};
//!
//! let path = DynamicPath::default()
//!     .with_segment("users")
//!     .with_segment("user_id")
//!     .with_value_or_format("john")?
//!     .with_segment("blog_posts");
//!
//! assert_eq!(path.resolve(), "users/john/blog-posts");
//!
//! let camel = path.with_segment("last_comment").with_value_or_format(SegmentFormat::Camel)?;
//! assert_eq!(camel.resolve(), "users/john/blog-posts/lastComment");
//! # Ok::<(), dynamix_lib::PathError>(())
//! ```

use std::sync::Arc;

use url::Url;

use crate::error::PathError;
use crate::segment::{Overrides, PathSegment, SegmentFormat, SegmentValue};

/// Argument to [`DynamicPath::with_value_or_format`].
///
/// A format re-renders the last segment's name; a value replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentKey {
    /// Change how the last segment's name is rendered.
    Format(SegmentFormat),
    /// Emit this literal instead of the last segment's name.
    Value(SegmentValue),
}

impl From<SegmentFormat> for SegmentKey {
    fn from(format: SegmentFormat) -> Self {
        Self::Format(format)
    }
}

impl From<SegmentValue> for SegmentKey {
    fn from(value: SegmentValue) -> Self {
        Self::Value(value)
    }
}

macro_rules! value_key {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for SegmentKey {
                fn from(value: $ty) -> Self {
                    Self::Value(SegmentValue::from(value))
                }
            }
        )*
    };
}

value_key!(&str, String, &String, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

#[derive(Debug)]
struct Node {
    segment: PathSegment,
    parent: Option<Arc<Node>>,
}

/// Immutable, cheaply clonable request path under construction.
#[derive(Debug, Clone, Default)]
pub struct DynamicPath {
    tail: Option<Arc<Node>>,
    len: usize,
    default_format: SegmentFormat,
    overrides: Arc<Overrides>,
}

impl DynamicPath {
    /// Creates an empty path with a default format and override table.
    pub fn new(default_format: SegmentFormat, overrides: Arc<Overrides>) -> Self {
        Self {
            tail: None,
            len: 0,
            default_format,
            overrides,
        }
    }

    /// Appends a named segment rendered with the current default format.
    ///
    /// Any name is accepted; there is no route table to validate against.
    pub fn with_segment(&self, name: impl Into<String>) -> Self {
        let segment = PathSegment::new(name, self.default_format);
        self.push(segment, self.tail.clone())
    }

    /// Applies a value or a format to the most recently added segment.
    ///
    /// ## Errors
    ///
    /// Returns [`PathError::IndexBeforeSegment`] if the path is empty.
    pub fn with_value_or_format(&self, key: impl Into<SegmentKey>) -> Result<Self, PathError> {
        let Some(last) = &self.tail else {
            return Err(PathError::IndexBeforeSegment);
        };

        let segment = match key.into() {
            SegmentKey::Format(format) => last.segment.with_format(format),
            SegmentKey::Value(value) => last.segment.with_value(value),
        };

        let mut replaced = self.push(segment, last.parent.clone());
        replaced.len = self.len;
        Ok(replaced)
    }

    /// Returns a builder whose later segments use `format` by default.
    ///
    /// Segments already in the path keep the format they were created with.
    pub fn with_format(&self, format: SegmentFormat) -> Self {
        Self {
            default_format: format,
            ..self.clone()
        }
    }

    fn push(&self, segment: PathSegment, parent: Option<Arc<Node>>) -> Self {
        Self {
            tail: Some(Arc::new(Node { segment, parent })),
            len: self.len + 1,
            default_format: self.default_format,
            overrides: Arc::clone(&self.overrides),
        }
    }

    /// Number of segments in the path.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn default_format(&self) -> SegmentFormat {
        self.default_format
    }

    pub fn overrides(&self) -> &Overrides {
        &self.overrides
    }

    /// The most recently added segment.
    pub fn last(&self) -> Option<&PathSegment> {
        self.tail.as_deref().map(|node| &node.segment)
    }

    /// Segments in insertion order.
    pub fn segments(&self) -> Vec<&PathSegment> {
        let mut segments = Vec::with_capacity(self.len);
        let mut cursor = self.tail.as_deref();
        while let Some(node) = cursor {
            segments.push(&node.segment);
            cursor = node.parent.as_deref();
        }
        segments.reverse();
        segments
    }

    /// Renders every segment and joins them with `/`.
    ///
    /// An empty path resolves to the empty string.
    pub fn resolve(&self) -> String {
        self.segments()
            .into_iter()
            .map(|segment| segment.render(&self.overrides))
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Appends the resolved path to `base`.
    ///
    /// Slashes at the join are collapsed and trailing slashes dropped.
    /// Unsafe characters are percent-encoded by the URL parser.
    pub fn url(&self, base: &Url) -> Result<Url, url::ParseError> {
        let path = self.resolve();
        let joined = format!(
            "{}/{}",
            base.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(joined.trim_end_matches('/'))
    }
}
