use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::Overrides;

/// Naming convention applied to a segment name when it has no literal value
/// and no override.
///
/// ## Examples
///
/// ```rust
/// use dynamix_lib::SegmentFormat;
///
/// assert_eq!(SegmentFormat::Camel.apply("user_id"), "userId");
/// assert_eq!(SegmentFormat::default().apply("user_id"), "user-id");
/// assert_eq!(SegmentFormat::parse_or_default("screaming_snake"), SegmentFormat::ScreamingSnake);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum SegmentFormat {
    /// `user_id` -> `userId`
    Camel,
    /// `user_id` -> `userid`
    Flat,
    /// `user_id` -> `user-id`
    #[default]
    Kebab,
    /// `user_id` -> `UserId`
    Pascal,
    /// `user_id` -> `USER_ID`
    ScreamingSnake,
    /// `user-id` -> `user_id`
    Snake,
}

impl SegmentFormat {
    /// Parses a format tag, falling back to kebab-case for anything unknown.
    ///
    /// The fallback is silent apart from a debug event. Callers that want to
    /// reject bad input should use [`str::parse`] instead.
    pub fn parse_or_default(tag: &str) -> Self {
        tag.trim().parse().unwrap_or_else(|_| {
            tracing::debug!(tag, "Unknown segment format, using kebab-case");
            Self::default()
        })
    }

    /// Applies this convention to a raw segment name.
    pub fn apply(self, segment: &str) -> String {
        match self {
            Self::Camel => {
                let mut tokens = segment.split('_');
                let mut out = tokens.next().unwrap_or_default().to_string();
                for token in tokens {
                    out.push_str(&capitalize(token));
                }
                out
            }
            Self::Flat => segment.replace('_', "").to_lowercase(),
            Self::Kebab => segment.replace('_', "-").to_lowercase(),
            Self::Pascal => segment.split('_').map(capitalize).collect(),
            Self::ScreamingSnake => segment.to_uppercase(),
            Self::Snake => segment.replace('-', "_").to_lowercase(),
        }
    }
}

/// Uppercases the first character and lowercases the rest.
fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Renders segment names using a case convention and an override table.
///
/// Overrides are exact matches on the raw name and win over any format.
#[derive(Debug, Clone, Copy)]
pub struct SegmentFormatter<'a> {
    format: SegmentFormat,
    overrides: &'a Overrides,
}

impl<'a> SegmentFormatter<'a> {
    /// Creates a formatter for one case convention.
    pub fn new(format: SegmentFormat, overrides: &'a Overrides) -> Self {
        Self { format, overrides }
    }

    /// Returns the rendered form of `segment`.
    pub fn transform(&self, segment: &str) -> String {
        match self.overrides.get(segment) {
            Some(literal) => literal.clone(),
            None => self.format.apply(segment),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_format_table() {
        assert_eq!(SegmentFormat::Camel.apply("foo_bar"), "fooBar");
        assert_eq!(SegmentFormat::Flat.apply("foo_bar"), "foobar");
        assert_eq!(SegmentFormat::Kebab.apply("foo_bar"), "foo-bar");
        assert_eq!(SegmentFormat::Pascal.apply("foo_bar"), "FooBar");
        assert_eq!(SegmentFormat::ScreamingSnake.apply("foo_bar"), "FOO_BAR");
        assert_eq!(SegmentFormat::Snake.apply("foo-bar"), "foo_bar");
    }

    #[test]
    fn test_camel_keeps_first_token_and_lowers_the_rest() {
        assert_eq!(SegmentFormat::Camel.apply("hello_World"), "helloWorld");
        assert_eq!(SegmentFormat::Camel.apply("Hello_wORLD_x"), "HelloWorldX");
        assert_eq!(SegmentFormat::Camel.apply("single"), "single");
    }

    #[test]
    fn test_flat_and_kebab_lowercase() {
        assert_eq!(SegmentFormat::Flat.apply("hello_World"), "helloworld");
        assert_eq!(SegmentFormat::Kebab.apply("Hello_World"), "hello-world");
    }

    #[test]
    fn test_empty_tokens() {
        assert_eq!(SegmentFormat::Pascal.apply("a__b"), "AB");
        assert_eq!(SegmentFormat::Camel.apply(""), "");
        assert_eq!(SegmentFormat::Pascal.apply(""), "");
    }

    #[test]
    fn test_default_is_kebab() {
        assert_eq!(SegmentFormat::default(), SegmentFormat::Kebab);
    }

    #[test]
    fn test_parse_round_trips_tags() {
        for format in SegmentFormat::iter() {
            assert_eq!(format.to_string().parse::<SegmentFormat>().unwrap(), format);
        }
        assert_eq!(SegmentFormat::ScreamingSnake.to_string(), "screaming_snake");
    }

    #[test]
    fn test_unknown_tag_falls_back_to_kebab() {
        assert_eq!(SegmentFormat::parse_or_default("train_case"), SegmentFormat::Kebab);
        assert_eq!(SegmentFormat::parse_or_default(""), SegmentFormat::Kebab);
        assert_eq!(SegmentFormat::parse_or_default(" CAMEL "), SegmentFormat::Camel);
    }

    #[test]
    fn test_serde_uses_snake_case_tags() {
        let json = serde_json::to_string(&SegmentFormat::ScreamingSnake).unwrap();
        assert_eq!(json, "\"screaming_snake\"");
        let parsed: SegmentFormat = serde_json::from_str("\"pascal\"").unwrap();
        assert_eq!(parsed, SegmentFormat::Pascal);
    }

    #[test]
    fn test_override_wins_for_every_format() {
        let mut overrides = Overrides::new();
        overrides.insert("user_id".to_string(), "UID".to_string());

        for format in SegmentFormat::iter() {
            let formatter = SegmentFormatter::new(format, &overrides);
            assert_eq!(formatter.transform("user_id"), "UID");
        }
    }

    #[test]
    fn test_override_is_exact_match() {
        let mut overrides = Overrides::new();
        overrides.insert("user_id".to_string(), "UID".to_string());
        let formatter = SegmentFormatter::new(SegmentFormat::Kebab, &overrides);

        assert_eq!(formatter.transform("User_Id"), "user-id");
        assert_eq!(formatter.transform("user_ids"), "user-ids");
    }
}
