//! Parsing of positional segment tokens and `key=value` style options.
//!
//! A segment token is `name`, `name=value`, `name@format` or
//! `name@format=value`. Values render exactly as typed.

use dynamix_lib::{DynamicPath, PathError, SegmentFormat, SegmentValue};

/// One positional path token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentToken {
    pub name: String,
    pub format: Option<SegmentFormat>,
    pub value: Option<SegmentValue>,
}

impl SegmentToken {
    /// Parses a token.
    ///
    /// ## Errors
    ///
    /// Returns a message if the name is empty or the format tag is unknown.
    pub fn parse(token: &str) -> Result<Self, String> {
        let (head, value) = match token.split_once('=') {
            Some((head, value)) => (head, Some(parse_value(value))),
            None => (token, None),
        };
        let (name, format) = match head.split_once('@') {
            Some((name, tag)) => {
                let format = tag
                    .parse::<SegmentFormat>()
                    .map_err(|_| format!("unknown segment format '{tag}' in '{token}'"))?;
                (name, Some(format))
            }
            None => (head, None),
        };
        if name.is_empty() {
            return Err(format!("segment token '{token}' has no name"));
        }
        Ok(Self {
            name: name.to_string(),
            format,
            value,
        })
    }

    /// Appends this token to `path`: the segment, then its format, then its value.
    pub fn apply(&self, path: &DynamicPath) -> Result<DynamicPath, PathError> {
        let mut path = path.with_segment(self.name.as_str());
        if let Some(format) = self.format {
            path = path.with_value_or_format(format)?;
        }
        if let Some(value) = &self.value {
            path = path.with_value_or_format(value.clone())?;
        }
        Ok(path)
    }
}

/// Integers are kept as integers only when they print back to the same text.
fn parse_value(raw: &str) -> SegmentValue {
    match raw.parse::<i64>() {
        Ok(n) if n.to_string() == raw => SegmentValue::from(n),
        _ => SegmentValue::from(raw),
    }
}

/// Applies every token to `root` in order.
pub fn build_path(root: &DynamicPath, tokens: &[SegmentToken]) -> Result<DynamicPath, PathError> {
    tokens
        .iter()
        .try_fold(root.clone(), |path, token| token.apply(&path))
}

/// Clap parser for `key=value` options.
pub fn key_value(raw: &str) -> Result<(String, String), String> {
    split_pair(raw, '=')
}

/// Clap parser for `name:value` headers.
pub fn header_pair(raw: &str) -> Result<(String, String), String> {
    split_pair(raw, ':')
}

fn split_pair(raw: &str, separator: char) -> Result<(String, String), String> {
    match raw.split_once(separator) {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected KEY{separator}VALUE, got '{raw}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_name() {
        let token = SegmentToken::parse("users").unwrap();
        assert_eq!(token.name, "users");
        assert_eq!(token.format, None);
        assert_eq!(token.value, None);
    }

    #[test]
    fn test_integer_value() {
        let token = SegmentToken::parse("posts=123").unwrap();
        assert_eq!(token.value, Some(SegmentValue::Integer(123)));
    }

    #[test]
    fn test_leading_zeros_and_signs_render_verbatim() {
        let tokens: Vec<SegmentToken> = ["orders", "order_id=007", "delta", "step=+5"]
            .iter()
            .map(|t| SegmentToken::parse(t).unwrap())
            .collect();
        assert_eq!(tokens[1].value, Some(SegmentValue::Text("007".to_string())));
        let path = build_path(&DynamicPath::default(), &tokens).unwrap();
        assert_eq!(path.resolve(), "orders/007/delta/+5");
    }

    #[test]
    fn test_negative_integer_value() {
        let token = SegmentToken::parse("offset=-3").unwrap();
        assert_eq!(token.value, Some(SegmentValue::Integer(-3)));
    }

    #[test]
    fn test_text_value_keeps_everything_after_first_equals() {
        let token = SegmentToken::parse("q=a=b").unwrap();
        assert_eq!(token.value, Some(SegmentValue::Text("a=b".to_string())));
    }

    #[test]
    fn test_format_and_value() {
        let token = SegmentToken::parse("last_comment@camel=7").unwrap();
        assert_eq!(token.name, "last_comment");
        assert_eq!(token.format, Some(SegmentFormat::Camel));
        assert_eq!(token.value, Some(SegmentValue::Integer(7)));
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(SegmentToken::parse("x@loud").is_err());
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(SegmentToken::parse("=5").is_err());
        assert!(SegmentToken::parse("@snake").is_err());
    }

    #[test]
    fn test_build_path() {
        let tokens: Vec<SegmentToken> = ["users=john", "blog_posts", "last_comment@camel"]
            .iter()
            .map(|t| SegmentToken::parse(t).unwrap())
            .collect();
        let path = build_path(&DynamicPath::default(), &tokens).unwrap();
        assert_eq!(path.resolve(), "john/blog-posts/lastComment");
    }

    #[test]
    fn test_pairs() {
        assert_eq!(key_value("a=1").unwrap(), ("a".to_string(), "1".to_string()));
        assert_eq!(
            header_pair("Accept: text/csv").unwrap(),
            ("Accept".to_string(), "text/csv".to_string())
        );
        assert!(key_value("novalue").is_err());
        assert!(header_pair(":x").is_err());
    }
}
