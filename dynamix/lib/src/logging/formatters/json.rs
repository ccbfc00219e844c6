use serde_json::Value;

use crate::error::FormatError;
use crate::logging::formatter::{ContentCategory, ContentFormatter};

/// Pretty-prints JSON bodies with two-space indentation.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl ContentFormatter for JsonFormatter {
    fn kind(&self) -> &'static str {
        "JSON"
    }

    fn category(&self) -> ContentCategory {
        ContentCategory::Structured
    }

    fn content_types(&self) -> &'static [&'static str] {
        &["application/json"]
    }

    fn render(&self, body: &[u8]) -> Result<String, FormatError> {
        let parsed: Value = serde_json::from_slice(body)?;
        Ok(serde_json::to_string_pretty(&parsed)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pretty_prints() {
        let out = JsonFormatter.format(br#"{"a":[1,2]}"#, None);
        assert_eq!(out, "{\n  \"a\": [\n    1,\n    2\n  ]\n}");
    }

    #[test]
    fn test_matches_with_charset() {
        assert!(JsonFormatter.can_handle("application/json; charset=utf-8"));
        assert!(!JsonFormatter.can_handle("text/plain"));
    }

    #[test]
    fn test_invalid_json_placeholder() {
        let out = JsonFormatter.format(b"{nope", None);
        assert!(out.starts_with("[Error formatting JSON: "));
        assert!(out.ends_with(']'));
    }

    #[test]
    fn test_truncates() {
        let out = JsonFormatter.format(br#"{"key":"value"}"#, Some(5));
        assert_eq!(out, "{\n  \"... [truncated]");
    }
}
