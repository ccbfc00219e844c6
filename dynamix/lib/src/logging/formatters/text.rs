use crate::error::FormatError;
use crate::logging::formatter::{ContentCategory, ContentFormatter, mime_essence};

/// Passes `text/plain` bodies through, replacing invalid UTF-8.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFormatter;

impl ContentFormatter for TextFormatter {
    fn kind(&self) -> &'static str {
        "text"
    }

    fn category(&self) -> ContentCategory {
        ContentCategory::Text
    }

    fn content_types(&self) -> &'static [&'static str] {
        &["text/plain"]
    }

    // exact media type match; `text/plain-ish` variants fall through to binary
    fn can_handle(&self, content_type: &str) -> bool {
        let essence = mime_essence(content_type);
        self.content_types().contains(&essence.as_str())
    }

    fn render(&self, body: &[u8]) -> Result<String, FormatError> {
        Ok(String::from_utf8_lossy(body).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::formatter::TRUNCATION_MARKER;

    #[test]
    fn test_matches_essence_only() {
        assert!(TextFormatter.can_handle("text/plain"));
        assert!(TextFormatter.can_handle("Text/Plain; charset=utf-8"));
        assert!(!TextFormatter.can_handle("text/plainish"));
        assert!(!TextFormatter.can_handle("text/html"));
    }

    #[test]
    fn test_long_body_ends_with_marker() {
        let body = "x".repeat(1500);
        let out = TextFormatter.format(body.as_bytes(), Some(1000));
        assert!(out.ends_with(TRUNCATION_MARKER));
        assert_eq!(out.len(), 1000 + TRUNCATION_MARKER.len());
    }

    #[test]
    fn test_boundary_lengths_do_not_panic() {
        assert_eq!(TextFormatter.format(b"", Some(1000)), "");
        let exact = "y".repeat(1000);
        assert_eq!(TextFormatter.format(exact.as_bytes(), Some(1000)), exact);
    }
}
