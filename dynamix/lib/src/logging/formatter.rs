//! The content formatter seam used by [`ResponseLogger`](super::ResponseLogger).

use std::fmt;

use strum::{Display, EnumString};

use crate::error::FormatError;

/// Suffix appended to bodies cut at `max_length`.
pub const TRUNCATION_MARKER: &str = "... [truncated]";

/// Broad kind of content a formatter handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ContentCategory {
    Text,
    Binary,
    Structured,
    Form,
}

/// Renders a response body for logging.
///
/// Implementors provide [`render`](Self::render); the provided
/// [`format`](Self::format) turns failures into an inline placeholder and
/// applies truncation, so formatting a body never fails.
pub trait ContentFormatter: fmt::Debug + Send + Sync {
    /// Label used in error placeholders, e.g. `JSON`.
    fn kind(&self) -> &'static str;

    fn category(&self) -> ContentCategory;

    /// Lowercase media types matched as substrings of the content type.
    fn content_types(&self) -> &'static [&'static str];

    /// Whether this formatter handles `content_type`.
    fn can_handle(&self, content_type: &str) -> bool {
        let content_type = content_type.to_ascii_lowercase();
        self.content_types()
            .iter()
            .any(|candidate| content_type.contains(candidate))
    }

    /// Renders the body without truncation.
    ///
    /// ## Errors
    ///
    /// Returns an error if the body is not valid for this content type.
    fn render(&self, body: &[u8]) -> Result<String, FormatError>;

    /// Renders the body, truncating to `max_length` characters.
    fn format(&self, body: &[u8], max_length: Option<usize>) -> String {
        match self.render(body) {
            Ok(rendered) => truncate(rendered, max_length),
            Err(e) => format!("[Error formatting {}: {e}]", self.kind()),
        }
    }
}

/// Cuts `text` to `max_length` characters and appends [`TRUNCATION_MARKER`].
///
/// `None` and `Some(0)` mean unlimited.
pub fn truncate(text: String, max_length: Option<usize>) -> String {
    let Some(max) = max_length.filter(|max| *max > 0) else {
        return text;
    };
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}{TRUNCATION_MARKER}", &text[..cut]),
        None => text,
    }
}

/// Strips parameters from a content type, e.g. `text/plain; charset=utf-8`.
pub(crate) fn mime_essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_longer_than_max() {
        let out = truncate("abcdef".to_string(), Some(3));
        assert_eq!(out, "abc... [truncated]");
    }

    #[test]
    fn test_truncate_exactly_max_is_untouched() {
        assert_eq!(truncate("abc".to_string(), Some(3)), "abc");
    }

    #[test]
    fn test_truncate_empty() {
        assert_eq!(truncate(String::new(), Some(3)), "");
    }

    #[test]
    fn test_truncate_unlimited() {
        assert_eq!(truncate("abcdef".to_string(), None), "abcdef");
        assert_eq!(truncate("abcdef".to_string(), Some(0)), "abcdef");
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        assert_eq!(truncate("héllo".to_string(), Some(2)), "hé... [truncated]");
    }

    #[test]
    fn test_mime_essence() {
        assert_eq!(mime_essence("Text/Plain; charset=utf-8"), "text/plain");
        assert_eq!(mime_essence(""), "");
    }

    #[test]
    fn test_category_names() {
        assert_eq!(ContentCategory::Structured.to_string(), "structured");
        assert_eq!("form".parse::<ContentCategory>().unwrap(), ContentCategory::Form);
    }
}
