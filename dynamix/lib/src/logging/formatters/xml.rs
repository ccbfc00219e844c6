use quick_xml::events::Event;
use quick_xml::{Reader, Writer};

use crate::error::FormatError;
use crate::logging::formatter::{ContentCategory, ContentFormatter};

/// Re-indents XML bodies.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlFormatter;

impl ContentFormatter for XmlFormatter {
    fn kind(&self) -> &'static str {
        "XML"
    }

    fn category(&self) -> ContentCategory {
        ContentCategory::Structured
    }

    fn content_types(&self) -> &'static [&'static str] {
        &["application/xml", "text/xml"]
    }

    fn render(&self, body: &[u8]) -> Result<String, FormatError> {
        let text = std::str::from_utf8(body)?;
        let mut reader = Reader::from_str(text);
        reader.config_mut().trim_text(true);
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        loop {
            match reader.read_event()? {
                Event::Eof => break,
                event => writer.write_event(event)?,
            }
        }

        Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indents_nested_elements() {
        let out = XmlFormatter.format(b"<a><b>1</b><c/></a>", None);
        assert_eq!(out, "<a>\n  <b>1</b>\n  <c/>\n</a>");
    }

    #[test]
    fn test_handles_text_xml() {
        assert!(XmlFormatter.can_handle("text/xml; charset=utf-8"));
        assert!(XmlFormatter.can_handle("application/xml"));
    }

    #[test]
    fn test_mismatched_tags_placeholder() {
        let out = XmlFormatter.format(b"<a><b></a>", None);
        assert!(out.starts_with("[Error formatting XML: "));
    }
}
