use scraper::{ElementRef, Html, Node};

use crate::error::FormatError;
use crate::logging::formatter::{ContentCategory, ContentFormatter};

const INDENT: &str = "  ";

/// Elements that never have a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Prettifies HTML: one tag or text run per line, indented by depth.
///
/// Parsing is lenient, so malformed markup is repaired rather than rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlFormatter;

impl ContentFormatter for HtmlFormatter {
    fn kind(&self) -> &'static str {
        "HTML"
    }

    fn category(&self) -> ContentCategory {
        ContentCategory::Structured
    }

    fn content_types(&self) -> &'static [&'static str] {
        &["text/html"]
    }

    fn render(&self, body: &[u8]) -> Result<String, FormatError> {
        let text = std::str::from_utf8(body)?;
        let document = Html::parse_document(text);
        let mut lines = Vec::new();

        for child in document.tree.root().children() {
            if let Node::Doctype(doctype) = child.value() {
                lines.push(format!("<!DOCTYPE {}>", doctype.name()));
            }
        }
        write_element(document.root_element(), 0, &mut lines);

        Ok(lines.join("\n"))
    }
}

fn write_element(element: ElementRef<'_>, depth: usize, lines: &mut Vec<String>) {
    let indent = INDENT.repeat(depth);
    let tag = element.value();
    let attrs: String = tag
        .attrs()
        .map(|(name, value)| format!(" {name}=\"{value}\""))
        .collect();
    lines.push(format!("{indent}<{}{attrs}>", tag.name()));

    if VOID_ELEMENTS.contains(&tag.name()) {
        return;
    }

    for child in element.children() {
        match child.value() {
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    write_element(child, depth + 1, lines);
                }
            }
            Node::Text(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    lines.push(format!("{indent}{INDENT}{trimmed}"));
                }
            }
            Node::Comment(comment) => {
                lines.push(format!("{indent}{INDENT}<!--{}-->", &*comment.comment));
            }
            _ => {}
        }
    }

    lines.push(format!("{indent}</{}>", tag.name()));
}
