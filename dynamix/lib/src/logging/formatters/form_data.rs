use serde::Serialize;

use crate::error::FormatError;
use crate::logging::formatter::{ContentCategory, ContentFormatter};

/// Lists the parts of a `multipart/form-data` body as JSON.
///
/// The boundary is read from a `boundary=` marker inside the body. Parts
/// containing NUL bytes are shown as `[Binary content]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormDataFormatter;

#[derive(Debug, Serialize)]
struct FormPart {
    headers: String,
    content: String,
}

impl ContentFormatter for FormDataFormatter {
    fn kind(&self) -> &'static str {
        "form data"
    }

    fn category(&self) -> ContentCategory {
        ContentCategory::Form
    }

    fn content_types(&self) -> &'static [&'static str] {
        &["multipart/form-data"]
    }

    fn render(&self, body: &[u8]) -> Result<String, FormatError> {
        let boundary = find_boundary(body).ok_or(FormatError::MissingBoundary)?;
        let chunks = split_on(body, boundary);

        // first chunk precedes the boundary, last one is the closing marker
        let parts: Vec<FormPart> = chunks
            .iter()
            .skip(1)
            .take(chunks.len().saturating_sub(2))
            .filter(|chunk| !chunk.is_empty())
            .map(|chunk| {
                let chunk = trim_delimiters(chunk);
                let (headers, content) = match find(chunk, b"\r\n\r\n") {
                    Some(at) => (&chunk[..at], &chunk[at + 4..]),
                    None => (chunk, &[][..]),
                };
                FormPart {
                    headers: String::from_utf8_lossy(headers).into_owned(),
                    content: if content.contains(&0) {
                        "[Binary content]".to_string()
                    } else {
                        String::from_utf8_lossy(content).into_owned()
                    },
                }
            })
            .collect();

        Ok(serde_json::to_string_pretty(&parts)?)
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn find_boundary(body: &[u8]) -> Option<&[u8]> {
    let marker = b"boundary=";
    let start = find(body, marker)? + marker.len();
    let rest = &body[start..];
    let end = find(rest, b"\r\n").unwrap_or(rest.len());
    let boundary = &rest[..end];
    (!boundary.is_empty()).then_some(boundary)
}

fn split_on<'a>(body: &'a [u8], separator: &[u8]) -> Vec<&'a [u8]> {
    let mut chunks = Vec::new();
    let mut rest = body;
    while let Some(at) = find(rest, separator) {
        chunks.push(&rest[..at]);
        rest = &rest[at + separator.len()..];
    }
    chunks.push(rest);
    chunks
}

fn trim_delimiters(mut chunk: &[u8]) -> &[u8] {
    let is_delimiter = |b: &u8| matches!(b, b'\r' | b'\n' | b'-');
    while chunk.first().is_some_and(is_delimiter) {
        chunk = &chunk[1..];
    }
    while chunk.last().is_some_and(is_delimiter) {
        chunk = &chunk[..chunk.len() - 1];
    }
    chunk
}
