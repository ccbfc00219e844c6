use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Serialize;

use crate::error::FormatError;
use crate::logging::formatter::{ContentCategory, ContentFormatter};

/// Largest body whose content is embedded, in bytes.
pub const DEFAULT_MAX_FILE_SIZE: usize = 1024 * 1024;

/// Fallback formatter: reports the size and optionally the base64 content.
///
/// Handles every content type, so it belongs at the end of a registry.
#[derive(Debug, Clone, Copy)]
pub struct BinaryFormatter {
    pub include_content: bool,
    pub max_file_size: usize,
}

impl Default for BinaryFormatter {
    fn default() -> Self {
        Self {
            include_content: false,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl BinaryFormatter {
    /// A formatter that embeds content up to [`DEFAULT_MAX_FILE_SIZE`].
    pub fn with_content() -> Self {
        Self {
            include_content: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Serialize)]
struct BinarySummary {
    size: String,
    binary: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
}

impl ContentFormatter for BinaryFormatter {
    fn kind(&self) -> &'static str {
        "binary content"
    }

    fn category(&self) -> ContentCategory {
        ContentCategory::Binary
    }

    fn content_types(&self) -> &'static [&'static str] {
        &["application/octet-stream"]
    }

    fn can_handle(&self, _content_type: &str) -> bool {
        true
    }

    fn render(&self, body: &[u8]) -> Result<String, FormatError> {
        let summary = BinarySummary {
            size: format!("{:.2}KB", body.len() as f64 / 1024.0),
            binary: true,
            content: (self.include_content && body.len() <= self.max_file_size)
                .then(|| BASE64.encode(body)),
        };
        Ok(serde_json::to_string_pretty(&summary)?)
    }

    // the summary is never truncated
    fn format(&self, body: &[u8], _max_length: Option<usize>) -> String {
        match self.render(body) {
            Ok(rendered) => rendered,
            Err(e) => format!("[Error formatting {}: {e}]", self.kind()),
        }
    }
}
