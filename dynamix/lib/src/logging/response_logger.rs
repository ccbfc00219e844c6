//! Debug logging of HTTP responses with pluggable body formatters.

use std::collections::{BTreeMap, HashSet};

use reqwest::StatusCode;
use reqwest::header::HeaderMap;

use super::formatter::ContentFormatter;
use super::formatters::{
    BinaryFormatter, CsvFormatter, FormDataFormatter, HtmlFormatter, JsonFormatter, TextFormatter,
    XmlFormatter, YamlFormatter,
};
use crate::response::Response;

/// Default cap on logged body length, in characters.
pub const DEFAULT_MAX_BODY_LENGTH: usize = 1000;

/// Replacement for sensitive header values.
pub const MASK: &str = "**********";

const DEFAULT_SENSITIVE_HEADERS: &[&str] = &[
    "authorization",
    "cookie",
    "set-cookie",
    "x-api-key",
    "api-key",
    "access-token",
    "refresh-token",
];

/// Logs responses at DEBUG level with masked headers and a formatted body.
///
/// The formatter registry is searched in order and the first formatter whose
/// `can_handle` accepts the content type renders the body. The default
/// registry ends with [`BinaryFormatter`], which accepts anything.
///
/// ## Examples
///
/// ```rust,ignore
/// use dynamix_lib::logging::ResponseLogger;
///
/// let logger = ResponseLogger::new()
///     .max_body_length(200)
///     .sensitive_header("x-session");
/// ```
#[derive(Debug)]
pub struct ResponseLogger {
    enabled: bool,
    max_body_length: usize,
    sensitive_headers: HashSet<String>,
    formatters: Vec<Box<dyn ContentFormatter>>,
}

impl Default for ResponseLogger {
    fn default() -> Self {
        Self {
            enabled: true,
            max_body_length: DEFAULT_MAX_BODY_LENGTH,
            sensitive_headers: DEFAULT_SENSITIVE_HEADERS
                .iter()
                .map(|h| h.to_string())
                .collect(),
            formatters: default_formatters(),
        }
    }
}

/// The built-in registry, most specific first and binary last.
pub fn default_formatters() -> Vec<Box<dyn ContentFormatter>> {
    vec![
        Box::new(JsonFormatter),
        Box::new(XmlFormatter),
        Box::new(HtmlFormatter),
        Box::new(CsvFormatter),
        Box::new(FormDataFormatter),
        Box::new(YamlFormatter),
        Box::new(TextFormatter),
        Box::new(BinaryFormatter::with_content()),
    ]
}

impl ResponseLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets the body cap. `0` logs bodies in full.
    pub fn max_body_length(mut self, max: usize) -> Self {
        self.max_body_length = max;
        self
    }

    /// Adds a header whose value is masked. Matching is case-insensitive.
    pub fn sensitive_header(mut self, name: impl AsRef<str>) -> Self {
        self.sensitive_headers
            .insert(name.as_ref().to_ascii_lowercase());
        self
    }

    /// Puts `formatter` ahead of the existing registry.
    pub fn prepend_formatter(mut self, formatter: Box<dyn ContentFormatter>) -> Self {
        self.formatters.insert(0, formatter);
        self
    }

    /// Replaces the whole registry.
    pub fn with_formatters(mut self, formatters: Vec<Box<dyn ContentFormatter>>) -> Self {
        self.formatters = formatters;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn formatters(&self) -> &[Box<dyn ContentFormatter>] {
        &self.formatters
    }

    /// First formatter in the registry that accepts `content_type`.
    pub fn formatter_for(&self, content_type: &str) -> Option<&dyn ContentFormatter> {
        self.formatters
            .iter()
            .find(|f| f.can_handle(content_type))
            .map(|f| &**f)
    }

    /// Headers with sensitive values replaced by [`MASK`], sorted by name.
    pub fn mask_headers(&self, headers: &HeaderMap) -> BTreeMap<String, String> {
        headers
            .iter()
            .map(|(name, value)| {
                let name = name.as_str().to_string();
                let value = if self.sensitive_headers.contains(&name) {
                    MASK.to_string()
                } else {
                    String::from_utf8_lossy(value.as_bytes()).into_owned()
                };
                (name, value)
            })
            .collect()
    }

    /// Renders a body through the registry, truncated to `max_length`.
    pub fn format_body(&self, content_type: &str, body: &[u8], max_length: Option<usize>) -> String {
        match self.formatter_for(content_type) {
            Some(formatter) => formatter.format(body, max_length),
            None => format!("[No formatter available for content-type: {content_type}]"),
        }
    }

    /// The logged body for `response`, or `None` for 204 and empty bodies.
    pub fn response_body(&self, response: &Response) -> Option<String> {
        if response.status() == StatusCode::NO_CONTENT || response.bytes().is_empty() {
            return None;
        }
        let content_type = response.content_type().unwrap_or_default().to_ascii_lowercase();
        Some(self.format_body(
            &content_type,
            response.bytes(),
            Some(self.max_body_length),
        ))
    }

    /// Emits a DEBUG event describing `response`. No-op when disabled.
    pub fn log_response(&self, response: &Response) {
        if !self.enabled {
            return;
        }

        let headers = self.mask_headers(response.headers());
        let elapsed = format!("{:.3}s", response.elapsed().as_secs_f64());

        match self.response_body(response) {
            Some(body) => tracing::debug!(
                url = %response.url(),
                status_code = response.status().as_u16(),
                elapsed = %elapsed,
                headers = ?headers,
                body = %body,
                "HTTP response"
            ),
            None => tracing::debug!(
                url = %response.url(),
                status_code = response.status().as_u16(),
                elapsed = %elapsed,
                headers = ?headers,
                "HTTP response"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormatError;
    use crate::logging::formatter::ContentCategory;
    use bytes::Bytes;
    use reqwest::header::{HeaderValue, CONTENT_TYPE};
    use tracing_test::traced_test;
    use url::Url;

    fn response(status: u16, content_type: &str, body: &'static [u8]) -> Response {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_str(content_type).unwrap());
        headers.insert("authorization", HeaderValue::from_static("Bearer secret"));
        headers.insert("x-request-id", HeaderValue::from_static("abc"));
        Response::new(
            StatusCode::from_u16(status).unwrap(),
            Url::parse("http://x/users/john").unwrap(),
            headers,
            Bytes::from_static(body),
        )
    }

    #[derive(Debug)]
    struct ShoutFormatter;

    impl ContentFormatter for ShoutFormatter {
        fn kind(&self) -> &'static str {
            "shout"
        }

        fn category(&self) -> ContentCategory {
            ContentCategory::Text
        }

        fn content_types(&self) -> &'static [&'static str] {
            &["text/plain"]
        }

        fn render(&self, body: &[u8]) -> Result<String, FormatError> {
            Ok(std::str::from_utf8(body)?.to_uppercase())
        }
    }

    #[test]
    fn test_masks_sensitive_headers() {
        let logger = ResponseLogger::new();
        let masked = logger.mask_headers(response(200, "text/plain", b"").headers());
        assert_eq!(masked["authorization"], MASK);
        assert_eq!(masked["x-request-id"], "abc");
    }

    #[test]
    fn test_custom_sensitive_header_case_insensitive() {
        let logger = ResponseLogger::new().sensitive_header("X-Request-ID");
        let masked = logger.mask_headers(response(200, "text/plain", b"").headers());
        assert_eq!(masked["x-request-id"], MASK);
    }

    #[test]
    fn test_default_registry_order() {
        let logger = ResponseLogger::new();
        let kinds: Vec<&str> = logger.formatters().iter().map(|f| f.kind()).collect();
        assert_eq!(
            kinds,
            ["JSON", "XML", "HTML", "CSV", "form data", "YAML", "text", "binary content"]
        );
    }

    #[test]
    fn test_unknown_content_type_falls_back_to_binary() {
        let logger = ResponseLogger::new();
        let formatter = logger.formatter_for("image/png").unwrap();
        assert_eq!(formatter.category(), ContentCategory::Binary);
    }

    #[test]
    fn test_empty_registry_placeholder() {
        let logger = ResponseLogger::new().with_formatters(Vec::new());
        assert_eq!(
            logger.format_body("text/plain", b"x", None),
            "[No formatter available for content-type: text/plain]"
        );
    }

    #[test]
    fn test_prepended_formatter_wins() {
        let logger = ResponseLogger::new().prepend_formatter(Box::new(ShoutFormatter));
        assert_eq!(logger.format_body("text/plain", b"hey", None), "HEY");
    }

    #[test]
    fn test_no_body_for_204_or_empty() {
        let logger = ResponseLogger::new();
        assert!(logger.response_body(&response(204, "text/plain", b"x")).is_none());
        assert!(logger.response_body(&response(200, "text/plain", b"")).is_none());
    }

    #[test]
    fn test_body_truncated_to_max() {
        let logger = ResponseLogger::new().max_body_length(4);
        let body = logger
            .response_body(&response(200, "text/plain", b"abcdefgh"))
            .unwrap();
        assert_eq!(body, "abcd... [truncated]");
    }

    #[test]
    #[traced_test]
    fn test_log_response_emits_debug_event() {
        let logger = ResponseLogger::new();
        logger.log_response(&response(200, "application/json", br#"{"id":1}"#));

        assert!(logs_contain("HTTP response"));
        assert!(logs_contain("http://x/users/john"));
        assert!(logs_contain("status_code=200"));
        assert!(logs_contain(MASK));
        assert!(!logs_contain("Bearer secret"));
    }

    #[test]
    #[traced_test]
    fn test_disabled_logger_is_silent() {
        let logger = ResponseLogger::new().enabled(false);
        logger.log_response(&response(200, "text/plain", b"quiet"));
        assert!(!logs_contain("HTTP response"));
    }
}
