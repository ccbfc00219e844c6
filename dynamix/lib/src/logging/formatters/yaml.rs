use crate::error::FormatError;
use crate::logging::formatter::{ContentCategory, ContentFormatter};

/// Re-serializes YAML bodies into a normalized layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlFormatter;

impl ContentFormatter for YamlFormatter {
    fn kind(&self) -> &'static str {
        "YAML"
    }

    fn category(&self) -> ContentCategory {
        ContentCategory::Structured
    }

    fn content_types(&self) -> &'static [&'static str] {
        &["application/yaml", "text/yaml", "application/x-yaml"]
    }

    fn render(&self, body: &[u8]) -> Result<String, FormatError> {
        let parsed: serde_yaml::Value = serde_yaml::from_slice(body)?;
        Ok(serde_yaml::to_string(&parsed)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_flow_style() {
        let out = YamlFormatter.format(b"{name: john, tags: [a, b]}", None);
        assert_eq!(out, "name: john\ntags:\n- a\n- b\n");
    }

    #[test]
    fn test_invalid_yaml_placeholder() {
        let out = YamlFormatter.format(b"key: [unclosed", None);
        assert!(out.starts_with("[Error formatting YAML: "));
    }
}
