//! Body formatting errors.

use thiserror::Error;

/// A response body could not be rendered by a content formatter.
///
/// These never leave the logging layer; the logger renders them inline as
/// `[Error formatting <KIND>: <reason>]`.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("invalid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Xml(#[from] quick_xml::Error),

    #[error("{0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{0}")]
    Csv(#[from] csv::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Multipart body without a `boundary=` marker.
    #[error("no boundary found in multipart form data")]
    MissingBoundary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_boundary_message() {
        assert_eq!(
            FormatError::MissingBoundary.to_string(),
            "no boundary found in multipart form data"
        );
    }

    #[test]
    fn test_json_error_is_passed_through() {
        let err: FormatError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(err.to_string().contains("EOF"));
    }
}
