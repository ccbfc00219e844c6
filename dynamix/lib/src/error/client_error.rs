//! HTTP client and network errors.

use thiserror::Error;

use crate::response::Response;

/// Errors from the HTTP client layer.
///
/// Transport failures are passed through untouched; non-success statuses
/// carry the full buffered response so callers can inspect the body.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed due to network or protocol error.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned a status outside the 2xx/3xx range.
    #[error("HTTP {status} for {}", .response.url())]
    HttpStatus {
        /// The HTTP status code returned.
        status: u16,
        /// The response that carried the error status.
        response: Box<Response>,
    },
}

impl ClientError {
    /// Returns the HTTP status code if this is an HTTP status error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
        }
    }

    /// Returns the error response, if the server sent one.
    pub fn response(&self) -> Option<&Response> {
        match self {
            Self::HttpStatus { response, .. } => Some(response),
            Self::Request(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    fn status_error(status: u16) -> ClientError {
        let url = url::Url::parse("http://x/users").unwrap();
        let response = Response::new(
            StatusCode::from_u16(status).unwrap(),
            url,
            reqwest::header::HeaderMap::new(),
            bytes::Bytes::from_static(b"nope"),
        );
        ClientError::HttpStatus {
            status,
            response: Box::new(response),
        }
    }

    #[test]
    fn test_status_error_display_names_url() {
        assert_eq!(status_error(404).to_string(), "HTTP 404 for http://x/users");
    }

    #[test]
    fn test_status_error_carries_response() {
        let err = status_error(418);
        assert_eq!(err.status_code(), Some(418));
        assert_eq!(err.response().map(|r| r.text()), Some("nope".to_string()));
    }
}
