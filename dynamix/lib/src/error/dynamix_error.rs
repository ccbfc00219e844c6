//! Top-level error type.

use super::{AuthError, ClientError, ConfigError, PathError};
use thiserror::Error;

/// Top-level error type for all dynamix operations.
///
/// This enum aggregates all error categories, enabling unified error handling
/// while preserving the ability to match on specific error types when needed.
///
/// ## Examples
///
/// ```rust,ignore
/// use dynamix_lib::DynamixError;
///
/// fn handle_error(err: DynamixError) {
///     match err {
///         DynamixError::Path(e) => eprintln!("Bad path chain: {e}"),
///         DynamixError::Client(e) => eprintln!("Request failed: {e}"),
///         DynamixError::Auth(e) => eprintln!("Bad credentials: {e}"),
///         DynamixError::Config(e) => eprintln!("Configuration error: {e}"),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum DynamixError {
    /// Dynamic path builder misuse.
    #[error(transparent)]
    Path(#[from] PathError),

    /// HTTP client errors (network failures, error statuses).
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Authentication setup errors.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Client or logging configuration errors.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl DynamixError {
    /// Returns the HTTP status code if the server answered with an error status.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Client(e) => e.status_code(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for DynamixError {
    fn from(err: reqwest::Error) -> Self {
        Self::Client(ClientError::Request(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_error() {
        let err: DynamixError = PathError::IndexBeforeSegment.into();
        assert!(matches!(err, DynamixError::Path(_)));
    }

    #[test]
    fn test_from_auth_error() {
        let auth_err = AuthError::InvalidHeaderName {
            name: "bad header".to_string(),
        };
        let err: DynamixError = auth_err.into();
        assert!(matches!(err, DynamixError::Auth(_)));
    }

    #[test]
    fn test_error_display_is_transparent() {
        let err = DynamixError::Path(PathError::IndexBeforeSegment);
        assert_eq!(
            err.to_string(),
            "cannot index before at least one named segment exists"
        );
    }

    #[test]
    fn test_status_code_only_for_client_errors() {
        let err = DynamixError::Path(PathError::IndexBeforeSegment);
        assert_eq!(err.status_code(), None);
    }
}
