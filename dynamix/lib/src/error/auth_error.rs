//! Authentication errors.

use thiserror::Error;

/// Errors related to turning credentials into request headers.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The configured auth header name is not a valid HTTP header name.
    #[error("Invalid auth header name: {name}")]
    InvalidHeaderName {
        /// The rejected header name.
        name: String,
    },

    /// The credential cannot be encoded as an HTTP header value.
    #[error("Invalid credential for header {header}")]
    InvalidCredential {
        /// The header the credential was destined for.
        header: String,
    },
}
