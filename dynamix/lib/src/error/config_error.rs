//! Client, transport and logging configuration errors.

use thiserror::Error;

/// Errors in client or logging configuration.
///
/// These errors occur during setup, typically indicating programmer errors
/// or invalid user input.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A default header could not be encoded.
    #[error("Invalid header {name}: {message}")]
    InvalidHeader {
        /// The header name as supplied.
        name: String,
        /// Why it was rejected.
        message: String,
    },

    /// The underlying transport could not be constructed.
    #[error("Failed to build HTTP transport: {0}")]
    Transport(#[source] reqwest::Error),

    /// A logging configuration file could not be read.
    #[error("Failed to read log config {path}: {source}")]
    LogConfigRead {
        /// The file that was requested.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// A logging configuration file is not valid YAML for [`LogSettings`](crate::logging::LogSettings).
    #[error("Invalid log config: {0}")]
    LogConfigParse(#[from] serde_yaml::Error),

    /// A log filter directive could not be parsed.
    #[error("Invalid log filter '{directive}': {message}")]
    InvalidLogFilter {
        /// The rejected directive.
        directive: String,
        /// Parser message.
        message: String,
    },

    /// A global tracing subscriber was already installed.
    #[error("Tracing subscriber already installed: {0}")]
    SubscriberInstalled(String),
}

impl ConfigError {
    /// Creates an invalid header error.
    pub fn invalid_header(name: impl Into<String>, message: impl ToString) -> Self {
        Self::InvalidHeader {
            name: name.into(),
            message: message.to_string(),
        }
    }
}
