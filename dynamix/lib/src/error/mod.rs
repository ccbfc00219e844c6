//! Layered error types for the dynamix crate.
//!
//! The error hierarchy is structured for actionable diagnostics:
//! - [`DynamixError`] - Top-level error type for all operations
//! - [`PathError`] - Misuse of the dynamic path builder
//! - [`ClientError`] - Transport failures and non-success HTTP statuses
//! - [`AuthError`] - Credentials that cannot be turned into headers
//! - [`ConfigError`] - Client, transport and logging configuration errors
//! - [`FormatError`] - Body rendering failures, kept inside the response logger

mod auth_error;
mod client_error;
mod config_error;
mod dynamix_error;
mod format_error;
mod path_error;

pub use auth_error::AuthError;
pub use client_error::ClientError;
pub use config_error::ConfigError;
pub use dynamix_error::DynamixError;
pub use format_error::FormatError;
pub use path_error::PathError;
