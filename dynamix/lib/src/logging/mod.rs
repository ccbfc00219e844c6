//! Logging: subscriber settings for applications and the response logger
//! used by the clients.

mod formatter;
pub mod formatters;
mod response_logger;
mod settings;

pub use formatter::{ContentCategory, ContentFormatter, TRUNCATION_MARKER, truncate};
pub use response_logger::{DEFAULT_MAX_BODY_LENGTH, MASK, ResponseLogger, default_formatters};
pub use settings::{LogLevel, LogSettings};
