//! Tracing subscriber settings.

use std::path::Path;

use serde::Deserialize;
use strum::{Display, EnumString};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::ConfigError;

/// Minimum level for the base filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

/// How the process-wide subscriber is set up.
///
/// Built once by the application and installed with [`install`](Self::install);
/// the library itself never installs a subscriber.
///
/// ```yaml
/// level: debug
/// json: false
/// with_file_and_line: true
/// directives:
///   - hyper=warn
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub level: LogLevel,
    pub json: bool,
    pub with_file_and_line: bool,
    /// Extra `target=level` filters appended after the base level.
    pub directives: Vec<String>,
}

impl LogSettings {
    /// Maps `-v` counts: 0 warn, 1 info, 2 debug, 3 or more trace.
    pub fn from_verbosity(verbose: u8) -> Self {
        let level = match verbose {
            0 => LogLevel::Warn,
            1 => LogLevel::Info,
            2 => LogLevel::Debug,
            _ => LogLevel::Trace,
        };
        Self {
            level,
            with_file_and_line: verbose >= 3,
            ..Self::default()
        }
    }

    /// Parses settings from YAML.
    ///
    /// ## Errors
    ///
    /// Returns an error if the YAML does not describe valid settings.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Reads settings from a YAML file.
    ///
    /// ## Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::LogConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&yaml)
    }

    pub fn json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn directive(mut self, directive: impl Into<String>) -> Self {
        self.directives.push(directive.into());
        self
    }

    /// The filter string these settings describe, ignoring `RUST_LOG`.
    pub fn filter_directives(&self) -> String {
        std::iter::once(self.level.to_string())
            .chain(self.directives.iter().cloned())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Builds the filter. A non-empty `RUST_LOG` wins over these settings.
    ///
    /// ## Errors
    ///
    /// Returns an error if a directive cannot be parsed.
    pub fn filter(&self) -> Result<EnvFilter, ConfigError> {
        let directives = match std::env::var("RUST_LOG") {
            Ok(filter) if !filter.trim().is_empty() => filter,
            _ => self.filter_directives(),
        };
        EnvFilter::try_new(&directives).map_err(|e| ConfigError::InvalidLogFilter {
            directive: directives.clone(),
            message: e.to_string(),
        })
    }

    /// Installs a global subscriber writing to stderr.
    ///
    /// ## Errors
    ///
    /// Returns an error if the filter is invalid or a subscriber is already set.
    pub fn install(&self) -> Result<(), ConfigError> {
        let filter = self.filter()?;

        let installed = if self.json {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_thread_ids(false)
                        .with_file(self.with_file_and_line)
                        .with_line_number(self.with_file_and_line)
                        .with_writer(std::io::stderr)
                        .compact(),
                )
                .try_init()
        };

        installed.map_err(|e| ConfigError::SubscriberInstalled(e.to_string()))
    }
}
