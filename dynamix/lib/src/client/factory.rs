//! Picking a sync or async client at runtime.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::{AsyncClient, SyncClient};
use crate::config::{ClientConfig, TransportConfig};
use crate::error::DynamixError;
use crate::segment::{Overrides, SegmentFormat};

/// Which facade [`ClientFactory`] builds.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum ClientType {
    #[default]
    Sync,
    Async,
}

impl ClientType {
    /// Parses a client type, treating anything unrecognized as `Sync`.
    ///
    /// Note that a typo such as `"asynk"` silently yields a blocking client.
    pub fn parse_or_default(tag: &str) -> Self {
        tag.trim().parse().unwrap_or_else(|_| {
            tracing::debug!(tag, "Unknown client type, using sync");
            Self::default()
        })
    }
}

/// Either facade, as produced by [`ClientFactory`].
#[derive(Debug)]
pub enum Client {
    Sync(SyncClient),
    Async(AsyncClient),
}

impl Client {
    pub fn client_type(&self) -> ClientType {
        match self {
            Self::Sync(_) => ClientType::Sync,
            Self::Async(_) => ClientType::Async,
        }
    }

    pub fn as_sync(&self) -> Option<&SyncClient> {
        match self {
            Self::Sync(client) => Some(client),
            Self::Async(_) => None,
        }
    }

    pub fn as_async(&self) -> Option<&AsyncClient> {
        match self {
            Self::Async(client) => Some(client),
            Self::Sync(_) => None,
        }
    }

    pub fn into_sync(self) -> Option<SyncClient> {
        match self {
            Self::Sync(client) => Some(client),
            Self::Async(_) => None,
        }
    }

    pub fn into_async(self) -> Option<AsyncClient> {
        match self {
            Self::Async(client) => Some(client),
            Self::Sync(_) => None,
        }
    }
}

/// Builds clients from loose parameters.
///
/// ## Examples
///
/// ```rust,ignore
/// use dynamix_lib::{ClientFactory, ClientType, Overrides, SegmentFormat, TransportConfig};
///
/// let client = ClientFactory::create(
///     "https://api.example.com",
///     ClientType::parse_or_default("async"),
///     SegmentFormat::Snake,
///     Overrides::new(),
///     TransportConfig::default(),
/// )?;
/// assert!(client.as_async().is_some());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientFactory;

impl ClientFactory {
    /// Creates a client of `client_type`.
    ///
    /// ## Errors
    ///
    /// Returns an error if the base URL is invalid or the transport cannot
    /// be built.
    pub fn create(
        base_url: impl AsRef<str>,
        client_type: ClientType,
        segment_format: SegmentFormat,
        overrides: Overrides,
        transport: TransportConfig,
    ) -> Result<Client, DynamixError> {
        let config = ClientConfig::new(base_url)?
            .segment_format(segment_format)
            .overrides(overrides)
            .transport(transport);
        Self::create_from_config(client_type, config)
    }

    /// Creates a client of `client_type` from a full configuration.
    ///
    /// ## Errors
    ///
    /// Returns an error if the transport cannot be built.
    pub fn create_from_config(
        client_type: ClientType,
        config: ClientConfig,
    ) -> Result<Client, DynamixError> {
        tracing::debug!(%client_type, base_url = %config.base_url(), "Creating client");
        Ok(match client_type {
            ClientType::Sync => Client::Sync(SyncClient::from_config(config)?),
            ClientType::Async => Client::Async(AsyncClient::from_config(config)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_parse_or_default() {
        assert_eq!(ClientType::parse_or_default("async"), ClientType::Async);
        assert_eq!(ClientType::parse_or_default("SYNC"), ClientType::Sync);
        assert_eq!(ClientType::parse_or_default("asynk"), ClientType::Sync);
        assert_eq!(ClientType::parse_or_default(""), ClientType::Sync);
    }

    #[test]
    fn test_names_round_trip() {
        for client_type in ClientType::iter() {
            let name = client_type.to_string();
            assert_eq!(name.parse::<ClientType>().unwrap(), client_type);
        }
    }

    #[test]
    fn test_create_sync() {
        let client = ClientFactory::create(
            "http://x",
            ClientType::Sync,
            SegmentFormat::Snake,
            Overrides::new(),
            TransportConfig::default(),
        )
        .unwrap();
        assert_eq!(client.client_type(), ClientType::Sync);
        let sync = client.into_sync().unwrap();
        assert_eq!(sync.segment_format(), SegmentFormat::Snake);
    }

    #[test]
    fn test_create_async_carries_overrides() {
        let mut overrides = Overrides::new();
        overrides.insert("user_id".to_string(), "userID".to_string());
        let client = ClientFactory::create(
            "http://x",
            ClientType::Async,
            SegmentFormat::Kebab,
            overrides,
            TransportConfig::default(),
        )
        .unwrap();
        let client = client.as_async().unwrap();
        assert_eq!(client.overrides()["user_id"], "userID");
        assert_eq!(client.base_url().as_str(), "http://x/");
    }

    #[test]
    fn test_create_rejects_bad_url() {
        let err = ClientFactory::create(
            "::",
            ClientType::Sync,
            SegmentFormat::Kebab,
            Overrides::new(),
            TransportConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DynamixError::Config(_)));
    }
}
