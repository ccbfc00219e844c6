//! Client construction settings.
//!
//! [`ClientConfig`] carries what the dynamic path layer needs (base URL,
//! default segment format, overrides, response logger). [`TransportConfig`]
//! is passed through to `reqwest` untouched by the path logic.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::auth::Auth;
use crate::error::{ConfigError, DynamixError};
use crate::logging::ResponseLogger;
use crate::segment::{Overrides, SegmentFormat};

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of idle pooled connections kept per host.
const DEFAULT_POOL_IDLE_PER_HOST: usize = 10;

/// Settings forwarded to the underlying `reqwest` client.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    default_headers: HeaderMap,
    auth: Option<Auth>,
    proxy: Option<String>,
    accept_invalid_certs: bool,
    user_agent: Option<String>,
    max_redirects: Option<usize>,
    pool_max_idle_per_host: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            connect_timeout: None,
            default_headers: HeaderMap::new(),
            auth: None,
            proxy: None,
            accept_invalid_certs: false,
            user_agent: None,
            max_redirects: None,
            pool_max_idle_per_host: DEFAULT_POOL_IDLE_PER_HOST,
        }
    }
}

impl TransportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the total request timeout. `None` disables it.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Adds a header sent with every request.
    ///
    /// ## Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, ConfigError> {
        let name_str = name.as_ref();
        let header_name = HeaderName::try_from(name_str)
            .map_err(|e| ConfigError::invalid_header(name_str, e))?;
        let header_value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| ConfigError::invalid_header(name_str, e))?;
        self.default_headers.insert(header_name, header_value);
        Ok(self)
    }

    pub fn auth(mut self, auth: Auth) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Routes all traffic through a proxy URL.
    pub fn proxy(mut self, url: impl Into<String>) -> Self {
        self.proxy = Some(url.into());
        self
    }

    /// Disables TLS certificate verification.
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Limits how many redirects are followed. `0` disables redirects.
    pub fn max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = Some(max);
        self
    }

    pub fn pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    pub fn auth_config(&self) -> Option<&Auth> {
        self.auth.as_ref()
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn redirect_policy(&self) -> Option<reqwest::redirect::Policy> {
        self.max_redirects.map(|max| match max {
            0 => reqwest::redirect::Policy::none(),
            n => reqwest::redirect::Policy::limited(n),
        })
    }

    /// Default headers with the auth schemes applied on top, in order.
    fn request_headers(&self) -> Result<HeaderMap, DynamixError> {
        let mut headers = self.default_headers.clone();
        if let Some(auth) = &self.auth {
            headers.extend(auth.headers()?);
            tracing::debug!(schemes = auth.schemes().len(), "Applied authentication headers");
        }
        Ok(headers)
    }

    fn proxy_config(&self) -> Result<Option<reqwest::Proxy>, ConfigError> {
        self.proxy
            .as_deref()
            .map(reqwest::Proxy::all)
            .transpose()
            .map_err(ConfigError::Transport)
    }

    /// Builds the async transport.
    pub(crate) fn build_async(&self) -> Result<reqwest::Client, DynamixError> {
        let mut builder = reqwest::Client::builder()
            .default_headers(self.request_headers()?)
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .pool_max_idle_per_host(self.pool_max_idle_per_host);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(proxy) = self.proxy_config()? {
            builder = builder.proxy(proxy);
        }
        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }
        if let Some(policy) = self.redirect_policy() {
            builder = builder.redirect(policy);
        }

        Ok(builder.build().map_err(ConfigError::Transport)?)
    }

    /// Builds the blocking transport.
    pub(crate) fn build_blocking(&self) -> Result<reqwest::blocking::Client, DynamixError> {
        let mut builder = reqwest::blocking::Client::builder()
            .default_headers(self.request_headers()?)
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .pool_max_idle_per_host(self.pool_max_idle_per_host)
            .timeout(self.timeout);

        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(proxy) = self.proxy_config()? {
            builder = builder.proxy(proxy);
        }
        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }
        if let Some(policy) = self.redirect_policy() {
            builder = builder.redirect(policy);
        }

        Ok(builder.build().map_err(ConfigError::Transport)?)
    }
}

/// Everything needed to construct a sync or async client.
///
/// ## Examples
///
/// ```rust,ignore
/// use dynamix_lib::{ClientConfig, SegmentFormat, SyncClient};
///
/// let config = ClientConfig::new("https://api.example.com")?
///     .segment_format(SegmentFormat::Snake)
///     .override_segment("user_id", "userID");
/// let client = SyncClient::from_config(config)?;
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: Url,
    segment_format: SegmentFormat,
    overrides: Overrides,
    transport: TransportConfig,
    response_logger: Option<Arc<ResponseLogger>>,
}

impl ClientConfig {
    /// Creates a config for `base_url` with kebab-case segments, no
    /// overrides, default transport settings and the default response logger.
    ///
    /// ## Errors
    ///
    /// Returns an error if `base_url` is not an absolute URL.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, DynamixError> {
        let base_url = Url::parse(base_url.as_ref()).map_err(ConfigError::InvalidUrl)?;
        Ok(Self::from_url(base_url))
    }

    pub fn from_url(base_url: Url) -> Self {
        Self {
            base_url,
            segment_format: SegmentFormat::default(),
            overrides: Overrides::new(),
            transport: TransportConfig::default(),
            response_logger: Some(Arc::new(ResponseLogger::default())),
        }
    }

    pub fn segment_format(mut self, format: SegmentFormat) -> Self {
        self.segment_format = format;
        self
    }

    /// Replaces the whole override table.
    pub fn overrides(mut self, overrides: Overrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Renders the raw segment `name` as `literal`, bypassing formatting.
    pub fn override_segment(mut self, name: impl Into<String>, literal: impl Into<String>) -> Self {
        self.overrides.insert(name.into(), literal.into());
        self
    }

    pub fn transport(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
        self
    }

    /// Sets the response logger; `None` turns response logging off.
    pub fn response_logger(mut self, logger: Option<ResponseLogger>) -> Self {
        self.response_logger = logger.map(Arc::new);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn default_segment_format(&self) -> SegmentFormat {
        self.segment_format
    }

    pub fn overrides_table(&self) -> &Overrides {
        &self.overrides
    }

    pub fn transport_config(&self) -> &TransportConfig {
        &self.transport
    }

    pub(crate) fn into_parts(self) -> ClientParts {
        ClientParts {
            base_url: self.base_url,
            segment_format: self.segment_format,
            overrides: Arc::new(self.overrides),
            transport: self.transport,
            response_logger: self.response_logger,
        }
    }
}

/// Config split into the pieces a client keeps.
pub(crate) struct ClientParts {
    pub base_url: Url,
    pub segment_format: SegmentFormat,
    pub overrides: Arc<Overrides>,
    pub transport: TransportConfig,
    pub response_logger: Option<Arc<ResponseLogger>>,
}
