//! Blocking client facade.

use std::time::Instant;

use tracing::{Span, instrument};
use url::Url;

use super::ClientCore;
use crate::config::ClientConfig;
use crate::error::{ClientError, DynamixError, PathError};
use crate::method::HttpMethod;
use crate::path::{DynamicPath, SegmentKey};
use crate::request::RequestOptions;
use crate::response::Response;
use crate::segment::{Overrides, SegmentFormat};

/// Blocking HTTP client with dynamic path support.
///
/// Must not be used from inside an async runtime worker thread; use
/// [`AsyncClient`](super::AsyncClient) there, or move the work onto a
/// blocking thread.
///
/// ## Examples
///
/// ```rust,ignore
/// use dynamix_lib::{RequestOptions, SyncClient};
///
/// let client = SyncClient::new("https://api.example.com")?;
/// let response = client
///     .with_segment("users")
///     .with_segment("user_id")
///     .with_value_or_format("john")?
///     .get(RequestOptions::new())?;
/// println!("{}", response.text());
/// client.close();
/// ```
#[derive(Debug)]
pub struct SyncClient {
    core: ClientCore,
    http: reqwest::blocking::Client,
}

impl SyncClient {
    /// Creates a client for `base_url` with default settings.
    ///
    /// ## Errors
    ///
    /// Returns an error if the URL is invalid or the transport cannot be built.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, DynamixError> {
        Self::from_config(ClientConfig::new(base_url)?)
    }

    /// Creates a client from a full configuration.
    ///
    /// ## Errors
    ///
    /// Returns an error if the transport cannot be built.
    pub fn from_config(config: ClientConfig) -> Result<Self, DynamixError> {
        let parts = config.into_parts();
        let http = parts.transport.build_blocking()?;
        let core = ClientCore::from_parts(&parts);
        tracing::debug!(base_url = %core.base_url, "Created sync client");
        Ok(Self { core, http })
    }

    /// Starts a route at `name`.
    pub fn with_segment(&self, name: impl Into<String>) -> SyncRoute<'_> {
        self.root().with_segment(name)
    }

    /// A route with no segments, addressing the base URL itself.
    pub fn root(&self) -> SyncRoute<'_> {
        self.route(self.core.root_path())
    }

    /// Binds a prebuilt path to this client.
    pub fn route(&self, path: DynamicPath) -> SyncRoute<'_> {
        SyncRoute { client: self, path }
    }

    pub fn base_url(&self) -> &Url {
        &self.core.base_url
    }

    pub fn segment_format(&self) -> SegmentFormat {
        self.core.segment_format
    }

    pub fn overrides(&self) -> &Overrides {
        &self.core.overrides
    }

    /// Releases the connection pool.
    pub fn close(self) {
        tracing::debug!(base_url = %self.core.base_url, "Closing sync client");
    }
}

/// A path bound to a [`SyncClient`].
#[derive(Debug, Clone)]
pub struct SyncRoute<'a> {
    client: &'a SyncClient,
    path: DynamicPath,
}

macro_rules! sync_verbs {
    ($($(#[$doc:meta])* $name:ident => $method:ident),* $(,)?) => {
        $(
            $(#[$doc])*
            ///
            /// ## Errors
            ///
            /// See [`SyncRoute::request`].
            pub fn $name(&self, options: RequestOptions) -> Result<Response, DynamixError> {
                self.request(HttpMethod::$method, options)
            }
        )*
    };
}

impl SyncRoute<'_> {
    pub fn with_segment(&self, name: impl Into<String>) -> Self {
        Self {
            client: self.client,
            path: self.path.with_segment(name),
        }
    }

    /// Applies a value or format to the last segment.
    ///
    /// ## Errors
    ///
    /// Returns [`PathError::IndexBeforeSegment`] on a route without segments.
    pub fn with_value_or_format(&self, key: impl Into<SegmentKey>) -> Result<Self, PathError> {
        Ok(Self {
            client: self.client,
            path: self.path.with_value_or_format(key)?,
        })
    }

    /// Changes the format used for segments added after this call.
    pub fn with_format(&self, format: SegmentFormat) -> Self {
        Self {
            client: self.client,
            path: self.path.with_format(format),
        }
    }

    pub fn path(&self) -> &DynamicPath {
        &self.path
    }

    /// The absolute URL this route resolves to.
    ///
    /// ## Errors
    ///
    /// Returns an error if the joined URL does not parse.
    pub fn url(&self) -> Result<Url, DynamixError> {
        self.client.core.url_for(&self.path)
    }

    /// Sends `method` to this route's URL.
    ///
    /// Error statuses (anything outside 2xx and 3xx) are returned as
    /// [`ClientError::HttpStatus`] with the buffered response attached.
    ///
    /// ## Errors
    ///
    /// Returns an error on transport failure, invalid per-request headers
    /// or an error status.
    #[instrument(
        name = "dynamix_request",
        skip_all,
        fields(
            http.method = %method,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    pub fn request(
        &self,
        method: HttpMethod,
        options: RequestOptions,
    ) -> Result<Response, DynamixError> {
        let url = self.url()?;
        Span::current().record("http.url", url.as_str());

        let request = options.apply(self.client.http.request(method.to_reqwest(), url))?;
        let started = Instant::now();
        let response = request.send().map_err(ClientError::Request)?;
        let response =
            Response::read_blocking(response, started.elapsed()).map_err(ClientError::Request)?;

        self.client.core.finish(response)
    }

    sync_verbs! {
        /// Sends a GET request.
        get => Get,
        /// Sends a POST request.
        post => Post,
        /// Sends a PUT request.
        put => Put,
        /// Sends a DELETE request.
        delete => Delete,
        /// Sends a PATCH request.
        patch => Patch,
        /// Sends a HEAD request.
        head => Head,
        /// Sends an OPTIONS request.
        options => Options,
        /// Sends a TRACE request.
        trace => Trace,
        /// Sends a CONNECT request.
        connect => Connect,
    }
}
