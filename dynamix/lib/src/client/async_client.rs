//! Async client facade.

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

/// Async HTTP client with dynamic path support.
///
/// ## Examples
///
/// ```rust,ignore
/// use dynamix_lib::{AsyncClient, RequestOptions};
///
/// let client = AsyncClient::new("https://api.example.com")?;
/// let response = client
///     .with_segment("users")
///     .with_segment("user_id")
///     .with_value_or_format("john")?
///     .with_segment("posts")
///     .get(RequestOptions::new())
///     .await?;
/// client.close().await;
/// ```
#[derive(Debug)]
pub struct AsyncClient {
    core: ClientCore,
    http: reqwest::Client,
}

impl AsyncClient {
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
        let http = parts.transport.build_async()?;
        let core = ClientCore::from_parts(&parts);
        tracing::debug!(base_url = %core.base_url, "Created async client");
        Ok(Self { core, http })
    }

    /// Starts a route at `name`.
    pub fn with_segment(&self, name: impl Into<String>) -> AsyncRoute<'_> {
        self.root().with_segment(name)
    }

    /// A route with no segments, addressing the base URL itself.
    pub fn root(&self) -> AsyncRoute<'_> {
        self.route(self.core.root_path())
    }

    /// Binds a prebuilt path to this client.
    pub fn route(&self, path: DynamicPath) -> AsyncRoute<'_> {
        AsyncRoute { client: self, path }
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
    pub async fn close(self) {
        tracing::debug!(base_url = %self.core.base_url, "Closing async client");
    }
}

/// A path bound to an [`AsyncClient`].
#[derive(Debug, Clone)]
pub struct AsyncRoute<'a> {
    client: &'a AsyncClient,
    path: DynamicPath,
}

macro_rules! async_verbs {
    ($($(#[$doc:meta])* $name:ident => $method:ident),* $(,)?) => {
        $(
            $(#[$doc])*
            ///
            /// ## Errors
            ///
            /// See [`AsyncRoute::request`].
            pub async fn $name(&self, options: RequestOptions) -> Result<Response, DynamixError> {
                self.request(HttpMethod::$method, options).await
            }
        )*
    };
}

impl AsyncRoute<'_> {
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
    pub async fn request(
        &self,
        method: HttpMethod,
        options: RequestOptions,
    ) -> Result<Response, DynamixError> {
        let url = self.url()?;
        Span::current().record("http.url", url.as_str());

        let request = options.apply(self.client.http.request(method.to_reqwest(), url))?;
        let started = Instant::now();
        let response = request.send().await.map_err(ClientError::Request)?;
        let response = Response::read_async(response, started.elapsed())
            .await
            .map_err(ClientError::Request)?;

        self.client.core.finish(response)
    }

    async_verbs! {
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
