//! Sync and async HTTP clients with dynamic routes.
//!
//! Both facades own a single `reqwest` connection pool and hand out routes
//! that borrow the client. A route accumulates segments exactly like a
//! [`DynamicPath`] and exposes one method per HTTP verb.

mod async_client;
mod factory;
mod sync_client;

pub use async_client::{AsyncClient, AsyncRoute};
pub use factory::{Client, ClientFactory, ClientType};
pub use sync_client::{SyncClient, SyncRoute};

use std::sync::Arc;

use tracing::Span;
use url::Url;

use crate::config::ClientParts;
use crate::error::{ClientError, ConfigError, DynamixError};
use crate::logging::ResponseLogger;
use crate::path::DynamicPath;
use crate::response::Response;
use crate::segment::{Overrides, SegmentFormat};

/// State both facades keep besides the transport.
#[derive(Debug, Clone)]
struct ClientCore {
    base_url: Url,
    segment_format: SegmentFormat,
    overrides: Arc<Overrides>,
    response_logger: Option<Arc<ResponseLogger>>,
}

impl ClientCore {
    fn from_parts(parts: &ClientParts) -> Self {
        Self {
            base_url: parts.base_url.clone(),
            segment_format: parts.segment_format,
            overrides: Arc::clone(&parts.overrides),
            response_logger: parts.response_logger.clone(),
        }
    }

    /// An empty path carrying the client's default format and overrides.
    fn root_path(&self) -> DynamicPath {
        DynamicPath::new(self.segment_format, Arc::clone(&self.overrides))
    }

    fn url_for(&self, path: &DynamicPath) -> Result<Url, DynamixError> {
        let url = path.url(&self.base_url).map_err(ConfigError::InvalidUrl)?;
        tracing::debug!(url = %url, "Constructed URL");
        Ok(url)
    }

    /// Records the outcome on the current span, rejects error statuses and
    /// logs successful responses.
    fn finish(&self, response: Response) -> Result<Response, DynamixError> {
        let status = response.status();
        let span = Span::current();
        span.record("http.status_code", status.as_u16());

        if !(status.is_success() || status.is_redirection()) {
            let otel_status = if status.is_server_error() {
                "ERROR"
            } else {
                "UNSET"
            };
            span.record("otel.status_code", otel_status);
            tracing::debug!(
                status = status.as_u16(),
                url = %response.url(),
                "Request returned error status"
            );
            return Err(ClientError::HttpStatus {
                status: status.as_u16(),
                response: Box::new(response),
            }
            .into());
        }

        span.record("otel.status_code", "OK");
        if let Some(logger) = &self.response_logger {
            logger.log_response(&response);
        }
        Ok(response)
    }
}
