//! Buffered HTTP responses shared by the sync and async clients.

use std::time::Duration;

use bytes::Bytes;
use reqwest::{StatusCode, Version};
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use serde::de::DeserializeOwned;
use url::Url;

/// A fully read HTTP response.
///
/// Bodies are buffered once so the response logger and the caller can both
/// read them.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    url: Url,
    headers: HeaderMap,
    body: Bytes,
    version: Version,
    elapsed: Duration,
}

impl Response {
    pub fn new(status: StatusCode, url: Url, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            url,
            headers,
            body,
            version: Version::HTTP_11,
            elapsed: Duration::ZERO,
        }
    }

    /// Records how long the request took.
    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed = elapsed;
        self
    }

    pub fn with_version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    /// Buffers an async `reqwest` response.
    pub(crate) async fn read_async(
        response: reqwest::Response,
        elapsed: Duration,
    ) -> Result<Self, reqwest::Error> {
        let status = response.status();
        let url = response.url().clone();
        let headers = response.headers().clone();
        let version = response.version();
        let body = response.bytes().await?;
        Ok(Self::new(status, url, headers, body)
            .with_version(version)
            .with_elapsed(elapsed))
    }

    /// Buffers a blocking `reqwest` response.
    pub(crate) fn read_blocking(
        response: reqwest::blocking::Response,
        elapsed: Duration,
    ) -> Result<Self, reqwest::Error> {
        let status = response.status();
        let url = response.url().clone();
        let headers = response.headers().clone();
        let version = response.version();
        let body = response.bytes()?;
        Ok(Self::new(status, url, headers, body)
            .with_version(version)
            .with_elapsed(elapsed))
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The `Content-Type` header, if present and valid UTF-8.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
    }

    pub fn bytes(&self) -> &Bytes {
        &self.body
    }

    /// The body decoded as UTF-8, with invalid sequences replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Deserializes the body as JSON.
    ///
    /// ## Errors
    ///
    /// Returns an error if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}
