//! Per-request options.

use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{HeaderName, HeaderValue};
use serde_json::Value;

use crate::error::ConfigError;

/// Query params, headers, body and timeout for a single request.
///
/// Absent values are dropped here so they never reach the transport:
/// the `*_opt` setters ignore `None`, and a JSON `null` body is not sent.
///
/// ## Examples
///
/// ```rust,ignore
/// use dynamix_lib::RequestOptions;
///
/// let page: Option<u32> = None;
/// let options = RequestOptions::new()
///     .query("q", "rust")
///     .query_opt("page", page)
///     .header("Accept", "application/json");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    json: Option<Value>,
    body: Option<Bytes>,
    form: Vec<(String, String)>,
    timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Adds a query param only when `value` is present.
    pub fn query_opt<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Adds a header only when `value` is present.
    pub fn header_opt(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.header(name, value),
            None => self,
        }
    }

    /// Sets a JSON body, sent verbatim. A bare `null` means "no body".
    pub fn json(mut self, value: impl Into<Value>) -> Self {
        self.json = match value.into() {
            Value::Null => None,
            other => Some(other),
        };
        self
    }

    /// Sets a raw body, replacing any JSON body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn form(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.form.push((key.into(), value.to_string()));
        self
    }

    /// Adds a form field only when `value` is present.
    pub fn form_opt<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.form(key, value),
            None => self,
        }
    }

    /// Overrides the transport timeout for this request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn query_params(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn json_body(&self) -> Option<&Value> {
        self.json.as_ref()
    }

    pub(crate) fn apply<B: RequestBuilderExt>(self, mut builder: B) -> Result<B, ConfigError> {
        if !self.query.is_empty() {
            builder = builder.query_pairs(&self.query);
        }
        for (name, value) in &self.headers {
            let header_name = HeaderName::try_from(name.as_str())
                .map_err(|e| ConfigError::invalid_header(name.as_str(), e))?;
            let header_value = HeaderValue::try_from(value.as_str())
                .map_err(|e| ConfigError::invalid_header(name.as_str(), e))?;
            builder = builder.header_pair(header_name, header_value);
        }
        if !self.form.is_empty() {
            builder = builder.form_pairs(&self.form);
        }
        match (self.body, self.json) {
            (Some(body), _) => builder = builder.raw_body(body),
            (None, Some(json)) => builder = builder.json_body(&json),
            (None, None) => {}
        }
        if let Some(timeout) = self.timeout {
            builder = builder.request_timeout(timeout);
        }
        Ok(builder)
    }
}

/// The subset of the request builder API shared by the async and blocking
/// `reqwest` builders.
pub(crate) trait RequestBuilderExt: Sized {
    fn query_pairs(self, pairs: &[(String, String)]) -> Self;
    fn header_pair(self, name: HeaderName, value: HeaderValue) -> Self;
    fn form_pairs(self, pairs: &[(String, String)]) -> Self;
    fn json_body(self, body: &Value) -> Self;
    fn raw_body(self, body: Bytes) -> Self;
    fn request_timeout(self, timeout: Duration) -> Self;
}

macro_rules! impl_request_builder_ext {
    ($builder:ty) => {
        impl RequestBuilderExt for $builder {
            fn query_pairs(self, pairs: &[(String, String)]) -> Self {
                self.query(pairs)
            }

            fn header_pair(self, name: HeaderName, value: HeaderValue) -> Self {
                self.header(name, value)
            }

            fn form_pairs(self, pairs: &[(String, String)]) -> Self {
                self.form(pairs)
            }

            fn json_body(self, body: &Value) -> Self {
                self.json(body)
            }

            fn raw_body(self, body: Bytes) -> Self {
                self.body(body)
            }

            fn request_timeout(self, timeout: Duration) -> Self {
                self.timeout(timeout)
            }
        }
    };
}

impl_request_builder_ext!(reqwest::RequestBuilder);
impl_request_builder_ext!(reqwest::blocking::RequestBuilder);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_query_values_dropped() {
        let options = RequestOptions::new()
            .query("a", 1)
            .query_opt::<u32>("b", None)
            .query_opt("c", Some("x"));
        assert_eq!(
            options.query_params(),
            &[("a".to_string(), "1".to_string()), ("c".to_string(), "x".to_string())]
        );
    }

    #[test]
    fn test_null_json_body_dropped() {
        let options = RequestOptions::new().json(Value::Null);
        assert!(options.json_body().is_none());
    }

    #[test]
    fn test_null_json_members_kept() {
        let options = RequestOptions::new().json(json!({"nickname": null, "name": "john"}));
        assert_eq!(
            options.json_body(),
            Some(&json!({"name": "john", "nickname": null}))
        );
    }

    #[test]
    fn test_nested_nulls_kept() {
        let options = RequestOptions::new().json(json!({"meta": {"x": null}}));
        assert_eq!(options.json_body(), Some(&json!({"meta": {"x": null}})));
    }

    #[test]
    fn test_invalid_header_rejected_on_apply() {
        let client = reqwest::Client::new();
        let builder = client.get("http://x/");
        let err = RequestOptions::new()
            .header("bad header", "v")
            .apply(builder)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidHeader { .. }));
    }
}
