//! HTTP client with chained dynamic paths.
//!
//! Request paths are built one segment at a time instead of being written
//! out as strings:
//!
//! ```rust,ignore
//! use dynamix_lib::{RequestOptions, SegmentFormat, SyncClient};
//!
//! let client = SyncClient::new("https://api.example.com")?;
//! // GET https://api.example.com/users/john/blog-posts/123
//! let response = client
//!     .with_segment("users")
//!     .with_segment("user_id")
//!     .with_value_or_format("john")?
//!     .with_segment("blog_posts")
//!     .with_segment("post_id")
//!     .with_value_or_format(123)?
//!     .get(RequestOptions::new())?;
//! ```
//!
//! A value replaces the name of the segment it is applied to, so the
//! `user_id` and `post_id` segments above never appear in the URL:
//!
//! ```rust,ignore
//! // GET https://api.example.com/john
//! client.with_segment("users").with_value_or_format("john")?.get(RequestOptions::new())?;
//! ```
//!
//! Segment names are rendered with a [`SegmentFormat`] (kebab-case unless
//! configured otherwise), an override table can pin exact spellings, and
//! successful responses are logged at DEBUG level through a
//! [`ResponseLogger`](logging::ResponseLogger) that pretty-prints the body
//! according to its content type.
//!
//! ## Modules
//!
//! - [`client`] - Sync and async facades, routes and the client factory
//! - [`logging`] - Subscriber settings and the response logger
//! - [`error`] - Layered error types

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod method;
pub mod path;
pub mod request;
pub mod response;
pub mod segment;

pub use auth::{Auth, AuthScheme, Credentials};
pub use client::{AsyncClient, AsyncRoute, Client, ClientFactory, ClientType, SyncClient, SyncRoute};
pub use config::{ClientConfig, TransportConfig};
pub use error::{AuthError, ClientError, ConfigError, DynamixError, FormatError, PathError};
pub use method::HttpMethod;
pub use path::{DynamicPath, SegmentKey};
pub use request::RequestOptions;
pub use response::Response;
pub use segment::{Overrides, PathSegment, SegmentFormat, SegmentFormatter, SegmentValue};
