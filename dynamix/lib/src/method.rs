//! HTTP verbs exposed on dynamic routes.

use strum::{Display, EnumIter, EnumString};

/// HTTP methods a dynamic route can dispatch.
///
/// ## Examples
///
/// ```rust
/// use dynamix_lib::HttpMethod;
///
/// assert_eq!(HttpMethod::Get.to_string(), "GET");
///
/// let parsed: HttpMethod = "CONNECT".parse().unwrap();
/// assert_eq!(parsed, HttpMethod::Connect);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum HttpMethod {
    /// HTTP GET - Retrieve a resource.
    Get,
    /// HTTP POST - Create a resource or trigger an action.
    Post,
    /// HTTP PUT - Replace a resource entirely.
    Put,
    /// HTTP DELETE - Remove a resource.
    Delete,
    /// HTTP PATCH - Partially update a resource.
    Patch,
    /// HTTP HEAD - Retrieve headers only.
    Head,
    /// HTTP OPTIONS - Query supported methods.
    Options,
    /// HTTP TRACE - Echo the request for debugging.
    Trace,
    /// HTTP CONNECT - Open a tunnel through a proxy.
    Connect,
}

impl HttpMethod {
    /// Converts to the equivalent `reqwest::Method`.
    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
            Self::Patch => reqwest::Method::PATCH,
            Self::Head => reqwest::Method::HEAD,
            Self::Options => reqwest::Method::OPTIONS,
            Self::Trace => reqwest::Method::TRACE,
            Self::Connect => reqwest::Method::CONNECT,
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        method.to_reqwest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_display() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Options.to_string(), "OPTIONS");
        assert_eq!(HttpMethod::Connect.to_string(), "CONNECT");
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("get".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("Patch".parse::<HttpMethod>().unwrap(), HttpMethod::Patch);
        assert!("FETCH".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn test_all_nine_verbs() {
        assert_eq!(HttpMethod::iter().count(), 9);
    }

    #[test]
    fn test_to_reqwest() {
        assert_eq!(HttpMethod::Connect.to_reqwest(), reqwest::Method::CONNECT);
        assert_eq!(reqwest::Method::from(HttpMethod::Head), reqwest::Method::HEAD);
    }
}
