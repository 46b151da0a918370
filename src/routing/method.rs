//! Routable HTTP methods
//!
//! Routes can only be registered for this closed set of methods. Anything else
//! arriving on the wire (HEAD, TRACE, CONNECT, extension methods) never matches
//! a route and goes straight to the static fallback.

use std::fmt;
use std::str::FromStr;

/// HTTP method a route can be registered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    Link,
    Unlink,
}

impl Method {
    pub const ALL: [Self; 8] = [
        Self::Get,
        Self::Post,
        Self::Put,
        Self::Patch,
        Self::Delete,
        Self::Options,
        Self::Link,
        Self::Unlink,
    ];

    /// Wire token for this method
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
            Self::Link => "LINK",
            Self::Unlink => "UNLINK",
        }
    }

    /// Map a hyper method onto a routable one
    ///
    /// Returns `None` for methods no route can be registered for.
    pub fn from_http(method: &hyper::Method) -> Option<Self> {
        method.as_str().parse().ok()
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a token is not one of the routable methods
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported method: {0}")]
pub struct UnsupportedMethod(pub String);

impl FromStr for Method {
    type Err = UnsupportedMethod;

    /// Method tokens are case-sensitive on the wire
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnsupportedMethod(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_methods() {
        for method in Method::ALL {
            assert_eq!(method.as_str().parse::<Method>(), Ok(method));
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("get".parse::<Method>().is_err());
        assert!("Post".parse::<Method>().is_err());
    }

    #[test]
    fn test_from_http() {
        assert_eq!(Method::from_http(&hyper::Method::GET), Some(Method::Get));
        assert_eq!(Method::from_http(&hyper::Method::PATCH), Some(Method::Patch));
        let link = hyper::Method::from_bytes(b"LINK").unwrap();
        assert_eq!(Method::from_http(&link), Some(Method::Link));
        assert_eq!(Method::from_http(&hyper::Method::HEAD), None);
        assert_eq!(Method::from_http(&hyper::Method::TRACE), None);
    }
}
