//! Handler return values
//!
//! A [`Reply`] is the framework-level response a handler produces. It is kept
//! deliberately loose (plain status integer, string headers) and only checked
//! when [`crate::http::response::normalize`] turns it into a wire response.

use bytes::Bytes;
use hyper::StatusCode;

pub const TEXT_PLAIN_UTF_8: &str = "text/plain; charset=utf-8";

/// Reply body
#[derive(Debug, Default)]
pub enum Body {
    #[default]
    Empty,
    Text(String),
    Bytes(Bytes),
    /// Open file handle, streamed lazily when the response is written
    File(tokio::fs::File),
}

impl Body {
    /// Length of a buffered body; `None` for streamed files
    pub fn buffered_len(&self) -> Option<usize> {
        match self {
            Self::Empty => Some(0),
            Self::Text(s) => Some(s.len()),
            Self::Bytes(b) => Some(b.len()),
            Self::File(_) => None,
        }
    }
}

impl From<()> for Body {
    fn from((): ()) -> Self {
        Self::Empty
    }
}

impl From<&'static str> for Body {
    fn from(value: &'static str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Body {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Bytes> for Body {
    fn from(value: Bytes) -> Self {
        Self::Bytes(value)
    }
}

impl From<Vec<u8>> for Body {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(Bytes::from(value))
    }
}

impl From<tokio::fs::File> for Body {
    fn from(value: tokio::fs::File) -> Self {
        Self::File(value)
    }
}

/// Status, headers and body produced by a handler
#[derive(Debug)]
pub struct Reply {
    pub status: u16,
    /// Header name/value pairs; a later entry replaces an earlier one with the same name
    pub headers: Vec<(String, String)>,
    pub body: Body,
}

impl Reply {
    /// Full triple: the headers are used exactly as given
    pub fn new<I, K, V>(status: u16, headers: I, body: impl Into<Body>) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            status,
            headers: headers
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            body: body.into(),
        }
    }

    /// Shorthand `(status, text)`: plain text headers are filled in
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: vec![("Content-Type".to_string(), TEXT_PLAIN_UTF_8.to_string())],
            body: Body::Text(body.into()),
        }
    }

    /// Serialize `value` as a JSON body
    pub fn json<T: serde::Serialize + ?Sized>(status: u16, value: &T) -> Result<Self, serde_json::Error> {
        let body = serde_json::to_vec(value)?;
        Ok(Self::new(
            status,
            [("Content-Type", "application/json")],
            body,
        ))
    }

    /// Append a header
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Case-insensitive header lookup, last entry wins
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .rev()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

// Integer literals fall back to i32, so `(200, "ok")` needs the i32 impls.
// Out-of-range statuses become 0, which normalization rejects as invalid.
fn status_from_i32(status: i32) -> u16 {
    u16::try_from(status).unwrap_or(0)
}

impl<S: Into<String>> From<(u16, S)> for Reply {
    fn from((status, body): (u16, S)) -> Self {
        Self::text(status, body)
    }
}

impl<S: Into<String>> From<(i32, S)> for Reply {
    fn from((status, body): (i32, S)) -> Self {
        Self::text(status_from_i32(status), body)
    }
}

impl<S: Into<String>> From<(StatusCode, S)> for Reply {
    fn from((status, body): (StatusCode, S)) -> Self {
        Self::text(status.as_u16(), body)
    }
}

impl<I, K, V, B> From<(u16, I, B)> for Reply
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
    B: Into<Body>,
{
    fn from((status, headers, body): (u16, I, B)) -> Self {
        Self::new(status, headers, body)
    }
}

impl<I, K, V, B> From<(i32, I, B)> for Reply
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
    B: Into<Body>,
{
    fn from((status, headers, body): (i32, I, B)) -> Self {
        Self::new(status_from_i32(status), headers, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorthand_sets_text_headers() {
        let reply = Reply::from((200, "hello"));
        assert_eq!(reply.status, 200);
        assert_eq!(reply.get_header("content-type"), Some(TEXT_PLAIN_UTF_8));
        assert!(matches!(reply.body, Body::Text(ref s) if s == "hello"));
    }

    #[test]
    fn test_full_triple_keeps_headers() {
        let reply = Reply::from((201, [("Content-Type", "text/html"), ("X-Id", "7")], "<p>"));
        assert_eq!(reply.status, 201);
        assert_eq!(reply.headers.len(), 2);
        assert_eq!(reply.get_header("x-id"), Some("7"));
        assert_eq!(reply.body.buffered_len(), Some(3));
    }

    #[test]
    fn test_negative_status_is_invalid() {
        let reply = Reply::from((-1, "nope"));
        assert_eq!(reply.status, 0);
    }

    #[test]
    fn test_json_reply() {
        let reply = Reply::json(200, &serde_json::json!({"a": 1})).unwrap();
        assert_eq!(reply.get_header("Content-Type"), Some("application/json"));
        match reply.body {
            Body::Bytes(b) => assert_eq!(&b[..], br#"{"a":1}"#),
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[test]
    fn test_header_last_wins() {
        let reply = Reply::text(200, "x").header("content-type", "text/csv");
        assert_eq!(reply.get_header("Content-Type"), Some("text/csv"));
    }
}
