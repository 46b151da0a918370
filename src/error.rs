//! Error types
//!
//! Failures travel as explicit values through the request pipeline:
//! handlers return [`HandlerError`], the dispatcher turns it (and body parsing
//! failures) into [`DispatchError`], and the normalizer renders that as a
//! response. [`ServerError`] covers the startup surface.

use std::error::Error as StdError;
use std::net::SocketAddr;

pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Failure returned by a route handler
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// Deliberate HTTP status signal, rendered verbatim when it is a known error code
    #[error("handler signalled status {0}")]
    Status(u16),
    /// Any other failure; logged and rendered as 500
    #[error(transparent)]
    Other(BoxError),
}

impl HandlerError {
    pub fn other(err: impl Into<BoxError>) -> Self {
        Self::Other(err.into())
    }
}

impl From<u16> for HandlerError {
    fn from(status: u16) -> Self {
        Self::Status(status)
    }
}

impl From<hyper::StatusCode> for HandlerError {
    fn from(status: hyper::StatusCode) -> Self {
        Self::Status(status.as_u16())
    }
}

impl From<BoxError> for HandlerError {
    fn from(err: BoxError) -> Self {
        Self::Other(err)
    }
}

impl From<std::io::Error> for HandlerError {
    fn from(err: std::io::Error) -> Self {
        Self::other(err)
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        Self::other(err)
    }
}

/// Failure that crossed the dispatch boundary
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// Body could not be decoded; the handler never ran
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Body exceeded the configured size limit
    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },
    /// Status signalled by the handler
    #[error("handler signalled status {0}")]
    Status(u16),
    /// Arbitrary handler or transport failure
    #[error("internal error: {0}")]
    Internal(#[source] BoxError),
}

impl From<HandlerError> for DispatchError {
    fn from(err: HandlerError) -> Self {
        match err {
            HandlerError::Status(code) => Self::Status(code),
            HandlerError::Other(cause) => Self::Internal(cause),
        }
    }
}

/// Startup and lifecycle failures
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("invalid listen address '{0}'")]
    InvalidAddress(String),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("server task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_error_maps_to_dispatch_error() {
        assert!(matches!(
            DispatchError::from(HandlerError::from(403u16)),
            DispatchError::Status(403)
        ));

        let io = std::io::Error::other("disk on fire");
        match DispatchError::from(HandlerError::from(io)) {
            DispatchError::Internal(cause) => assert_eq!(cause.to_string(), "disk on fire"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_status_code_conversion() {
        let err = HandlerError::from(hyper::StatusCode::CONFLICT);
        assert!(matches!(err, HandlerError::Status(409)));
    }
}
