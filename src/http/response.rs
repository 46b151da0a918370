//! Response normalization
//!
//! Turns handler replies and error signals into complete wire responses.
//! Nothing in here fails: anything that cannot be represented is logged and
//! rendered as 500.

use hyper::header::{HeaderName, HeaderValue, CONTENT_LENGTH, CONTENT_TYPE};
use hyper::{HeaderMap, Response, StatusCode};

use super::body::{self, ResponseBody};
use super::status::ErrorCode;
use crate::error::DispatchError;
use crate::handler::{Reply, TEXT_PLAIN_UTF_8};
use crate::logger;

/// Convert a handler reply into a wire response
///
/// Buffered bodies get a computed `Content-Length` unless the reply set one.
pub fn normalize(reply: Reply) -> Response<ResponseBody> {
    let Ok(status) = StatusCode::from_u16(reply.status) else {
        logger::log_error(&format!("Reply has invalid status code {}", reply.status));
        return render_error(ErrorCode::InternalServerError);
    };

    let mut headers = HeaderMap::with_capacity(reply.headers.len() + 1);
    for (name, value) in &reply.headers {
        let parsed = HeaderName::from_bytes(name.as_bytes())
            .ok()
            .zip(HeaderValue::from_str(value).ok());
        let Some((name, value)) = parsed else {
            logger::log_error(&format!("Reply has invalid header '{name}: {value}'"));
            return render_error(ErrorCode::InternalServerError);
        };
        headers.insert(name, value);
    }

    if allows_body(status) && !headers.contains_key(CONTENT_LENGTH) {
        if let Some(len) = reply.body.buffered_len() {
            headers.insert(CONTENT_LENGTH, HeaderValue::from(len));
        }
    }

    let mut response = Response::new(ResponseBody::from(reply.body));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}

/// Render a known error code with its fixed message
pub fn render_error(code: ErrorCode) -> Response<ResponseBody> {
    let message = code.message();
    Response::builder()
        .status(code.as_u16())
        .header(CONTENT_TYPE, TEXT_PLAIN_UTF_8)
        .header(CONTENT_LENGTH, message.len())
        .body(body::full(message))
        .unwrap_or_else(|e| {
            log_build_error(code.as_u16(), &e);
            Response::new(body::full(message))
        })
}

/// 404 Not Found, the final fallback
pub fn not_found() -> Response<ResponseBody> {
    render_error(ErrorCode::NotFound)
}

/// Render a failure that crossed the dispatch boundary
///
/// Internal causes are logged and never reach the client.
pub fn render_dispatch_error(err: &DispatchError) -> Response<ResponseBody> {
    match err {
        DispatchError::BadRequest(reason) => {
            logger::log_warning(&format!("Rejected request body: {reason}"));
            render_error(ErrorCode::BadRequest)
        }
        DispatchError::PayloadTooLarge { limit } => {
            logger::log_warning(&format!("Request body too large (max: {limit} bytes)"));
            render_error(ErrorCode::PayloadTooLarge)
        }
        DispatchError::Status(code) => ErrorCode::from_u16(*code).map_or_else(
            || {
                logger::log_error(&format!("Handler signalled unknown status {code}"));
                render_error(ErrorCode::InternalServerError)
            },
            render_error,
        ),
        DispatchError::Internal(cause) => {
            logger::log_error(&format!("Handler failed: {cause}"));
            render_error(ErrorCode::InternalServerError)
        }
    }
}

/// 1xx, 204 and 304 responses never carry a body
fn allows_body(status: StatusCode) -> bool {
    !(status.is_informational()
        || status == StatusCode::NO_CONTENT
        || status == StatusCode::NOT_MODIFIED)
}

fn log_build_error(status: u16, error: &hyper::http::Error) {
    logger::log_error(&format!("Failed to build {status} response: {error}"));
}
