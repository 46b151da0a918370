//! Request dispatcher
//!
//! Resolves one request against the route table, builds its parameters from
//! the query string or body, and runs the matched handler. A route miss is
//! not an error: it comes back as [`Dispatch::NoRoute`] so the caller can try
//! the static fallback.

use std::any::Any;
use std::borrow::Cow;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use encoding_rs::Encoding;
use futures::FutureExt;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::header::CONTENT_TYPE;
use hyper::Request;

use crate::error::{BoxError, DispatchError};
use crate::handler::{Context, Reply};
use crate::params::Params;
use crate::routing::{Method, RouteTable};

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
const JSON: &str = "application/json";
const DEFAULT_CHARSET: &str = "utf-8";

/// Outcome of a dispatch that did not fail
#[derive(Debug)]
pub enum Dispatch {
    /// A handler ran and produced a reply
    Matched(Reply),
    /// No route for this method and path
    NoRoute,
}

#[derive(Debug, Clone)]
pub struct Dispatcher {
    routes: Arc<RouteTable>,
    max_body_size: usize,
}

impl Dispatcher {
    pub const fn new(routes: Arc<RouteTable>, max_body_size: usize) -> Self {
        Self {
            routes,
            max_body_size,
        }
    }

    pub async fn dispatch<B>(&self, req: Request<B>) -> Result<Dispatch, DispatchError>
    where
        B: Body<Data = Bytes>,
        B::Error: Into<BoxError>,
    {
        let target = req.uri().path_and_query().map_or("/", |pq| pq.as_str());
        let (path, search) = split_target(target);

        let Some(method) = Method::from_http(req.method()) else {
            return Ok(Dispatch::NoRoute);
        };
        let Some(handler) = self.routes.lookup(method, path) else {
            return Ok(Dispatch::NoRoute);
        };
        let handler = Arc::clone(handler);
        let path = path.to_string();

        let params = if method == Method::Get {
            match search {
                Some(query) => Params::from_urlencoded(query)
                    .map_err(|e| DispatchError::BadRequest(format!("invalid query string: {e}")))?,
                None => Params::new(),
            }
        } else {
            self.read_body_params(req).await?
        };

        let ctx = Context {
            path,
            method,
            params,
        };
        // A panicking handler becomes a 500 instead of killing the connection
        let reply = AssertUnwindSafe(async move { handler(ctx).await })
            .catch_unwind()
            .await
            .map_err(|payload| DispatchError::Internal(panic_error(payload.as_ref())))??;
        Ok(Dispatch::Matched(reply))
    }

    /// Read the whole body and parse it according to its content type
    ///
    /// Only form and JSON bodies produce parameters; any other type leaves
    /// them empty and the raw bytes are dropped.
    async fn read_body_params<B>(&self, req: Request<B>) -> Result<Params, DispatchError>
    where
        B: Body<Data = Bytes>,
        B::Error: Into<BoxError>,
    {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let (essence, charset) = parse_content_type(&content_type);

        let body = Limited::new(req.into_body(), self.max_body_size)
            .collect()
            .await
            .map_err(|e| self.body_error(e))?
            .to_bytes();

        match essence {
            FORM_URLENCODED => {
                let text = decode_text(&body, charset)?;
                Params::from_urlencoded(&text)
                    .map_err(|e| DispatchError::BadRequest(format!("invalid form body: {e}")))
            }
            JSON => {
                let text = decode_text(&body, charset)?;
                Params::from_json(&text)
                    .map_err(|e| DispatchError::BadRequest(format!("invalid JSON body: {e}")))
            }
            _ => Ok(Params::new()),
        }
    }

    fn body_error(&self, err: BoxError) -> DispatchError {
        if err.downcast_ref::<LengthLimitError>().is_some() {
            DispatchError::PayloadTooLarge {
                limit: self.max_body_size,
            }
        } else {
            DispatchError::Internal(err)
        }
    }
}

fn panic_error(payload: &(dyn Any + Send)) -> BoxError {
    let message = payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload");
    format!("handler panicked: {message}").into()
}

/// Split a request target into path and query at the first `?`
pub fn split_target(target: &str) -> (&str, Option<&str>) {
    match target.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (target, None),
    }
}

/// Base type (trimmed, case preserved) and `charset` parameter of a content-type value
pub fn parse_content_type(value: &str) -> (&str, Option<&str>) {
    let mut parts = value.split(';');
    let essence = parts.next().unwrap_or_default().trim();
    let charset = parts
        .filter_map(|param| param.split_once('='))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("charset"))
        .map(|(_, v)| v.trim().trim_matches('"'));
    (essence, charset)
}

fn decode_text<'a>(bytes: &'a Bytes, charset: Option<&str>) -> Result<Cow<'a, str>, DispatchError> {
    let label = charset.unwrap_or(DEFAULT_CHARSET);
    let encoding = Encoding::for_label(label.as_bytes())
        .ok_or_else(|| DispatchError::BadRequest(format!("unsupported charset '{label}'")))?;
    let (text, _had_errors) = encoding.decode_with_bom_removal(bytes);
    Ok(text)
}
