//! Request handler module
//!
//! Defines the handler contract applications register, the per-request
//! pipeline (`router`) and the static file fallback (`static_files`).

mod reply;
pub mod router;
pub mod static_files;

use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;

pub use reply::{Body, Reply, TEXT_PLAIN_UTF_8};
pub use router::handle_request;

use crate::error::HandlerError;
use crate::params::Params;
use crate::routing::Method;

/// Per-request input handed to a handler
#[derive(Debug, Clone)]
pub struct Context {
    pub path: String,
    pub method: Method,
    pub params: Params,
}

pub type HandlerResult = Result<Reply, HandlerError>;

/// Type-erased route handler
///
/// Every handler is asynchronous; a handler with nothing to await simply
/// returns a ready future.
pub type Handler = Arc<dyn Fn(Context) -> BoxFuture<'static, HandlerResult> + Send + Sync>;

/// Wrap an async closure or fn into a [`Handler`]
///
/// The closure may return anything convertible into a [`Reply`], such as the
/// `(status, text)` shorthand or a full `(status, headers, body)` triple.
pub fn handler_fn<F, Fut, R>(f: F) -> Handler
where
    F: Fn(Context) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<R, HandlerError>> + Send + 'static,
    R: Into<Reply>,
{
    Arc::new(move |ctx| f(ctx).map(|res| res.map(Into::into)).boxed())
}

/// Route descriptor: exact path, method and handler
#[derive(Clone)]
pub struct Route {
    pub path: String,
    pub method: Method,
    pub handler: Handler,
}

impl Route {
    pub fn new(method: Method, path: impl Into<String>, handler: Handler) -> Self {
        Self {
            path: path.into(),
            method,
            handler,
        }
    }

    /// Route for any method; the per-method helpers below are shorthands for this
    pub fn on<F, Fut, R>(method: Method, path: impl Into<String>, f: F) -> Self
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<R, HandlerError>> + Send + 'static,
        R: Into<Reply>,
    {
        Self::new(method, path, handler_fn(f))
    }
}

macro_rules! method_helpers {
    ($($name:ident => $method:ident),* $(,)?) => {
        impl Route {
            $(
                pub fn $name<F, Fut, R>(path: impl Into<String>, f: F) -> Self
                where
                    F: Fn(Context) -> Fut + Send + Sync + 'static,
                    Fut: Future<Output = Result<R, HandlerError>> + Send + 'static,
                    R: Into<Reply>,
                {
                    Self::on(Method::$method, path, f)
                }
            )*
        }
    };
}

method_helpers! {
    get => Get,
    post => Post,
    put => Put,
    patch => Patch,
    delete => Delete,
    options => Options,
    link => Link,
    unlink => Unlink,
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
