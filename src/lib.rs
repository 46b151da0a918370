//! plainroute
//!
//! A minimal HTTP framework. Handlers are registered for an exact method and
//! path; requests that match no route fall back to files under a public
//! directory, and everything else is a 404.
//!
//! ```no_run
//! use plainroute::{App, AppOptions, Context, HandlerError, Reply, Route};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let server = App::new(AppOptions::default())
//!     .handle([
//!         Route::get("/hi", |_ctx: Context| async { Ok::<_, HandlerError>((200, "hello")) }),
//!         Route::post("/echo", |ctx: Context| async move {
//!             Reply::json(200, &ctx.params).map_err(HandlerError::from)
//!         }),
//!     ])
//!     .listen()
//!     .await?;
//! server.close().await?;
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod params;
pub mod routing;
pub mod server;

pub use app::App;
pub use config::{AppOptions, Config, DEFAULT_PORT};
pub use dispatch::{Dispatch, Dispatcher};
pub use error::{DispatchError, HandlerError, ServerError};
pub use handler::{handler_fn, Body, Context, Handler, HandlerResult, Reply, Route};
pub use params::Params;
pub use routing::{Method, RouteTable};
pub use server::Server;
