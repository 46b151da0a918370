//! Application builder
//!
//! Collects routes, then freezes them into the shared state a [`Server`]
//! serves from.

use std::sync::Arc;

use crate::config::{AppOptions, AppState, Config};
use crate::error::ServerError;
use crate::handler::Route;
use crate::logger;
use crate::routing::RouteTable;
use crate::server::Server;

#[derive(Debug)]
pub struct App {
    config: Config,
    routes: RouteTable,
}

impl App {
    /// Listen on `0.0.0.0:<port>` with everything else at its default
    pub fn new(options: AppOptions) -> Self {
        Self::from_config(Config::from(options))
    }

    pub fn from_config(config: Config) -> Self {
        Self {
            config,
            routes: RouteTable::new(),
        }
    }

    /// Register routes; a later route for the same method and path replaces
    /// the earlier one
    #[must_use]
    pub fn handle<I>(mut self, routes: I) -> Self
    where
        I: IntoIterator<Item = Route>,
    {
        for route in routes {
            self.routes.register(route.method, route.path, route.handler);
        }
        self
    }

    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Bind the configured address and start serving
    ///
    /// The route table is frozen from here on. Must run inside a tokio runtime.
    #[allow(clippy::unused_async)]
    pub async fn listen(self) -> Result<Server, ServerError> {
        let addr = self.config.socket_addr()?;
        let route_count = self.routes.len();
        let state = Arc::new(AppState::new(self.config, self.routes));

        let server = Server::start(addr, Arc::clone(&state))?;
        logger::log_server_start(&state.config, route_count);
        logger::log_listening(&server.local_addr());
        Ok(server)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(AppOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_PORT;
    use crate::error::HandlerError;
    use crate::handler::Context;

    fn hello() -> Route {
        Route::get("/hi", |_ctx: Context| async { Ok::<_, HandlerError>((200, "hello")) })
    }

    #[test]
    fn test_new_uses_options() {
        let app = App::new(AppOptions {
            port: 8081,
            ..AppOptions::default()
        });
        assert_eq!(app.config().server.port, 8081);
        assert_eq!(app.config().server.host, "0.0.0.0");
        assert!(app.config().static_files.enabled);
        assert_eq!(App::default().config().server.port, DEFAULT_PORT);
    }

    #[test]
    fn test_handle_overwrites() {
        let app = App::default().handle([hello(), hello()]).handle(vec![Route::post(
            "/hi",
            |_ctx: Context| async { Ok::<_, HandlerError>((201, "made")) },
        )]);
        assert_eq!(app.routes.len(), 2);
    }

    #[tokio::test]
    async fn test_listen_invalid_host() {
        let mut config = Config::default();
        config.server.host = "nowhere".to_string();
        let err = App::from_config(config).listen().await.unwrap_err();
        assert!(matches!(err, ServerError::InvalidAddress(_)));
    }
}
