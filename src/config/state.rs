// Application state module
// Everything a connection needs, shared read-only across tasks

use std::sync::Arc;

use super::types::Config;
use crate::dispatch::Dispatcher;
use crate::routing::RouteTable;

/// Application state
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub dispatcher: Dispatcher,
}

impl AppState {
    /// Freeze a route table together with the configuration it is served with
    pub fn new(config: Config, routes: RouteTable) -> Self {
        let dispatcher = Dispatcher::new(Arc::new(routes), config.http.max_body_size);
        Self { config, dispatcher }
    }
}
