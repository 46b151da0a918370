//! Route table
//!
//! Two-level mapping from method to exact path to handler. The table is
//! assembled by [`crate::App`] and frozen behind an `Arc` before the accept
//! loop starts, so lookups never take a lock.

use std::collections::HashMap;

use super::Method;
use crate::handler::Handler;

#[derive(Default, Clone)]
pub struct RouteTable {
    routes: HashMap<Method, HashMap<String, Handler>>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a handler, replacing any previous one for the same method and path
    ///
    /// Returns the displaced handler, if there was one.
    pub fn register(&mut self, method: Method, path: impl Into<String>, handler: Handler) -> Option<Handler> {
        self.routes
            .entry(method)
            .or_default()
            .insert(path.into(), handler)
    }

    /// Exact, byte-for-byte lookup. A trailing slash is significant.
    pub fn lookup(&self, method: Method, path: &str) -> Option<&Handler> {
        self.routes.get(&method)?.get(path)
    }

    /// Number of registered (method, path) pairs
    pub fn len(&self) -> usize {
        self.routes.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();
        for (method, paths) in &self.routes {
            for path in paths.keys() {
                list.entry(&format_args!("{method} {path}"));
            }
        }
        list.finish()
    }
}
