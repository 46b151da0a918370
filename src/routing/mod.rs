//! Routing module
//!
//! Exact (method, path) routing. No patterns, no prefixes, no wildcards.

mod method;
mod table;

pub use method::{Method, UnsupportedMethod};
pub use table::RouteTable;
