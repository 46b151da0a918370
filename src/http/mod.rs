//! HTTP protocol layer module
//!
//! Response bodies, content-type resolution, the error status table and the
//! response normalizer. Independent of routing.

pub mod body;
pub mod mime;
pub mod response;
pub mod status;

pub use body::ResponseBody;
pub use response::{normalize, not_found, render_dispatch_error, render_error};
pub use status::ErrorCode;
