//! Response body type
//!
//! Buffered bodies and streamed files share one boxed body type so the
//! connection layer serves a single `Response<ResponseBody>`.

use futures::TryStreamExt;
use http_body_util::combinators::UnsyncBoxBody;
use http_body_util::{BodyExt, Empty, Full, StreamBody};
use hyper::body::{Bytes, Frame};
use tokio_util::io::ReaderStream;

use crate::handler::Body;

pub type ResponseBody = UnsyncBoxBody<Bytes, std::io::Error>;

pub fn empty() -> ResponseBody {
    Empty::<Bytes>::new().map_err(|never| match never {}).boxed_unsync()
}

pub fn full(data: impl Into<Bytes>) -> ResponseBody {
    Full::new(data.into())
        .map_err(|never| match never {})
        .boxed_unsync()
}

/// Stream a file in chunks instead of reading it up front
pub fn file(file: tokio::fs::File) -> ResponseBody {
    StreamBody::new(ReaderStream::new(file).map_ok(Frame::data)).boxed_unsync()
}

impl From<Body> for ResponseBody {
    fn from(body: Body) -> Self {
        match body {
            Body::Empty => empty(),
            Body::Text(text) => full(text),
            Body::Bytes(bytes) => full(bytes),
            Body::File(handle) => file(handle),
        }
    }
}
