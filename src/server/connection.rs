// Connection module
// Serves one accepted TCP connection on its own task

use std::net::SocketAddr;
use std::sync::Arc;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Handle a single connection in a spawned task.
///
/// The connection keeps serving requests until the peer closes it (or after
/// one request when keep-alive is off). Errors are logged, never propagated.
pub fn handle_connection(stream: TcpStream, peer_addr: SocketAddr, state: Arc<AppState>) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let mut builder = http1::Builder::new();
        builder.keep_alive(state.config.performance.keep_alive);

        let conn = builder.serve_connection(
            io,
            service_fn(move |req| handler::handle_request(req, Arc::clone(&state), peer_addr)),
        );

        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }
    });
}
