// Server loop module
// Accepts connections until shutdown is requested

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::handle_connection;
use crate::config::AppState;
use crate::logger;

/// Accept connections until `shutdown` is notified, then drop the listener
///
/// Connections already accepted keep running on their own tasks.
#[allow(clippy::ignored_unit_patterns)]
pub async fn run(listener: TcpListener, state: Arc<AppState>, shutdown: Arc<Notify>) {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        handle_connection(stream, peer_addr, Arc::clone(&state));
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            _ = shutdown.notified() => break,
        }
    }
}
