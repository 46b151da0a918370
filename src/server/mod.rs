// Server module entry point
// Listener creation, the accept loop and the running server handle

pub mod connection;
pub mod listener;

// `loop` is a keyword, so the file is mounted under another name
#[path = "loop.rs"]
pub mod server_loop;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::Notify;
use tokio::task::JoinHandle;

use crate::config::AppState;
use crate::error::ServerError;
use crate::logger;

/// A server accepting connections in the background
#[derive(Debug)]
pub struct Server {
    local_addr: SocketAddr,
    shutdown: Arc<Notify>,
    task: JoinHandle<()>,
}

impl Server {
    /// Bind `addr` and start the accept loop
    pub fn start(addr: SocketAddr, state: Arc<AppState>) -> Result<Self, ServerError> {
        let listener = listener::bind(addr)?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| ServerError::Bind { addr, source })?;

        let shutdown = Arc::new(Notify::new());
        let task = tokio::spawn(server_loop::run(listener, state, Arc::clone(&shutdown)));

        Ok(Self {
            local_addr,
            shutdown,
            task,
        })
    }

    /// The bound address, with the real port when bound to port 0
    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop accepting and release the listener
    ///
    /// Connections already accepted finish on their own.
    pub async fn close(self) -> Result<(), ServerError> {
        // notify_one stores a permit, so this works even if the loop is mid-accept
        self.shutdown.notify_one();
        self.task.await?;
        logger::log_server_closed(&self.local_addr);
        Ok(())
    }
}
