// Listener module
// Creates the TCP listener the accept loop reads from

use std::net::SocketAddr;

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::TcpListener;

use crate::error::ServerError;

const BACKLOG: i32 = 128;

/// Create a `TcpListener` with `SO_REUSEADDR` enabled.
///
/// Port 0 binds an ephemeral port; read it back with `local_addr`.
pub fn bind(addr: SocketAddr) -> Result<TcpListener, ServerError> {
    create_listener(addr).map_err(|source| ServerError::Bind { addr, source })
}

fn create_listener(addr: SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;

    // Allows rebinding a port still in TIME_WAIT after a restart
    socket.set_reuse_address(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    socket.listen(BACKLOG)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bind_ephemeral_port() {
        let listener = bind("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        assert_ne!(addr.port(), 0);
    }

    #[tokio::test]
    async fn test_bind_taken_port() {
        let first = bind("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = first.local_addr().unwrap();
        let err = bind(addr).unwrap_err();
        assert!(matches!(err, ServerError::Bind { addr: a, .. } if a == addr));
    }
}
