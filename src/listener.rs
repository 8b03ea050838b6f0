//! Listener setup: create a socket of the configured family, enable
//! address reuse, bind the wildcard address, listen, accept one peer.

use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, TcpListener, TcpStream};

use socket2::{Domain, Protocol, Socket, Type};

use crate::config::{AddrFamily, ListenerConfig};
use crate::Error;

/// The OS queues at most one not-yet-accepted connection.
const LISTEN_BACKLOG: i32 = 1;

/// Build the listening socket. Each step that fails is fatal and names
/// the stage that failed. No retries, no fallback ports.
pub fn bind(config: &ListenerConfig) -> Result<TcpListener, Error> {
    let domain = match config.family {
        AddrFamily::V4 => Domain::IPV4,
        AddrFamily::V6 => Domain::IPV6,
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))
        .map_err(|e| Error::setup("socket", e))?;
    socket
        .set_reuse_address(true)
        .map_err(|e| Error::setup("reuseaddr", e))?;

    let addr: SocketAddr = match config.family {
        AddrFamily::V4 => (Ipv4Addr::UNSPECIFIED, config.port).into(),
        AddrFamily::V6 => (Ipv6Addr::UNSPECIFIED, config.port).into(),
    };
    socket
        .bind(&addr.into())
        .map_err(|e| Error::setup("bind", e))?;
    socket
        .listen(LISTEN_BACKLOG)
        .map_err(|e| Error::setup("listen", e))?;

    Ok(socket.into())
}

/// Block until the single peer connects.
pub fn accept(listener: &TcpListener) -> Result<TcpStream, Error> {
    eprintln!("Waiting for connection...");
    let (stream, addr) = listener.accept().map_err(|e| Error::setup("accept", e))?;
    eprintln!("Peer connected from {}", addr);
    Ok(stream)
}
