//! Network start signal — a minimal TCP listener for the show-control "go".
//!
//! The remote console opens a TCP connection and sends an HTTP-style request
//! line (`GET /<token> HTTP/1.1`).  The token is extracted, the request is
//! answered with a 200 and the connection closed.  `std::net` exists on both
//! espidf (lwIP VFS) and the host, so this adapter needs no cfg gating and
//! its tests run against a real socket.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::time::Duration;

use log::{debug, info, warn};

use crate::app::ports::StartSignalPort;

pub struct TcpStartListener {
    listener: TcpListener,
}

impl TcpStartListener {
    /// Bind on all interfaces.  The socket is non-blocking so the start gate
    /// can interleave network polls with button reads.
    pub fn bind(port: u16) -> std::io::Result<Self> {
        let listener = TcpListener::bind(("0.0.0.0", port))?;
        listener.set_nonblocking(true)?;
        info!("start listener bound on port {}", port);
        Ok(Self { listener })
    }

    /// Actual bound port (differs from the requested one when binding 0).
    pub fn local_port(&self) -> std::io::Result<u16> {
        Ok(self.listener.local_addr()?.port())
    }
}

/// Extract the token from an HTTP-style request line: the path segment
/// between `GET /` and the next whitespace, truncated to the token capacity.
pub fn parse_request_token(buf: &[u8]) -> Option<heapless::String<32>> {
    let text = core::str::from_utf8(buf).ok()?;
    let rest = text.strip_prefix("GET /")?;
    let token = rest.split([' ', '\r', '\n']).next()?;
    if token.is_empty() {
        return None;
    }
    let mut out = heapless::String::new();
    for ch in token.chars() {
        if out.push(ch).is_err() {
            // Longer than any token we act on; keep the prefix.
            break;
        }
    }
    Some(out)
}

impl StartSignalPort for TcpStartListener {
    fn poll_token(&mut self) -> Option<heapless::String<32>> {
        match self.listener.accept() {
            Ok((mut stream, peer)) => {
                debug!("start listener: connection from {}", peer);
                // The accepted stream inherits non-blocking mode; switch to a
                // bounded blocking read for the one request line.
                let _ = stream.set_nonblocking(false);
                let _ = stream.set_read_timeout(Some(Duration::from_millis(500)));

                let mut buf = [0u8; 256];
                let n = match stream.read(&mut buf) {
                    Ok(n) => n,
                    Err(e) => {
                        warn!("start listener: read failed: {}", e);
                        return None;
                    }
                };
                let token = parse_request_token(&buf[..n]);
                let _ = stream.write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\n\r\nok");
                token
            }
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => None,
            Err(e) => {
                warn!("start listener: accept failed: {}", e);
                None
            }
        }
    }
}

/// Button-only fallback when the listener socket cannot be bound.
pub struct NullStartSignal;

impl StartSignalPort for NullStartSignal {
    fn poll_token(&mut self) -> Option<heapless::String<32>> {
        None
    }
}
