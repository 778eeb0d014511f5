/**
 * discovery.rs
 * Local TCP port availability and forward scanning
 *
 * A port is considered free when nothing accepts a TCP connection on it.
 * The scan walks upward from a starting port and stops at 65535:
 *
 * - start=9090, 9090 busy, 9091 free → 9091
 * - start=65535, 65535 busy        → PortUnavailable
 */

use std::net::TcpStream;

use tracing::debug;

use crate::errors::{ProxyError, Result};

/// Host every probe connects to
pub const PROBE_HOST: &str = "localhost";

/// Answers whether a local port is free
pub trait PortProbe {
    fn is_port_free(&self, port: u16) -> bool;
}

impl<F> PortProbe for F
where
    F: Fn(u16) -> bool,
{
    fn is_port_free(&self, port: u16) -> bool {
        self(port)
    }
}

/// Probe backed by a real TCP connect to `localhost`
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpPortProbe;

impl PortProbe for TcpPortProbe {
    fn is_port_free(&self, port: u16) -> bool {
        check_local_port(port)
    }
}

/// Test if a local port is free
///
/// # Returns
/// true if the connect attempt fails, false if something is listening
pub fn check_local_port(port: u16) -> bool {
    // The stream, if any, is dropped before returning.
    match TcpStream::connect((PROBE_HOST, port)) {
        Ok(_stream) => false,
        Err(_) => true,
    }
}

/// Find the first free port at or above `start_port`
///
/// # Arguments
/// * `probe` - Availability check to consult
/// * `start_port` - First port to try; port 0 is never returned, so a
///   start of 0 scans from 1
///
/// # Errors
/// Returns `PortUnavailable` when every port up to 65535 is busy
pub fn get_local_open_port<P: PortProbe + ?Sized>(probe: &P, start_port: u16) -> Result<u16> {
    let start_port = start_port.max(1);
    for port in start_port..=u16::MAX {
        if probe.is_port_free(port) {
            debug!(port, start_port, "found free local port");
            return Ok(port);
        }
        debug!(port, "local port busy");
    }

    Err(ProxyError::PortUnavailable(format!(
        "No free local port in range {}-{}",
        start_port,
        u16::MAX
    )))
}
