//! Proxy server descriptors
//!
//! A descriptor names a running (or to-be-started) FMU proxy server. Two
//! protocol generations exist and are told apart by their query key:
//!
//! ```text
//! proxyfmu://localhost:9090?file=models/pump.fmu     current, file-addressed
//! fmu-proxy://10.0.0.7:9090?guid={4b2c-...}          legacy, guid-addressed
//! ```
//!
//! The scheme prefix is optional when parsing, so both the short form
//! `localhost:9090?file=models/pump.fmu` and a rendered descriptor are accepted.

mod server;

pub use server::{ProxyProtocol, ProxyServer, PROXY_HEADER, PROXY_HEADER_OLD};
