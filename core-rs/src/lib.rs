//! # FMU Proxy - co-simulation proxy server broker
//!
//! Resolves proxy server descriptors for FMUs (Functional Mock-up Units) served
//! over the network, and starts local proxy servers around FMU files.
//!
//! ## Descriptor Formats
//!
//! ```text
//! proxyfmu://<address>[:<port>]?file=<path>       current protocol
//! fmu-proxy://<address>[:<port>]?guid=<id>        legacy protocol
//! ```
//!
//! ## Local Launch
//!
//! ```text
//! descriptor ──parse──▶ ProxyServer ──▶ runtime check (java 1.8.0, build ≤ 333)
//!                                   ──▶ argv: java -jar <jar> -thrift/tcp <port> <fmu>
//!                                   ──▶ spawn (not awaited)
//! ```
//!
//! The library only emits `tracing` events; installing a subscriber is left to
//! the host application.

pub mod config;
pub mod endpoint;
pub mod errors;
pub mod launch;
pub mod port;
pub mod proxy;
pub mod runtime;

pub use config::ProxyConfig;
pub use endpoint::NetworkEndpoint;
pub use errors::{ProxyError, Result};
pub use launch::{
    get_run_arguments_for_proxy_fmu, OutputMode, ProcessSpawner, ProxyInstall, ProxyLauncher,
    SystemSpawner,
};
pub use port::{check_local_port, get_local_open_port, PortProbe, TcpPortProbe};
pub use proxy::{ProxyProtocol, ProxyServer, PROXY_HEADER, PROXY_HEADER_OLD};
pub use runtime::{check_java_version_for_fmu_proxy, JavaRuntime, JavaVersion, VersionSource};
