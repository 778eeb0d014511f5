//! Network endpoint values
//!
//! An endpoint is an address plus an optional port. When the port is absent
//! the rendered network string carries no `:` separator at all:
//!
//! ```text
//! localhost          (port unspecified)
//! 10.0.0.7:9090
//! ```

mod network;

pub use network::{NetworkEndpoint, DEFAULT_ADDRESS, DEFAULT_PORT};
