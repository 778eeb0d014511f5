//! Address/port pair with string and JSON rendering

use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use std::fmt;
use std::str::FromStr;

use crate::errors::{ProxyError, Result};

/// Address used when a proxy descriptor is built without an explicit endpoint
pub const DEFAULT_ADDRESS: &str = "localhost";

/// Port used when a proxy descriptor is built without an explicit endpoint
pub const DEFAULT_PORT: u16 = 9090;

/// Immutable (address, optional port) pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NetworkEndpoint {
    address: String,
    port: Option<u16>,
}

impl NetworkEndpoint {
    pub fn new(address: impl Into<String>, port: Option<u16>) -> Self {
        Self {
            address: address.into(),
            port,
        }
    }

    /// Endpoint with an explicit port
    pub fn with_port(address: impl Into<String>, port: u16) -> Self {
        Self::new(address, Some(port))
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// `address` when the port is unset, `address:port` otherwise
    ///
    /// # Examples
    ///
    /// ```
    /// use fmu_proxy::NetworkEndpoint;
    ///
    /// assert_eq!(NetworkEndpoint::new("localhost", None).network_string(), "localhost");
    /// assert_eq!(NetworkEndpoint::with_port("h", 1234).network_string(), "h:1234");
    /// ```
    pub fn network_string(&self) -> String {
        match self.port {
            Some(port) => format!("{}:{}", self.address, port),
            None => self.address.clone(),
        }
    }

    /// True only for the literal `localhost` and `127.0.0.1`
    pub fn is_local_host(&self) -> bool {
        matches!(self.address.as_str(), "localhost" | "127.0.0.1")
    }

    /// Structural form, `port` is `null` when unset
    pub fn to_dict(&self) -> JsonValue {
        json!({
            "address": self.address,
            "port": self.port,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_dict())?)
    }
}

impl Default for NetworkEndpoint {
    fn default() -> Self {
        Self::with_port(DEFAULT_ADDRESS, DEFAULT_PORT)
    }
}

impl fmt::Display for NetworkEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.network_string())
    }
}

impl FromStr for NetworkEndpoint {
    type Err = ProxyError;

    /// Parse `address[:port]`
    fn from_str(text: &str) -> Result<Self> {
        let (address, port) = match text.split_once(':') {
            Some((address, port)) => {
                let port = port.parse::<u16>().map_err(|e| {
                    ProxyError::InvalidDescriptor(format!("Invalid port '{}' in '{}': {}", port, text, e))
                })?;
                (address, Some(port))
            }
            None => (text, None),
        };

        if address.is_empty() {
            return Err(ProxyError::InvalidDescriptor(format!(
                "Missing address in '{}'",
                text
            )));
        }

        Ok(Self::new(address, port))
    }
}
