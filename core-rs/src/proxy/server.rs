//! Descriptor parsing, rendering and local launch

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::endpoint::NetworkEndpoint;
use crate::errors::{ProxyError, Result};
use crate::launch::{ProcessSpawner, ProxyLauncher};
use crate::port::{get_local_open_port, PortProbe};
use crate::runtime::VersionSource;

/// Scheme of file-addressed (current) descriptors
pub const PROXY_HEADER: &str = "proxyfmu://";

/// Scheme of guid-addressed (legacy) descriptors
pub const PROXY_HEADER_OLD: &str = "fmu-proxy://";

/// Which proxy generation a descriptor addresses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyProtocol {
    /// Proxy addressed by the FMU file it serves
    Current { file_path_fmu: String },
    /// Proxy addressed by an opaque guid; the optional path is the FMU a local
    /// launch wraps
    Legacy {
        guid: String,
        file_path_fmu: Option<String>,
    },
}

impl ProxyProtocol {
    pub fn scheme(&self) -> &'static str {
        match self {
            ProxyProtocol::Current { .. } => PROXY_HEADER,
            ProxyProtocol::Legacy { .. } => PROXY_HEADER_OLD,
        }
    }

    fn query_string(&self) -> String {
        match self {
            ProxyProtocol::Current { file_path_fmu } => format!("file={}", file_path_fmu),
            ProxyProtocol::Legacy { guid, .. } => format!("guid={}", guid),
        }
    }
}

/// Endpoint descriptor of an FMU proxy server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyServer {
    endpoint: NetworkEndpoint,
    protocol: ProxyProtocol,
}

impl ProxyServer {
    /// Build from explicit fields
    ///
    /// A guid selects the legacy protocol even when a file path is also given;
    /// the path is then kept as the FMU for local launches.
    ///
    /// # Errors
    /// `MissingIdentifier` when neither a file path nor a guid is supplied
    pub fn new(
        endpoint: NetworkEndpoint,
        file_path_fmu: Option<String>,
        guid: Option<String>,
    ) -> Result<Self> {
        let protocol = match (guid, file_path_fmu) {
            (Some(guid), file_path_fmu) => ProxyProtocol::Legacy {
                guid,
                file_path_fmu,
            },
            (None, Some(file_path_fmu)) => ProxyProtocol::Current { file_path_fmu },
            (None, None) => {
                return Err(ProxyError::MissingIdentifier(format!(
                    "Proxy server at {} needs a file path or a guid",
                    endpoint
                )))
            }
        };

        Ok(Self { endpoint, protocol })
    }

    /// File-addressed descriptor
    pub fn current(endpoint: NetworkEndpoint, file_path_fmu: impl Into<String>) -> Self {
        Self {
            endpoint,
            protocol: ProxyProtocol::Current {
                file_path_fmu: file_path_fmu.into(),
            },
        }
    }

    /// Guid-addressed descriptor
    pub fn legacy(endpoint: NetworkEndpoint, guid: impl Into<String>) -> Self {
        Self {
            endpoint,
            protocol: ProxyProtocol::Legacy {
                guid: guid.into(),
                file_path_fmu: None,
            },
        }
    }

    /// Legacy descriptor on `localhost` bound to the first free port at or
    /// above `start_port`
    pub fn local_with_free_port<P: PortProbe + ?Sized>(
        probe: &P,
        start_port: u16,
        guid: impl Into<String>,
        file_path_fmu: Option<String>,
    ) -> Result<Self> {
        let port = get_local_open_port(probe, start_port)?;
        Ok(Self {
            endpoint: NetworkEndpoint::with_port("localhost", port),
            protocol: ProxyProtocol::Legacy {
                guid: guid.into(),
                file_path_fmu,
            },
        })
    }

    /// Parse `[scheme]address[:port]?file=<path>` or `[scheme]address[:port]?guid=<id>`
    ///
    /// The value is everything after the first `=`; no percent-decoding.
    ///
    /// # Examples
    ///
    /// ```
    /// use fmu_proxy::ProxyServer;
    ///
    /// let server = ProxyServer::parse("h:1234?file=f.fmu").unwrap();
    /// assert_eq!(server.endpoint().address(), "h");
    /// assert_eq!(server.endpoint().port(), Some(1234));
    /// assert_eq!(server.file_path_fmu(), Some("f.fmu"));
    /// assert!(!server.has_guid());
    /// ```
    pub fn parse(source_text: &str) -> Result<Self> {
        let (scheme, body) = split_scheme(source_text);

        let (address_port, query) = body.split_once('?').ok_or_else(|| {
            ProxyError::InvalidDescriptor(format!(
                "Expected address[:port]?file=<path> or ?guid=<id>, got '{}'",
                source_text
            ))
        })?;

        let endpoint: NetworkEndpoint = address_port.parse()?;

        let (key, value) = query.split_once('=').ok_or_else(|| {
            ProxyError::InvalidDescriptor(format!("Missing '=' in query '{}'", query))
        })?;

        if value.is_empty() {
            return Err(ProxyError::InvalidDescriptor(format!(
                "Empty {} value in '{}'",
                key, source_text
            )));
        }

        let protocol = match key {
            "file" => ProxyProtocol::Current {
                file_path_fmu: value.to_string(),
            },
            "guid" => ProxyProtocol::Legacy {
                guid: value.to_string(),
                file_path_fmu: None,
            },
            other => {
                return Err(ProxyError::InvalidDescriptor(format!(
                    "Unknown query key '{}', expected 'file' or 'guid'",
                    other
                )))
            }
        };

        if let Some(scheme) = scheme {
            if scheme != protocol.scheme() {
                return Err(ProxyError::InvalidDescriptor(format!(
                    "Scheme {} does not match query key '{}'",
                    scheme, key
                )));
            }
        }

        debug!(endpoint = %endpoint, key, "parsed proxy descriptor");
        Ok(Self { endpoint, protocol })
    }

    pub fn endpoint(&self) -> &NetworkEndpoint {
        &self.endpoint
    }

    pub fn protocol(&self) -> &ProxyProtocol {
        &self.protocol
    }

    pub fn guid(&self) -> Option<&str> {
        match &self.protocol {
            ProxyProtocol::Legacy { guid, .. } => Some(guid),
            ProxyProtocol::Current { .. } => None,
        }
    }

    pub fn file_path_fmu(&self) -> Option<&str> {
        match &self.protocol {
            ProxyProtocol::Current { file_path_fmu } => Some(file_path_fmu),
            ProxyProtocol::Legacy { file_path_fmu, .. } => file_path_fmu.as_deref(),
        }
    }

    /// True for legacy (guid-addressed) descriptors
    pub fn has_guid(&self) -> bool {
        matches!(self.protocol, ProxyProtocol::Legacy { .. })
    }

    /// Descriptor string for a system structure file
    ///
    /// # Examples
    ///
    /// ```
    /// use fmu_proxy::{NetworkEndpoint, ProxyServer};
    ///
    /// let server = ProxyServer::legacy(NetworkEndpoint::with_port("h", 9090), "g");
    /// assert_eq!(server.endpoint_str(), "fmu-proxy://h:9090?guid=g");
    /// ```
    pub fn endpoint_str(&self) -> String {
        format!(
            "{}{}?{}",
            self.protocol.scheme(),
            self.endpoint.network_string(),
            self.protocol.query_string()
        )
    }

    /// Command line that would start this proxy locally
    ///
    /// # Errors
    /// - `MissingIdentifier` for file-addressed descriptors
    /// - `MissingFmuPath` when neither `fmu_path` nor a stored path is present
    /// - runtime check failures
    pub fn get_local_fmu_proxy_command<V: VersionSource, S: ProcessSpawner>(
        &self,
        launcher: &ProxyLauncher<V, S>,
        fmu_path: Option<&str>,
        for_package: bool,
    ) -> Result<Vec<String>> {
        let (port, fmu_path) = self.local_launch_target(fmu_path, launcher.default_port())?;
        launcher.command(port, fmu_path, for_package)
    }

    /// Start this proxy locally and hand back the running process
    ///
    /// The process is not awaited.
    pub fn run_local_fmu_proxy<V: VersionSource, S: ProcessSpawner>(
        &self,
        launcher: &ProxyLauncher<V, S>,
        fmu_path: Option<&str>,
    ) -> Result<S::Handle> {
        let (port, fmu_path) = self.local_launch_target(fmu_path, launcher.default_port())?;
        launcher.launch(port, fmu_path)
    }

    fn local_launch_target<'a>(
        &'a self,
        fmu_path: Option<&'a str>,
        default_port: u16,
    ) -> Result<(u16, &'a str)> {
        let stored = match &self.protocol {
            ProxyProtocol::Legacy { file_path_fmu, .. } => file_path_fmu.as_deref(),
            ProxyProtocol::Current { .. } => {
                return Err(ProxyError::MissingIdentifier(format!(
                    "GUID missing for the proxy server {}",
                    self.endpoint_str()
                )))
            }
        };

        let fmu_path = fmu_path.or(stored).ok_or_else(|| {
            ProxyError::MissingFmuPath(format!(
                "No FMU given to wrap for proxy server {}",
                self.endpoint_str()
            ))
        })?;

        Ok((self.endpoint.port().unwrap_or(default_port), fmu_path))
    }
}

fn split_scheme(text: &str) -> (Option<&'static str>, &str) {
    for scheme in [PROXY_HEADER, PROXY_HEADER_OLD] {
        if let Some(rest) = text.strip_prefix(scheme) {
            return (Some(scheme), rest);
        }
    }
    (None, text)
}

impl fmt::Display for ProxyServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.endpoint_str())
    }
}

impl FromStr for ProxyServer {
    type Err = ProxyError;

    fn from_str(text: &str) -> Result<Self> {
        Self::parse(text)
    }
}
