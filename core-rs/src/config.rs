/**
 * config.rs
 * Settings for local proxy launches (YAML format)
 *
 * Format:
 * ```yaml
 * installRoot: /opt/cosim
 * runtime: /usr/lib/jvm/java-8-openjdk/bin/java
 * defaultPort: 9090
 * scanStartPort: 9090
 * ```
 *
 * A relative `installRoot` is resolved against the directory holding the file.
 * Whatever is still relative when an install is built (the default `.`, or a
 * file loaded by bare name) is resolved against the working directory, so the
 * jar path handed to the runtime is always absolute.
 */

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::endpoint::DEFAULT_PORT;
use crate::errors::{ProxyError, Result};
use crate::launch::{ProxyInstall, ProxyLauncher};
use crate::runtime::DEFAULT_RUNTIME;

/// Proxy launch settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ProxyConfig {
    /// Directory containing `osp_cosim/win64/bin_old/fmu-proxy.jar`
    pub install_root: PathBuf,
    /// Runtime executable used for the version check and the launch
    pub runtime: String,
    /// Port for descriptors that carry none
    pub default_port: u16,
    /// First port tried when looking for a free local port
    pub scan_start_port: u16,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            install_root: PathBuf::from("."),
            runtime: DEFAULT_RUNTIME.to_string(),
            default_port: DEFAULT_PORT,
            scan_start_port: DEFAULT_PORT,
        }
    }
}

impl ProxyConfig {
    /// Load settings from a YAML file
    ///
    /// Returns defaults if the file doesn't exist
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            ProxyError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let mut config: ProxyConfig = serde_yaml::from_str(&content)?;

        if config.install_root.is_relative() {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                config.install_root = parent.join(&config.install_root);
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Write settings as YAML
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path.as_ref(), yaml)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.runtime.trim().is_empty() {
            return Err(ProxyError::Config("runtime must not be empty".to_string()));
        }
        if self.default_port == 0 {
            return Err(ProxyError::Config("defaultPort must be non-zero".to_string()));
        }
        if self.scan_start_port == 0 {
            return Err(ProxyError::Config("scanStartPort must be non-zero".to_string()));
        }
        Ok(())
    }

    /// Install root made absolute against the working directory
    pub fn resolved_install_root(&self) -> Result<PathBuf> {
        if self.install_root.is_absolute() {
            return Ok(self.install_root.clone());
        }
        let cwd = std::env::current_dir().map_err(|e| {
            ProxyError::Config(format!(
                "Cannot resolve installRoot {}: {}",
                self.install_root.display(),
                e
            ))
        })?;
        Ok(cwd.join(&self.install_root))
    }

    pub fn install(&self) -> Result<ProxyInstall> {
        Ok(ProxyInstall::new(self.resolved_install_root()?).with_runtime(&self.runtime))
    }

    /// Launcher using real processes and the configured runtime
    pub fn launcher(&self) -> Result<ProxyLauncher> {
        Ok(ProxyLauncher::new(self.install()?).with_default_port(self.default_port))
    }
}
