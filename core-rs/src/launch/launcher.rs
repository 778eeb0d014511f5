//! Runtime check + argv + spawn, bundled for descriptor launches

use tracing::info;

use super::args::{get_run_arguments_for_proxy_fmu, ProxyInstall};
use super::spawn::{ProcessSpawner, SystemSpawner};
use crate::endpoint::DEFAULT_PORT;
use crate::errors::Result;
use crate::runtime::{check_java_version_for_fmu_proxy, JavaRuntime, VersionSource};

/// Collaborators needed to start a local proxy server
#[derive(Debug, Clone)]
pub struct ProxyLauncher<V = JavaRuntime, S = SystemSpawner> {
    install: ProxyInstall,
    runtime: V,
    spawner: S,
    default_port: u16,
}

impl ProxyLauncher {
    /// Launcher using the install's runtime executable and real processes
    pub fn new(install: ProxyInstall) -> Self {
        let runtime = JavaRuntime::new(install.runtime());
        Self::with_parts(install, runtime, SystemSpawner::default())
    }
}

impl<V: VersionSource, S: ProcessSpawner> ProxyLauncher<V, S> {
    pub fn with_parts(install: ProxyInstall, runtime: V, spawner: S) -> Self {
        Self {
            install,
            runtime,
            spawner,
            default_port: DEFAULT_PORT,
        }
    }

    /// Port used for descriptors whose endpoint has none
    pub fn with_default_port(mut self, port: u16) -> Self {
        self.default_port = port;
        self
    }

    /// Swap the spawner, keeping install, runtime and default port
    pub fn with_spawner<T: ProcessSpawner>(self, spawner: T) -> ProxyLauncher<V, T> {
        ProxyLauncher {
            install: self.install,
            runtime: self.runtime,
            spawner,
            default_port: self.default_port,
        }
    }

    pub fn install(&self) -> &ProxyInstall {
        &self.install
    }

    pub fn default_port(&self) -> u16 {
        self.default_port
    }

    pub fn spawner(&self) -> &S {
        &self.spawner
    }

    /// Check the runtime, then build the proxy argv
    pub fn command(&self, port: u16, fmu_path: &str, for_package: bool) -> Result<Vec<String>> {
        check_java_version_for_fmu_proxy(&self.runtime)?;
        Ok(get_run_arguments_for_proxy_fmu(
            &self.install,
            port,
            fmu_path,
            for_package,
        ))
    }

    /// Check the runtime, build the in-place argv and spawn it
    pub fn launch(&self, port: u16, fmu_path: &str) -> Result<S::Handle> {
        let argv = self.command(port, fmu_path, false)?;
        info!(port, fmu = fmu_path, "Running local proxy server: {}", argv.join(" "));
        self.spawner.spawn(&argv)
    }
}
