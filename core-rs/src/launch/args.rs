//! Proxy command line assembly

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::runtime::DEFAULT_RUNTIME;

/// Location of the proxy jar below an installation root
pub const JAR_RELATIVE_PATH: &str = "osp_cosim/win64/bin_old/fmu-proxy.jar";

/// Directory holding the jar inside a packaged distribution
pub const PACKAGE_BIN_DIR: &str = "bin";

/// Resolved installation of the FMU proxy jar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProxyInstall {
    root: PathBuf,
    runtime: String,
}

impl ProxyInstall {
    /// Installation rooted at `root`, launched with `java` from `PATH`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            runtime: DEFAULT_RUNTIME.to_string(),
        }
    }

    /// Override the runtime executable placed first on the command line
    pub fn with_runtime(mut self, runtime: impl Into<String>) -> Self {
        self.runtime = runtime.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn runtime(&self) -> &str {
        &self.runtime
    }

    /// Jar path used for in-place launches
    pub fn jar_path(&self) -> PathBuf {
        self.root.join(JAR_RELATIVE_PATH)
    }

    /// Jar path relative to a packaged distribution directory
    pub fn packaged_jar_path(&self) -> PathBuf {
        let jar = self.jar_path();
        let name = jar.file_name().map(PathBuf::from).unwrap_or(jar);
        Path::new(PACKAGE_BIN_DIR).join(name)
    }
}

/// Build the argv that starts a proxy server for one FMU
///
/// # Arguments
/// * `install` - Where the proxy jar lives
/// * `port` - TCP port the proxy listens on
/// * `fmu_path` - FMU file to wrap
/// * `for_package` - Use paths relative to a packaged distribution
///
/// # Examples
///
/// ```
/// use fmu_proxy::{get_run_arguments_for_proxy_fmu, ProxyInstall};
///
/// let install = ProxyInstall::new("/opt/cosim");
/// let args = get_run_arguments_for_proxy_fmu(&install, 9090, "/a/b.fmu", true);
/// assert_eq!(args, vec!["java", "-jar", "bin/fmu-proxy.jar", "-thrift/tcp", "9090", "b.fmu"]);
/// ```
pub fn get_run_arguments_for_proxy_fmu(
    install: &ProxyInstall,
    port: u16,
    fmu_path: &str,
    for_package: bool,
) -> Vec<String> {
    let (jar_path, fmu_path) = if for_package {
        let fmu_name = Path::new(fmu_path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| fmu_path.to_string());
        (install.packaged_jar_path(), fmu_name)
    } else {
        (install.jar_path(), fmu_path.to_string())
    };

    vec![
        install.runtime().to_string(),
        "-jar".to_string(),
        jar_path.display().to_string(),
        "-thrift/tcp".to_string(),
        port.to_string(),
        fmu_path,
    ]
}
