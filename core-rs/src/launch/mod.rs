//! Local proxy launching
//!
//! Builds the command line for the Java proxy server and spawns it:
//!
//! ```text
//! java -jar <install>/osp_cosim/win64/bin_old/fmu-proxy.jar -thrift/tcp 9090 /models/pump.fmu
//! java -jar bin/fmu-proxy.jar -thrift/tcp 9090 pump.fmu      (packaged)
//! ```

mod args;
mod launcher;
mod spawn;

pub use args::{get_run_arguments_for_proxy_fmu, ProxyInstall, JAR_RELATIVE_PATH, PACKAGE_BIN_DIR};
pub use launcher::ProxyLauncher;
pub use spawn::{OutputMode, ProcessSpawner, SystemSpawner};
