//! Java version probe and supported-window check

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{info, warn};

use crate::errors::{ProxyError, Result};

/// Executable looked up on `PATH` when no runtime is configured
pub const DEFAULT_RUNTIME: &str = "java";

/// Only this major.minor.patch line is accepted
pub const SUPPORTED_VERSION_LINE: &str = "1.8.0";

/// Highest accepted update build of the supported line
pub const MAX_SUPPORTED_BUILD: u32 = 333;

static QUOTED_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""([^"]*)""#).expect("quoted token pattern is valid")
});

/// Source of the raw `-version` text of a runtime
pub trait VersionSource {
    /// Combined stdout and stderr of the version query
    fn version_output(&self) -> Result<String>;
}

/// Java runtime reached through its executable
#[derive(Debug, Clone, PartialEq)]
pub struct JavaRuntime {
    executable: PathBuf,
}

impl JavaRuntime {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }
}

impl Default for JavaRuntime {
    fn default() -> Self {
        Self::new(DEFAULT_RUNTIME)
    }
}

impl VersionSource for JavaRuntime {
    fn version_output(&self) -> Result<String> {
        let output = Command::new(&self.executable)
            .arg("-version")
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => ProxyError::RuntimeNotFound(format!(
                    "'{}' could not be found. Please install Java runtime {} up to build {}",
                    self.executable.display(),
                    SUPPORTED_VERSION_LINE,
                    MAX_SUPPORTED_BUILD
                )),
                _ => ProxyError::Io(e),
            })?;

        // `java -version` writes to stderr; keep both streams like a 2>&1 redirect
        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(text)
    }
}

/// Java version split into its release line and update build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaVersion {
    /// `major.minor.patch`, e.g. `1.8.0`
    pub line: String,
    /// Update build number after the `_`
    pub build: u32,
}

impl JavaVersion {
    /// Extract the version from `-version` output
    ///
    /// Takes the first double-quoted token and splits it on `_`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fmu_proxy::JavaVersion;
    ///
    /// let version = JavaVersion::parse("java version \"1.8.0_281\"").unwrap();
    /// assert_eq!(version.line, "1.8.0");
    /// assert_eq!(version.build, 281);
    /// ```
    pub fn parse(output: &str) -> Result<Self> {
        let token = QUOTED_TOKEN
            .captures(output)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .ok_or_else(|| {
                ProxyError::UnsupportedRuntimeVersion(format!(
                    "No quoted version found in runtime output: {}",
                    output.trim()
                ))
            })?;

        let (line, build) = token.split_once('_').ok_or_else(|| {
            ProxyError::UnsupportedRuntimeVersion(format!(
                "Version {} must be {}_<build> with build {} or lower",
                token, SUPPORTED_VERSION_LINE, MAX_SUPPORTED_BUILD
            ))
        })?;

        let build = build.parse::<u32>().map_err(|_| {
            ProxyError::UnsupportedRuntimeVersion(format!(
                "Version {} has a non-numeric build '{}'",
                token, build
            ))
        })?;

        Ok(Self {
            line: line.to_string(),
            build,
        })
    }

    pub fn is_supported(&self) -> bool {
        self.line == SUPPORTED_VERSION_LINE && self.build <= MAX_SUPPORTED_BUILD
    }

    /// Fail with the specific bound this version violates
    pub fn ensure_supported(&self) -> Result<()> {
        if self.line != SUPPORTED_VERSION_LINE {
            return Err(ProxyError::UnsupportedRuntimeVersion(format!(
                "Java {} found, version line must be {} (build {} or lower)",
                self, SUPPORTED_VERSION_LINE, MAX_SUPPORTED_BUILD
            )));
        }
        if self.build > MAX_SUPPORTED_BUILD {
            return Err(ProxyError::UnsupportedRuntimeVersion(format!(
                "Java {} found, build must be {} or lower",
                self, MAX_SUPPORTED_BUILD
            )));
        }
        Ok(())
    }
}

impl fmt::Display for JavaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.line, self.build)
    }
}

/// Verify the runtime can host the FMU proxy jar
///
/// # Errors
/// - `RuntimeNotFound` if the executable cannot be started
/// - `UnsupportedRuntimeVersion` if the version is outside 1.8.0 builds up to 333
pub fn check_java_version_for_fmu_proxy<S: VersionSource + ?Sized>(
    source: &S,
) -> Result<JavaVersion> {
    let output = source.version_output()?;
    let version = JavaVersion::parse(&output)?;

    if let Err(e) = version.ensure_supported() {
        warn!(version = %version, "runtime version rejected for FMU proxy");
        return Err(e);
    }

    info!(version = %version, "runtime version accepted for FMU proxy");
    Ok(version)
}
