//! Process spawning seam

use std::process::{Child, Command, Stdio};

use crate::errors::{ProxyError, Result};

/// Starts a process from an argv without waiting for it
pub trait ProcessSpawner {
    type Handle;

    fn spawn(&self, argv: &[String]) -> Result<Self::Handle>;
}

/// Where a spawned proxy's stdout and stderr go
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Pipes the caller reads through the returned `Child`
    #[default]
    Piped,
    /// Discarded; for proxies left running after the caller exits
    Detached,
}

impl OutputMode {
    fn stdio(self) -> Stdio {
        match self {
            OutputMode::Piped => Stdio::piped(),
            OutputMode::Detached => Stdio::null(),
        }
    }
}

/// Spawner backed by `std::process::Command`
///
/// The child always gets a null stdin. In piped mode the caller owns the
/// returned `Child` and must drain its pipes; a proxy whose pipes are dropped
/// unread dies on its next write. Use [`SystemSpawner::detached`] when the
/// child is not awaited.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemSpawner {
    output: OutputMode,
}

impl SystemSpawner {
    pub fn piped() -> Self {
        Self { output: OutputMode::Piped }
    }

    pub fn detached() -> Self {
        Self { output: OutputMode::Detached }
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output
    }
}

impl ProcessSpawner for SystemSpawner {
    type Handle = Child;

    fn spawn(&self, argv: &[String]) -> Result<Child> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| ProxyError::Process("Cannot spawn an empty command".to_string()))?;

        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(self.output.stdio())
            .stderr(self.output.stdio())
            .spawn()
            .map_err(|e| ProxyError::Process(format!("Failed to spawn {}: {}", program, e)))
    }
}
