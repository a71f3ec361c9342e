//! Runtime backed by a docker-compatible command line tool.

use std::path::PathBuf;
use std::process::Stdio;

use graceprobe_common::error::{ProbeError, Result};

use super::{ContainerRuntime, RuntimeCommand};
use crate::exec::RuntimeOutcome;

/// Invokes a docker-compatible CLI (`docker`, `podman`, ...) per command.
///
/// Child processes are killed if the invocation future is dropped, so a
/// cancelled `wait` does not outlive the probe.
#[derive(Debug, Clone)]
pub struct CliRuntime {
    binary: PathBuf,
}

impl CliRuntime {
    /// Creates a runtime that invokes `binary` as given.
    #[must_use]
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Resolves `name` on `PATH` and creates a runtime for it.
    ///
    /// # Errors
    ///
    /// Returns an error if no executable named `name` can be found.
    pub fn detect(name: &str) -> Result<Self> {
        let binary = which::which(name).map_err(|e| ProbeError::Config {
            message: format!("container runtime '{name}' not found: {e}"),
        })?;
        tracing::debug!(binary = %binary.display(), "resolved container runtime");
        Ok(Self { binary })
    }
}

impl ContainerRuntime for CliRuntime {
    async fn execute(&self, command: &RuntimeCommand) -> RuntimeOutcome {
        let args = command.to_args();
        tracing::debug!(binary = %self.binary.display(), ?args, "invoking container runtime");

        let result = tokio::process::Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await;

        match result {
            Ok(output) => {
                let code = output.status.code();
                if code.is_none() {
                    tracing::debug!(subcommand = command.name(), "runtime exit status unknown");
                }
                RuntimeOutcome::completed(
                    String::from_utf8_lossy(&output.stdout),
                    String::from_utf8_lossy(&output.stderr),
                    code,
                )
            }
            Err(e) => {
                tracing::debug!(subcommand = command.name(), error = %e, "runtime invocation failed");
                RuntimeOutcome::invocation_failed(e)
            }
        }
    }
}
