//! Best-effort container teardown.

use std::fmt;

use graceprobe_common::types::ContainerHandle;
use graceprobe_runtime::backend::ContainerRuntime;
use graceprobe_runtime::container::ContainerController;
use serde::Serialize;

/// Teardown step that produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CleanupStep {
    /// Forced kill.
    Kill,
    /// Container removal.
    Remove,
}

impl fmt::Display for CleanupStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kill => write!(f, "kill"),
            Self::Remove => write!(f, "remove"),
        }
    }
}

/// A teardown step that failed. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanupDiagnostic {
    /// Step that failed.
    pub step: CleanupStep,
    /// Error reported by the runtime.
    pub message: String,
}

/// Everything that went wrong while tearing a container down.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanupReport {
    /// Failed steps, in the order they ran.
    pub diagnostics: Vec<CleanupDiagnostic>,
}

impl CleanupReport {
    /// Returns `true` if the container was removed.
    #[must_use]
    pub fn removed(&self) -> bool {
        !self
            .diagnostics
            .iter()
            .any(|d| d.step == CleanupStep::Remove)
    }

    /// Logs each diagnostic.
    ///
    /// Kill failures are expected (the container is usually already
    /// stopped) and go to debug; a failed removal leaks a container.
    pub fn log(&self, handle: &ContainerHandle) {
        for diag in &self.diagnostics {
            match diag.step {
                CleanupStep::Kill => {
                    tracing::debug!(container = %handle, step = %diag.step, error = %diag.message, "cleanup step failed");
                }
                CleanupStep::Remove => {
                    tracing::warn!(container = %handle, step = %diag.step, error = %diag.message, "cleanup step failed");
                }
            }
        }
    }
}

/// Kills and removes `handle`, collecting failures instead of returning
/// them. Safe to call on a container that is already stopped or gone.
pub async fn cleanup<R: ContainerRuntime>(
    controller: &ContainerController<R>,
    handle: &ContainerHandle,
) -> CleanupReport {
    tracing::info!(container = %handle, "cleaning up container");
    let mut report = CleanupReport::default();
    if let Err(err) = controller.kill(handle).await {
        report.diagnostics.push(CleanupDiagnostic {
            step: CleanupStep::Kill,
            message: err.to_string(),
        });
    }
    if let Err(err) = controller.remove(handle).await {
        report.diagnostics.push(CleanupDiagnostic {
            step: CleanupStep::Remove,
            message: err.to_string(),
        });
    }
    report.log(handle);
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_means_removed() {
        assert!(CleanupReport::default().removed());
    }

    #[test]
    fn kill_failure_alone_still_removed() {
        let report = CleanupReport {
            diagnostics: vec![CleanupDiagnostic {
                step: CleanupStep::Kill,
                message: "container is not running".into(),
            }],
        };
        assert!(report.removed());
    }

    #[test]
    fn remove_failure_is_not_removed() {
        let report = CleanupReport {
            diagnostics: vec![CleanupDiagnostic {
                step: CleanupStep::Remove,
                message: "No such container".into(),
            }],
        };
        assert!(!report.removed());
    }
}
