//! Domain primitive types used across the graceprobe workspace.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier the runtime assigned to a container created by the probe.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContainerHandle(String);

impl ContainerHandle {
    /// Creates a handle from the runtime's identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Snapshot of a container's process state.
///
/// Always obtained from a fresh inspection; the container runs
/// independently of the probe, so a snapshot goes stale immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerState {
    /// Whether the container's main process is running.
    pub running: bool,
    /// Exit code of the last run (0 while running).
    pub exit_code: i32,
}

impl ContainerState {
    /// Returns `true` if the container stopped with exit code zero.
    #[must_use]
    pub const fn exited_cleanly(&self) -> bool {
        !self.running && self.exit_code == 0
    }
}

/// Result of the three checks.
///
/// Starts optimistic and can only be downgraded: there is no way to set a
/// failed check back to passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProbeVerdict {
    handles_graceful_stop: bool,
    handles_restart: bool,
    command_was_specified: bool,
}

impl ProbeVerdict {
    /// Creates a passing verdict. `command_was_specified` echoes the input.
    #[must_use]
    pub const fn new(command_was_specified: bool) -> Self {
        Self {
            handles_graceful_stop: true,
            handles_restart: true,
            command_was_specified,
        }
    }

    /// Marks the graceful stop check as failed.
    #[must_use]
    pub const fn fail_graceful_stop(self) -> Self {
        Self {
            handles_graceful_stop: false,
            ..self
        }
    }

    /// Marks the restart check as failed.
    #[must_use]
    pub const fn fail_restart(self) -> Self {
        Self {
            handles_restart: false,
            ..self
        }
    }

    /// Whether the container stopped gracefully on every attempt so far.
    #[must_use]
    pub const fn handles_graceful_stop(&self) -> bool {
        self.handles_graceful_stop
    }

    /// Whether the container restarted after a graceful stop.
    #[must_use]
    pub const fn handles_restart(&self) -> bool {
        self.handles_restart
    }

    /// Whether an explicit run command was supplied.
    #[must_use]
    pub const fn command_was_specified(&self) -> bool {
        self.command_was_specified
    }

    /// Returns `true` if both behavioural checks passed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.handles_graceful_stop && self.handles_restart
    }
}

/// Step of the probe sequence, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbePhase {
    /// Nothing has been done yet.
    NotStarted,
    /// The container was created and started.
    Started,
    /// Waiting for the container to reach steady state.
    SettleWait,
    /// First stop signal and exit wait.
    FirstStopAttempt,
    /// Restarting the stopped container.
    FirstRestartAttempt,
    /// Stop test repeated on the restarted container.
    SecondStopAttempt,
    /// Sequence complete.
    Terminal,
}

impl fmt::Display for ProbePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted => write!(f, "not-started"),
            Self::Started => write!(f, "started"),
            Self::SettleWait => write!(f, "settle-wait"),
            Self::FirstStopAttempt => write!(f, "first-stop"),
            Self::FirstRestartAttempt => write!(f, "first-restart"),
            Self::SecondStopAttempt => write!(f, "second-stop"),
            Self::Terminal => write!(f, "terminal"),
        }
    }
}
