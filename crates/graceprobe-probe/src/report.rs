//! Probe results and their presentation.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use graceprobe_common::constants::{APP_NAME, EXIT_PROBE_FAILED, EXIT_SUCCESS};
use graceprobe_common::error::Result;
use graceprobe_common::types::{ContainerHandle, ProbePhase, ProbeVerdict};
use serde::Serialize;

use crate::cleanup::CleanupReport;

/// Outcome of a probe that ran to a verdict.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeReport {
    /// Image that was probed.
    pub image: String,
    /// Container the probe created.
    pub container: ContainerHandle,
    /// Results of the three checks.
    pub verdict: ProbeVerdict,
    /// Last phase the sequence reached.
    pub phase: ProbePhase,
    /// Teardown diagnostics, or `None` if cleanup was skipped.
    pub cleanup: Option<CleanupReport>,
    /// When the probe started.
    pub started_at: DateTime<Utc>,
    /// When the probe finished.
    pub finished_at: DateTime<Utc>,
}

impl ProbeReport {
    /// Process exit status for this report: success only if every
    /// behavioural check passed.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        if self.verdict.passed() {
            EXIT_SUCCESS
        } else {
            EXIT_PROBE_FAILED
        }
    }

    /// Renders the human-readable summary.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{APP_NAME} results for '{}':", self.image);
        let _ = writeln!(
            out,
            "Test graceful stop: {}",
            pass_fail(self.verdict.handles_graceful_stop())
        );
        let _ = writeln!(
            out,
            "Test start after stopping: {}",
            pass_fail(self.verdict.handles_restart())
        );
        let _ = writeln!(
            out,
            "Command was specified: {}",
            if self.verdict.command_was_specified() {
                "YES"
            } else {
                "NO"
            }
        );
        out
    }

    /// Renders the full report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

const fn pass_fail(passed: bool) -> &'static str {
    if passed { "PASSED" } else { "FAILED" }
}
