//! Outcome of a single container runtime invocation.

use graceprobe_common::constants::UNKNOWN_EXIT_CODE;

/// Output captured from one runtime command.
///
/// When `invocation_error` is set the process never ran (or could not be
/// waited on) and the remaining fields are not authoritative.
#[derive(Debug)]
pub struct RuntimeOutcome {
    /// Standard output from the command.
    pub stdout: String,
    /// Standard error from the command.
    pub stderr: String,
    /// Exit code returned by the command, or [`UNKNOWN_EXIT_CODE`] if it
    /// could not be determined.
    pub exit_code: i32,
    /// Set when the runtime binary could not be invoked at all.
    pub invocation_error: Option<std::io::Error>,
}

impl RuntimeOutcome {
    /// Builds an outcome for a process that ran to completion.
    ///
    /// A missing exit code is replaced with [`UNKNOWN_EXIT_CODE`].
    #[must_use]
    pub fn completed(stdout: impl Into<String>, stderr: impl Into<String>, code: Option<i32>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            exit_code: code.unwrap_or(UNKNOWN_EXIT_CODE),
            invocation_error: None,
        }
    }

    /// Builds an outcome for a process that could not be invoked.
    #[must_use]
    pub const fn invocation_failed(error: std::io::Error) -> Self {
        Self {
            stdout: String::new(),
            stderr: String::new(),
            exit_code: UNKNOWN_EXIT_CODE,
            invocation_error: Some(error),
        }
    }

    /// Returns `true` if the command ran and exited with status zero.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.invocation_error.is_none() && self.exit_code == 0
    }

    /// Standard output followed by standard error.
    #[must_use]
    pub fn combined_output(&self) -> String {
        let mut out = self.stdout.clone();
        out.push_str(&self.stderr);
        out
    }

    /// Short human-readable reason for a failed invocation.
    #[must_use]
    pub fn failure_detail(&self) -> String {
        if let Some(err) = &self.invocation_error {
            return format!("runtime could not be invoked: {err}");
        }
        let output = self.combined_output();
        let output = output.trim();
        if output.is_empty() {
            format!("exit status {}", self.exit_code)
        } else {
            format!("exit status {}: {output}", self.exit_code)
        }
    }
}
