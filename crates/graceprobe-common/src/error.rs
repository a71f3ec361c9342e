//! Unified error types for the graceprobe workspace.
//!
//! Only infrastructure failures are errors. An image that fails a check is
//! not an error: it downgrades the verdict and is reported normally.

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// A runtime command failed to run or exited unsuccessfully.
    #[error("failed to {operation} {target}: {detail}")]
    Runtime {
        /// Lifecycle operation that failed (`pull`, `run`, `start`, ...).
        operation: &'static str,
        /// Image or container the operation targeted.
        target: String,
        /// Invocation error or the runtime's own output.
        detail: String,
    },

    /// The runtime produced output that does not match the expected format.
    #[error("failed to parse runtime output: {message} (output: {output:?})")]
    Parse {
        /// What was wrong with the output.
        message: String,
        /// The raw output that was rejected.
        output: String,
    },

    /// The container was no longer running after the settle period.
    #[error("container {container} exited with code {exit_code} before it could be probed")]
    ExitedImmediately {
        /// Container that exited.
        container: String,
        /// Exit code reported by the runtime.
        exit_code: i32,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// The probe was interrupted before it completed.
    #[error("probe interrupted")]
    Interrupted,

    /// Serialization of the report failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

impl ProbeError {
    /// Builds a [`ProbeError::Runtime`] for `operation` on `target`.
    pub fn runtime(
        operation: &'static str,
        target: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self::Runtime {
            operation,
            target: target.into(),
            detail: detail.into(),
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, ProbeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_error_names_operation_and_target() {
        let err = ProbeError::runtime("start", "abc123", "No such container");
        assert_eq!(
            err.to_string(),
            "failed to start abc123: No such container"
        );
    }

    #[test]
    fn exited_immediately_reports_exit_code() {
        let err = ProbeError::ExitedImmediately {
            container: "abc123".into(),
            exit_code: 3,
        };
        assert!(err.to_string().contains("exited with code 3"));
    }
}
