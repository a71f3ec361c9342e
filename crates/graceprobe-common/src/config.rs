//! Configuration model for a probe run.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants;

/// Everything the probe needs to know about the image under test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Image reference to probe.
    pub image: String,
    /// Extra arguments for the runtime's `run` command.
    pub run_args: Vec<String>,
    /// Command appended after the image, overriding its entrypoint/cmd.
    pub run_command: Option<Vec<String>>,
    /// Whether failure paths kill and remove the container.
    pub auto_cleanup: bool,
    /// Delay before the first inspection.
    pub settle_period: Duration,
    /// Time allowed for the container to exit after the stop signal.
    pub stop_timeout: Duration,
    /// Signal sent by the graceful stop test.
    pub stop_signal: String,
}

impl ProbeConfig {
    /// Creates a configuration for `image` with default settings.
    #[must_use]
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            run_args: vec![constants::DEFAULT_RUN_ARGS.to_string()],
            run_command: None,
            auto_cleanup: true,
            settle_period: constants::SETTLE_PERIOD,
            stop_timeout: constants::STOP_TIMEOUT,
            stop_signal: constants::DEFAULT_STOP_SIGNAL.to_string(),
        }
    }

    /// Sets the run arguments.
    #[must_use]
    pub fn with_run_args(mut self, args: Vec<String>) -> Self {
        self.run_args = args;
        self
    }

    /// Sets the command. An empty command counts as none.
    #[must_use]
    pub fn with_run_command(mut self, command: Vec<String>) -> Self {
        self.run_command = if command.is_empty() {
            None
        } else {
            Some(command)
        };
        self
    }

    /// Enables or disables cleanup on failure paths.
    #[must_use]
    pub const fn with_auto_cleanup(mut self, enabled: bool) -> Self {
        self.auto_cleanup = enabled;
        self
    }

    /// Sets the stop signal.
    #[must_use]
    pub fn with_stop_signal(mut self, signal: impl Into<String>) -> Self {
        self.stop_signal = signal.into();
        self
    }

    /// Whether an explicit command will be passed to `run`.
    #[must_use]
    pub const fn command_specified(&self) -> bool {
        self.run_command.is_some()
    }

    /// Validates fields the runtime cannot check on its own.
    ///
    /// # Errors
    ///
    /// Returns an error if the image or stop signal is blank.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.image.trim().is_empty() {
            return Err(crate::error::ProbeError::Config {
                message: "the image must be specified".into(),
            });
        }
        if self.stop_signal.trim().is_empty() {
            return Err(crate::error::ProbeError::Config {
                message: "the stop signal can't be empty".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let cfg = ProbeConfig::new("busybox:latest");
        assert_eq!(cfg.run_args, vec!["-d"]);
        assert!(cfg.run_command.is_none());
        assert!(cfg.auto_cleanup);
        assert_eq!(cfg.settle_period, Duration::from_secs(5));
        assert_eq!(cfg.stop_timeout, Duration::from_secs(5));
        assert_eq!(cfg.stop_signal, "TERM");
    }

    #[test]
    fn empty_command_is_not_specified() {
        let cfg = ProbeConfig::new("busybox").with_run_command(Vec::new());
        assert!(!cfg.command_specified());

        let cfg = cfg.with_run_command(vec!["sleep".into(), "100".into()]);
        assert!(cfg.command_specified());
    }

    #[test]
    fn validate_rejects_blank_image() {
        assert!(ProbeConfig::new("  ").validate().is_err());
        assert!(ProbeConfig::new("busybox").validate().is_ok());
    }

    #[test]
    fn validate_rejects_blank_signal() {
        let cfg = ProbeConfig::new("busybox").with_stop_signal("");
        assert!(cfg.validate().is_err());
    }
}
