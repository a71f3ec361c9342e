//! Command line definition.

use clap::{ArgAction, Parser, ValueEnum};
use graceprobe_common::config::ProbeConfig;
use graceprobe_common::constants::{
    BIN_NAME, DEFAULT_RUN_ARGS, DEFAULT_RUNTIME_BINARY, DEFAULT_STOP_SIGNAL, RUNTIME_ENV_VAR,
};

use crate::output::OutputFormat;

/// graceprobe: check that a container image stops gracefully and restarts.
#[derive(Parser, Debug)]
#[command(name = BIN_NAME, version, about, long_about = None)]
pub struct Cli {
    /// Image to probe.
    pub image: String,

    /// Options for the container's `run` command, separated by spaces.
    #[arg(long, default_value = DEFAULT_RUN_ARGS, allow_hyphen_values = true)]
    pub runargs: String,

    /// Command to run in the container; defaults to the image's entrypoint/cmd.
    #[arg(long, allow_hyphen_values = true)]
    pub runcmd: Option<String>,

    /// Remove the container when running into errors.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub autocleanup: bool,

    /// Docker-compatible runtime CLI to invoke.
    #[arg(long, env = RUNTIME_ENV_VAR, default_value = DEFAULT_RUNTIME_BINARY)]
    pub runtime: String,

    /// Signal sent by the graceful stop test.
    #[arg(long, default_value = DEFAULT_STOP_SIGNAL)]
    pub stop_signal: String,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Log line format (logs go to stderr; filter with `RUST_LOG`).
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// Log line format.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per line.
    Json,
}

impl Cli {
    /// Builds the probe configuration from the parsed flags.
    pub fn to_config(&self) -> ProbeConfig {
        ProbeConfig::new(self.image.as_str())
            .with_run_args(split_args(&self.runargs))
            .with_run_command(self.runcmd.as_deref().map(split_args).unwrap_or_default())
            .with_auto_cleanup(self.autocleanup)
            .with_stop_signal(self.stop_signal.as_str())
    }
}

/// Splits a user-supplied argument string on whitespace.
pub fn split_args(args: &str) -> Vec<String> {
    args.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_applied() {
        let cli = Cli::try_parse_from(["graceprobe", "busybox:latest"]).expect("parse");
        let cfg = cli.to_config();
        assert_eq!(cfg.image, "busybox:latest");
        assert_eq!(cfg.run_args, vec!["-d"]);
        assert!(cfg.run_command.is_none());
        assert!(cfg.auto_cleanup);
        assert_eq!(cfg.stop_signal, "TERM");
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn runargs_and_runcmd_are_split() {
        let cli = Cli::try_parse_from([
            "graceprobe",
            "--runargs",
            "-d  --name probe",
            "--runcmd",
            "sleep 100",
            "busybox",
        ])
        .expect("parse");
        let cfg = cli.to_config();
        assert_eq!(cfg.run_args, vec!["-d", "--name", "probe"]);
        assert_eq!(
            cfg.run_command,
            Some(vec!["sleep".to_string(), "100".to_string()])
        );
    }

    #[test]
    fn blank_runcmd_is_no_command() {
        let cli = Cli::try_parse_from(["graceprobe", "--runcmd", " ", "busybox"]).expect("parse");
        assert!(!cli.to_config().command_specified());
    }

    #[test]
    fn autocleanup_can_be_disabled() {
        let cli = Cli::try_parse_from(["graceprobe", "--autocleanup", "false", "busybox"])
            .expect("parse");
        assert!(!cli.to_config().auto_cleanup);
    }

    #[test]
    fn json_formats_are_selectable() {
        let cli = Cli::try_parse_from([
            "graceprobe",
            "--format",
            "json",
            "--log-format",
            "json",
            "busybox",
        ])
        .expect("parse");
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.log_format, LogFormat::Json);
    }

    #[test]
    fn missing_image_is_an_error() {
        let err = Cli::try_parse_from(["graceprobe"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
        assert!(err.use_stderr());
    }

    #[test]
    fn split_args_ignores_repeated_spaces() {
        assert_eq!(split_args("  -d   --rm "), vec!["-d", "--rm"]);
        assert!(split_args("").is_empty());
    }
}
