//! # graceprobe
//!
//! Checks that containers started from an image stop gracefully on a
//! termination signal, can be restarted, and stop gracefully again.
//!
//! Exit status: 0 when every check passed, 1 on infrastructure errors,
//! 2 when the image failed a check.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

mod cli;
mod output;

use std::process::ExitCode;

use clap::Parser;
use graceprobe_common::constants::EXIT_FATAL;
use graceprobe_probe::ProbeEngine;
use graceprobe_runtime::backend::CliRuntime;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, LogFormat};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::from(EXIT_FATAL)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing(cli.log_format);

    match probe(cli).await {
        Ok(code) => code,
        Err(err) => {
            report_error(&err);
            ExitCode::from(EXIT_FATAL)
        }
    }
}

async fn probe(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = cli.to_config();
    if config.run_args.is_empty() {
        tracing::warn!("the runargs can't be empty, at least '-d' should be provided");
    }

    let runtime = CliRuntime::detect(&cli.runtime)?;
    let engine = ProbeEngine::new(runtime, config);
    let report = engine.run_until(shutdown_signal()).await?;

    output::print_report(&report, cli.format)?;
    Ok(ExitCode::from(report.exit_code()))
}

/// Resolves on Ctrl+C. Never resolves if the handler cannot be installed.
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[allow(clippy::print_stderr)]
fn report_error(err: &anyhow::Error) {
    eprintln!("error: {err:#}");
}
