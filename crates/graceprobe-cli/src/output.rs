//! Report output for the CLI.

use std::io::Write;

use clap::ValueEnum;
use graceprobe_probe::ProbeReport;

/// Report format.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pass/fail summary.
    Text,
    /// Full report as JSON.
    Json,
}

/// Renders `report` in the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render(report: &ProbeReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(report.render_text()),
        OutputFormat::Json => {
            let mut json = report.to_json()?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Writes `report` to stdout.
///
/// # Errors
///
/// Returns an error if rendering or writing fails.
pub fn print_report(report: &ProbeReport, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(report, format)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
