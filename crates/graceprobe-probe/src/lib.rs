//! # graceprobe-probe
//!
//! Verifies that containers started from an image stop gracefully on a
//! termination signal, restart, and stop gracefully again.
//!
//! ```no_run
//! use graceprobe_common::config::ProbeConfig;
//! use graceprobe_probe::ProbeEngine;
//! use graceprobe_runtime::backend::CliRuntime;
//!
//! # async fn probe() -> graceprobe_common::error::Result<()> {
//! let runtime = CliRuntime::detect("docker")?;
//! let engine = ProbeEngine::new(runtime, ProbeConfig::new("busybox:latest"));
//! let report = engine.run().await?;
//! print!("{}", report.render_text());
//! # Ok(())
//! # }
//! ```

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod cleanup;
pub mod engine;
pub mod report;
pub mod timeout;

pub use engine::ProbeEngine;
pub use report::ProbeReport;
