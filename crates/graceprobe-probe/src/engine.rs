//! The probe sequence.
//!
//! ```text
//! NotStarted -> Started -> SettleWait -> FirstStopAttempt
//!            -> FirstRestartAttempt -> [gate] -> SecondStopAttempt -> Terminal
//! ```
//!
//! Infrastructure failures abort the probe with an error. An image that
//! misbehaves only downgrades the [`ProbeVerdict`]; the sequence stops early
//! solely at the gate after the restart test.

use std::future::Future;

use graceprobe_common::config::ProbeConfig;
use graceprobe_common::error::{ProbeError, Result};
use graceprobe_common::types::{ContainerHandle, ProbePhase, ProbeVerdict};
use graceprobe_runtime::backend::ContainerRuntime;
use graceprobe_runtime::container::ContainerController;

use crate::cleanup::{self, CleanupReport};
use crate::report::ProbeReport;
use crate::timeout;

/// What to do when the stop signal itself cannot be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SignalFailure {
    /// Abort the probe: the container was just seen running.
    Fatal,
    /// Count it against graceful stop and force-kill.
    Downgrade,
}

/// Where the sequence ended.
#[derive(Debug, Clone, Copy)]
struct Exercised {
    verdict: ProbeVerdict,
    phase: ProbePhase,
}

/// Runs the graceful stop and restart checks against one image.
#[derive(Debug)]
pub struct ProbeEngine<R> {
    controller: ContainerController<R>,
    config: ProbeConfig,
}

impl<R: ContainerRuntime> ProbeEngine<R> {
    /// Creates an engine that probes `config.image` through `runtime`.
    pub const fn new(runtime: R, config: ProbeConfig) -> Self {
        Self {
            controller: ContainerController::new(runtime),
            config,
        }
    }

    /// Returns the controller used for lifecycle operations.
    pub const fn controller(&self) -> &ContainerController<R> {
        &self.controller
    }

    /// Runs the full probe.
    ///
    /// # Errors
    ///
    /// See [`ProbeEngine::run_until`].
    pub async fn run(&self) -> Result<ProbeReport> {
        self.run_until(std::future::pending()).await
    }

    /// Runs the full probe, giving up when `shutdown` resolves.
    ///
    /// Once a container exists it is killed and removed on every exit path:
    /// always when the sequence completes, and on failure, early exit, or
    /// interruption when `auto_cleanup` is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be obtained, the container
    /// cannot be created or inspected, it exits before it can be probed,
    /// or `shutdown` resolves first.
    pub async fn run_until<S>(&self, shutdown: S) -> Result<ProbeReport>
    where
        S: Future<Output = ()>,
    {
        self.config.validate()?;
        let started_at = chrono::Utc::now();
        tokio::pin!(shutdown);

        tokio::select! {
            biased;
            () = &mut shutdown => return Err(ProbeError::Interrupted),
            ready = self.ensure_image() => ready?,
        }

        // Not raced: the runtime may create the container before replying,
        // and without its handle nothing could remove it.
        let handle = self.launch().await?;

        let exercised = tokio::select! {
            biased;
            () = &mut shutdown => {
                tracing::warn!(container = %handle, "probe interrupted");
                Err(ProbeError::Interrupted)
            }
            exercised = self.exercise(&handle) => exercised,
        };

        let exercised = match exercised {
            Ok(exercised) => exercised,
            Err(err) => {
                if self.config.auto_cleanup {
                    let report = self.cleanup(&handle).await;
                    tracing::warn!(
                        container = %handle,
                        error = %err,
                        removed = report.removed(),
                        diagnostics = report.diagnostics.len(),
                        "cleaned up after aborted probe"
                    );
                }
                return Err(err);
            }
        };

        let cleanup = self.finish(&handle, exercised.phase).await;
        Ok(ProbeReport {
            image: self.config.image.clone(),
            container: handle,
            verdict: exercised.verdict,
            phase: exercised.phase,
            cleanup,
            started_at,
            finished_at: chrono::Utc::now(),
        })
    }

    /// Kills and removes `handle`, collecting failures.
    pub async fn cleanup(&self, handle: &ContainerHandle) -> CleanupReport {
        cleanup::cleanup(&self.controller, handle).await
    }

    /// Pulls the image unless it is already present.
    async fn ensure_image(&self) -> Result<()> {
        let image = self.config.image.as_str();
        tracing::info!(image, phase = %ProbePhase::NotStarted, "probing image");

        if !self.controller.exists(image).await {
            self.controller.pull(image).await?;
        }
        Ok(())
    }

    /// Starts a container from the image.
    async fn launch(&self) -> Result<ContainerHandle> {
        let image = self.config.image.as_str();
        let handle = self
            .controller
            .run(
                image,
                &self.config.run_args,
                self.config.run_command.as_deref(),
            )
            .await?;
        enter(ProbePhase::Started, &handle);
        Ok(handle)
    }

    /// Drives the container through the checks.
    async fn exercise(&self, handle: &ContainerHandle) -> Result<Exercised> {
        let verdict = ProbeVerdict::new(self.config.command_specified());

        enter(ProbePhase::SettleWait, handle);
        tokio::time::sleep(self.config.settle_period).await;
        let state = self.controller.inspect_state(handle).await?;
        if !state.running {
            return Err(ProbeError::ExitedImmediately {
                container: handle.to_string(),
                exit_code: state.exit_code,
            });
        }

        enter(ProbePhase::FirstStopAttempt, handle);
        let verdict = self
            .stop_test(handle, verdict, SignalFailure::Fatal)
            .await?;

        enter(ProbePhase::FirstRestartAttempt, handle);
        let verdict = self.restart_test(handle, verdict).await?;

        if !verdict.passed() {
            tracing::info!(container = %handle, "skipping second stop test");
            return Ok(Exercised {
                verdict,
                phase: ProbePhase::FirstRestartAttempt,
            });
        }

        enter(ProbePhase::SecondStopAttempt, handle);
        let verdict = self
            .stop_test(handle, verdict, SignalFailure::Downgrade)
            .await?;

        enter(ProbePhase::Terminal, handle);
        Ok(Exercised {
            verdict,
            phase: ProbePhase::Terminal,
        })
    }

    /// Signals the container and checks it exits cleanly within the
    /// deadline. On failure the container is force-killed so the next step
    /// starts from a stopped container.
    async fn stop_test(
        &self,
        handle: &ContainerHandle,
        verdict: ProbeVerdict,
        on_signal_failure: SignalFailure,
    ) -> Result<ProbeVerdict> {
        let mut verdict = verdict;

        if let Err(err) = self.controller.stop(handle, &self.config.stop_signal).await {
            match on_signal_failure {
                SignalFailure::Fatal => return Err(err),
                SignalFailure::Downgrade => {
                    tracing::warn!(container = %handle, error = %err, "stop signal not delivered");
                    verdict = verdict.fail_graceful_stop();
                    self.force_kill(handle).await;
                }
            }
        }

        match timeout::race_with_timeout(self.controller.wait(handle), self.config.stop_timeout)
            .await
        {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                tracing::warn!(container = %handle, error = %err, "wait failed, relying on inspection");
            }
            Err(elapsed) => {
                tracing::info!(container = %handle, %elapsed, "container ignored the stop signal");
                verdict = verdict.fail_graceful_stop();
            }
        }

        let state = self.controller.inspect_state(handle).await?;
        if !state.exited_cleanly() {
            tracing::info!(
                container = %handle,
                running = state.running,
                exit_code = state.exit_code,
                "container did not stop gracefully"
            );
            verdict = verdict.fail_graceful_stop();
            self.force_kill(handle).await;
        }
        Ok(verdict)
    }

    /// Starts the stopped container again.
    ///
    /// Restart is credited only if the preceding stop test passed: a
    /// container that had to be force-killed proves nothing about restarts.
    async fn restart_test(
        &self,
        handle: &ContainerHandle,
        verdict: ProbeVerdict,
    ) -> Result<ProbeVerdict> {
        let verdict = match self.controller.start(handle).await {
            Ok(()) if verdict.handles_graceful_stop() => verdict,
            Ok(()) => {
                tracing::debug!(container = %handle, "restart not credited after failed stop");
                verdict.fail_restart()
            }
            Err(err) => {
                tracing::info!(container = %handle, error = %err, "container could not be restarted");
                verdict.fail_restart()
            }
        };

        let state = self.controller.inspect_state(handle).await?;
        if state.running {
            Ok(verdict)
        } else {
            tracing::info!(container = %handle, exit_code = state.exit_code, "container not running after restart");
            Ok(verdict.fail_restart())
        }
    }

    async fn force_kill(&self, handle: &ContainerHandle) {
        if let Err(err) = self.controller.kill(handle).await {
            tracing::warn!(container = %handle, error = %err, "forced kill failed");
        }
    }

    /// Tears down after a completed sequence. The terminal phase always
    /// cleans up; an early exit at the gate only when enabled.
    async fn finish(&self, handle: &ContainerHandle, phase: ProbePhase) -> Option<CleanupReport> {
        if phase == ProbePhase::Terminal || self.config.auto_cleanup {
            Some(self.cleanup(handle).await)
        } else {
            tracing::info!(container = %handle, "leaving container in place");
            None
        }
    }
}

fn enter(phase: ProbePhase, handle: &ContainerHandle) {
    tracing::info!(container = %handle, %phase, "probe phase");
}
