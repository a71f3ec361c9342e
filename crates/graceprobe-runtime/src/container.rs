//! Typed container lifecycle operations.
//!
//! Each operation issues exactly one runtime command and converts its
//! outcome into a typed result. Errors are always returned, never
//! swallowed here; callers decide which failures are tolerable.

use graceprobe_common::constants::STATE_FORMAT;
use graceprobe_common::error::{ProbeError, Result};
use graceprobe_common::types::{ContainerHandle, ContainerState};

use crate::backend::{ContainerRuntime, RuntimeCommand};
use crate::exec::RuntimeOutcome;

/// Lifecycle operations on a single image and its containers.
#[derive(Debug)]
pub struct ContainerController<R> {
    runtime: R,
}

impl<R: ContainerRuntime> ContainerController<R> {
    /// Creates a controller over `runtime`.
    pub const fn new(runtime: R) -> Self {
        Self { runtime }
    }

    /// Returns the underlying runtime.
    pub const fn runtime(&self) -> &R {
        &self.runtime
    }

    /// Fetches `image` from its registry.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be fetched.
    pub async fn pull(&self, image: &str) -> Result<()> {
        tracing::info!(image, "pulling image");
        let outcome = self
            .runtime
            .execute(&RuntimeCommand::Pull {
                image: image.to_string(),
            })
            .await;
        check("pull", image, &outcome)
    }

    /// Returns whether `image` can be inspected locally.
    ///
    /// Any inspection failure counts as "does not exist".
    pub async fn exists(&self, image: &str) -> bool {
        let outcome = self
            .runtime
            .execute(&RuntimeCommand::Inspect {
                reference: image.to_string(),
            })
            .await;
        if !outcome.is_success() {
            tracing::debug!(image, detail = %outcome.failure_detail(), "image not present locally");
        }
        outcome.is_success()
    }

    /// Creates and starts a container, returning its handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime rejects the run or prints no id.
    pub async fn run(
        &self,
        image: &str,
        run_args: &[String],
        command: Option<&[String]>,
    ) -> Result<ContainerHandle> {
        let outcome = self
            .runtime
            .execute(&RuntimeCommand::Run {
                args: run_args.to_vec(),
                image: image.to_string(),
                command: command.map(<[String]>::to_vec).unwrap_or_default(),
            })
            .await;
        check("run a container from", image, &outcome)?;

        let id = outcome.stdout.trim();
        if id.is_empty() {
            return Err(ProbeError::runtime(
                "run a container from",
                image,
                "runtime did not print a container id",
            ));
        }
        let handle = ContainerHandle::new(id);
        tracing::info!(container = %handle, image, "container started");
        Ok(handle)
    }

    /// Starts a stopped container.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime fails to start the container.
    pub async fn start(&self, handle: &ContainerHandle) -> Result<()> {
        let outcome = self
            .runtime
            .execute(&RuntimeCommand::Start {
                id: handle.to_string(),
            })
            .await;
        check("start", handle.as_str(), &outcome)
    }

    /// Delivers `signal` to the container's main process.
    ///
    /// # Errors
    ///
    /// Returns an error if the signal cannot be delivered.
    pub async fn stop(&self, handle: &ContainerHandle, signal: &str) -> Result<()> {
        tracing::debug!(container = %handle, signal, "sending stop signal");
        let outcome = self
            .runtime
            .execute(&RuntimeCommand::Signal {
                id: handle.to_string(),
                signal: signal.to_string(),
            })
            .await;
        check("stop", handle.as_str(), &outcome)
    }

    /// Forcibly kills the container.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime fails to kill the container,
    /// including when it is not running.
    pub async fn kill(&self, handle: &ContainerHandle) -> Result<()> {
        let outcome = self
            .runtime
            .execute(&RuntimeCommand::Kill {
                id: handle.to_string(),
            })
            .await;
        check("kill", handle.as_str(), &outcome)
    }

    /// Removes the container.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime fails to remove the container.
    pub async fn remove(&self, handle: &ContainerHandle) -> Result<()> {
        let outcome = self
            .runtime
            .execute(&RuntimeCommand::Remove {
                id: handle.to_string(),
            })
            .await;
        check("remove", handle.as_str(), &outcome)
    }

    /// Blocks until the container exits.
    ///
    /// May never return for a container that ignores its stop signal;
    /// callers bound it with a timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime's wait fails.
    pub async fn wait(&self, handle: &ContainerHandle) -> Result<()> {
        let outcome = self
            .runtime
            .execute(&RuntimeCommand::Wait {
                id: handle.to_string(),
            })
            .await;
        check("wait for", handle.as_str(), &outcome)
    }

    /// Inspects the container's current state.
    ///
    /// # Errors
    ///
    /// Returns a runtime error if the inspection fails, or a parse error if
    /// its output is not `<true|false> <exit code>`.
    pub async fn inspect_state(&self, handle: &ContainerHandle) -> Result<ContainerState> {
        let outcome = self
            .runtime
            .execute(&RuntimeCommand::InspectFormat {
                reference: handle.to_string(),
                format: STATE_FORMAT.to_string(),
            })
            .await;
        check("inspect", handle.as_str(), &outcome)?;
        let state = crate::state::parse_state(&outcome.stdout)?;
        tracing::debug!(container = %handle, running = state.running, exit_code = state.exit_code, "inspected");
        Ok(state)
    }
}

fn check(operation: &'static str, target: &str, outcome: &RuntimeOutcome) -> Result<()> {
    if outcome.is_success() {
        Ok(())
    } else {
        Err(ProbeError::runtime(operation, target, outcome.failure_detail()))
    }
}
