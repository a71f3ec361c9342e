//! Container runtime abstraction.
//!
//! A runtime executes one [`RuntimeCommand`] per call and reports what
//! happened as a [`RuntimeOutcome`]. It never retries and never interprets
//! the result; that is the controller's job.

pub mod cli;

use std::future::Future;

use crate::exec::RuntimeOutcome;

pub use cli::CliRuntime;

/// A single container runtime subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeCommand {
    /// `pull <image>`
    Pull {
        /// Image reference to fetch.
        image: String,
    },
    /// `inspect <ref>`
    Inspect {
        /// Image or container reference.
        reference: String,
    },
    /// `inspect --format=<fmt> <ref>`
    InspectFormat {
        /// Image or container reference.
        reference: String,
        /// Go template applied to the inspection result.
        format: String,
    },
    /// `run <args...> <image> [cmd...]`
    Run {
        /// Options placed before the image.
        args: Vec<String>,
        /// Image reference.
        image: String,
        /// Command placed after the image; may be empty.
        command: Vec<String>,
    },
    /// `start <id>`
    Start {
        /// Container identifier.
        id: String,
    },
    /// `kill -s <signal> <id>`
    Signal {
        /// Container identifier.
        id: String,
        /// Signal name or number.
        signal: String,
    },
    /// `kill <id>`
    Kill {
        /// Container identifier.
        id: String,
    },
    /// `rm <id>`
    Remove {
        /// Container identifier.
        id: String,
    },
    /// `wait <id>`
    Wait {
        /// Container identifier.
        id: String,
    },
}

impl RuntimeCommand {
    /// Returns the subcommand name, for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pull { .. } => "pull",
            Self::Inspect { .. } | Self::InspectFormat { .. } => "inspect",
            Self::Run { .. } => "run",
            Self::Start { .. } => "start",
            Self::Signal { .. } | Self::Kill { .. } => "kill",
            Self::Remove { .. } => "rm",
            Self::Wait { .. } => "wait",
        }
    }

    /// Builds the argument vector passed to the runtime binary.
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![self.name().to_string()];
        match self {
            Self::Pull { image } => args.push(image.clone()),
            Self::Inspect { reference } => args.push(reference.clone()),
            Self::InspectFormat { reference, format } => {
                args.push(format!("--format={format}"));
                args.push(reference.clone());
            }
            Self::Run {
                args: run_args,
                image,
                command,
            } => {
                args.extend(run_args.iter().cloned());
                args.push(image.clone());
                args.extend(command.iter().cloned());
            }
            Self::Signal { id, signal } => {
                args.push("-s".into());
                args.push(signal.clone());
                args.push(id.clone());
            }
            Self::Start { id } | Self::Kill { id } | Self::Remove { id } | Self::Wait { id } => {
                args.push(id.clone());
            }
        }
        args
    }
}

/// Executes container runtime commands.
///
/// Implementors run exactly one invocation per call. Dropping the returned
/// future must abandon the invocation without leaving it running.
pub trait ContainerRuntime: Send + Sync {
    /// Runs `command` and returns its outcome. Never fails: invocation
    /// problems are carried in [`RuntimeOutcome::invocation_error`].
    fn execute(&self, command: &RuntimeCommand) -> impl Future<Output = RuntimeOutcome> + Send;
}
