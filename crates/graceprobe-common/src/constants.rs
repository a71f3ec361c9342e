//! System-wide constants and defaults.

use std::time::Duration;

/// Application name used in report headers and log output.
pub const APP_NAME: &str = "graceprobe";

/// Binary name for the CLI.
pub const BIN_NAME: &str = "graceprobe";

/// Container runtime CLI invoked when none is configured.
pub const DEFAULT_RUNTIME_BINARY: &str = "docker";

/// Environment variable that overrides the runtime binary.
pub const RUNTIME_ENV_VAR: &str = "GRACEPROBE_RUNTIME";

/// Arguments passed to `run` when none are configured.
pub const DEFAULT_RUN_ARGS: &str = "-d";

/// Signal delivered by the graceful stop test.
pub const DEFAULT_STOP_SIGNAL: &str = "TERM";

/// Delay between starting the container and the first inspection.
pub const SETTLE_PERIOD: Duration = Duration::from_secs(5);

/// Time a container is given to exit after the stop signal.
pub const STOP_TIMEOUT: Duration = Duration::from_secs(5);

/// Go template handed to `inspect --format` to obtain `<running> <exit code>`.
pub const STATE_FORMAT: &str = "{{.State.Running}} {{.State.ExitCode}}";

/// Exit code substituted when the runtime process status cannot be read
/// (for instance when it was terminated by a signal). Never meaningful on
/// its own; it only marks the invocation as unsuccessful.
pub const UNKNOWN_EXIT_CODE: i32 = 127;

/// Process exit status when every check passed.
pub const EXIT_SUCCESS: u8 = 0;

/// Process exit status for infrastructure failures.
pub const EXIT_FATAL: u8 = 1;

/// Process exit status when the image failed one or more checks.
pub const EXIT_PROBE_FAILED: u8 = 2;
