//! Parsing of the runtime's container status line.
//!
//! The status is requested with
//! [`STATE_FORMAT`](graceprobe_common::constants::STATE_FORMAT) and must
//! come back as exactly `<true|false> <exit code>`. Anything else is a
//! parse error rather than a guessed default.

use graceprobe_common::error::{ProbeError, Result};
use graceprobe_common::types::ContainerState;

/// Parses `"<running> <exit code>"` into a [`ContainerState`].
///
/// # Errors
///
/// Returns [`ProbeError::Parse`] if the field count is not two, the running
/// flag is not `true`/`false`, or the exit code is not an integer.
pub fn parse_state(output: &str) -> Result<ContainerState> {
    let fields: Vec<&str> = output.split_whitespace().collect();
    let [running, exit_code] = fields.as_slice() else {
        return Err(parse_error(
            format!("expected 2 fields, found {}", fields.len()),
            output,
        ));
    };

    let running = match *running {
        "true" => true,
        "false" => false,
        other => {
            return Err(parse_error(
                format!("running flag must be true or false, got {other:?}"),
                output,
            ));
        }
    };
    let exit_code = exit_code
        .parse::<i32>()
        .map_err(|e| parse_error(format!("exit code is not an integer: {e}"), output))?;

    Ok(ContainerState { running, exit_code })
}

fn parse_error(message: String, output: &str) -> ProbeError {
    ProbeError::Parse {
        message,
        output: output.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_running_container() {
        let state = parse_state("true 0\n").expect("valid");
        assert_eq!(state, ContainerState { running: true, exit_code: 0 });
    }

    #[test]
    fn parses_stopped_container_with_signal_exit() {
        let state = parse_state("false 137").expect("valid");
        assert!(!state.running);
        assert_eq!(state.exit_code, 137);
    }

    #[test]
    fn rejects_wrong_field_count() {
        assert!(matches!(parse_state("true"), Err(ProbeError::Parse { .. })));
        assert!(matches!(parse_state("true 0 extra"), Err(ProbeError::Parse { .. })));
        assert!(matches!(parse_state(""), Err(ProbeError::Parse { .. })));
    }

    #[test]
    fn rejects_non_integer_exit_code() {
        assert!(matches!(parse_state("false zero"), Err(ProbeError::Parse { .. })));
    }

    #[test]
    fn rejects_unknown_running_flag() {
        let err = parse_state("yes 0").unwrap_err();
        assert!(err.to_string().contains("running flag"));
    }
}
