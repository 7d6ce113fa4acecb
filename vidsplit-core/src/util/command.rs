use std::process::{Command, Output};

use log::error;

use crate::error::{Result, VidsplitError};
use crate::logging;

/// Execute a command and return the output.
///
/// A non-zero exit status is mapped to [`VidsplitError::CommandExecution`]
/// carrying the exit code and captured stderr verbatim, so callers can
/// surface the external tool's diagnostic unchanged.
pub fn run_command(cmd: &mut Command) -> Result<Output> {
    logging::log_command(cmd);

    let output = cmd.output().map_err(|e| {
        error!("Failed to execute command: {e}");
        VidsplitError::CommandExecution(format!("Failed to execute command: {e}"))
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        error!(
            "Command failed with exit code {}: {}",
            output.status.code().unwrap_or(-1),
            stderr
        );

        return Err(VidsplitError::CommandExecution(format!(
            "Command failed with exit code {}: {}",
            output.status.code().unwrap_or(-1),
            stderr
        )));
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_command_echo() {
        let mut cmd = Command::new("echo");
        cmd.arg("test");
        let result = run_command(&mut cmd);
        assert!(result.is_ok());
        if let Ok(output) = result {
            let stdout = String::from_utf8_lossy(&output.stdout);
            assert_eq!(stdout.trim(), "test");
        }
    }

    #[test]
    fn test_run_command_nonzero_exit() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo boom >&2; exit 3"]);
        let err = run_command(&mut cmd).unwrap_err();
        match err {
            VidsplitError::CommandExecution(msg) => {
                assert!(msg.contains("exit code 3"));
                assert!(msg.contains("boom"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
