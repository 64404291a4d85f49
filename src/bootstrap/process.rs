// src/bootstrap/process.rs

//! Running external tools
//!
//! Every command is logged before it starts. A non-zero exit becomes
//! [`Error::ToolFailed`]; a command that cannot be started at all becomes
//! [`Error::ToolLaunch`].

use crate::error::{Error, Result};
use std::process::{Command, Output};
use tracing::{debug, info};

/// Render a command line for logs and errors
pub fn describe(cmd: &Command) -> String {
    let mut line = cmd.get_program().to_string_lossy().into_owned();
    for arg in cmd.get_args() {
        line.push(' ');
        line.push_str(&arg.to_string_lossy());
    }
    line
}

fn launch_error(cmd: &Command, e: std::io::Error) -> Error {
    Error::ToolLaunch {
        tool: cmd.get_program().to_string_lossy().into_owned(),
        reason: e.to_string(),
    }
}

/// Run a command with inherited stdio, failing on non-zero exit
pub fn run(cmd: &mut Command) -> Result<()> {
    let line = describe(cmd);
    match cmd.get_current_dir() {
        Some(dir) => info!("Running `{}` in {}", line, dir.display()),
        None => info!("Running `{}`", line),
    }

    let status = cmd.status().map_err(|e| launch_error(cmd, e))?;
    if !status.success() {
        return Err(Error::ToolFailed {
            command: line,
            status: status.to_string(),
            output: String::new(),
        });
    }
    Ok(())
}

/// Run a command capturing its output
///
/// Returns stdout on success. On failure the error carries both streams.
pub fn capture(cmd: &mut Command) -> Result<String> {
    let line = describe(cmd);
    info!("Running `{}`", line);

    let output = cmd.output().map_err(|e| launch_error(cmd, e))?;
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    if !output.status.success() {
        return Err(failure(line, &output));
    }

    debug!("`{}` output:\n{}", line, stdout.trim_end());
    Ok(stdout)
}

fn failure(command: String, output: &Output) -> Error {
    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.is_empty() {
        if !combined.is_empty() && !combined.ends_with('\n') {
            combined.push('\n');
        }
        combined.push_str(&stderr);
    }
    Error::ToolFailed {
        command,
        status: output.status.to_string(),
        output: combined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        let mut cmd = Command::new("git");
        cmd.args(["checkout", "v8.0.8"]);
        assert_eq!(describe(&cmd), "git checkout v8.0.8");
    }

    #[test]
    fn test_run_success_and_failure() {
        assert!(run(&mut Command::new("true")).is_ok());

        let err = run(&mut Command::new("false")).unwrap_err();
        assert!(matches!(err, Error::ToolFailed { ref command, .. } if command == "false"));
    }

    #[test]
    fn test_capture_collects_streams() {
        let out = capture(Command::new("sh").args(["-c", "echo hello"])).unwrap();
        assert_eq!(out.trim(), "hello");

        let err = capture(Command::new("sh").args(["-c", "echo out; echo err >&2; exit 3"]))
            .unwrap_err();
        match err {
            Error::ToolFailed { output, .. } => {
                assert!(output.contains("out"));
                assert!(output.contains("err"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_tool_is_launch_error() {
        let err = run(&mut Command::new("definitely-not-a-real-tool-xyz")).unwrap_err();
        assert!(matches!(err, Error::ToolLaunch { .. }));
    }
}
