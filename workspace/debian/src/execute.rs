use log::debug;
use std::{ffi::OsStr, path::Path, process::Command};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecuteError {
    #[error("failed to spawn '{command}': {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("'{command}' failed with status {status}: {stderr}")]
    NonZeroStatus {
        command: String,
        status: i32,
        stderr: String,
    },
}

/// Runs a command to completion with captured output. On a non-zero exit the
/// trimmed stderr becomes part of the error so the caller can relay it.
pub fn execute_command<I, S>(cmd: &str, args: I, dir: Option<&Path>) -> Result<(), ExecuteError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut command = Command::new(cmd);
    command.args(args);
    if let Some(dir) = dir {
        command.current_dir(dir);
    }
    debug!("running {:?}", command);

    let output = command.output().map_err(|source| ExecuteError::Spawn {
        command: cmd.to_string(),
        source,
    })?;
    if output.status.success() {
        return Ok(());
    }
    Err(ExecuteError::NonZeroStatus {
        command: cmd.to_string(),
        status: output.status.code().unwrap_or(-1),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    })
}
