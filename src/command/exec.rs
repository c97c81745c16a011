use std::{
    io,
    process::{Command, ExitStatus, Stdio},
};

use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("failed to start `{shell}`: {source}")]
    Spawn {
        shell: String,
        #[source]
        source: io::Error,
    },
    #[error("command exited with {status}")]
    Status { status: ExitStatus },
}

/// Runs a rendered command line.
pub trait CommandExecutor {
    fn execute(&self, line: &str) -> Result<(), ExecutionError>;
}

/// Runs the line through `sh -c`, sharing this process's stdio.
#[derive(Debug, Clone)]
pub struct ShellExecutor {
    shell: String,
}

impl ShellExecutor {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

impl Default for ShellExecutor {
    fn default() -> Self {
        Self::new("sh")
    }
}

impl CommandExecutor for ShellExecutor {
    fn execute(&self, line: &str) -> Result<(), ExecutionError> {
        debug!(shell = %self.shell, "executing rendered command");
        let status = Command::new(&self.shell)
            .arg("-c")
            .arg(line)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| ExecutionError::Spawn {
                shell: self.shell.clone(),
                source,
            })?;
        if status.success() {
            Ok(())
        } else {
            Err(ExecutionError::Status { status })
        }
    }
}
