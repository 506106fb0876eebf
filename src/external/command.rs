//! Base command execution abstraction
//!
//! Every effect migctl has on the outside world is a child process. This
//! module owns that seam: callers depend on the [`CommandExecutor`] trait,
//! which lets tests drive the provisioning logic with in-memory executors.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub status_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status_code == 0
    }
}

#[derive(Debug, Error, Clone)]
pub enum CommandError {
    #[error("command not found: {command}")]
    CommandNotFound { command: String },
    #[error("io error: {message}")]
    Io { message: String },
}

/// Trait for executing external commands
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn execute(&self, program: &str, args: &[&str]) -> Result<CommandOutput, CommandError>;
}

/// Real implementation backed by `tokio::process::Command`.
pub struct ProcessCommandExecutor;

#[async_trait]
impl CommandExecutor for ProcessCommandExecutor {
    async fn execute(&self, program: &str, args: &[&str]) -> Result<CommandOutput, CommandError> {
        let output = tokio::process::Command::new(program)
            .args(args)
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    CommandError::CommandNotFound {
                        command: program.to_string(),
                    }
                } else {
                    CommandError::Io {
                        message: e.to_string(),
                    }
                }
            })?;

        Ok(CommandOutput {
            status_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_process_command_executor_success() {
        let executor = ProcessCommandExecutor;
        let result = executor.execute("echo", &["hello"]).await;

        assert!(result.is_ok());
        let output = result.unwrap();
        assert!(output.success());
        assert!(output.stdout.contains("hello"));
    }

    #[tokio::test]
    async fn test_process_command_executor_nonzero_exit() {
        let executor = ProcessCommandExecutor;
        let result = executor.execute("sh", &["-c", "exit 3"]).await;

        assert!(result.is_ok());
        let output = result.unwrap();
        assert!(!output.success());
        assert_eq!(output.status_code, 3);
    }

    #[tokio::test]
    async fn test_process_command_executor_command_not_found() {
        let executor = ProcessCommandExecutor;
        let result = executor.execute("nonexistent_command_xyz", &[]).await;

        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            CommandError::CommandNotFound { .. }
        ));
    }
}
