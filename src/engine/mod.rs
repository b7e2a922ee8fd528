//! External command execution
//!
//! Every docker and git invocation is described by a [`CommandSpec`] and run through a
//! [`CommandExecutor`], so the build loop never touches processes directly.

pub mod docker;

use crate::error::{BuilderError, Result};
use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;
use std::process::Stdio;

pub use docker::{DockerCommands, build_date, vcs_ref_command};

/// One external command invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    /// Working directory; the caller's directory when `None`
    pub current_dir: Option<PathBuf>,
    /// Capture stdout instead of streaming it to the terminal
    pub capture: bool,
}

impl CommandSpec {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            current_dir: None,
            capture: false,
        }
    }

    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn captured(mut self) -> Self {
        self.capture = true;
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Runs external commands
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Run `command` to completion.
    ///
    /// Returns captured stdout without trailing newlines, or an empty string when the
    /// command output is not captured.
    async fn run(&self, command: &CommandSpec) -> Result<String>;
}

/// Executor backed by real child processes
#[derive(Debug, Default, Clone)]
pub struct ProcessExecutor;

#[async_trait]
impl CommandExecutor for ProcessExecutor {
    async fn run(&self, command: &CommandSpec) -> Result<String> {
        let mut cmd = tokio::process::Command::new(&command.program);
        cmd.args(&command.args).stdin(Stdio::null());

        if let Some(dir) = &command.current_dir {
            cmd.current_dir(dir);
        }

        let failed = |reason: String| BuilderError::Command {
            command: command.to_string(),
            reason,
        };

        if command.capture {
            let output = cmd
                .stderr(Stdio::inherit())
                .output()
                .await
                .map_err(|e| failed(e.to_string()))?;

            if !output.status.success() {
                return Err(failed(output.status.to_string()));
            }

            let stdout = String::from_utf8_lossy(&output.stdout);
            Ok(stdout.trim_end_matches(['\n', '\r']).to_string())
        } else {
            let status = cmd.status().await.map_err(|e| failed(e.to_string()))?;

            if !status.success() {
                return Err(failed(status.to_string()));
            }

            Ok(String::new())
        }
    }
}
