//! The seam between tmuxup and the machine it changes.
//!
//! Every PATH lookup and process spawn goes through [`Host`], so the
//! install and uninstall passes can be driven by [`MockHost`](super::MockHost)
//! in tests.

use crate::error::{Result, TmuxupError};

use super::command::{display_command, execute, CommandOptions, CommandResult};
use super::platform::{find_in_path, is_elevated};

/// Access to executables on the host.
pub trait Host {
    /// Whether `program` resolves on PATH.
    fn command_exists(&self, program: &str) -> bool;

    /// Whether the process already has root privileges.
    fn is_elevated(&self) -> bool;

    /// Run a program. A non-zero exit is reported in the result, not as an error.
    fn run(
        &mut self,
        program: &str,
        args: &[String],
        options: &CommandOptions,
    ) -> Result<CommandResult>;

    /// Run a program and turn a non-zero exit into [`TmuxupError::CommandFailed`].
    fn run_checked(
        &mut self,
        program: &str,
        args: &[String],
        options: &CommandOptions,
    ) -> Result<CommandResult> {
        let result = self.run(program, args, options)?;
        if result.success {
            Ok(result)
        } else {
            let stderr = result.stderr.trim();
            if !stderr.is_empty() {
                tracing::debug!("stderr of failed command: {}", stderr);
            }
            Err(TmuxupError::CommandFailed {
                command: display_command(program, args),
                code: result.exit_code,
            })
        }
    }

    /// Run a program quietly and report only whether it exited 0.
    fn succeeds(&mut self, program: &str, args: &[String]) -> bool {
        self.run(program, args, &CommandOptions::captured())
            .map(|r| r.success)
            .unwrap_or(false)
    }
}

/// The real machine.
#[derive(Debug, Default)]
pub struct SystemHost;

impl SystemHost {
    /// Create a host backed by the current process environment.
    pub fn new() -> Self {
        Self
    }
}

impl Host for SystemHost {
    fn command_exists(&self, program: &str) -> bool {
        find_in_path(program).is_some()
    }

    fn is_elevated(&self) -> bool {
        is_elevated()
    }

    fn run(
        &mut self,
        program: &str,
        args: &[String],
        options: &CommandOptions,
    ) -> Result<CommandResult> {
        execute(program, args, options)
    }
}
