//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::PathBuf;

use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::ui::UserInterface;

use super::completions::CompletionsCommand;
use super::context::Context;
use super::install::InstallCommand;
use super::status::StatusCommand;
use super::uninstall::UninstallCommand;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    working_dir: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher. Relative paths in flags resolve against
    /// `working_dir`, and the state file defaults to living there.
    pub fn new(working_dir: PathBuf) -> Self {
        Self { working_dir }
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it. No subcommand means install.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Completions(args)) => CompletionsCommand::new(args.clone()).execute(ui),
            Some(Commands::Status(args)) => {
                let context = Context::resolve(cli, &self.working_dir)?;
                StatusCommand::new(context, args.clone()).execute(ui)
            }
            Some(Commands::Uninstall) => {
                let context = Context::resolve(cli, &self.working_dir)?;
                UninstallCommand::new(context).execute(ui)
            }
            Some(Commands::Install) | None => {
                let context = Context::resolve(cli, &self.working_dir)?;
                InstallCommand::new(context).execute(ui)
            }
        }
    }
}
