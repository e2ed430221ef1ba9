//! Uninstall command implementation.
//!
//! `tmuxup uninstall` replays the state file and removes what install did.

use crate::error::{Result, TmuxupError};
use crate::runner::{UninstallOutcome, Uninstaller};
use crate::shell::{Host, SystemHost};
use crate::ui::UserInterface;

use super::context::Context;
use super::dispatcher::{Command, CommandResult};

/// The uninstall command implementation.
pub struct UninstallCommand {
    context: Context,
}

impl UninstallCommand {
    /// Create a new uninstall command.
    pub fn new(context: Context) -> Self {
        Self { context }
    }

    /// Run against an explicit host.
    pub fn run_with(&self, host: &mut dyn Host, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let ctx = &self.context;
        let outcome = Uninstaller::new(&ctx.settings, &ctx.paths, &ctx.log).run(host, ui)?;

        let report = match outcome {
            UninstallOutcome::NothingToUndo => {
                ui.message("Nothing to uninstall");
                return Ok(CommandResult::success());
            }
            UninstallOutcome::Completed(report) => report,
        };

        if !report.is_complete() {
            return Err(TmuxupError::UninstallIncomplete {
                remaining: report.remaining(),
            });
        }

        tracing::info!(
            "Uninstall finished in {:?} ({} records reversed, {} skipped)",
            report.duration,
            report.reversed.len(),
            report.skipped.len()
        );
        ui.success("Everything tmuxup installed has been removed");
        Ok(CommandResult::success())
    }
}

impl Command for UninstallCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        self.run_with(&mut SystemHost::new(), ui)
    }
}
