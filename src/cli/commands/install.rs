//! Install command implementation.
//!
//! `tmuxup install` (or plain `tmuxup`) sets everything up and writes the
//! uninstall script next to the state file.

use crate::error::Result;
use crate::runner::Installer;
use crate::shell::{Host, SystemHost};
use crate::steps::ScriptInvocation;
use crate::ui::UserInterface;

use super::context::Context;
use super::dispatcher::{Command, CommandResult};

/// The install command implementation.
pub struct InstallCommand {
    context: Context,
}

impl InstallCommand {
    /// Create a new install command.
    pub fn new(context: Context) -> Self {
        Self { context }
    }

    /// Run against an explicit host.
    pub fn run_with(
        &self,
        host: &mut dyn Host,
        ui: &mut dyn UserInterface,
        exe: std::path::PathBuf,
    ) -> Result<CommandResult> {
        let ctx = &self.context;
        ui.show_header("tmuxup");

        let script = ScriptInvocation {
            exe,
            state_file: ctx.log.path().to_path_buf(),
            home: ctx.home_override.clone(),
            config: ctx.config_override.clone(),
        };

        let report = Installer::new(&ctx.settings, &ctx.paths, &ctx.log).run(
            host,
            ui,
            Some(&script),
        )?;

        tracing::info!(
            "Install finished in {:?} ({} packages installed)",
            report.duration,
            report.installed_packages.len()
        );

        ui.message("");
        ui.success("tmux is set up. Start it with `tmux` (prefix is Ctrl-a).");
        if let Some(path) = &report.uninstall_script {
            ui.message(&format!("To undo everything, run {}", path.display()));
        }
        Ok(CommandResult::success())
    }
}

impl Command for InstallCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let exe = std::env::current_exe()?;
        self.run_with(&mut SystemHost::new(), ui, exe)
    }
}
