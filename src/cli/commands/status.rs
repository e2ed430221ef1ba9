//! Status command implementation.
//!
//! The `tmuxup status` command lists what the state file records.

use crate::cli::args::StatusArgs;
use crate::error::{Result, TmuxupError};
use crate::state::{Action, Record};
use crate::ui::UserInterface;

use super::context::Context;
use super::dispatcher::{Command, CommandResult};

/// The status command implementation.
pub struct StatusCommand {
    context: Context,
    args: StatusArgs,
}

impl StatusCommand {
    /// Create a new status command.
    pub fn new(context: Context, args: StatusArgs) -> Self {
        Self { context, args }
    }
}

impl Command for StatusCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let log = &self.context.log;
        let records = if log.exists() { log.load()? } else { Vec::new() };

        if self.args.json {
            let actions: Vec<&Action> = records
                .iter()
                .filter_map(|r| match r {
                    Record::Action(action) => Some(action),
                    Record::Unrecognized(_) => None,
                })
                .collect();
            let json = serde_json::to_string_pretty(&actions)
                .map_err(|e| TmuxupError::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        if records.is_empty() {
            ui.message("Nothing installed");
            return Ok(CommandResult::success());
        }

        ui.show_header(&format!("tmuxup - {}", log.path().display()));
        for record in &records {
            match record {
                Record::Action(action) => ui.message(&format!("  {}", action.describe())),
                Record::Unrecognized(line) => {
                    ui.message(&format!("  unrecognized record '{}' (ignored)", line))
                }
            }
        }
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::Cli;
    use crate::ui::MockUI;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn command(temp: &TempDir, json: bool) -> StatusCommand {
        let cli =
            Cli::try_parse_from(["tmuxup", "--home", temp.path().to_str().unwrap()]).unwrap();
        StatusCommand::new(
            Context::resolve(&cli, temp.path()).unwrap(),
            StatusArgs { json },
        )
    }

    #[test]
    fn empty_status() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();

        let result = command(&temp, false).execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_message("Nothing installed"));
    }

    #[test]
    fn lists_records_with_descriptions() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(".tmuxup-state"),
            "xclip\n:config-written\n:bogus\n",
        )
        .unwrap();
        let mut ui = MockUI::new();

        command(&temp, false).execute(&mut ui).unwrap();

        assert!(ui.has_message("package xclip"));
        assert!(ui.has_message("configuration file written"));
        assert!(ui.has_message("unrecognized record ':bogus'"));
    }

    #[test]
    fn json_output_lists_actions() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(".tmuxup-state"),
            "tmux\n:plugins-installed\n:plugin-created:tmux-yank\n",
        )
        .unwrap();
        let mut ui = MockUI::new();

        command(&temp, true).execute(&mut ui).unwrap();

        let value: serde_json::Value = serde_json::from_str(&ui.messages()[0]).unwrap();
        assert_eq!(value[0]["kind"], "package_installed");
        assert_eq!(value[0]["package"], "tmux");
        assert_eq!(value[1]["kind"], "plugins_installed");
        assert_eq!(value[2]["kind"], "plugin_created");
        assert_eq!(value[2]["plugin"], "tmux-yank");
    }

    #[test]
    fn json_without_state_is_empty_array() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();

        command(&temp, true).execute(&mut ui).unwrap();

        assert_eq!(ui.messages()[0], "[]");
    }
}
