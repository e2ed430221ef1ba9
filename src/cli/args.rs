//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// tmuxup - Idempotent tmux setup that knows how to undo itself.
#[derive(Debug, Parser)]
#[command(name = "tmuxup")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to settings file (overrides ~/.config/tmuxup/config.yml)
    #[arg(short, long, global = true, env = "TMUXUP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Home directory to install into (overrides $HOME)
    #[arg(long, global = true, env = "TMUXUP_HOME")]
    pub home: Option<PathBuf>,

    /// Path to the state file (defaults to ./.tmuxup-state)
    #[arg(long, global = true, env = "TMUXUP_STATE_FILE")]
    pub state_file: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Install packages, terminfo, config and plugins (default if no command specified)
    Install,

    /// Reverse everything recorded in the state file
    Uninstall,

    /// Show what the state file records
    Status(StatusArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `status` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_parses() {
        let cli = Cli::try_parse_from(["tmuxup"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = Cli::try_parse_from([
            "tmuxup",
            "uninstall",
            "--state-file",
            "/tmp/state",
            "--home",
            "/tmp/home",
        ])
        .unwrap();

        assert!(matches!(cli.command, Some(Commands::Uninstall)));
        assert_eq!(cli.state_file, Some(PathBuf::from("/tmp/state")));
        assert_eq!(cli.home, Some(PathBuf::from("/tmp/home")));
    }

    #[test]
    fn status_json_flag() {
        let cli = Cli::try_parse_from(["tmuxup", "status", "--json"]).unwrap();
        match cli.command {
            Some(Commands::Status(args)) => assert!(args.json),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn uninstall_takes_no_arguments() {
        assert!(Cli::try_parse_from(["tmuxup", "uninstall", "extra"]).is_err());
    }

    #[test]
    fn completions_requires_known_shell() {
        assert!(Cli::try_parse_from(["tmuxup", "completions", "bash"]).is_ok());
        assert!(Cli::try_parse_from(["tmuxup", "completions", "cmd"]).is_err());
    }
}
