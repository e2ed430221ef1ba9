//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. This allows:
//! - Single binary with subcommands (`tmuxup install`, `tmuxup status`)
//! - Shared resolution of settings and paths ([`Context`])
//! - Consistent global flag handling

pub mod completions;
pub mod context;
pub mod dispatcher;
pub mod install;
pub mod status;
pub mod uninstall;

pub use context::Context;
pub use dispatcher::{Command, CommandDispatcher, CommandResult};
