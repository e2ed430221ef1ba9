//! tmuxup - Idempotent tmux setup that knows how to undo itself.
//!
//! tmuxup installs tmux and its helpers through whatever package manager the
//! host has, makes sure the `tmux-256color` terminal description exists,
//! writes `~/.tmux.conf` and bootstraps the tmux plugin manager. Every
//! change is appended to a plain-text action log, and `tmuxup uninstall`
//! replays that log to remove exactly what was added.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Settings loading, resolved paths and embedded templates
//! - [`detection`] - Package manager detection and its command table
//! - [`error`] - Error types and result aliases
//! - [`runner`] - The install and uninstall passes
//! - [`shell`] - Process execution behind the [`Host`](shell::Host) seam
//! - [`state`] - The action log
//! - [`steps`] - Individual install steps and their reversals
//! - [`ui`] - Spinners and terminal output
//!
//! # Example
//!
//! ```
//! use tmuxup::state::{Action, Record};
//!
//! let record = Record::parse(":config-written").unwrap();
//! assert_eq!(record, Record::Action(Action::ConfigWritten));
//! assert_eq!(Record::parse("tmux").unwrap().token(), "tmux");
//! ```
//!
//! For end-to-end runs against a scratch home, see the integration tests.

pub mod cli;
pub mod config;
pub mod detection;
pub mod error;
pub mod runner;
pub mod shell;
pub mod state;
pub mod steps;
pub mod ui;

pub use error::{Result, TmuxupError};
