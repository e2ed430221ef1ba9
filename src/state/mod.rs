//! Persistent record of what install changed.
//!
//! Install appends an [`Action`] to the [`ActionLog`] after every mutating
//! step; uninstall reads the log back and reverses each record.

pub mod action;
pub mod log;

pub use action::{is_dir_name_token, is_package_token, Action, Record};
pub use log::ActionLog;
