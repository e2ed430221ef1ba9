//! Process execution and host queries.

pub mod command;
pub mod host;
pub mod mock;
pub mod platform;

pub use command::{display_command, execute, CommandOptions, CommandResult};
pub use host::{Host, SystemHost};
pub use mock::MockHost;
pub use platform::{find_in_path, is_ci, is_elevated, is_executable};
