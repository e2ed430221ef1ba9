//! Settings, resolved paths and the built-in file templates.
//!
//! - Schema and validation in [`schema`]
//! - Discovery and loading in [`loader`]
//! - Filesystem locations in [`paths`]
//! - Embedded `tmux.conf` and terminfo templates in [`template`]
//!
//! # Example
//!
//! ```
//! use tmuxup::config::{load_settings, Paths};
//! use tempfile::TempDir;
//!
//! let home = TempDir::new().unwrap();
//! let settings = load_settings(None, home.path()).unwrap();
//! let paths = Paths::resolve(home.path(), &settings);
//! assert!(paths.config_file.ends_with(".tmux.conf"));
//! ```

pub mod loader;
pub mod paths;
pub mod schema;
pub mod template;

pub use loader::{load_settings, load_settings_file, parse_settings, resolve_home, user_settings_path};
pub use paths::{uninstall_script_path, Paths};
pub use schema::{repo_dir_name, Settings};
pub use template::{interpolate, render_terminfo_source, render_tmux_conf};
