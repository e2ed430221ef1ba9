//! The individual install steps and their reversals.
//!
//! Each step module exposes a forward operation used by
//! [`Installer`](crate::runner::Installer) and the reversal used by
//! [`Uninstaller`](crate::runner::Uninstaller). Forward operations append to
//! the [`ActionLog`] right after the side effect they record.

pub mod config_file;
pub mod packages;
pub mod plugins;
pub mod terminfo;
pub mod uninstall_script;

use std::path::Path;

use crate::config::{Paths, Settings};
use crate::shell::Host;
use crate::state::ActionLog;
use crate::ui::UserInterface;

pub use config_file::{remove_config, write_config};
pub use packages::{ensure_packages, remove_package};
pub use plugins::{bootstrap_plugins, remove_plugin, remove_plugin_manager, PluginReport};
pub use terminfo::{ensure_terminfo, remove_terminfo, TerminfoOutcome};
pub use uninstall_script::{remove_uninstall_script, write_uninstall_script, ScriptInvocation};

/// Everything a forward step needs.
pub struct StepContext<'a> {
    pub host: &'a mut dyn Host,
    pub ui: &'a mut dyn UserInterface,
    pub settings: &'a Settings,
    pub paths: &'a Paths,
    pub log: &'a ActionLog,
}

/// Remove `dir` if it exists and is empty. Errors are ignored.
pub(crate) fn remove_dir_if_empty(dir: &Path) {
    if is_empty_dir(dir) && std::fs::remove_dir(dir).is_ok() {
        tracing::debug!("Removed empty directory {}", dir.display());
    }
}

/// Remove `dir` and then each ancestor while they are empty, stopping
/// before `root`. Nothing outside `root` is touched.
pub(crate) fn tidy_empty_dirs(dir: &Path, root: &Path) {
    let mut current = Some(dir);
    while let Some(d) = current {
        if d == root || !d.starts_with(root) || (d.exists() && !is_empty_dir(d)) {
            break;
        }
        remove_dir_if_empty(d);
        current = d.parent();
    }
}

fn is_empty_dir(dir: &Path) -> bool {
    std::fs::read_dir(dir)
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn removes_empty_directory() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("empty");
        std::fs::create_dir(&dir).unwrap();

        remove_dir_if_empty(&dir);

        assert!(!dir.exists());
    }

    #[test]
    fn keeps_non_empty_directory() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("keep"), "").unwrap();

        remove_dir_if_empty(temp.path());

        assert!(temp.path().exists());
    }

    #[test]
    fn missing_directory_is_fine() {
        let temp = TempDir::new().unwrap();
        remove_dir_if_empty(&temp.path().join("missing"));
    }

    #[test]
    fn tidy_climbs_to_but_not_past_root() {
        let temp = TempDir::new().unwrap();
        let leaf = temp.path().join(".tmux").join("plugins");
        std::fs::create_dir_all(&leaf).unwrap();

        tidy_empty_dirs(&leaf, temp.path());

        assert!(!temp.path().join(".tmux").exists());
        assert!(temp.path().exists());
    }

    #[test]
    fn tidy_stops_at_first_non_empty_parent() {
        let temp = TempDir::new().unwrap();
        let leaf = temp.path().join(".tmux").join("plugins");
        std::fs::create_dir_all(&leaf).unwrap();
        std::fs::write(temp.path().join(".tmux").join("notes"), "").unwrap();

        tidy_empty_dirs(&leaf, temp.path());

        assert!(!leaf.exists());
        assert!(temp.path().join(".tmux").exists());
    }

    #[test]
    fn tidy_ignores_dirs_outside_root() {
        let temp = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        let dir = outside.path().join("empty");
        std::fs::create_dir(&dir).unwrap();

        tidy_empty_dirs(&dir, temp.path());

        assert!(dir.exists());
    }
}
