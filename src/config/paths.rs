//! Resolved filesystem locations.

use std::path::{Path, PathBuf};

use super::schema::Settings;
use crate::state::is_dir_name_token;

/// Absolute locations of everything install writes under home.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub home: PathBuf,
    pub config_file: PathBuf,
    pub plugins_dir: PathBuf,
    pub plugin_manager_dir: PathBuf,
    pub terminfo_dir: PathBuf,
}

impl Paths {
    /// Resolve settings against `home`. Absolute settings paths are kept as is.
    pub fn resolve(home: &Path, settings: &Settings) -> Self {
        let plugins_dir = home.join(&settings.plugins_dir);
        Self {
            home: home.to_path_buf(),
            config_file: home.join(&settings.config_file),
            plugin_manager_dir: plugins_dir.join(settings.plugin_manager_name()),
            plugins_dir,
            terminfo_dir: home.join(&settings.terminfo_dir),
        }
    }

    /// The plugin manager's install-all entry point.
    pub fn install_plugins_entry(&self) -> PathBuf {
        self.plugin_manager_dir.join("bin").join("install_plugins")
    }

    /// The script tmux runs to load the plugin manager.
    pub fn plugin_manager_entry(&self) -> PathBuf {
        self.plugin_manager_dir.join(
            self.plugin_manager_dir
                .file_name()
                .unwrap_or_else(|| std::ffi::OsStr::new("tpm")),
        )
    }

    /// The directory a plugin named `name` lives in.
    ///
    /// Returns `None` unless the result is a direct child of `plugins_dir`.
    pub fn plugin_dir(&self, name: &str) -> Option<PathBuf> {
        if !is_dir_name_token(name) {
            return None;
        }
        let dir = self.plugins_dir.join(name);
        (dir.parent() == Some(self.plugins_dir.as_path())).then_some(dir)
    }

    /// Candidate compiled locations of a terminfo entry.
    ///
    /// ncurses stores entries under their first letter; macOS and some BSDs
    /// use the letter's hex code instead.
    pub fn terminfo_files(&self, entry: &str) -> Vec<PathBuf> {
        let Some(first) = entry.chars().next() else {
            return Vec::new();
        };
        vec![
            self.terminfo_dir.join(first.to_string()).join(entry),
            self.terminfo_dir
                .join(format!("{:x}", u32::from(first)))
                .join(entry),
        ]
    }
}

/// The derived uninstall script lives next to the state file.
pub fn uninstall_script_path(state_file: &Path) -> PathBuf {
    state_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.join("uninstall.sh"))
        .unwrap_or_else(|| PathBuf::from("uninstall.sh"))
}
