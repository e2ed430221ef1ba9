//! Settings schema.
//!
//! Every field has a default, so an empty file (or no file at all) yields
//! the stock tmux setup.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Result, TmuxupError};
use crate::state::{is_dir_name_token, is_package_token};

/// Installer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Packages that must be present, installed in this order.
    pub packages: Vec<String>,

    /// Terminfo entry the configuration's `default-terminal` names.
    pub terminfo_entry: String,

    /// Git remote of the plugin manager.
    pub plugin_manager_repo: String,

    /// Plugins declared in the configuration, as `owner/name`.
    pub plugins: Vec<String>,

    /// tmux configuration file, relative to home unless absolute.
    pub config_file: PathBuf,

    /// Plugin directory, relative to home unless absolute.
    pub plugins_dir: PathBuf,

    /// Per-user terminfo database, relative to home unless absolute.
    pub terminfo_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            packages: vec!["tmux".into(), "git".into(), "xclip".into()],
            terminfo_entry: "tmux-256color".to_string(),
            plugin_manager_repo: "https://github.com/tmux-plugins/tpm".to_string(),
            plugins: vec![
                "tmux-plugins/tmux-sensible".into(),
                "tmux-plugins/tmux-yank".into(),
                "tmux-plugins/tmux-resurrect".into(),
                "tmux-plugins/tmux-continuum".into(),
            ],
            config_file: PathBuf::from(".tmux.conf"),
            plugins_dir: PathBuf::from(".tmux/plugins"),
            terminfo_dir: PathBuf::from(".terminfo"),
        }
    }
}

impl Settings {
    /// Check values that would corrupt the state file or the generated config.
    pub fn validate(&self) -> Result<()> {
        if self.packages.is_empty() {
            return Err(invalid("packages must not be empty"));
        }

        for package in &self.packages {
            if !is_package_token(package) {
                return Err(invalid(&format!(
                    "invalid package name '{}': must be a single word not starting with ':'",
                    package
                )));
            }
        }

        if self.terminfo_entry.is_empty()
            || self
                .terminfo_entry
                .chars()
                .any(|c| c.is_whitespace() || c == '/' || c == ',' || c == '|')
        {
            return Err(invalid(&format!(
                "invalid terminfo entry '{}'",
                self.terminfo_entry
            )));
        }

        if self.plugin_manager_repo.trim().is_empty()
            || !is_dir_name_token(self.plugin_manager_name())
        {
            return Err(invalid("plugin_manager_repo must name a repository"));
        }

        // Plugin names become directories under plugins_dir that uninstall
        // deletes, so they must not resolve to plugins_dir or its parent.
        for plugin in &self.plugins {
            if plugin.chars().any(|c| c.is_whitespace() || c == '\'')
                || !is_dir_name_token(repo_dir_name(plugin))
            {
                return Err(invalid(&format!("invalid plugin '{}'", plugin)));
            }
        }

        Ok(())
    }

    /// Directory name the plugin manager is cloned into (`tpm`).
    pub fn plugin_manager_name(&self) -> &str {
        repo_dir_name(&self.plugin_manager_repo)
    }

    /// Directory names the declared plugins are installed into.
    ///
    /// The plugin manager itself is excluded even if declared.
    pub fn plugin_dir_names(&self) -> Vec<&str> {
        let manager = self.plugin_manager_name();
        self.plugins
            .iter()
            .map(|p| repo_dir_name(p))
            .filter(|name| !name.is_empty() && *name != manager)
            .collect()
    }
}

/// Last path segment of a repository reference, without a `.git` suffix.
pub fn repo_dir_name(repo: &str) -> &str {
    let trimmed = repo.trim().trim_end_matches('/');
    let last = trimmed.rsplit(['/', ':']).next().unwrap_or("");
    last.strip_suffix(".git").unwrap_or(last)
}

fn invalid(message: &str) -> TmuxupError {
    TmuxupError::ConfigValidationError {
        message: message.to_string(),
    }
}
