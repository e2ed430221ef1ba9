//! Action records.
//!
//! One record per line of the state file. Packages are stored as their bare
//! name; every other side effect is a sentinel starting with `:`, a character
//! no package name starts with.

use std::fmt;

use serde::{Serialize, Serializer};

/// A mutating action performed by install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A package this tool installed (absent beforehand).
    PackageInstalled(String),
    /// The tmux configuration file was (over)written.
    ConfigWritten,
    /// A terminfo entry was compiled into the user's database.
    TerminfoCreated,
    /// The plugin manager repository was cloned.
    PluginManagerCloned,
    /// The plugin manager's install-all entry point was invoked.
    PluginsInstalled,
    /// A plugin directory that did not exist before the plugin install.
    PluginCreated(String),
}

/// A parsed line of the state file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Action(Action),
    /// A line no reversal branch understands.
    Unrecognized(String),
}

impl Action {
    pub const CONFIG_WRITTEN: &'static str = ":config-written";
    pub const TERMINFO_CREATED: &'static str = ":terminfo-created";
    pub const PLUGIN_MANAGER_CLONED: &'static str = ":plugin-manager-cloned";
    pub const PLUGINS_INSTALLED: &'static str = ":plugins-installed";
    /// Prefix of per-plugin records; the directory name follows it.
    pub const PLUGIN_CREATED_PREFIX: &'static str = ":plugin-created:";

    /// The token written to the state file.
    pub fn token(&self) -> String {
        match self {
            Action::PackageInstalled(name) => name.clone(),
            Action::ConfigWritten => Self::CONFIG_WRITTEN.to_string(),
            Action::TerminfoCreated => Self::TERMINFO_CREATED.to_string(),
            Action::PluginManagerCloned => Self::PLUGIN_MANAGER_CLONED.to_string(),
            Action::PluginsInstalled => Self::PLUGINS_INSTALLED.to_string(),
            Action::PluginCreated(dir) => format!("{}{}", Self::PLUGIN_CREATED_PREFIX, dir),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Action::PackageInstalled(_) => "package_installed",
            Action::ConfigWritten => "config_written",
            Action::TerminfoCreated => "terminfo_created",
            Action::PluginManagerCloned => "plugin_manager_cloned",
            Action::PluginsInstalled => "plugins_installed",
            Action::PluginCreated(_) => "plugin_created",
        }
    }

    /// Human description for status output.
    pub fn describe(&self) -> String {
        match self {
            Action::PackageInstalled(name) => format!("package {}", name),
            Action::ConfigWritten => "configuration file written".to_string(),
            Action::TerminfoCreated => "terminfo entry compiled".to_string(),
            Action::PluginManagerCloned => "plugin manager cloned".to_string(),
            Action::PluginsInstalled => "plugin install run".to_string(),
            Action::PluginCreated(dir) => format!("plugin {}", dir),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}

/// JSON shape used by `status --json`.
#[derive(Serialize)]
struct ActionJson<'a> {
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    package: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    plugin: Option<&'a str>,
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let (package, plugin) = match self {
            Action::PackageInstalled(name) => (Some(name.as_str()), None),
            Action::PluginCreated(dir) => (None, Some(dir.as_str())),
            _ => (None, None),
        };
        ActionJson {
            kind: self.kind(),
            package,
            plugin,
        }
        .serialize(serializer)
    }
}

impl Record {
    /// Parse one line. Returns `None` for blank lines.
    pub fn parse(line: &str) -> Option<Self> {
        let token = line.trim();
        if token.is_empty() {
            return None;
        }

        let record = match token {
            Action::CONFIG_WRITTEN => Record::Action(Action::ConfigWritten),
            Action::TERMINFO_CREATED => Record::Action(Action::TerminfoCreated),
            Action::PLUGIN_MANAGER_CLONED => Record::Action(Action::PluginManagerCloned),
            Action::PLUGINS_INSTALLED => Record::Action(Action::PluginsInstalled),
            other => match other.strip_prefix(Action::PLUGIN_CREATED_PREFIX) {
                Some(dir) if is_dir_name_token(dir) => {
                    Record::Action(Action::PluginCreated(dir.to_string()))
                }
                _ if is_package_token(other) => {
                    Record::Action(Action::PackageInstalled(other.to_string()))
                }
                _ => Record::Unrecognized(other.to_string()),
            },
        };

        Some(record)
    }

    /// The raw text to write back for this record.
    pub fn token(&self) -> String {
        match self {
            Record::Action(action) => action.token(),
            Record::Unrecognized(raw) => raw.clone(),
        }
    }
}

/// Whether `token` can be stored as a package record.
///
/// Package records must be a single non-empty word that cannot be mistaken
/// for a sentinel.
pub fn is_package_token(token: &str) -> bool {
    !token.is_empty() && !token.starts_with(':') && !token.chars().any(char::is_whitespace)
}

/// Whether `name` is a single directory entry name safe to join onto a
/// parent directory: no separators, no whitespace, not `.` or `..`.
pub fn is_dir_name_token(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name
            .chars()
            .any(|c| c == '/' || c == '\\' || c == '\'' || c.is_whitespace())
}
