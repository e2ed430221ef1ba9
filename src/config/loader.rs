//! Settings discovery and loading.
//!
//! Lookup order:
//! 1. An explicit path (`--config` / `TMUXUP_CONFIG`), which must exist
//! 2. The user file at `<home>/.config/tmuxup/config.yml`
//! 3. Built-in defaults

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::Settings;
use crate::error::{Result, TmuxupError};

/// Location of the per-user settings file.
pub fn user_settings_path(home: &Path) -> PathBuf {
    home.join(".config").join("tmuxup").join("config.yml")
}

/// Pick the home directory: explicit override first, then the OS default.
pub fn resolve_home(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(home) => Ok(home.to_path_buf()),
        None => dirs::home_dir().ok_or(TmuxupError::HomeNotFound),
    }
}

/// Parse settings from YAML text. `path` is only used in error messages.
pub fn parse_settings(content: &str, path: &Path) -> Result<Settings> {
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }

    let settings: Settings =
        serde_yaml::from_str(content).map_err(|e| TmuxupError::ConfigParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    settings.validate()?;
    Ok(settings)
}

/// Load and validate settings from a specific file.
pub fn load_settings_file(path: &Path) -> Result<Settings> {
    if !path.is_file() {
        return Err(TmuxupError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    parse_settings(&content, path)
}

/// Load settings following the discovery order.
pub fn load_settings(explicit: Option<&Path>, home: &Path) -> Result<Settings> {
    if let Some(path) = explicit {
        tracing::debug!("Loading settings from {}", path.display());
        return load_settings_file(path);
    }

    let user = user_settings_path(home);
    if user.is_file() {
        tracing::debug!("Loading settings from {}", user.display());
        return load_settings_file(&user);
    }

    tracing::debug!("No settings file found, using defaults");
    Ok(Settings::default())
}
