//! Error types for tmuxup operations.
//!
//! This module defines [`TmuxupError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Fatal host conditions (no package manager, missing `git`) get their own
//!   variants so callers can report them without string matching
//! - Use `anyhow::Error` (via `TmuxupError::Other`) for unexpected errors
//! - Best-effort steps (terminfo, plugin install) never produce an error;
//!   they warn through the UI instead

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for tmuxup operations.
#[derive(Debug, Error)]
pub enum TmuxupError {
    /// Settings file not found at the requested location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse the settings file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Settings parsed but hold invalid values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// No home directory could be determined.
    #[error("Could not determine home directory; pass --home or set TMUXUP_HOME")]
    HomeNotFound,

    /// None of the supported package managers is on PATH.
    #[error("No supported package manager found (looked for {searched})")]
    NoPackageManager { searched: String },

    /// A required tool is missing and cannot be installed automatically.
    #[error("Missing requirement '{requirement}': {message}")]
    RequirementMissing {
        requirement: String,
        message: String,
    },

    /// External command failed or could not be spawned.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// Uninstall finished with records it could not reverse.
    #[error("Uninstall incomplete; still recorded: {}", remaining.join(", "))]
    UninstallIncomplete { remaining: Vec<String> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for tmuxup operations.
pub type Result<T> = std::result::Result<T, TmuxupError>;
