//! Append-only action log.
//!
//! The state file holds one token per line in the order actions happened.
//! The file is created by the first append; a missing file means nothing was
//! installed.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;

use super::action::{Action, Record};

/// Handle to the state file on disk.
#[derive(Debug, Clone)]
pub struct ActionLog {
    path: PathBuf,
}

impl ActionLog {
    /// Default file name, created in the working directory.
    pub const DEFAULT_FILE_NAME: &'static str = ".tmuxup-state";

    /// Open a log at `path`. Nothing is touched on disk.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the state file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the state file exists.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Append one action, creating the file (and its directory) if needed.
    pub fn append(&self, action: &Action) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", action.token())?;
        file.flush()?;

        tracing::debug!("Recorded '{}' in {}", action, self.path.display());
        Ok(())
    }

    /// Read every record in file order. A missing file reads as empty.
    pub fn load(&self) -> Result<Vec<Record>> {
        if !self.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)?;
        Ok(content.lines().filter_map(Record::parse).collect())
    }

    /// Replace the file with exactly `records`.
    ///
    /// Uses write-to-temp-then-rename so a crash never leaves a half-written
    /// log. An empty slice removes the file instead.
    pub fn rewrite(&self, records: &[Record]) -> Result<()> {
        if records.is_empty() {
            return self.remove();
        }

        let mut content = String::new();
        for record in records {
            content.push_str(&record.token());
            content.push('\n');
        }

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, &self.path)?;

        tracing::debug!(
            "Rewrote {} with {} record(s)",
            self.path.display(),
            records.len()
        );
        Ok(())
    }

    /// Delete the state file if present.
    pub fn remove(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!("Removed {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
