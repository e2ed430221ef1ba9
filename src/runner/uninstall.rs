//! The reversal pass.

use std::time::{Duration, Instant};

use crate::config::{uninstall_script_path, Paths, Settings};
use crate::detection::PackageManager;
use crate::error::{Result, TmuxupError};
use crate::shell::Host;
use crate::state::{Action, ActionLog, Record};
use crate::steps::{
    remove_config, remove_package, remove_plugin, remove_plugin_manager, remove_terminfo,
    remove_uninstall_script,
};
use crate::ui::UserInterface;

/// Replays the action log as removals.
pub struct Uninstaller<'a> {
    settings: &'a Settings,
    paths: &'a Paths,
    log: &'a ActionLog,
}

/// Outcome of an uninstall pass.
#[derive(Debug)]
pub enum UninstallOutcome {
    /// There was no state file.
    NothingToUndo,
    /// The log was replayed.
    Completed(UninstallReport),
}

/// What the reversal did, record by record.
#[derive(Debug, Default)]
pub struct UninstallReport {
    /// Records that were reversed.
    pub reversed: Vec<Action>,
    /// Lines that were not understood and skipped. They stay in the state
    /// file if anything else is left in it.
    pub skipped: Vec<String>,
    /// Records whose reversal failed, with the reason.
    pub failed: Vec<(Action, String)>,
    /// Total duration.
    pub duration: Duration,
}

impl UninstallReport {
    /// Whether every record was reversed.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Tokens still recorded in the state file after this pass.
    pub fn remaining(&self) -> Vec<String> {
        self.failed.iter().map(|(a, _)| a.token().to_string()).collect()
    }
}

impl<'a> Uninstaller<'a> {
    /// Create an uninstaller.
    pub fn new(settings: &'a Settings, paths: &'a Paths, log: &'a ActionLog) -> Self {
        Self {
            settings,
            paths,
            log,
        }
    }

    /// Reverse every record in the state file, in file order.
    ///
    /// Removal failures are collected rather than aborting. Afterwards the
    /// state file holds the records that failed plus any unrecognized
    /// lines, in their original order, or is deleted (with the uninstall
    /// script) when nothing failed.
    pub fn run(
        &self,
        host: &mut dyn Host,
        ui: &mut dyn UserInterface,
    ) -> Result<UninstallOutcome> {
        if !self.log.exists() {
            tracing::info!("No state file at {}", self.log.path().display());
            return Ok(UninstallOutcome::NothingToUndo);
        }

        let start = Instant::now();
        let records = self.log.load()?;

        let needs_manager = records
            .iter()
            .any(|r| matches!(r, Record::Action(Action::PackageInstalled(_))));
        let manager = if needs_manager {
            let manager =
                PackageManager::detect(host).ok_or_else(|| TmuxupError::NoPackageManager {
                    searched: PackageManager::searched(),
                })?;
            tracing::info!("Detected package manager: {}", manager);
            Some(manager)
        } else {
            None
        };

        let mut report = UninstallReport::default();
        let mut kept = Vec::new();
        for record in records {
            let action = match record {
                Record::Action(action) => action,
                Record::Unrecognized(line) => {
                    tracing::debug!("Skipping unrecognized record '{}'", line);
                    report.skipped.push(line.clone());
                    kept.push(Record::Unrecognized(line));
                    continue;
                }
            };

            match self.reverse(&action, manager, host) {
                Ok(()) => {
                    ui.success(&format!("Undone: {}", action.describe()));
                    report.reversed.push(action);
                }
                Err(e) => {
                    tracing::warn!("Could not reverse '{}': {}", action, e);
                    ui.error(&format!("Could not undo {}: {}", action.describe(), e));
                    kept.push(Record::Action(action.clone()));
                    report.failed.push((action, e.to_string()));
                }
            }
        }

        if report.is_complete() {
            self.log.remove()?;
            remove_uninstall_script(&uninstall_script_path(self.log.path()))?;
        } else {
            self.log.rewrite(&kept)?;
        }

        report.duration = start.elapsed();
        Ok(UninstallOutcome::Completed(report))
    }

    fn reverse(
        &self,
        action: &Action,
        manager: Option<PackageManager>,
        host: &mut dyn Host,
    ) -> Result<()> {
        match action {
            Action::PackageInstalled(package) => {
                // Detection ran up front whenever a package record exists.
                let manager = manager.ok_or_else(|| TmuxupError::NoPackageManager {
                    searched: PackageManager::searched(),
                })?;
                remove_package(host, manager, package)
            }
            Action::ConfigWritten => remove_config(self.paths).map(|_| ()),
            Action::TerminfoCreated => {
                remove_terminfo(self.paths, &self.settings.terminfo_entry);
                Ok(())
            }
            Action::PluginManagerCloned => remove_plugin_manager(self.paths).map(|_| ()),
            // Each plugin directory the run created has its own record.
            Action::PluginsInstalled => Ok(()),
            Action::PluginCreated(name) => {
                remove_plugin(self.paths, name);
                Ok(())
            }
        }
    }
}
