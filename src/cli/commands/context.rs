//! Settings and locations shared by the install, uninstall and status commands.

use std::path::{Path, PathBuf};

use crate::cli::args::Cli;
use crate::config::{load_settings, resolve_home, Paths, Settings};
use crate::error::Result;
use crate::state::ActionLog;

/// Everything resolved from the global flags.
#[derive(Debug, Clone)]
pub struct Context {
    /// Home directory everything is installed under.
    pub home: PathBuf,
    /// `--home`, made absolute, if it was given.
    pub home_override: Option<PathBuf>,
    /// `--config`, made absolute, if it was given.
    pub config_override: Option<PathBuf>,
    pub settings: Settings,
    pub paths: Paths,
    pub log: ActionLog,
}

impl Context {
    /// Resolve the global flags. Relative paths are taken from `working_dir`.
    pub fn resolve(cli: &Cli, working_dir: &Path) -> Result<Self> {
        let absolute = |p: &PathBuf| working_dir.join(p);

        let home_override = cli.home.as_ref().map(absolute);
        let config_override = cli.config.as_ref().map(absolute);

        let home = resolve_home(home_override.as_deref())?;
        let settings = load_settings(config_override.as_deref(), &home)?;
        let paths = Paths::resolve(&home, &settings);

        let state_file = cli
            .state_file
            .as_ref()
            .map(absolute)
            .unwrap_or_else(|| working_dir.join(ActionLog::DEFAULT_FILE_NAME));
        tracing::debug!("Using state file {}", state_file.display());

        Ok(Self {
            home,
            home_override,
            config_override,
            settings,
            paths,
            log: ActionLog::new(state_file),
        })
    }
}
