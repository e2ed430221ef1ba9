//! Write the tmux configuration file.

use std::fs;

use crate::config::{render_tmux_conf, Paths};
use crate::error::Result;
use crate::state::Action;

use super::StepContext;

/// Render and write the configuration file, replacing any existing one.
///
/// The sentinel is appended on every run, so repeated installs leave
/// duplicate `:config-written` lines; the reversal is idempotent.
pub fn write_config(ctx: &mut StepContext<'_>) -> Result<()> {
    let content = render_tmux_conf(ctx.settings, ctx.paths)?;
    let path = &ctx.paths.config_file;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    ctx.log.append(&Action::ConfigWritten)?;

    tracing::info!("Wrote {}", path.display());
    ctx.ui.success(&format!("Wrote {}", path.display()));
    Ok(())
}

/// Delete the configuration file. Returns whether it existed.
pub fn remove_config(paths: &Paths) -> Result<bool> {
    if !paths.config_file.exists() {
        return Ok(false);
    }
    fs::remove_file(&paths.config_file)?;
    tracing::debug!("Removed {}", paths.config_file.display());
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::shell::MockHost;
    use crate::state::ActionLog;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    fn write(temp: &TempDir, settings: &Settings) -> (Paths, ActionLog) {
        let paths = Paths::resolve(temp.path(), settings);
        let log = ActionLog::new(temp.path().join(".tmuxup-state"));
        let mut host = MockHost::new();
        let mut ui = MockUI::new();
        let mut ctx = StepContext {
            host: &mut host,
            ui: &mut ui,
            settings,
            paths: &paths,
            log: &log,
        };
        write_config(&mut ctx).unwrap();
        (paths, log)
    }

    #[test]
    fn writes_rendered_config_and_logs() {
        let temp = TempDir::new().unwrap();
        let (paths, log) = write(&temp, &Settings::default());

        let content = fs::read_to_string(&paths.config_file).unwrap();
        assert!(content.contains("set -g @plugin 'tmux-plugins/tmux-yank'"));
        assert_eq!(log.load().unwrap()[0].token(), Action::CONFIG_WRITTEN);
    }

    #[test]
    fn overwrites_existing_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".tmux.conf"), "old").unwrap();

        let (paths, _) = write(&temp, &Settings::default());

        let content = fs::read_to_string(&paths.config_file).unwrap();
        assert!(!content.starts_with("old"));
    }

    #[test]
    fn creates_parent_directories() {
        let temp = TempDir::new().unwrap();
        let settings = Settings {
            config_file: ".config/tmux/tmux.conf".into(),
            ..Settings::default()
        };

        let (paths, _) = write(&temp, &settings);

        assert!(paths.config_file.is_file());
    }

    #[test]
    fn repeated_writes_append_duplicate_sentinels() {
        let temp = TempDir::new().unwrap();
        write(&temp, &Settings::default());
        let (_, log) = write(&temp, &Settings::default());

        assert_eq!(log.load().unwrap().len(), 2);
    }

    #[test]
    fn remove_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let (paths, _) = write(&temp, &Settings::default());

        assert!(remove_config(&paths).unwrap());
        assert!(!paths.config_file.exists());
        assert!(!remove_config(&paths).unwrap());
    }
}
