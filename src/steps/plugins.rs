//! Plugin manager bootstrap.

use std::fs;

use crate::config::Paths;
use crate::error::{Result, TmuxupError};
use crate::shell::CommandOptions;
use crate::state::Action;

use super::{tidy_empty_dirs, StepContext};

/// What the plugin step did.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct PluginReport {
    /// The plugin manager was cloned by this run.
    pub cloned: bool,
    /// The install-all entry point ran; `Some(false)` if it failed.
    pub plugins_installed: Option<bool>,
    /// Plugin directories that appeared during this run.
    pub created: Vec<String>,
}

/// Clone the plugin manager if needed, then install the declared plugins.
///
/// A failing plugin install is reported but not fatal. Only plugin
/// directories that were absent beforehand and exist afterwards are logged,
/// one record each, so uninstall leaves pre-existing plugins alone.
pub fn bootstrap_plugins(ctx: &mut StepContext<'_>) -> Result<PluginReport> {
    if !ctx.host.command_exists("git") {
        return Err(TmuxupError::RequirementMissing {
            requirement: "git".to_string(),
            message: "git is needed to clone the plugin manager".to_string(),
        });
    }

    let mut report = PluginReport::default();
    let manager_dir = &ctx.paths.plugin_manager_dir;
    let name = ctx.settings.plugin_manager_name();

    if manager_dir.exists() {
        tracing::info!("Plugin manager already at {}", manager_dir.display());
        ctx.ui.message(&format!("○ {} already cloned", name));
    } else {
        let had_plugins_dir = ctx.paths.plugins_dir.exists();
        fs::create_dir_all(&ctx.paths.plugins_dir)?;
        let args = vec![
            "clone".to_string(),
            "--depth".to_string(),
            "1".to_string(),
            ctx.settings.plugin_manager_repo.clone(),
            manager_dir.to_string_lossy().into_owned(),
        ];
        ctx.ui.detail(&crate::shell::display_command("git", &args));

        let mut spinner = ctx.ui.start_spinner(&format!("Cloning {}", name));
        let cloned = ctx.host.run_checked("git", &args, &CommandOptions::captured());
        if let Err(e) = cloned {
            spinner.finish_error(&format!("Could not clone {}", name));
            if !had_plugins_dir {
                tidy_empty_dirs(&ctx.paths.plugins_dir, &ctx.paths.home);
            }
            return Err(e);
        }

        ctx.log.append(&Action::PluginManagerCloned)?;
        spinner.finish_success(&format!("Cloned {}", name));
        report.cloned = true;
    }

    let entry = ctx.paths.install_plugins_entry();
    if !entry.is_file() {
        tracing::warn!("No plugin installer at {}", entry.display());
        ctx.ui.warning(&format!(
            "{} has no installer at {}; skipping plugin install",
            name,
            entry.display()
        ));
        return Ok(report);
    }

    let mut plugins_path = ctx.paths.plugins_dir.to_string_lossy().into_owned();
    if !plugins_path.ends_with('/') {
        plugins_path.push('/');
    }
    let options = CommandOptions::captured().with_env("TMUX_PLUGIN_MANAGER_PATH", &plugins_path);

    let absent: Vec<&str> = ctx
        .settings
        .plugin_dir_names()
        .into_iter()
        .filter(|name| ctx.paths.plugin_dir(name).is_some_and(|dir| !dir.exists()))
        .collect();

    let mut spinner = ctx.ui.start_spinner("Installing tmux plugins");
    let succeeded = ctx
        .host
        .run(&entry.to_string_lossy(), &[], &options)
        .map(|r| r.success)
        .unwrap_or(false);

    ctx.log.append(&Action::PluginsInstalled)?;
    for name in absent {
        if ctx.paths.plugin_dir(name).is_some_and(|dir| dir.is_dir()) {
            ctx.log.append(&Action::PluginCreated(name.to_string()))?;
            report.created.push(name.to_string());
        }
    }
    tracing::debug!("Plugin directories created: {:?}", report.created);

    if succeeded {
        spinner.finish_success("Installed tmux plugins");
    } else {
        tracing::warn!("{} exited with an error", entry.display());
        spinner.finish_error("Plugin install reported errors; run prefix + I inside tmux to retry");
    }
    report.plugins_installed = Some(succeeded);
    Ok(report)
}

/// Delete the cloned plugin manager. Returns whether it existed.
pub fn remove_plugin_manager(paths: &Paths) -> Result<bool> {
    if !paths.plugin_manager_dir.exists() {
        return Ok(false);
    }
    fs::remove_dir_all(&paths.plugin_manager_dir)?;
    tracing::debug!("Removed {}", paths.plugin_manager_dir.display());
    tidy_empty_dirs(&paths.plugins_dir, &paths.home);
    Ok(true)
}

/// Delete one plugin directory this tool saw appear. Best effort; returns
/// whether it was removed.
pub fn remove_plugin(paths: &Paths, name: &str) -> bool {
    let Some(dir) = paths.plugin_dir(name) else {
        tracing::warn!("Refusing to remove plugin '{}' outside {}", name, paths.plugins_dir.display());
        return false;
    };
    if !dir.exists() {
        return false;
    }
    let removed = match fs::remove_dir_all(&dir) {
        Ok(()) => {
            tracing::debug!("Removed {}", dir.display());
            true
        }
        Err(e) => {
            tracing::warn!("Could not remove {}: {}", dir.display(), e);
            false
        }
    };
    tidy_empty_dirs(&paths.plugins_dir, &paths.home);
    removed
}
