//! The install pass.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::{uninstall_script_path, Paths, Settings};
use crate::detection::PackageManager;
use crate::error::{Result, TmuxupError};
use crate::shell::Host;
use crate::state::ActionLog;
use crate::steps::{
    bootstrap_plugins, ensure_packages, ensure_terminfo, write_config, write_uninstall_script,
    PluginReport, ScriptInvocation, StepContext, TerminfoOutcome,
};
use crate::ui::UserInterface;

/// Runs every install step in order against one state file.
pub struct Installer<'a> {
    settings: &'a Settings,
    paths: &'a Paths,
    log: &'a ActionLog,
}

/// Result of an install pass.
#[derive(Debug)]
pub struct InstallReport {
    /// Package manager that was used.
    pub manager: PackageManager,
    /// Packages installed by this run.
    pub installed_packages: Vec<String>,
    /// What happened to the terminfo entry.
    pub terminfo: TerminfoOutcome,
    /// What happened to the plugin manager and plugins.
    pub plugins: PluginReport,
    /// Where the uninstall script was written, if one was requested.
    pub uninstall_script: Option<PathBuf>,
    /// Total duration.
    pub duration: Duration,
}

impl<'a> Installer<'a> {
    /// Create an installer.
    pub fn new(settings: &'a Settings, paths: &'a Paths, log: &'a ActionLog) -> Self {
        Self {
            settings,
            paths,
            log,
        }
    }

    /// Run the install pass.
    ///
    /// Package manager detection happens before anything is written; without
    /// one the pass fails with no side effects. Any later error aborts the
    /// pass with everything done so far already logged.
    pub fn run(
        &self,
        host: &mut dyn Host,
        ui: &mut dyn UserInterface,
        script: Option<&ScriptInvocation>,
    ) -> Result<InstallReport> {
        let start = Instant::now();

        let manager = PackageManager::detect(host).ok_or_else(|| TmuxupError::NoPackageManager {
            searched: PackageManager::searched(),
        })?;
        tracing::info!("Detected package manager: {}", manager);
        ui.detail(&format!("Using {}", manager));

        let mut ctx = StepContext {
            host,
            ui,
            settings: self.settings,
            paths: self.paths,
            log: self.log,
        };

        let installed_packages = ensure_packages(&mut ctx, manager)?;
        let terminfo = ensure_terminfo(&mut ctx)?;
        write_config(&mut ctx)?;
        let plugins = bootstrap_plugins(&mut ctx)?;

        let uninstall_script = match script {
            Some(invocation) => {
                let path = uninstall_script_path(self.log.path());
                write_uninstall_script(&path, invocation)?;
                Some(path)
            }
            None => None,
        };

        Ok(InstallReport {
            manager,
            installed_packages,
            terminfo,
            plugins,
            uninstall_script,
            duration: start.elapsed(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::MockHost;
    use crate::state::{Action, Record};
    use crate::ui::MockUI;
    use tempfile::TempDir;

    struct Fixture {
        temp: TempDir,
        settings: Settings,
        paths: Paths,
        log: ActionLog,
    }

    fn fixture() -> Fixture {
        let temp = TempDir::new().unwrap();
        let settings = Settings::default();
        let paths = Paths::resolve(temp.path(), &settings);
        let log = ActionLog::new(temp.path().join(".tmuxup-state"));
        Fixture {
            temp,
            settings,
            paths,
            log,
        }
    }

    fn tokens(f: &Fixture) -> Vec<String> {
        f.log
            .load()
            .unwrap()
            .iter()
            .map(|r: &Record| r.token().to_string())
            .collect()
    }

    fn script(f: &Fixture) -> ScriptInvocation {
        ScriptInvocation {
            exe: PathBuf::from("/usr/bin/tmuxup"),
            state_file: f.log.path().to_path_buf(),
            home: None,
            config: None,
        }
    }

    #[test]
    fn no_package_manager_has_no_side_effects() {
        let f = fixture();
        let mut host = MockHost::with_programs(&["git", "tic"]);
        let mut ui = MockUI::new();

        let err = Installer::new(&f.settings, &f.paths, &f.log)
            .run(&mut host, &mut ui, Some(&script(&f)))
            .unwrap_err();

        assert!(matches!(err, TmuxupError::NoPackageManager { .. }));
        assert!(host.commands().is_empty());
        assert_eq!(std::fs::read_dir(f.temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn fresh_machine_logs_every_step_in_order() {
        let f = fixture();
        let mut host = MockHost::with_programs(&["apt-get", "git", "tic"]);
        host.fail("dpkg -s");
        host.fail("infocmp");
        let mut ui = MockUI::new();

        let report = Installer::new(&f.settings, &f.paths, &f.log)
            .run(&mut host, &mut ui, Some(&script(&f)))
            .unwrap();

        assert_eq!(report.manager, PackageManager::Apt);
        assert_eq!(report.installed_packages, vec!["tmux", "git", "xclip"]);
        assert_eq!(report.terminfo, TerminfoOutcome::Created);
        assert!(report.plugins.cloned);
        assert_eq!(
            tokens(&f),
            vec![
                "tmux",
                "git",
                "xclip",
                Action::TERMINFO_CREATED,
                Action::CONFIG_WRITTEN,
                Action::PLUGIN_MANAGER_CLONED,
                Action::PLUGINS_INSTALLED,
            ]
        );
        assert!(f.paths.config_file.is_file());
        assert_eq!(
            report.uninstall_script,
            Some(f.temp.path().join("uninstall.sh"))
        );
    }

    #[test]
    fn preinstalled_packages_are_never_logged() {
        let f = fixture();
        let mut host = MockHost::with_programs(&["dnf", "git"]);
        host.fail("rpm -q xclip");
        let mut ui = MockUI::new();

        Installer::new(&f.settings, &f.paths, &f.log)
            .run(&mut host, &mut ui, None)
            .unwrap();

        let tokens = tokens(&f);
        assert!(tokens.contains(&"xclip".to_string()));
        assert!(!tokens.contains(&"tmux".to_string()));
        assert!(!tokens.contains(&"git".to_string()));
    }

    #[test]
    fn second_run_only_adds_config_and_plugin_records() {
        let f = fixture();
        let mut host = MockHost::with_programs(&["apt-get", "git"]);
        host.fail("dpkg -s tmux");
        let mut ui = MockUI::new();
        let installer = Installer::new(&f.settings, &f.paths, &f.log);

        installer.run(&mut host, &mut ui, None).unwrap();
        host.succeed("dpkg -s tmux");
        installer.run(&mut host, &mut ui, None).unwrap();

        let tokens = tokens(&f);
        assert_eq!(tokens.iter().filter(|t| *t == "tmux").count(), 1);
        assert_eq!(
            tokens.iter().filter(|t| *t == Action::CONFIG_WRITTEN).count(),
            2
        );
        assert_eq!(
            tokens
                .iter()
                .filter(|t| *t == Action::PLUGIN_MANAGER_CLONED)
                .count(),
            1
        );
    }

    #[test]
    fn missing_git_aborts_after_config() {
        let f = fixture();
        let mut host = MockHost::with_programs(&["brew"]);
        let mut ui = MockUI::new();

        let err = Installer::new(&f.settings, &f.paths, &f.log)
            .run(&mut host, &mut ui, Some(&script(&f)))
            .unwrap_err();

        assert!(matches!(err, TmuxupError::RequirementMissing { .. }));
        assert_eq!(tokens(&f), vec![Action::CONFIG_WRITTEN]);
        assert!(!f.temp.path().join("uninstall.sh").exists());
    }
}
