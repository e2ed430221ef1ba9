//! Mock host implementation for testing.
//!
//! `MockHost` implements the [`Host`] trait without spawning anything. It
//! records every command line it is asked to run and answers with scripted
//! results, so the install and uninstall passes can be asserted end to end.
//!
//! # Example
//!
//! ```
//! use tmuxup::shell::{CommandOptions, Host, MockHost};
//!
//! let mut host = MockHost::with_programs(&["apt-get", "git"]);
//! host.fail("dpkg -s xclip");
//!
//! assert!(host.command_exists("git"));
//! assert!(!host.succeeds("dpkg", &["-s".into(), "xclip".into()]));
//! assert!(host.ran("dpkg -s xclip"));
//! ```

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use crate::error::Result;

use super::command::{display_command, CommandOptions, CommandResult};
use super::host::Host;

/// Mock host for testing.
///
/// Commands succeed unless a registered failure matches them. A rule matches
/// a command line when it is equal to it or is a word-aligned prefix of it;
/// rules registered later take precedence.
///
/// With clone simulation on (the default), `git clone ... <dest>` creates
/// `<dest>` with an executable `bin/install_plugins`, the layout of a fresh
/// plugin manager checkout. Running an `install_plugins` entry creates the
/// directories registered with [`simulate_plugins`](Self::simulate_plugins)
/// under `TMUX_PLUGIN_MANAGER_PATH`, even when the run is scripted to fail.
#[derive(Debug)]
pub struct MockHost {
    programs: HashSet<String>,
    elevated: bool,
    rules: Vec<(String, bool)>,
    history: Vec<String>,
    envs: Vec<Vec<(String, String)>>,
    simulate_clones: bool,
    plugins: Vec<String>,
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHost {
    /// Create a mock with no programs on PATH.
    pub fn new() -> Self {
        Self {
            programs: HashSet::new(),
            elevated: false,
            rules: Vec::new(),
            history: Vec::new(),
            envs: Vec::new(),
            simulate_clones: true,
            plugins: Vec::new(),
        }
    }

    /// Create a mock with the given programs on PATH.
    pub fn with_programs(programs: &[&str]) -> Self {
        let mut host = Self::new();
        for program in programs {
            host.add_program(program);
        }
        host
    }

    /// Put a program on the mock PATH.
    pub fn add_program(&mut self, program: &str) {
        self.programs.insert(program.to_string());
    }

    /// Plugin directories an `install_plugins` run should create.
    pub fn simulate_plugins(&mut self, names: &[&str]) {
        self.plugins = names.iter().map(|n| n.to_string()).collect();
    }

    /// Pretend to run as root.
    pub fn set_elevated(&mut self, elevated: bool) {
        self.elevated = elevated;
    }

    /// Turn clone simulation on or off.
    pub fn set_simulate_clones(&mut self, simulate: bool) {
        self.simulate_clones = simulate;
    }

    /// Make commands matching `prefix` exit 1.
    pub fn fail(&mut self, prefix: &str) {
        self.rules.push((prefix.to_string(), false));
    }

    /// Make commands matching `prefix` exit 0, overriding earlier failures.
    pub fn succeed(&mut self, prefix: &str) {
        self.rules.push((prefix.to_string(), true));
    }

    /// All command lines run so far, in order.
    pub fn commands(&self) -> &[String] {
        &self.history
    }

    /// Environment overrides passed with each command, parallel to [`commands`](Self::commands).
    pub fn command_envs(&self) -> &[Vec<(String, String)>] {
        &self.envs
    }

    /// Check whether an exact command line was run.
    pub fn ran(&self, command: &str) -> bool {
        self.history.iter().any(|c| c == command)
    }

    /// Count how many recorded commands start with `prefix`.
    pub fn count_prefix(&self, prefix: &str) -> usize {
        self.history
            .iter()
            .filter(|c| matches_rule(c, prefix))
            .count()
    }

    /// Forget recorded commands, keeping programs and rules.
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.envs.clear();
    }

    fn outcome(&self, command: &str) -> bool {
        self.rules
            .iter()
            .rev()
            .find(|(prefix, _)| matches_rule(command, prefix))
            .map(|(_, success)| *success)
            .unwrap_or(true)
    }

    fn simulate_clone(&self, args: &[String]) -> std::io::Result<()> {
        let Some(dest) = args.last() else {
            return Ok(());
        };
        let bin = Path::new(dest).join("bin");
        std::fs::create_dir_all(&bin)?;
        let entry = bin.join("install_plugins");
        std::fs::write(&entry, "#!/bin/sh\nexit 0\n")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&entry, std::fs::Permissions::from_mode(0o755))?;
        }

        Ok(())
    }

    fn simulate_plugin_install(&self, options: &CommandOptions) -> std::io::Result<()> {
        let Some(root) = options.env.get("TMUX_PLUGIN_MANAGER_PATH") else {
            return Ok(());
        };
        for name in &self.plugins {
            let dir = Path::new(root).join(name);
            std::fs::create_dir_all(&dir)?;
            std::fs::write(dir.join(format!("{}.tmux", name)), "")?;
        }
        Ok(())
    }
}

fn matches_rule(command: &str, prefix: &str) -> bool {
    command == prefix
        || command
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with(' '))
}

impl Host for MockHost {
    fn command_exists(&self, program: &str) -> bool {
        self.programs.contains(program)
    }

    fn is_elevated(&self) -> bool {
        self.elevated
    }

    fn run(
        &mut self,
        program: &str,
        args: &[String],
        options: &CommandOptions,
    ) -> Result<CommandResult> {
        let command = display_command(program, args);
        let success = self.outcome(&command);

        let mut env: Vec<(String, String)> = options
            .env
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        env.sort();
        self.envs.push(env);
        self.history.push(command);

        if success
            && self.simulate_clones
            && program == "git"
            && args.first().is_some_and(|a| a == "clone")
        {
            self.simulate_clone(args)?;
        }
        if Path::new(program).ends_with("install_plugins") {
            self.simulate_plugin_install(options)?;
        }

        if success {
            Ok(CommandResult::success(
                String::new(),
                String::new(),
                Duration::ZERO,
            ))
        } else {
            Ok(CommandResult::failure(
                Some(1),
                String::new(),
                "mock failure".to_string(),
                Duration::ZERO,
            ))
        }
    }
}
