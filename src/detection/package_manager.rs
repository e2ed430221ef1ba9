//! Package manager detection.
//!
//! Detection is a fixed priority list checked against PATH; the first
//! manager whose executable resolves wins. No version probing is done.

use std::fmt;

use serde::Serialize;

use crate::shell::Host;

/// Supported system package managers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Apt,
    Dnf,
    Yum,
    Pacman,
    Zypper,
    Apk,
    Homebrew,
}

/// A program plus arguments, ready to hand to a [`Host`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    fn with_arg(mut self, arg: &str) -> Self {
        self.args.push(arg.to_string());
        self
    }

    /// Prefix with `sudo` when `elevate` is set.
    fn elevated(self, elevate: bool) -> Self {
        if !elevate {
            return self;
        }
        let mut args = Vec::with_capacity(self.args.len() + 1);
        args.push(self.program);
        args.extend(self.args);
        Self {
            program: "sudo".to_string(),
            args,
        }
    }

    /// Render as a single command line.
    pub fn display(&self) -> String {
        crate::shell::display_command(&self.program, &self.args)
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl PackageManager {
    /// Detection order. Earlier entries win when several are installed.
    pub const PRIORITY: [PackageManager; 7] = [
        PackageManager::Apt,
        PackageManager::Dnf,
        PackageManager::Yum,
        PackageManager::Pacman,
        PackageManager::Zypper,
        PackageManager::Apk,
        PackageManager::Homebrew,
    ];

    /// Detect the first available package manager on the host.
    pub fn detect(host: &dyn Host) -> Option<Self> {
        let found = Self::PRIORITY
            .into_iter()
            .find(|pm| host.command_exists(pm.executable()));

        match found {
            Some(pm) => tracing::debug!("Detected package manager: {}", pm),
            None => tracing::debug!("No supported package manager on PATH"),
        }

        found
    }

    /// Comma-separated list of the executables detection looks for.
    pub fn searched() -> String {
        Self::PRIORITY
            .iter()
            .map(|pm| pm.executable())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Executable whose presence identifies this manager.
    pub fn executable(&self) -> &'static str {
        match self {
            PackageManager::Apt => "apt-get",
            PackageManager::Dnf => "dnf",
            PackageManager::Yum => "yum",
            PackageManager::Pacman => "pacman",
            PackageManager::Zypper => "zypper",
            PackageManager::Apk => "apk",
            PackageManager::Homebrew => "brew",
        }
    }

    /// Whether install/remove need root.
    pub fn needs_root(&self) -> bool {
        !matches!(self, PackageManager::Homebrew)
    }

    /// Command that exits 0 iff `package` is installed. Never elevated.
    pub fn query_command(&self, package: &str) -> Invocation {
        let base = match self {
            PackageManager::Apt => Invocation::new("dpkg", &["-s"]),
            PackageManager::Dnf | PackageManager::Yum | PackageManager::Zypper => {
                Invocation::new("rpm", &["-q"])
            }
            PackageManager::Pacman => Invocation::new("pacman", &["-Q"]),
            PackageManager::Apk => Invocation::new("apk", &["info", "-e"]),
            PackageManager::Homebrew => Invocation::new("brew", &["list", "--formula"]),
        };
        base.with_arg(package)
    }

    /// Command that installs `package` non-interactively.
    pub fn install_command(&self, package: &str, as_root: bool) -> Invocation {
        let base = match self {
            PackageManager::Apt => Invocation::new("apt-get", &["install", "-y"]),
            PackageManager::Dnf => Invocation::new("dnf", &["install", "-y"]),
            PackageManager::Yum => Invocation::new("yum", &["install", "-y"]),
            PackageManager::Pacman => {
                Invocation::new("pacman", &["-S", "--noconfirm", "--needed"])
            }
            PackageManager::Zypper => Invocation::new("zypper", &["--non-interactive", "install"]),
            PackageManager::Apk => Invocation::new("apk", &["add"]),
            PackageManager::Homebrew => Invocation::new("brew", &["install"]),
        };
        base.with_arg(package).elevated(self.elevate(as_root))
    }

    /// Command that removes `package` non-interactively.
    pub fn remove_command(&self, package: &str, as_root: bool) -> Invocation {
        let base = match self {
            PackageManager::Apt => Invocation::new("apt-get", &["remove", "-y"]),
            PackageManager::Dnf => Invocation::new("dnf", &["remove", "-y"]),
            PackageManager::Yum => Invocation::new("yum", &["remove", "-y"]),
            PackageManager::Pacman => Invocation::new("pacman", &["-R", "--noconfirm"]),
            PackageManager::Zypper => Invocation::new("zypper", &["--non-interactive", "remove"]),
            PackageManager::Apk => Invocation::new("apk", &["del"]),
            PackageManager::Homebrew => Invocation::new("brew", &["uninstall"]),
        };
        base.with_arg(package).elevated(self.elevate(as_root))
    }

    /// Index refresh to run once before installing, if the manager needs one.
    pub fn refresh_command(&self, as_root: bool) -> Option<Invocation> {
        match self {
            PackageManager::Apt => {
                Some(Invocation::new("apt-get", &["update"]).elevated(self.elevate(as_root)))
            }
            _ => None,
        }
    }

    fn elevate(&self, as_root: bool) -> bool {
        self.needs_root() && !as_root
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PackageManager::Apt => "apt",
            PackageManager::Dnf => "dnf",
            PackageManager::Yum => "yum",
            PackageManager::Pacman => "pacman",
            PackageManager::Zypper => "zypper",
            PackageManager::Apk => "apk",
            PackageManager::Homebrew => "homebrew",
        };
        f.write_str(name)
    }
}
