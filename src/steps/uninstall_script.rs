//! The `uninstall.sh` convenience script written after an install.
//!
//! The script carries no logic of its own; it re-invokes this binary with
//! the same state file, so reversal always goes through the action log.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// How the generated script calls back into tmuxup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptInvocation {
    pub exe: PathBuf,
    pub state_file: PathBuf,
    pub home: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

impl ScriptInvocation {
    /// Render the script body.
    pub fn render(&self) -> String {
        let mut line = format!("exec {}", quote(&self.exe));
        if let Some(config) = &self.config {
            line.push_str(&format!(" --config {}", quote(config)));
        }
        if let Some(home) = &self.home {
            line.push_str(&format!(" --home {}", quote(home)));
        }
        line.push_str(&format!(
            " --state-file {} uninstall \"$@\"",
            quote(&self.state_file)
        ));

        format!(
            "#!/bin/sh\n# Generated by tmuxup. Reverts everything recorded in the state file.\n{}\n",
            line
        )
    }
}

/// Write the script to `path` and make it executable.
pub fn write_uninstall_script(path: &Path, invocation: &ScriptInvocation) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, invocation.render())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    }

    tracing::debug!("Wrote uninstall script {}", path.display());
    Ok(())
}

/// Delete the script if present. Returns whether it existed.
pub fn remove_uninstall_script(path: &Path) -> Result<bool> {
    if !path.is_file() {
        return Ok(false);
    }
    fs::remove_file(path)?;
    Ok(true)
}

/// Single-quote a path for POSIX sh.
fn quote(path: &Path) -> String {
    format!("'{}'", path.to_string_lossy().replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn invocation() -> ScriptInvocation {
        ScriptInvocation {
            exe: PathBuf::from("/usr/local/bin/tmuxup"),
            state_file: PathBuf::from("/home/me/.tmuxup-state"),
            home: None,
            config: None,
        }
    }

    #[test]
    fn renders_minimal_invocation() {
        let script = invocation().render();

        assert!(script.starts_with("#!/bin/sh\n"));
        assert!(script.contains(
            "exec '/usr/local/bin/tmuxup' --state-file '/home/me/.tmuxup-state' uninstall \"$@\"\n"
        ));
    }

    #[test]
    fn carries_home_and_config_overrides() {
        let script = ScriptInvocation {
            home: Some(PathBuf::from("/tmp/home")),
            config: Some(PathBuf::from("/etc/tmuxup.yml")),
            ..invocation()
        }
        .render();

        assert!(script.contains("--config '/etc/tmuxup.yml' --home '/tmp/home' --state-file"));
    }

    #[test]
    fn quotes_single_quotes() {
        assert_eq!(quote(Path::new("/it's")), r"'/it'\''s'");
    }

    #[cfg(unix)]
    #[test]
    fn written_script_is_executable() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let path = temp.path().join("uninstall.sh");

        write_uninstall_script(&path, &invocation()).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn remove_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("uninstall.sh");
        write_uninstall_script(&path, &invocation()).unwrap();

        assert!(remove_uninstall_script(&path).unwrap());
        assert!(!remove_uninstall_script(&path).unwrap());
    }
}
