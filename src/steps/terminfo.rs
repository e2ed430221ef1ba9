//! Make sure the terminal description tmux expects is available.

use std::fs;
use std::io::Write;

use crate::config::{render_terminfo_source, Paths};
use crate::error::Result;
use crate::shell::CommandOptions;
use crate::state::Action;

use super::{remove_dir_if_empty, StepContext};

/// What the terminfo step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminfoOutcome {
    /// The entry already resolved.
    AlreadyPresent,
    /// The entry was compiled into the user terminfo directory.
    Created,
    /// `tic` is not on PATH.
    CompilerMissing,
    /// `tic` ran and failed.
    CompileFailed,
}

/// Compile the configured terminfo entry if it does not resolve.
///
/// Only a successful compile is logged. A missing or failing compiler is a
/// warning: tmux still runs with a fallback terminal type.
pub fn ensure_terminfo(ctx: &mut StepContext<'_>) -> Result<TerminfoOutcome> {
    let entry = ctx.settings.terminfo_entry.as_str();
    let terminfo_dir = ctx.paths.terminfo_dir.to_string_lossy().into_owned();

    // ncurses looks in $TERMINFO first, then the system database.
    let query = ctx.host.run(
        "infocmp",
        &[entry.to_string()],
        &CommandOptions::captured().with_env("TERMINFO", &terminfo_dir),
    );
    if query.map(|r| r.success).unwrap_or(false) {
        tracing::info!("Terminfo entry '{}' already present", entry);
        ctx.ui.message(&format!("○ Terminfo entry {} already present", entry));
        return Ok(TerminfoOutcome::AlreadyPresent);
    }

    if !ctx.host.command_exists("tic") {
        tracing::warn!("tic not found; cannot compile '{}'", entry);
        ctx.ui.warning(&format!(
            "Terminfo entry {} is missing and tic is not installed; skipping",
            entry
        ));
        return Ok(TerminfoOutcome::CompilerMissing);
    }

    fs::create_dir_all(&ctx.paths.terminfo_dir)?;

    let mut source = tempfile::Builder::new()
        .prefix("tmuxup-")
        .suffix(".terminfo")
        .tempfile()?;
    source.write_all(render_terminfo_source(entry)?.as_bytes())?;
    source.flush()?;

    let args = vec![
        "-x".to_string(),
        "-o".to_string(),
        terminfo_dir,
        source.path().to_string_lossy().into_owned(),
    ];
    ctx.ui.detail(&crate::shell::display_command("tic", &args));

    let mut spinner = ctx.ui.start_spinner(&format!("Compiling terminfo entry {}", entry));
    let compiled = ctx
        .host
        .run("tic", &args, &CommandOptions::captured())
        .map(|r| r.success)
        .unwrap_or(false);

    if !compiled {
        spinner.finish_error(&format!("Could not compile terminfo entry {}", entry));
        tracing::warn!("tic failed for '{}'", entry);
        return Ok(TerminfoOutcome::CompileFailed);
    }

    ctx.log.append(&Action::TerminfoCreated)?;
    spinner.finish_success(&format!("Compiled terminfo entry {}", entry));
    Ok(TerminfoOutcome::Created)
}

/// Remove the compiled entry from the user terminfo directory.
///
/// Best effort: returns how many files were deleted, and tidies up the
/// directories if that left them empty.
pub fn remove_terminfo(paths: &Paths, entry: &str) -> usize {
    let mut removed = 0;
    for file in paths.terminfo_files(entry) {
        if !file.is_file() {
            continue;
        }
        match fs::remove_file(&file) {
            Ok(()) => {
                tracing::debug!("Removed {}", file.display());
                removed += 1;
            }
            Err(e) => tracing::warn!("Could not remove {}: {}", file.display(), e),
        }
        if let Some(bucket) = file.parent() {
            remove_dir_if_empty(bucket);
        }
    }
    remove_dir_if_empty(&paths.terminfo_dir);
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::shell::MockHost;
    use crate::state::ActionLog;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    struct Fixture {
        _temp: TempDir,
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
            _temp: temp,
            settings,
            paths,
            log,
        }
    }

    fn run(f: &Fixture, host: &mut MockHost, ui: &mut MockUI) -> TerminfoOutcome {
        let mut ctx = StepContext {
            host,
            ui,
            settings: &f.settings,
            paths: &f.paths,
            log: &f.log,
        };
        ensure_terminfo(&mut ctx).unwrap()
    }

    #[test]
    fn present_entry_is_left_alone() {
        let f = fixture();
        let mut host = MockHost::with_programs(&["tic"]);
        let mut ui = MockUI::new();

        assert_eq!(run(&f, &mut host, &mut ui), TerminfoOutcome::AlreadyPresent);
        assert_eq!(host.count_prefix("tic"), 0);
        assert!(!f.log.exists());
    }

    #[test]
    fn query_sees_user_terminfo_dir() {
        let f = fixture();
        let mut host = MockHost::new();
        let mut ui = MockUI::new();

        run(&f, &mut host, &mut ui);

        let terminfo = f.paths.terminfo_dir.to_string_lossy().into_owned();
        assert!(host.command_envs()[0].contains(&("TERMINFO".to_string(), terminfo)));
    }

    #[test]
    fn missing_entry_is_compiled_and_logged() {
        let f = fixture();
        let mut host = MockHost::with_programs(&["tic"]);
        host.fail("infocmp tmux-256color");
        let mut ui = MockUI::new();

        assert_eq!(run(&f, &mut host, &mut ui), TerminfoOutcome::Created);

        let terminfo = f.paths.terminfo_dir.to_string_lossy().into_owned();
        assert_eq!(host.count_prefix(&format!("tic -x -o {}", terminfo)), 1);
        assert!(f.paths.terminfo_dir.is_dir());
        assert_eq!(f.log.load().unwrap()[0].token(), Action::TERMINFO_CREATED);
        assert!(ui.has_success("Compiled terminfo entry"));
    }

    #[test]
    fn missing_compiler_only_warns() {
        let f = fixture();
        let mut host = MockHost::new();
        host.fail("infocmp");
        let mut ui = MockUI::new();

        assert_eq!(run(&f, &mut host, &mut ui), TerminfoOutcome::CompilerMissing);
        assert!(ui.has_warning("tic is not installed"));
        assert!(!f.log.exists());
    }

    #[test]
    fn compile_failure_is_not_logged() {
        let f = fixture();
        let mut host = MockHost::with_programs(&["tic"]);
        host.fail("infocmp");
        host.fail("tic");
        let mut ui = MockUI::new();

        assert_eq!(run(&f, &mut host, &mut ui), TerminfoOutcome::CompileFailed);
        assert!(ui.has_error("Could not compile"));
        assert!(!f.log.exists());
    }

    #[test]
    fn remove_deletes_compiled_files_and_empty_dirs() {
        let f = fixture();
        let files = f.paths.terminfo_files("tmux-256color");
        fs::create_dir_all(files[0].parent().unwrap()).unwrap();
        fs::write(&files[0], "compiled").unwrap();

        assert_eq!(remove_terminfo(&f.paths, "tmux-256color"), 1);
        assert!(!files[0].exists());
        assert!(!f.paths.terminfo_dir.exists());
    }

    #[test]
    fn remove_keeps_other_entries() {
        let f = fixture();
        let other = f.paths.terminfo_dir.join("t").join("tmux");
        fs::create_dir_all(other.parent().unwrap()).unwrap();
        fs::write(&other, "compiled").unwrap();

        assert_eq!(remove_terminfo(&f.paths, "tmux-256color"), 0);
        assert!(other.exists());
    }
}
