//! Built-in file templates embedded at compile time.
//!
//! Templates use `${name}` placeholders. Unknown placeholders are left as
//! written so tmux format strings (`#{pane_current_path}`) pass through.

use include_dir::{include_dir, Dir};

use crate::config::paths::Paths;
use crate::config::schema::Settings;
use crate::error::{Result, TmuxupError};

/// Embedded templates directory.
static TEMPLATES_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/templates");

const TMUX_CONF: &str = "tmux.conf";
const TERMINFO_SOURCE: &str = "tmux-256color.terminfo";

fn load_template(name: &str) -> Result<&'static str> {
    let file = TEMPLATES_DIR
        .get_file(name)
        .ok_or_else(|| TmuxupError::ConfigNotFound {
            path: format!("templates/{}", name).into(),
        })?;

    file.contents_utf8()
        .ok_or_else(|| TmuxupError::ConfigParseError {
            path: format!("templates/{}", name).into(),
            message: "Invalid UTF-8".to_string(),
        })
}

/// Replace each `${key}` with its value.
pub fn interpolate(template: &str, vars: &[(&str, &str)]) -> String {
    vars.iter().fold(template.to_string(), |acc, (key, value)| {
        acc.replace(&format!("${{{}}}", key), value)
    })
}

/// Render the tmux configuration file.
pub fn render_tmux_conf(settings: &Settings, paths: &Paths) -> Result<String> {
    let template = load_template(TMUX_CONF)?;

    let plugin_lines = settings
        .plugins
        .iter()
        .filter(|p| p.as_str() != settings.plugin_manager_repo)
        .map(|p| format!("set -g @plugin '{}'", p))
        .collect::<Vec<_>>()
        .join("\n");

    let config_file = paths.config_file.to_string_lossy().into_owned();
    let plugins_dir = paths.plugins_dir.to_string_lossy().into_owned();
    let entry = paths.plugin_manager_entry().to_string_lossy().into_owned();

    Ok(interpolate(
        template,
        &[
            ("terminfo_entry", settings.terminfo_entry.as_str()),
            ("config_file", config_file.as_str()),
            ("plugins_dir", plugins_dir.trim_end_matches('/')),
            ("plugin_manager", settings.plugin_manager_repo.as_str()),
            ("plugin_lines", plugin_lines.as_str()),
            ("plugin_manager_entry", entry.as_str()),
        ],
    ))
}

/// Render the terminfo source for `entry`.
pub fn render_terminfo_source(entry: &str) -> Result<String> {
    let template = load_template(TERMINFO_SOURCE)?;
    Ok(interpolate(template, &[("terminfo_entry", entry)]))
}
