//! Idempotent package installation.
//!
//! Only packages that were absent are installed, and only those are logged,
//! so uninstall never removes something that was there before.

use crate::detection::{Invocation, PackageManager};
use crate::error::Result;
use crate::shell::{CommandOptions, Host};
use crate::state::Action;

use super::StepContext;

/// Install every missing package from the settings, in order.
///
/// Returns the packages this call installed. The first failing install
/// aborts the step; packages installed before it stay logged.
pub fn ensure_packages(ctx: &mut StepContext<'_>, manager: PackageManager) -> Result<Vec<String>> {
    let as_root = ctx.host.is_elevated();
    let mut installed = Vec::new();
    let mut refreshed = false;

    for package in &ctx.settings.packages {
        let query = manager.query_command(package);
        if ctx.host.succeeds(&query.program, &query.args) {
            tracing::info!("Package '{}' already installed", package);
            ctx.ui.message(&format!("○ {} already installed", package));
            continue;
        }

        if !refreshed {
            refreshed = true;
            if let Some(refresh) = manager.refresh_command(as_root) {
                ctx.ui.detail(&refresh.display());
                if let Err(e) = run_invocation(ctx.host, &refresh) {
                    tracing::warn!("Package index refresh failed: {}", e);
                    ctx.ui.warning(&format!(
                        "Could not refresh the {} package index; continuing",
                        manager
                    ));
                }
            }
        }

        let install = manager.install_command(package, as_root);
        ctx.ui.message(&format!("Installing {} with {}...", package, manager));
        ctx.ui.detail(&install.display());
        run_invocation(ctx.host, &install)?;

        ctx.log.append(&Action::PackageInstalled(package.clone()))?;
        tracing::info!("Installed package '{}'", package);
        ctx.ui.success(&format!("Installed {}", package));
        installed.push(package.clone());
    }

    Ok(installed)
}

/// Remove a package this tool installed earlier.
pub fn remove_package(host: &mut dyn Host, manager: PackageManager, package: &str) -> Result<()> {
    let remove = manager.remove_command(package, host.is_elevated());
    tracing::info!("Removing package '{}': {}", package, remove);
    run_invocation(host, &remove)
}

/// Package manager output goes straight to the terminal so prompts (sudo,
/// conflict questions) stay visible.
fn run_invocation(host: &mut dyn Host, invocation: &Invocation) -> Result<()> {
    host.run_checked(
        &invocation.program,
        &invocation.args,
        &CommandOptions::default(),
    )?;
    Ok(())
}
