//! Install and uninstall orchestration.

pub mod install;
pub mod uninstall;

pub use install::{InstallReport, Installer};
pub use uninstall::{UninstallOutcome, UninstallReport, Uninstaller};
