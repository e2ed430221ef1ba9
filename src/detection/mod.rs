//! Host environment detection.

pub mod package_manager;

pub use package_manager::{Invocation, PackageManager};
