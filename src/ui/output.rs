//! Output verbosity.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show everything, including each command run.
    Verbose,
    /// Show progress and status only.
    #[default]
    Normal,
    /// Show minimal output (no spinners).
    Quiet,
}

impl OutputMode {
    /// Check if this mode shows per-command detail lines.
    pub fn shows_details(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Check if this mode shows progress spinners.
    pub fn shows_spinners(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }
}
