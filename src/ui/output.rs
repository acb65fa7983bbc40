//! Output verbosity.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Everything, including the templating engine's own output.
    Verbose,
    /// Progress, headers, and which defaults were applied.
    #[default]
    Normal,
    /// Results and errors only.
    Quiet,
}

impl OutputMode {
    /// Whether captured templating engine output is echoed.
    pub fn shows_command_output(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Whether progress spinners are drawn.
    pub fn shows_spinners(&self) -> bool {
        !matches!(self, Self::Quiet)
    }

    /// Whether headers and applied-default annotations are shown.
    pub fn shows_detail(&self) -> bool {
        !matches!(self, Self::Quiet)
    }
}
