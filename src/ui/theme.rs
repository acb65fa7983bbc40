//! Visual theme and styling.

use console::Style;

/// wanpc's visual theme.
#[derive(Debug, Clone)]
pub struct WanpcTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (yellow).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for headers (cyan bold).
    pub header: Style,
    /// Style for template and variable names (cyan).
    pub name: Style,
    /// Style for filesystem paths (green).
    pub path: Style,
    /// Style for key labels in key-value displays (bold).
    pub key: Style,
    /// Style for annotations on where a default came from.
    pub source: Style,
}

impl Default for WanpcTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl WanpcTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
            header: Style::new().bold().cyan(),
            name: Style::new().cyan(),
            path: Style::new().green(),
            key: Style::new().bold(),
            source: Style::new().yellow(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            header: Style::new(),
            name: Style::new(),
            path: Style::new(),
            key: Style::new(),
            source: Style::new(),
        }
    }

    /// Pick the colored or plain theme for the current terminal.
    pub fn detect() -> Self {
        if should_use_colors() {
            Self::new()
        } else {
            Self::plain()
        }
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message (icon + text in yellow).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a header banner.
    pub fn format_header(&self, title: &str) -> String {
        format!("{}", self.header.apply_to(title))
    }

    /// Format a `key = value` line, indented under a heading.
    pub fn format_pair(&self, key: &str, value: &str) -> String {
        format!("  {} = {}", self.name.apply_to(key), value)
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}
