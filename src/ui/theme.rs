//! Visual theme and styling.

use console::Style;

/// Blueprint's visual theme.
#[derive(Debug, Clone)]
pub struct BlueprintTheme {
    /// Style for warning messages (orange).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for table titles (magenta bold).
    pub header: Style,
    /// Style for key labels in annotations (bold).
    pub key: Style,
    /// Style for marker values such as `ERR: ...` cells (red).
    pub sentinel: Style,
}

impl Default for BlueprintTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl BlueprintTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            header: Style::new().bold().magenta(),
            key: Style::new().bold(),
            sentinel: Style::new().red(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            warning: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            header: Style::new(),
            key: Style::new(),
            sentinel: Style::new(),
        }
    }

    /// Format a warning message (icon + text in orange).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format an annotation line: `* Key: value`.
    pub fn format_annotation(&self, key: &str, value: &str) -> String {
        format!("* {} {}", self.key.apply_to(format!("{}:", key)), value)
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    // Check if stdout is a TTY
    console::Term::stdout().is_term()
}
