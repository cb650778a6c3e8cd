//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! output for later assertion. It always renders with the plain theme.
//!
//! # Example
//!
//! ```
//! use blueprint::ui::{MockUI, OutputMode, UserInterface};
//!
//! let mut ui = MockUI::with_mode(OutputMode::Quiet);
//! ui.message("table");
//! ui.warning("dropped in quiet mode");
//!
//! assert_eq!(ui.messages(), ["table".to_string()]);
//! assert!(ui.warnings().is_empty());
//! ```

use super::{OutputMode, UserInterface};

/// Mock UI implementation for testing.
///
/// Hints and warnings are filtered by the output mode just like the
/// terminal UI does, so tests can assert on what a user would see.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    messages: Vec<String>,
    hints: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured hints.
    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    /// Get all captured warning messages.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// All messages joined with newlines, as they would be printed.
    pub fn output(&self) -> String {
        self.messages.join("\n")
    }

    /// Check if a specific message was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific hint was shown.
    pub fn has_hint(&self, msg: &str) -> bool {
        self.hints.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific warning was shown.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific error was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn hint(&mut self, msg: &str) {
        if self.mode.shows_hints() {
            self.hints.push(msg.to_string());
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_warnings() {
            self.warnings.push(msg.to_string());
        }
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn use_colors(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_ui_captures_messages() {
        let mut ui = MockUI::new();
        ui.message("Hello");
        ui.message("World");

        assert_eq!(ui.messages().len(), 2);
        assert!(ui.has_message("Hello"));
        assert!(ui.has_message("World"));
        assert_eq!(ui.output(), "Hello\nWorld");
    }

    #[test]
    fn mock_ui_captures_errors_in_every_mode() {
        let mut ui = MockUI::with_mode(OutputMode::Quiet);
        ui.error("boom");
        assert!(ui.has_error("boom"));
    }

    #[test]
    fn mock_ui_filters_by_mode() {
        let mut normal = MockUI::new();
        normal.hint("reading spin.toml");
        normal.warning("careful");
        assert!(normal.hints().is_empty());
        assert!(normal.has_warning("careful"));

        let mut verbose = MockUI::with_mode(OutputMode::Verbose);
        verbose.hint("reading spin.toml");
        assert!(verbose.has_hint("spin.toml"));

        let mut quiet = MockUI::with_mode(OutputMode::Quiet);
        quiet.warning("careful");
        assert!(quiet.warnings().is_empty());
    }

    #[test]
    fn mock_ui_set_mode() {
        let mut ui = MockUI::new();
        assert_eq!(ui.output_mode(), OutputMode::Normal);
        ui.set_output_mode(OutputMode::Quiet);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }

    #[test]
    fn mock_ui_uses_plain_theme() {
        let ui = MockUI::new();
        assert_eq!(ui.theme().format_warning("x"), "⚠ x");
    }
}
