//! Terminal output for the `show` command.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for real terminal output
//! - [`MockUI`] for capturing output in tests
//! - [`Table`] and [`BlueprintTheme`] for formatting
//!
//! # Example
//!
//! ```
//! use blueprint::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("* Name: demo");
//! ui.warning("variable 'token' is unresolved");
//!
//! assert!(ui.has_message("demo"));
//! assert!(ui.has_warning("token"));
//! ```

pub mod mock;
pub mod output;
pub mod table;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use table::Table;
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, BlueprintTheme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Change the output mode.
    fn set_output_mode(&mut self, mode: OutputMode);

    /// Display a message to the user. Always shown.
    fn message(&mut self, msg: &str);

    /// Display a secondary hint. Shown in verbose mode only.
    fn hint(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message. Always shown.
    fn error(&mut self, msg: &str);

    /// Whether styled output should be produced.
    fn use_colors(&self) -> bool;

    /// The theme matching [`use_colors`](UserInterface::use_colors).
    fn theme(&self) -> BlueprintTheme {
        if self.use_colors() {
            BlueprintTheme::new()
        } else {
            BlueprintTheme::plain()
        }
    }
}
