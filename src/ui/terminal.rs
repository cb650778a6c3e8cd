//! Terminal UI.

use console::Term;
use std::io::Write;

use super::{should_use_colors, BlueprintTheme, OutputMode, UserInterface};

/// Terminal UI implementation.
///
/// Messages go to stdout; hints, warnings and errors go to stderr so that
/// `--json` output stays machine readable.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: BlueprintTheme,
    colors: bool,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode) -> Self {
        let colors = should_use_colors();
        let theme = if colors {
            BlueprintTheme::new()
        } else {
            BlueprintTheme::plain()
        };

        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme,
            colors,
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn message(&mut self, msg: &str) {
        writeln!(self.out, "{}", msg).ok();
    }

    fn hint(&mut self, msg: &str) {
        if self.mode.shows_hints() {
            writeln!(self.err, "{}", self.theme.dim.apply_to(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_warnings() {
            writeln!(self.err, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }

    fn use_colors(&self) -> bool {
        self.colors
    }
}
