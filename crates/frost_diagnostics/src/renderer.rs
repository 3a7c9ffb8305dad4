//! Diagnostic rendering for terminal output.

use crate::diagnostic::Diagnostic;
use crate::label::LabelStyle;

/// Formats a diagnostic into printable text.
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic into a formatted string.
    fn render(&self, diag: &Diagnostic) -> String;
}

/// Renders diagnostics in a rustc-like terminal format:
///
/// ```text
/// error[E301]: logic tile violates shared control constraints
///   --> X3/Y4
///    |  cell 'q0': CEN is 'en_a'
///    -  cell 'q1': CEN is 'en_b'
///    = note: ...
/// ```
pub struct TerminalRenderer {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn header(&self, diag: &Diagnostic) -> String {
        let head = format!("{}[{}]", diag.severity, diag.code);
        if !self.color {
            return head;
        }
        format!("{}{head}\x1b[0m", diag.severity.ansi_color())
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic) -> String {
        let mut out = format!("{}: {}\n", self.header(diag), diag.message);
        out.push_str(&format!("  --> {}\n", diag.subject));

        for label in &diag.labels {
            let marker = match label.style {
                LabelStyle::Primary => '|',
                LabelStyle::Secondary => '-',
            };
            out.push_str(&format!("   {marker}  {}: {}\n", label.subject, label.message));
        }
        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }
        for help in &diag.help {
            out.push_str(&format!("   = help: {help}\n"));
        }
        out
    }
}
