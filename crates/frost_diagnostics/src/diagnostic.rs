//! The [`Diagnostic`] record emitted for each audit finding.

use crate::code::DiagnosticCode;
use crate::label::Label;
use crate::severity::Severity;
use serde::{Deserialize, Serialize};

/// One audit finding about a tile or site.
///
/// `subject` names where the problem is (a tile such as `X2/Y3` or a site
/// such as `X0/Y1/io0`); labels point at the individual cells involved.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    /// How serious the finding is.
    pub severity: Severity,
    /// Stable code, e.g. `E301`.
    pub code: DiagnosticCode,
    /// One-line summary.
    pub message: String,
    /// Tile or site the finding concerns.
    pub subject: String,
    /// Cells and sites taking part in the problem.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<Label>,
    /// Explanatory footnotes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
    /// Suggested fixes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub help: Vec<String>,
}

impl Diagnostic {
    /// Builds a diagnostic with no labels, notes or help.
    pub fn new(
        severity: Severity,
        code: DiagnosticCode,
        message: impl Into<String>,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            subject: subject.into(),
            labels: Vec::new(),
            notes: Vec::new(),
            help: Vec::new(),
        }
    }

    /// Shorthand for [`new`](Self::new) with [`Severity::Error`].
    pub fn error(code: DiagnosticCode, message: impl Into<String>, subject: impl Into<String>) -> Self {
        Self::new(Severity::Error, code, message, subject)
    }

    /// Shorthand for [`new`](Self::new) with [`Severity::Warning`].
    pub fn warning(code: DiagnosticCode, message: impl Into<String>, subject: impl Into<String>) -> Self {
        Self::new(Severity::Warning, code, message, subject)
    }

    /// Shorthand for [`new`](Self::new) with [`Severity::Note`].
    pub fn note(code: DiagnosticCode, message: impl Into<String>, subject: impl Into<String>) -> Self {
        Self::new(Severity::Note, code, message, subject)
    }

    /// Appends a label.
    pub fn with_label(mut self, label: Label) -> Self {
        self.labels.push(label);
        self
    }

    /// Appends a footnote.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Appends a suggested fix.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::Category;

    const ILLEGAL_TILE: DiagnosticCode = DiagnosticCode::new(Category::Legality, 301);

    #[test]
    fn shorthands_set_severity() {
        let code = DiagnosticCode::new(Category::Advisory, 310);
        assert_eq!(Diagnostic::error(code, "m", "s").severity, Severity::Error);
        assert_eq!(Diagnostic::warning(code, "m", "s").severity, Severity::Warning);
        assert_eq!(Diagnostic::note(code, "m", "s").severity, Severity::Note);
    }

    #[test]
    fn builder_collects_context() {
        let diag = Diagnostic::error(ILLEGAL_TILE, "clock enable mismatch", "X2/Y3")
            .with_label(Label::primary("cell 'a'", "CEN is 'en0'"))
            .with_label(Label::secondary("cell 'b'", "CEN is 'en1'"))
            .with_note("all flip-flops in a tile share one CEN/CLK/SR bus")
            .with_help("move one of the cells to another tile");
        assert_eq!(diag.subject, "X2/Y3");
        assert_eq!(diag.labels[1].subject, "cell 'b'");
        assert_eq!(diag.notes, ["all flip-flops in a tile share one CEN/CLK/SR bus"]);
        assert_eq!(diag.help, ["move one of the cells to another tile"]);
    }

    #[test]
    fn empty_context_is_omitted_from_json() {
        let json = serde_json::to_value(Diagnostic::error(ILLEGAL_TILE, "illegal", "X1/Y1")).unwrap();
        assert_eq!(json["severity"], "error");
        assert!(json.get("labels").is_none());
        assert!(json.get("help").is_none());
    }
}
