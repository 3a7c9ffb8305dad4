//! Diagnostic severity levels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How serious a diagnostic is, least severe first.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational context.
    Note,
    /// Something the checker could not verify.
    Warning,
    /// An illegal placement.
    Error,
}

impl Severity {
    /// Number of severity levels.
    pub const COUNT: usize = 3;

    /// Position in the least-to-most-severe order, below [`COUNT`](Self::COUNT).
    pub fn rank(self) -> usize {
        self as usize
    }

    /// Lowercase name used in rendered headers and JSON output.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Note => "note",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    /// Bold ANSI color escape for the rendered header.
    pub fn ansi_color(self) -> &'static str {
        match self {
            Severity::Note => "\x1b[1;36m",
            Severity::Warning => "\x1b[1;33m",
            Severity::Error => "\x1b[1;31m",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
