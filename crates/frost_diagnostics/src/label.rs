//! Labels attaching extra context to a diagnostic.

use serde::{Deserialize, Serialize};

/// Whether a label marks the main subject or just related context.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum LabelStyle {
    /// The site or cell the diagnostic is about.
    Primary,
    /// A co-resident cell or site that takes part in the conflict.
    Secondary,
}

/// A named placement object (site, tile, or cell) with an explanatory message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// Display name of the object, e.g. `X3/Y4/lc2` or `cell 'counter_q[0]'`.
    pub subject: String,
    /// The message displayed next to the subject.
    pub message: String,
    /// Whether this is a primary or secondary label.
    pub style: LabelStyle,
}

impl Label {
    /// Creates a primary label.
    pub fn primary(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            message: message.into(),
            style: LabelStyle::Primary,
        }
    }

    /// Creates a secondary label.
    pub fn secondary(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            message: message.into(),
            style: LabelStyle::Secondary,
        }
    }
}
