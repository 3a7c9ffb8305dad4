//! Structured diagnostics for placement audits.
//!
//! Legality checks never fail loudly on their own; when a whole placement is
//! audited, each illegal tile becomes a [`Diagnostic`] naming the site and the
//! cells involved. Diagnostics accumulate in a thread-safe [`DiagnosticSink`]
//! and are formatted by a [`DiagnosticRenderer`].

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod label;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use label::{Label, LabelStyle};
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
