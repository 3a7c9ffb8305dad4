//! Thread-safe diagnostic accumulator.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Collects diagnostics from parallel tile audits.
///
/// Per-severity tallies are kept outside the lock, so counting never
/// contends with workers that are still emitting.
#[derive(Default)]
pub struct DiagnosticSink {
    pending: Mutex<Vec<Diagnostic>>,
    tallies: [AtomicUsize; Severity::COUNT],
}

impl DiagnosticSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    fn pending(&self) -> MutexGuard<'_, Vec<Diagnostic>> {
        // A worker that panicked mid-push leaves the vector intact.
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Records a diagnostic.
    pub fn emit(&self, diag: Diagnostic) {
        self.tallies[diag.severity.rank()].fetch_add(1, Ordering::Relaxed);
        self.pending().push(diag);
    }

    /// Number of diagnostics of `severity` emitted over the sink's lifetime.
    ///
    /// Draining with [`take_all`](Self::take_all) does not reset the tally.
    pub fn count(&self, severity: Severity) -> usize {
        self.tallies[severity.rank()].load(Ordering::Relaxed)
    }

    /// Whether any error has been emitted.
    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }

    /// Drains the collected diagnostics.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.pending())
    }

    /// Copies the collected diagnostics, leaving them in place.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.pending().clone()
    }
}
