//! Diagnostics for absorbed failures.
//!
//! Accessors never return errors. Each failure they absorb is handed to a
//! [`DiagnosticSink`], which by default forwards it to `tracing`.

#[cfg(any(test, feature = "mock"))]
use std::sync::Mutex;

use tracing::error;

/// A failure absorbed by an accessor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Operation that failed (e.g., `"folder_by_slug"`).
    pub operation: &'static str,
    /// Human-readable cause.
    pub message: String,
}

impl Diagnostic {
    /// Create a diagnostic for an operation.
    #[must_use]
    pub fn new(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}

/// Receiver for diagnostics.
///
/// Recording is fire-and-forget: it cannot fail and has no effect on the
/// value the accessor returns.
pub trait DiagnosticSink: Send + Sync {
    /// Record one diagnostic.
    fn record(&self, diagnostic: &Diagnostic);
}

/// Sink that logs diagnostics at `error` level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, diagnostic: &Diagnostic) {
        error!(
            operation = diagnostic.operation,
            "Error in {}: {}", diagnostic.operation, diagnostic.message
        );
    }
}

/// Sink that keeps diagnostics in memory for assertions.
#[cfg(any(test, feature = "mock"))]
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<Diagnostic>>,
}

#[cfg(any(test, feature = "mock"))]
impl RecordingSink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded diagnostics.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn events(&self) -> Vec<Diagnostic> {
        self.events.lock().unwrap().clone()
    }

    /// Operations that recorded a diagnostic, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn operations(&self) -> Vec<&'static str> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|d| d.operation)
            .collect()
    }
}

#[cfg(any(test, feature = "mock"))]
impl DiagnosticSink for RecordingSink {
    fn record(&self, diagnostic: &Diagnostic) {
        if let Ok(mut events) = self.events.lock() {
            events.push(diagnostic.clone());
        }
    }
}
