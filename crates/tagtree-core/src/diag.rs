//! Diagnostic side-channel for decode-time anomalies.
//!
//! The codec never aborts a whole-document conversion over one bad node; it
//! isolates the failure to the smallest subtree, degrades to a safe
//! placeholder, and reports what happened here. Callers inject a sink per
//! call, keeping the codec itself pure and independently testable:
//!
//! - [`LogSink`] forwards to the `log` facade (the behavior most callers want)
//! - [`CollectSink`] accumulates diagnostics for inspection (tests, tooling)

use serde::Serialize;

/// How bad a decode anomaly was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Data was skipped or reinterpreted, but nothing was lost that the
    /// input actually contained (key conflicts, unknown tags).
    Warning,
    /// A value could not be decoded under its declared tag and fell back to
    /// a placeholder.
    Error,
}

/// A single decode anomaly.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    pub fn warning(message: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

/// Receiver for decode diagnostics.
pub trait DiagSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to `log::warn!` / `log::error!`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagSink for LogSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Warning => log::warn!("{}", diagnostic.message),
            Severity::Error => log::error!("{}", diagnostic.message),
        }
    }
}

/// Accumulates diagnostics in memory.
#[derive(Debug, Default)]
pub struct CollectSink {
    pub diagnostics: Vec<Diagnostic>,
}

impl CollectSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DiagSink for CollectSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}
