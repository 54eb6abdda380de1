//! Failure reporting for per-day solves.
//!
//! Purpose
//! -------
//! Give the estimator a single sink for non-convergence (info severity) and
//! computation exceptions (error severity), tagged with the asset id and
//! day index. Reporting never fails and never halts a run.
//!
//! Key behaviors
//! -------------
//! - [`TracingReporter`] emits `tracing` events with `asset` and `day`
//!   fields. It installs nothing; the binary owns the subscriber.
//! - [`RecordingReporter`] keeps entries in memory for tests and callers
//!   that want the log as data.
//! - [`NullReporter`] discards everything.
//!
//! Invariants & assumptions
//! ------------------------
//! - Implementations are `Send + Sync` and take `&self`, so one reporter can
//!   be shared by every asset task on the rayon pool.
//! - Entries from different assets may interleave under parallel execution;
//!   entries of one asset arrive in day order.
use std::sync::{Mutex, PoisonError};

/// Severity of a reported event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// The solver terminated without converging.
    Info,
    /// A computation exception occurred.
    Error,
}

/// Sink for per-day solver diagnostics.
pub trait FailureReporter: Send + Sync {
    fn report(&self, severity: Severity, asset: &str, day: usize, message: &str);
}

/// Forwards reports to `tracing` at the matching level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl FailureReporter for TracingReporter {
    fn report(&self, severity: Severity, asset: &str, day: usize, message: &str) {
        match severity {
            Severity::Info => tracing::info!(asset, day, "{message}"),
            Severity::Error => tracing::error!(asset, day, "{message}"),
        }
    }
}

/// Discards every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl FailureReporter for NullReporter {
    fn report(&self, _severity: Severity, _asset: &str, _day: usize, _message: &str) {}
}

/// One recorded report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub severity: Severity,
    pub asset: String,
    pub day: usize,
    pub message: String,
}

/// Keeps reports in memory.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    entries: Mutex<Vec<ReportEntry>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the entries recorded so far.
    pub fn entries(&self) -> Vec<ReportEntry> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Entries of one asset, in report order.
    pub fn entries_for(&self, asset: &str) -> Vec<ReportEntry> {
        self.entries().into_iter().filter(|e| e.asset == asset).collect()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|e| e.severity == severity)
            .count()
    }
}

impl FailureReporter for RecordingReporter {
    fn report(&self, severity: Severity, asset: &str, day: usize, message: &str) {
        let entry =
            ReportEntry { severity, asset: asset.to_string(), day, message: message.to_string() };
        // A panic in another reporter thread must not drop later entries.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).push(entry);
    }
}
