//! Progress reporting.

use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

/// Receives progress notifications from the engines.
///
/// Purely observational: implementations never influence control flow.
pub trait ProgressSink: Send + Sync {
    /// Record that `units` more rows or operations completed.
    fn advance(&self, units: u64);
}

/// Discards progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn advance(&self, _units: u64) {}
}

/// Logs progress through `tracing` every tenth of the expected total.
#[derive(Debug)]
pub struct TracingProgress {
    label: String,
    total: u64,
    step: u64,
    done: AtomicU64,
}

impl TracingProgress {
    /// Create a progress logger for `total` expected units.
    pub fn new(label: impl Into<String>, total: u64) -> Self {
        Self {
            label: label.into(),
            total,
            step: (total / 10).max(1),
            done: AtomicU64::new(0),
        }
    }

    /// Units completed so far.
    pub fn done(&self) -> u64 {
        self.done.load(Ordering::Relaxed)
    }
}

impl ProgressSink for TracingProgress {
    fn advance(&self, units: u64) {
        let before = self.done.fetch_add(units, Ordering::Relaxed);
        let after = before + units;

        if before / self.step != after / self.step {
            let percent = if self.total > 0 {
                after as f64 * 100.0 / self.total as f64
            } else {
                100.0
            };
            info!("{}: {}/{} ({:.0}%)", self.label, after, self.total, percent);
        }
    }
}
