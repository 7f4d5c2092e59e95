//! Metrics collected by the preload and operation phases.

use std::time::Duration;
use tracing::info;

/// Metrics from preloading one table.
#[derive(Debug, Clone, Default)]
pub struct PreloadMetrics {
    /// Number of rows inserted.
    pub rows_inserted: u64,
    /// Number of multi-row INSERT statements executed.
    pub batch_count: u64,
    /// Number of workers the row range was split across.
    pub partitions: usize,
    /// Total time taken.
    pub total_duration: Duration,
}

impl PreloadMetrics {
    /// Calculate rows per second.
    pub fn rows_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.rows_inserted as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Metrics from the operation phase of one table.
#[derive(Debug, Clone, Default)]
pub struct OperationMetrics {
    /// Number of inserts executed.
    pub inserts: u64,
    /// Number of updates executed.
    pub updates: u64,
    /// Updates that ran as inserts because the table had no rows yet.
    pub update_fallbacks: u64,
    /// Total time taken.
    pub total_duration: Duration,
}

impl OperationMetrics {
    /// Total operations executed.
    pub fn operations(&self) -> u64 {
        self.inserts + self.updates
    }

    /// Calculate operations per second.
    pub fn operations_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.operations() as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Fraction of operations that were updates.
    pub fn update_fraction(&self) -> f64 {
        if self.operations() > 0 {
            self.updates as f64 / self.operations() as f64
        } else {
            0.0
        }
    }
}

/// Final counts of one table.
#[derive(Debug, Clone)]
pub struct TableReport {
    /// Table name.
    pub table: String,
    /// Rows inserted during the phase.
    pub rows_inserted: u64,
    /// Rows updated during the phase.
    pub rows_updated: u64,
    /// Time spent on the table.
    pub duration: Duration,
}

impl TableReport {
    /// Report for a preloaded table.
    pub fn from_preload(table: &str, metrics: &PreloadMetrics) -> Self {
        Self {
            table: table.to_string(),
            rows_inserted: metrics.rows_inserted,
            rows_updated: 0,
            duration: metrics.total_duration,
        }
    }

    /// Report for a table after its operation phase.
    pub fn from_operations(table: &str, metrics: &OperationMetrics) -> Self {
        Self {
            table: table.to_string(),
            rows_inserted: metrics.inserts,
            rows_updated: metrics.updates,
            duration: metrics.total_duration,
        }
    }
}

/// Final counts of a whole phase.
#[derive(Debug, Clone, Default)]
pub struct WorkloadReport {
    /// Per-table reports in declaration order.
    pub tables: Vec<TableReport>,
    /// Wall time of the phase.
    pub total_duration: Duration,
}

impl WorkloadReport {
    /// Rows inserted across all tables.
    pub fn total_rows_inserted(&self) -> u64 {
        self.tables.iter().map(|t| t.rows_inserted).sum()
    }

    /// Rows updated across all tables.
    pub fn total_rows_updated(&self) -> u64 {
        self.tables.iter().map(|t| t.rows_updated).sum()
    }

    /// Get the report of one table.
    pub fn table(&self, name: &str) -> Option<&TableReport> {
        self.tables.iter().find(|t| t.table == name)
    }

    /// Log one line per table and a total.
    pub fn log_summary(&self) {
        for table in &self.tables {
            info!(
                "{}: {} inserts, {} updates in {:?}",
                table.table, table.rows_inserted, table.rows_updated, table.duration
            );
        }
        info!(
            "Total: {} inserts, {} updates in {:?}",
            self.total_rows_inserted(),
            self.total_rows_updated(),
            self.total_duration
        );
    }
}
