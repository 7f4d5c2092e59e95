//! Preload phase: bulk population of a table to its configured row count.

use crate::error::EngineError;
use crate::executor::StatementExecutor;
use crate::metrics::PreloadMetrics;
use crate::partition::partition_range;
use crate::progress::ProgressSink;
use crate::tasks::join_fail_fast;
use std::ops::Range;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use tracing::{debug, info};
use workload_core::{GeneratedValue, ResolvedSchema, ResolvedTable, StatementSet};
use workload_generator::RowGenerator;

/// Default number of rows per multi-row INSERT.
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Default number of preload workers for large tables.
pub const DEFAULT_THREAD_COUNT: usize = 2;

/// Row count from which a table is preloaded by parallel workers.
pub const LARGE_TABLE_THRESHOLD: u64 = 10_000_000;

/// Options of the preload phase.
#[derive(Debug, Clone)]
pub struct PreloadOptions {
    /// Rows per multi-row INSERT.
    pub batch_size: usize,
    /// Workers used for tables at or above `parallel_threshold` rows.
    pub thread_count: usize,
    /// Row count from which a table is split across workers.
    pub parallel_threshold: u64,
    /// Base seed; partition `i` uses `seed + i`.
    pub seed: u64,
    /// Preload independent tables concurrently.
    pub parallel_tables: bool,
}

impl Default for PreloadOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            thread_count: DEFAULT_THREAD_COUNT,
            parallel_threshold: LARGE_TABLE_THRESHOLD,
            seed: 0,
            parallel_tables: false,
        }
    }
}

impl PreloadOptions {
    /// Check the options before any statement is executed.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.batch_size == 0 {
            return Err(EngineError::Config("batch size must be at least 1".to_string()));
        }
        if self.thread_count == 0 {
            return Err(EngineError::Config(
                "thread count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Row ranges preloaded by independent workers for `count` rows.
    pub fn partitions(&self, count: u64) -> Vec<Range<u64>> {
        if count >= self.parallel_threshold {
            partition_range(count, self.thread_count)
        } else {
            partition_range(count, 1)
        }
    }
}

/// Preload the table at `table_index` to its configured row count.
///
/// Small tables are written by a single sequential pass; tables at or above
/// the parallel threshold are split into contiguous partitions, each loaded
/// by its own task. The first failing flush aborts the other partitions.
pub async fn preload_table(
    executor: Arc<dyn StatementExecutor>,
    schema: Arc<ResolvedSchema>,
    table_index: usize,
    options: &PreloadOptions,
    progress: Arc<dyn ProgressSink>,
) -> Result<PreloadMetrics, EngineError> {
    options.validate()?;

    let start_time = Instant::now();
    let table = schema
        .table(table_index)
        .ok_or_else(|| EngineError::TableNotFound(table_index.to_string()))?;
    let count = table.preload_count;

    if count == 0 {
        debug!("Nothing to preload for table '{}'", table.name);
        return Ok(PreloadMetrics::default());
    }

    let partitions = options.partitions(count);
    info!(
        "Preloading table '{}' with {} rows (batch size: {}, workers: {})",
        table.name,
        count,
        options.batch_size,
        partitions.len()
    );

    let statements = Arc::new(StatementSet::for_table(table, options.batch_size));
    let mut metrics = PreloadMetrics {
        partitions: partitions.len(),
        ..Default::default()
    };

    if let [rows] = partitions.as_slice() {
        let worker = PartitionWorker {
            schema: &schema,
            table,
            statements: &statements,
            batch_size: options.batch_size,
        };
        let (inserted, batches) = worker
            .run(
                executor.as_ref(),
                rows.clone(),
                options.seed,
                progress.as_ref(),
            )
            .await?;
        metrics.rows_inserted = inserted;
        metrics.batch_count = batches;
    } else {
        let mut set = JoinSet::new();
        for (i, rows) in partitions.into_iter().enumerate() {
            let executor = Arc::clone(&executor);
            let schema = Arc::clone(&schema);
            let statements = Arc::clone(&statements);
            let progress = Arc::clone(&progress);
            let batch_size = options.batch_size;
            let seed = options.seed.wrapping_add(i as u64);

            set.spawn(async move {
                let table = schema
                    .table(table_index)
                    .ok_or_else(|| EngineError::TableNotFound(table_index.to_string()))?;
                let worker = PartitionWorker {
                    schema: &schema,
                    table,
                    statements: &statements,
                    batch_size,
                };
                worker
                    .run(executor.as_ref(), rows, seed, progress.as_ref())
                    .await
            });
        }

        for (inserted, batches) in join_fail_fast(set).await? {
            metrics.rows_inserted += inserted;
            metrics.batch_count += batches;
        }
    }

    metrics.total_duration = start_time.elapsed();

    info!(
        "Preloaded {} rows into '{}' in {:?} ({:.0} rows/sec)",
        metrics.rows_inserted,
        table.name,
        metrics.total_duration,
        metrics.rows_per_second()
    );

    Ok(metrics)
}

/// Loads one contiguous partition of a table.
struct PartitionWorker<'a> {
    schema: &'a ResolvedSchema,
    table: &'a ResolvedTable,
    statements: &'a StatementSet,
    batch_size: usize,
}

impl PartitionWorker<'_> {
    /// Insert `rows.end - rows.start` rows, returning rows and batches written.
    async fn run(
        &self,
        executor: &dyn StatementExecutor,
        rows: Range<u64>,
        seed: u64,
        progress: &dyn ProgressSink,
    ) -> Result<(u64, u64), EngineError> {
        let mut generator = RowGenerator::new(seed);
        let mut buffer = Vec::with_capacity(self.batch_size * self.table.column_count());
        let mut buffered = 0usize;
        let mut inserted = 0u64;
        let mut batches = 0u64;

        debug!(
            "Partition {}..{} of '{}' started",
            rows.start, rows.end, self.table.name
        );

        for _ in rows {
            generator.append_row(self.schema, self.table, &mut buffer)?;
            buffered += 1;

            if buffered == self.batch_size {
                self.flush(executor, &mut buffer, buffered, progress).await?;
                inserted += buffered as u64;
                batches += 1;
                buffered = 0;
            }
        }

        if buffered > 0 {
            self.flush(executor, &mut buffer, buffered, progress).await?;
            inserted += buffered as u64;
            batches += 1;
        }

        Ok((inserted, batches))
    }

    async fn flush(
        &self,
        executor: &dyn StatementExecutor,
        buffer: &mut Vec<GeneratedValue>,
        rows: usize,
        progress: &dyn ProgressSink,
    ) -> Result<(), EngineError> {
        let statement = self.statements.insert_for(self.table, rows);

        executor
            .execute(&statement, buffer)
            .await
            .map_err(|e| EngineError::execution(&self.table.name, &statement, buffer, e))?;

        self.table.state().record_preloaded(rows as u64);
        progress.advance(rows as u64);
        buffer.clear();
        Ok(())
    }
}
