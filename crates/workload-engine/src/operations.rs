//! Operation phase: steady mixed insert/update traffic against one table.

use crate::error::EngineError;
use crate::executor::StatementExecutor;
use crate::metrics::OperationMetrics;
use crate::pacer::Pacer;
use crate::progress::ProgressSink;
use std::time::Instant;
use tracing::{info, warn};
use workload_core::{GeneratedValue, ResolvedSchema, ResolvedTable, StatementSet};
use workload_generator::RowGenerator;

/// Operations between two progress log lines.
pub const DEFAULT_LOG_INTERVAL: u64 = 100_000;

/// Options of the operation phase.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Base seed of the per-table generators.
    pub seed: u64,
    /// Run the tables concurrently, one task per table.
    pub parallel_tables: bool,
    /// Operations between two progress log lines.
    pub log_interval: u64,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            seed: 0,
            parallel_tables: false,
            log_interval: DEFAULT_LOG_INTERVAL,
        }
    }
}

enum Operation {
    Insert,
    Update(i64),
}

/// Execute the configured number of operations on the table at `table_index`.
///
/// Operations run strictly one after another. Each one is an update with
/// probability `update_proportion` and an insert otherwise; an update on a
/// table without rows runs as an insert. Counters move only after the
/// statement succeeded, and the first failure ends the phase.
pub async fn run_table_operations(
    executor: &dyn StatementExecutor,
    schema: &ResolvedSchema,
    table_index: usize,
    options: &RunOptions,
    progress: &dyn ProgressSink,
) -> Result<OperationMetrics, EngineError> {
    let start_time = Instant::now();
    let table = schema
        .table(table_index)
        .ok_or_else(|| EngineError::TableNotFound(table_index.to_string()))?;

    let statements = StatementSet::for_table(table, 1);
    let mut generator = RowGenerator::new(options.seed);
    let mut pacer = table.operations_per_second.map(Pacer::per_second);
    let mut values = Vec::with_capacity(table.column_count() + 1);
    let mut metrics = OperationMetrics::default();

    match table.operations_per_second {
        Some(rate) => info!(
            "Running {} operations on '{}' (update proportion: {}, rate: {}/s)",
            table.operation_count, table.name, table.update_proportion, rate
        ),
        None => info!(
            "Running {} operations on '{}' (update proportion: {})",
            table.operation_count, table.name, table.update_proportion
        ),
    }

    for done in 1..=table.operation_count {
        if let Some(pacer) = pacer.as_mut() {
            pacer.wait().await;
        }

        let wants_update = generator.next_f64() < table.update_proportion;

        values.clear();
        generator.append_row(schema, table, &mut values)?;

        let operation = if wants_update {
            match generator.sample_primary_key(table) {
                Some(key) => Operation::Update(key),
                None => {
                    metrics.update_fallbacks += 1;
                    if metrics.update_fallbacks == 1 {
                        warn!(
                            "Table '{}' has no rows to update, inserting instead",
                            table.name
                        );
                    }
                    Operation::Insert
                }
            }
        } else {
            Operation::Insert
        };

        match operation {
            Operation::Insert => {
                execute(executor, table, statements.single_insert(), &values).await?;
                table.state().record_insert();
                metrics.inserts += 1;
            }
            Operation::Update(key) => {
                values.push(GeneratedValue::Int64(key));
                execute(executor, table, statements.update(), &values).await?;
                table.state().record_update();
                metrics.updates += 1;
            }
        }

        progress.advance(1);

        if options.log_interval > 0 && done % options.log_interval == 0 {
            info!("{}: {} operations completed", table.name, done);
        }
    }

    metrics.total_duration = start_time.elapsed();

    info!(
        "Finished '{}': {} inserts, {} updates in {:?} ({:.0} ops/sec)",
        table.name,
        metrics.inserts,
        metrics.updates,
        metrics.total_duration,
        metrics.operations_per_second()
    );

    Ok(metrics)
}

async fn execute(
    executor: &dyn StatementExecutor,
    table: &ResolvedTable,
    statement: &str,
    values: &[GeneratedValue],
) -> Result<(), EngineError> {
    executor
        .execute(statement, values)
        .await
        .map_err(|e| EngineError::execution(&table.name, statement, values, e))?;
    Ok(())
}
