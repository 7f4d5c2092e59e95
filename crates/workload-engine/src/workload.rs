//! Whole-workload orchestration across tables.

use crate::error::EngineError;
use crate::executor::{SchemaExecutor, StatementExecutor};
use crate::metrics::{TableReport, WorkloadReport};
use crate::operations::{run_table_operations, RunOptions};
use crate::preload::{preload_table, PreloadOptions};
use crate::progress::{ProgressSink, TracingProgress};
use crate::tasks::join_fail_fast;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use tracing::info;
use workload_core::{ResolvedSchema, ResolvedTable};

/// Builds a progress sink from a label and the expected number of units.
pub type ProgressFactory = Arc<dyn Fn(&str, u64) -> Arc<dyn ProgressSink> + Send + Sync>;

/// Derive the seed of worker `index` from a base seed.
pub fn derive_seed(base: u64, index: usize) -> u64 {
    base.wrapping_add((index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// A resolved schema bound to an executor.
pub struct Workload {
    executor: Arc<dyn StatementExecutor>,
    schema: Arc<ResolvedSchema>,
    progress: ProgressFactory,
}

impl Workload {
    /// Create a workload that logs progress through `tracing`.
    pub fn new(executor: Arc<dyn StatementExecutor>, schema: Arc<ResolvedSchema>) -> Self {
        Self {
            executor,
            schema,
            progress: Arc::new(|label: &str, total: u64| {
                Arc::new(TracingProgress::new(label, total)) as Arc<dyn ProgressSink>
            }),
        }
    }

    /// Replace the progress sink factory.
    pub fn with_progress(mut self, factory: ProgressFactory) -> Self {
        self.progress = factory;
        self
    }

    /// The resolved schema.
    pub fn schema(&self) -> &Arc<ResolvedSchema> {
        &self.schema
    }

    /// Create every table, referenced tables first.
    pub async fn create_tables(&self, ddl: &dyn SchemaExecutor) -> Result<(), EngineError> {
        for idx in self.dependency_order() {
            let table = self.table(idx)?;
            info!("Creating table: {}", table.name);
            ddl.create_table(table)
                .await
                .map_err(|source| EngineError::Ddl {
                    table: table.name.clone(),
                    source,
                })?;
        }
        Ok(())
    }

    /// Drop every table, referencing tables first.
    pub async fn drop_tables(&self, ddl: &dyn SchemaExecutor) -> Result<(), EngineError> {
        for idx in self.dependency_order().into_iter().rev() {
            let table = self.table(idx)?;
            info!("Dropping table: {}", table.name);
            ddl.drop_table(table)
                .await
                .map_err(|source| EngineError::Ddl {
                    table: table.name.clone(),
                    source,
                })?;
        }
        Ok(())
    }

    /// Preload every table to its configured row count.
    ///
    /// Tables are processed by dependency level so that foreign keys always
    /// find rows in the referenced table. Within a level tables run one after
    /// another, or concurrently when `parallel_tables` is set.
    pub async fn preload(&self, options: &PreloadOptions) -> Result<WorkloadReport, EngineError> {
        options.validate()?;
        let start_time = Instant::now();
        let mut reports = Vec::with_capacity(self.schema.tables().len());

        for level in self.schema.dependency_levels() {
            if options.parallel_tables && level.len() > 1 {
                let mut set = JoinSet::new();
                for idx in level {
                    let executor = Arc::clone(&self.executor);
                    let schema = Arc::clone(&self.schema);
                    let table_options = self.table_preload_options(options, idx);
                    let (name, progress) = self.preload_progress(idx)?;

                    set.spawn(async move {
                        let metrics =
                            preload_table(executor, schema, idx, &table_options, progress).await?;
                        Ok::<_, EngineError>((idx, TableReport::from_preload(&name, &metrics)))
                    });
                }
                reports.extend(join_fail_fast(set).await?);
            } else {
                for idx in level {
                    let table_options = self.table_preload_options(options, idx);
                    let (name, progress) = self.preload_progress(idx)?;
                    let metrics = preload_table(
                        Arc::clone(&self.executor),
                        Arc::clone(&self.schema),
                        idx,
                        &table_options,
                        progress,
                    )
                    .await?;
                    reports.push((idx, TableReport::from_preload(&name, &metrics)));
                }
            }
        }

        Ok(Self::report(reports, start_time))
    }

    /// Run the operation phase of every table.
    ///
    /// Without `parallel_tables` tables run one after another in dependency
    /// order; with it each table gets its own task.
    pub async fn run(&self, options: &RunOptions) -> Result<WorkloadReport, EngineError> {
        let start_time = Instant::now();
        let mut reports = Vec::with_capacity(self.schema.tables().len());

        if options.parallel_tables {
            let mut set = JoinSet::new();
            for idx in self.dependency_order() {
                let executor = Arc::clone(&self.executor);
                let schema = Arc::clone(&self.schema);
                let table_options = Self::table_run_options(options, idx);
                let (name, progress) = self.run_progress(idx)?;

                set.spawn(async move {
                    let metrics = run_table_operations(
                        executor.as_ref(),
                        &schema,
                        idx,
                        &table_options,
                        progress.as_ref(),
                    )
                    .await?;
                    Ok::<_, EngineError>((idx, TableReport::from_operations(&name, &metrics)))
                });
            }
            reports.extend(join_fail_fast(set).await?);
        } else {
            for idx in self.dependency_order() {
                let table_options = Self::table_run_options(options, idx);
                let (name, progress) = self.run_progress(idx)?;
                let metrics = run_table_operations(
                    self.executor.as_ref(),
                    &self.schema,
                    idx,
                    &table_options,
                    progress.as_ref(),
                )
                .await?;
                reports.push((idx, TableReport::from_operations(&name, &metrics)));
            }
        }

        Ok(Self::report(reports, start_time))
    }

    fn table(&self, idx: usize) -> Result<&ResolvedTable, EngineError> {
        self.schema
            .table(idx)
            .ok_or_else(|| EngineError::TableNotFound(idx.to_string()))
    }

    fn dependency_order(&self) -> Vec<usize> {
        self.schema.dependency_levels().into_iter().flatten().collect()
    }

    fn table_preload_options(&self, options: &PreloadOptions, idx: usize) -> PreloadOptions {
        PreloadOptions {
            seed: derive_seed(options.seed, idx),
            ..options.clone()
        }
    }

    fn table_run_options(options: &RunOptions, idx: usize) -> RunOptions {
        RunOptions {
            seed: derive_seed(options.seed, idx),
            ..options.clone()
        }
    }

    fn preload_progress(&self, idx: usize) -> Result<(String, Arc<dyn ProgressSink>), EngineError> {
        let table = self.table(idx)?;
        let label = format!("Preloading {}", table.name);
        Ok((table.name.clone(), (self.progress)(&label, table.preload_count)))
    }

    fn run_progress(&self, idx: usize) -> Result<(String, Arc<dyn ProgressSink>), EngineError> {
        let table = self.table(idx)?;
        let label = format!("Running {}", table.name);
        Ok((table.name.clone(), (self.progress)(&label, table.operation_count)))
    }

    fn report(mut reports: Vec<(usize, TableReport)>, start_time: Instant) -> WorkloadReport {
        reports.sort_by_key(|(idx, _)| *idx);
        WorkloadReport {
            tables: reports.into_iter().map(|(_, report)| report).collect(),
            total_duration: start_time.elapsed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NoopProgress;
    use crate::testing::MemoryExecutor;
    use workload_core::{ColumnConfig, TableConfig, WorkloadConfig};

    fn orders_schema() -> Arc<ResolvedSchema> {
        let config = WorkloadConfig::new(vec![
            TableConfig::new("order_items")
                .with_column("order_id", ColumnConfig::reference("bigint", "orders"))
                .with_column("quantity", ColumnConfig::new("integer"))
                .with_preload_count(200)
                .with_operations(100, 0.5),
            TableConfig::new("orders")
                .with_column("customer", ColumnConfig::new("varchar"))
                .with_preload_count(1000)
                .with_operations(100, 0.0),
        ]);
        Arc::new(ResolvedSchema::resolve(&config).unwrap())
    }

    fn quiet(workload: Workload) -> Workload {
        workload.with_progress(Arc::new(|_: &str, _: u64| {
            Arc::new(NoopProgress) as Arc<dyn ProgressSink>
        }))
    }

    #[test]
    fn test_derive_seed() {
        assert_eq!(derive_seed(42, 0), 42);
        assert_ne!(derive_seed(42, 1), derive_seed(42, 2));
        assert_ne!(derive_seed(42, 1), derive_seed(43, 1));
    }

    #[tokio::test]
    async fn test_create_tables_in_dependency_order() {
        let executor = Arc::new(MemoryExecutor::new());
        let workload = Workload::new(executor.clone(), orders_schema());

        workload.create_tables(executor.as_ref()).await.unwrap();
        workload.drop_tables(executor.as_ref()).await.unwrap();

        assert_eq!(executor.created_tables(), vec!["orders", "order_items"]);
        assert_eq!(executor.dropped_tables(), vec!["order_items", "orders"]);
    }

    #[tokio::test]
    async fn test_preload_loads_referenced_tables_first() {
        let executor = Arc::new(MemoryExecutor::new());
        let schema = orders_schema();
        let workload = quiet(Workload::new(executor.clone(), schema.clone()));

        let report = workload.preload(&PreloadOptions::default()).await.unwrap();

        assert_eq!(report.table("orders").unwrap().rows_inserted, 1000);
        assert_eq!(report.table("order_items").unwrap().rows_inserted, 200);
        assert_eq!(report.tables[0].table, "order_items");

        for recorded in executor.statements() {
            if recorded.statement.starts_with("INSERT INTO \"order_items\"") {
                for pair in recorded.params.chunks(2) {
                    let order_id = pair[0].as_i64().unwrap();
                    assert!((0..1000).contains(&order_id), "order_id {order_id}");
                }
            }
        }
    }

    #[tokio::test]
    async fn test_parallel_tables() {
        let config = WorkloadConfig::new(
            (0..4)
                .map(|i| {
                    TableConfig::new(format!("t{i}"))
                        .with_column("v", ColumnConfig::new("text"))
                        .with_preload_count(250)
                        .with_operations(50, 0.2)
                })
                .collect(),
        );
        let schema = Arc::new(ResolvedSchema::resolve(&config).unwrap());
        let executor = Arc::new(MemoryExecutor::new());
        let workload = quiet(Workload::new(executor.clone(), schema.clone()));

        let preload = workload
            .preload(&PreloadOptions {
                parallel_tables: true,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(preload.total_rows_inserted(), 1000);

        let run = workload
            .run(&RunOptions {
                parallel_tables: true,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(run.total_rows_inserted() + run.total_rows_updated(), 200);
        let names: Vec<&str> = run.tables.iter().map(|t| t.table.as_str()).collect();
        assert_eq!(names, vec!["t0", "t1", "t2", "t3"]);
    }

    #[tokio::test]
    async fn test_run_after_preload() {
        let executor = Arc::new(MemoryExecutor::new());
        let schema = orders_schema();
        let workload = quiet(Workload::new(executor.clone(), schema.clone()));

        workload.preload(&PreloadOptions::default()).await.unwrap();
        let report = workload.run(&RunOptions::default()).await.unwrap();

        let orders = schema.get_table("orders").unwrap().state();
        assert_eq!(orders.inserted(), 100);
        assert_eq!(orders.live_rows(), 1100);
        assert_eq!(report.table("orders").unwrap().rows_inserted, 100);
    }

    #[tokio::test]
    async fn test_foreign_key_on_empty_parent_is_fatal() {
        let config = WorkloadConfig::new(vec![
            TableConfig::new("orders").with_column("customer", ColumnConfig::new("text")),
            TableConfig::new("order_items")
                .with_column("order_id", ColumnConfig::reference("bigint", "orders"))
                .with_preload_count(10),
        ]);
        let schema = Arc::new(ResolvedSchema::resolve(&config).unwrap());
        let executor = Arc::new(MemoryExecutor::new());
        let workload = quiet(Workload::new(executor.clone(), schema));

        let err = workload.preload(&PreloadOptions::default()).await.unwrap_err();
        assert!(matches!(err, EngineError::Generator(_)));
        assert!(executor.statements().is_empty());
    }
}
