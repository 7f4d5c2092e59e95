//! Preload command runner.

use anyhow::Context;
use std::sync::Arc;
use workload_core::ResolvedSchema;
use workload_engine::{
    DryRunExecutor, PreloadArgs, PreloadOptions, SchemaExecutor, StatementExecutor, Workload,
    WorkloadReport,
};
use workload_postgresql::{check_batch_size, PostgreSQLArgs};

use super::{connect, load_schema};

/// Run the preload command: create the tables and fill them to their
/// configured row counts.
pub async fn run_preload(
    postgresql: PostgreSQLArgs,
    args: PreloadArgs,
) -> anyhow::Result<WorkloadReport> {
    let schema = load_schema(&args.common.config_path)?;
    let seed = args.common.seed_or_random();
    let options = args.preload_options(seed);

    for table in schema.tables() {
        check_batch_size(options.batch_size, table.column_count(), &table.name)?;
    }

    tracing::info!(
        "Preloading {} tables (batch: {}, threads: {}, seed: {})",
        schema.tables().len(),
        options.batch_size,
        options.thread_count,
        seed
    );

    let report = if args.common.dry_run {
        tracing::info!("[DRY-RUN] No statements will be executed");
        execute_preload(Arc::new(DryRunExecutor), schema, &options, false).await?
    } else {
        let executor = connect(&postgresql).await?;
        execute_preload(executor, schema, &options, args.drop_existing).await?
    };

    report.log_summary();
    Ok(report)
}

/// Create the tables of `schema` and preload them through `executor`.
pub async fn execute_preload<E>(
    executor: Arc<E>,
    schema: Arc<ResolvedSchema>,
    options: &PreloadOptions,
    drop_existing: bool,
) -> anyhow::Result<WorkloadReport>
where
    E: StatementExecutor + SchemaExecutor + 'static,
{
    let workload = Workload::new(executor.clone(), schema);

    if drop_existing {
        workload
            .drop_tables(executor.as_ref())
            .await
            .context("Failed to drop existing tables")?;
    }
    workload
        .create_tables(executor.as_ref())
        .await
        .context("Failed to create tables")?;

    let report = workload
        .preload(options)
        .await
        .context("Preload failed")?;
    Ok(report)
}
