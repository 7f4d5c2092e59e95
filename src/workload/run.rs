//! Run command runner.

use anyhow::Context;
use std::sync::Arc;
use workload_core::ResolvedSchema;
use workload_engine::{
    CommonWorkloadArgs, DryRunExecutor, RunOptions, SchemaExecutor, StatementExecutor, Workload,
    WorkloadReport,
};
use workload_postgresql::PostgreSQLArgs;

use super::{connect, load_schema};

/// Run the operation phase against tables preloaded by an earlier process.
pub async fn run_operations(
    postgresql: PostgreSQLArgs,
    args: CommonWorkloadArgs,
) -> anyhow::Result<WorkloadReport> {
    let schema = load_schema(&args.config_path)?;
    let seed = args.seed_or_random();
    let options = args.run_options(seed);

    // Key ranges start from the preloaded row counts.
    schema.mark_preloaded();

    tracing::info!(
        "Running operations on {} tables (seed: {})",
        schema.tables().len(),
        seed
    );

    let report = if args.dry_run {
        tracing::info!("[DRY-RUN] No statements will be executed");
        execute_run(Arc::new(DryRunExecutor), schema, &options).await?
    } else {
        let executor = connect(&postgresql).await?;
        execute_run(executor, schema, &options).await?
    };

    report.log_summary();
    Ok(report)
}

/// Ensure the tables of `schema` exist and run their operations through `executor`.
pub async fn execute_run<E>(
    executor: Arc<E>,
    schema: Arc<ResolvedSchema>,
    options: &RunOptions,
) -> anyhow::Result<WorkloadReport>
where
    E: StatementExecutor + SchemaExecutor + 'static,
{
    let workload = Workload::new(executor.clone(), schema);

    workload
        .create_tables(executor.as_ref())
        .await
        .context("Failed to create tables")?;

    let report = workload
        .run(options)
        .await
        .context("Operation phase failed")?;
    Ok(report)
}
