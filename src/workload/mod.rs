//! Workload command handlers.
//!
//! This module contains the handlers of the preload, run and upsert-bench
//! commands.

pub mod logging;
pub mod preload;
pub mod run;
pub mod upsert;

pub use logging::mask_connection_password;
pub use preload::{execute_preload, run_preload};
pub use run::{execute_run, run_operations};
pub use upsert::run_upsert_bench;

use anyhow::Context;
use std::path::Path;
use std::sync::Arc;
use workload_core::{ResolvedSchema, WorkloadConfig};
use workload_postgresql::{PostgreSQLArgs, PostgreSQLExecutor};

/// Load and resolve a workload file.
pub fn load_schema(path: &Path) -> anyhow::Result<Arc<ResolvedSchema>> {
    let config = WorkloadConfig::from_file(path)
        .with_context(|| format!("Failed to load workload from {path:?}"))?;
    let schema = ResolvedSchema::resolve(&config)
        .with_context(|| format!("Invalid workload in {path:?}"))?;

    tracing::info!(
        "Loaded workload with {} tables: {:?}",
        schema.tables().len(),
        schema.table_names()
    );
    Ok(Arc::new(schema))
}

/// Connect to PostgreSQL.
pub async fn connect(args: &PostgreSQLArgs) -> anyhow::Result<Arc<PostgreSQLExecutor>> {
    let connection_string = args.connection_string();
    tracing::info!(
        "Connecting to PostgreSQL: {}",
        mask_connection_password(&connection_string)
    );

    let executor = PostgreSQLExecutor::connect(&connection_string, args.connections)
        .await
        .context("Failed to connect to PostgreSQL")?;
    Ok(Arc::new(executor))
}
