//! Contracts between the engine and the storage target.

use crate::error::BoxError;
use async_trait::async_trait;
use tracing::debug;
use workload_core::{GeneratedValue, ResolvedTable};

/// Executes one parameterized statement.
///
/// Implementations must be safe to call concurrently from many workers.
#[async_trait]
pub trait StatementExecutor: Send + Sync {
    /// Execute `statement` with `params` bound to its positional placeholders.
    ///
    /// Returns the number of affected rows as reported by the target.
    async fn execute(&self, statement: &str, params: &[GeneratedValue]) -> Result<u64, BoxError>;
}

/// Ensures tables exist before data is written.
#[async_trait]
pub trait SchemaExecutor: Send + Sync {
    /// Create `table` if it does not exist yet.
    async fn create_table(&self, table: &ResolvedTable) -> Result<(), BoxError>;

    /// Drop `table` if it exists.
    async fn drop_table(&self, table: &ResolvedTable) -> Result<(), BoxError>;
}

/// Executor that only logs what it would run.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunExecutor;

#[async_trait]
impl StatementExecutor for DryRunExecutor {
    async fn execute(&self, statement: &str, params: &[GeneratedValue]) -> Result<u64, BoxError> {
        debug!("[DRY-RUN] {} ({} params)", statement, params.len());
        Ok(0)
    }
}

#[async_trait]
impl SchemaExecutor for DryRunExecutor {
    async fn create_table(&self, table: &ResolvedTable) -> Result<(), BoxError> {
        debug!("[DRY-RUN] Would create table '{}'", table.name);
        Ok(())
    }

    async fn drop_table(&self, table: &ResolvedTable) -> Result<(), BoxError> {
        debug!("[DRY-RUN] Would drop table '{}'", table.name);
        Ok(())
    }
}
