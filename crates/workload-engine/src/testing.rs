//! In-memory executor for tests and local experiments.

use crate::error::BoxError;
use crate::executor::{SchemaExecutor, StatementExecutor};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use workload_core::{GeneratedValue, ResolvedTable};

/// A statement received by [`MemoryExecutor`].
#[derive(Debug, Clone)]
pub struct RecordedStatement {
    pub statement: String,
    pub params: Vec<GeneratedValue>,
}

impl RecordedStatement {
    /// Whether this is an INSERT.
    pub fn is_insert(&self) -> bool {
        self.statement.starts_with("INSERT")
    }

    /// Whether this is an UPDATE.
    pub fn is_update(&self) -> bool {
        self.statement.starts_with("UPDATE")
    }
}

/// Executor that records every statement instead of running it.
///
/// Optionally fails the call with a given zero-based index, which is how
/// tests exercise the fail-fast paths.
#[derive(Debug, Default)]
pub struct MemoryExecutor {
    statements: Mutex<Vec<RecordedStatement>>,
    created: Mutex<Vec<String>>,
    dropped: Mutex<Vec<String>>,
    calls: AtomicUsize,
    fail_at: Option<usize>,
}

impl MemoryExecutor {
    /// Create an executor that accepts every statement.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an executor whose `call`-th execution (zero-based) fails.
    pub fn failing_at(call: usize) -> Self {
        Self {
            fail_at: Some(call),
            ..Self::default()
        }
    }

    /// Statements executed successfully, in execution order.
    pub fn statements(&self) -> Vec<RecordedStatement> {
        self.statements
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    /// Total number of parameters bound across successful statements.
    pub fn param_count(&self) -> usize {
        self.statements
            .lock()
            .map(|s| s.iter().map(|r| r.params.len()).sum())
            .unwrap_or_default()
    }

    /// Tables created, in creation order.
    pub fn created_tables(&self) -> Vec<String> {
        self.created.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Tables dropped, in drop order.
    pub fn dropped_tables(&self) -> Vec<String> {
        self.dropped.lock().map(|d| d.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl StatementExecutor for MemoryExecutor {
    async fn execute(&self, statement: &str, params: &[GeneratedValue]) -> Result<u64, BoxError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_at == Some(call) {
            return Err(format!("injected failure at call {call}").into());
        }

        let mut statements = self
            .statements
            .lock()
            .map_err(|e| format!("recorder poisoned: {e}"))?;
        statements.push(RecordedStatement {
            statement: statement.to_string(),
            params: params.to_vec(),
        });
        Ok(1)
    }
}

#[async_trait]
impl SchemaExecutor for MemoryExecutor {
    async fn create_table(&self, table: &ResolvedTable) -> Result<(), BoxError> {
        self.created
            .lock()
            .map_err(|e| format!("recorder poisoned: {e}"))?
            .push(table.name.clone());
        Ok(())
    }

    async fn drop_table(&self, table: &ResolvedTable) -> Result<(), BoxError> {
        self.dropped
            .lock()
            .map_err(|e| format!("recorder poisoned: {e}"))?
            .push(table.name.clone());
        Ok(())
    }
}
