//! Error types for the workload engine.

use thiserror::Error;
use workload_core::{format_values, GeneratedValue, SchemaError};
use workload_generator::GeneratorError;

/// Boxed error returned by executors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that stop a workload phase.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Schema loading or resolution error.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Value generation error.
    #[error("Generator error: {0}")]
    Generator(#[from] GeneratorError),

    /// A generated statement failed against the target.
    #[error("Failed to execute statement on table '{table}': {source}\n  statement: {statement}\n  values: {values}")]
    Execution {
        table: String,
        statement: String,
        values: String,
        #[source]
        source: BoxError,
    },

    /// Table creation failed.
    #[error("Failed to create table '{table}': {source}")]
    Ddl {
        table: String,
        #[source]
        source: BoxError,
    },

    /// Table index or name not present in the schema.
    #[error("Table '{0}' not found in schema")]
    TableNotFound(String),

    /// A worker task panicked or was cancelled.
    #[error("Worker failed: {0}")]
    Worker(String),

    /// Invalid engine options.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl EngineError {
    /// Build an execution error carrying the failing statement and its bound values.
    pub fn execution(
        table: &str,
        statement: &str,
        values: &[GeneratedValue],
        source: BoxError,
    ) -> Self {
        EngineError::Execution {
            table: table.to_string(),
            statement: statement.to_string(),
            values: format_values(values),
            source,
        }
    }
}
