//! Error types for the PostgreSQL target.

use thiserror::Error;

/// Errors raised by the PostgreSQL target.
#[derive(Error, Debug)]
pub enum PostgreSQLWorkloadError {
    /// PostgreSQL connection or query error.
    #[error("PostgreSQL error: {0}")]
    PostgreSQL(#[from] tokio_postgres::Error),

    /// A generated value has no PostgreSQL representation.
    #[error("Cannot bind value {value} as {target}")]
    Conversion { value: String, target: &'static str },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),
}
