//! PostgreSQL target for pg-workload.
//!
//! Provides table DDL for resolved schemas, conversion of generated values to
//! `tokio_postgres` parameters, and [`PostgreSQLExecutor`], which implements
//! the engine's executor traits over a round-robin pool of clients.

pub mod args;
pub mod ddl;
pub mod error;
pub mod executor;
pub mod params;

pub use args::PostgreSQLArgs;
pub use ddl::{create_table_sql, drop_table_sql, to_ddl};
pub use error::PostgreSQLWorkloadError;
pub use executor::{PostgreSQLExecutor, StatementCache, MAX_PREPARED_STATEMENTS};
pub use params::{check_batch_size, to_sql_param, to_sql_params, MAX_BIND_PARAMETERS};
