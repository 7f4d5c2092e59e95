//! Preload and operation engines for pg-workload.
//!
//! This crate drives a [`workload_core::ResolvedSchema`] against any target
//! implementing [`StatementExecutor`]:
//!
//! - [`preload_table`] bulk-loads a table to its `preload_count`, splitting
//!   large tables into contiguous partitions loaded by parallel tasks.
//! - [`run_table_operations`] issues the steady mixed insert/update traffic,
//!   optionally paced by a [`Pacer`].
//! - [`Workload`] orders tables by foreign-key dependencies and runs either
//!   phase across all of them.
//!
//! Every error is fatal: the first failing statement aborts the phase and is
//! returned to the caller.

pub mod args;
pub mod error;
pub mod executor;
pub mod metrics;
pub mod operations;
pub mod pacer;
pub mod partition;
pub mod preload;
pub mod progress;
mod tasks;
pub mod testing;
pub mod workload;

pub use args::{CommonWorkloadArgs, PreloadArgs};
pub use error::{BoxError, EngineError};
pub use executor::{DryRunExecutor, SchemaExecutor, StatementExecutor};
pub use metrics::{OperationMetrics, PreloadMetrics, TableReport, WorkloadReport};
pub use operations::{run_table_operations, RunOptions};
pub use pacer::Pacer;
pub use partition::partition_range;
pub use preload::{preload_table, PreloadOptions};
pub use progress::{NoopProgress, ProgressSink, TracingProgress};
pub use workload::{derive_seed, ProgressFactory, Workload};
