//! pg-workload library
//!
//! A synthetic workload generator for PostgreSQL. A YAML workload file
//! declares tables, their columns and foreign keys, how many rows to preload
//! and how many inserts and updates to run afterwards.
//!
//! # Crates
//!
//! - `workload_core` - Workload configuration, schema resolution and statements
//! - `workload_generator` - Random values for resolved columns
//! - `workload_engine` - Preload and operation engines
//! - `workload_postgresql` - PostgreSQL DDL and execution
//! - `workload_kafka` - Kafka upsert benchmark
//!
//! # CLI Usage
//!
//! ```bash
//! # Create the tables and preload them
//! pg-workload preload -c workload.yaml -u postgres --batch 100 --thread 4
//!
//! # Run the insert/update mix against the preloaded tables
//! pg-workload run -c workload.yaml -u postgres
//!
//! # Publish keyed upserts to Kafka
//! pg-workload upsert-bench -b localhost:9092 --record-count 1000000
//! ```

pub mod workload;

pub use workload::{
    execute_preload, execute_run, load_schema, mask_connection_password, run_operations,
    run_preload, run_upsert_bench,
};
