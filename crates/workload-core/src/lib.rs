//! Core types for the pg-workload generator.
//!
//! This crate provides the foundational types used across the workspace:
//!
//! - [`WorkloadConfig`] - Table and column declarations loaded from YAML
//! - [`ColumnType`] - The closed set of supported column types
//! - [`ResolvedSchema`] - Validated schema with linked foreign keys and fixed column order
//! - [`GeneratedValue`] - Database-agnostic generated values
//! - [`StatementSet`] - Parameterized INSERT/UPDATE statements for a table
//!
//! # Architecture
//!
//! ```text
//! workload-core (this crate)
//!    │
//!    ├─── workload-generator   (random values for resolved columns)
//!    ├─── workload-engine      (preload and operation phases)
//!    └─── workload-postgresql  (DDL and parameter binding)
//! ```
//!
//! # Example
//!
//! ```rust
//! use workload_core::{ResolvedSchema, WorkloadConfig};
//!
//! let config = WorkloadConfig::from_yaml(r#"
//! tables:
//!   - name: orders
//!     preload_count: 1000
//!     schema:
//!       customer: { type: varchar }
//!   - name: order_items
//!     schema:
//!       order_id: { type: bigint, reference: orders }
//! "#).unwrap();
//!
//! let schema = ResolvedSchema::resolve(&config).unwrap();
//! let items = schema.get_table("order_items").unwrap();
//! assert_eq!(schema.referenced_table(&items.columns[0]).unwrap().name, "orders");
//! ```

pub mod resolve;
pub mod schema;
pub mod statement;
pub mod types;
pub mod values;

// Re-exports for convenience
pub use resolve::{ResolvedColumn, ResolvedSchema, ResolvedTable, TableState};
pub use schema::{ColumnConfig, SchemaError, TableConfig, WorkloadConfig};
pub use statement::{build_insert, build_update, StatementSet};
pub use types::{ColumnType, UnknownColumnType};
pub use values::{format_values, GeneratedValue};
