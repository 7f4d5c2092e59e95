//! Random value generator for pg-workload.
//!
//! This crate provides the [`RowGenerator`] which produces one type-correct
//! random value per column of a resolved table. Foreign-key columns draw
//! from the live rows of the table they reference.
//!
//! # Generation rules
//!
//! | Type        | Rule                                                  |
//! |-------------|-------------------------------------------------------|
//! | `integer`   | uniform in `[0, 100000)`                              |
//! | `bigint`    | uniform in `[0, 100000000)`                           |
//! | `varchar`   | 10 random alphanumeric characters                     |
//! | `text`      | 20 random alphanumeric characters                     |
//! | `boolean`   | fair coin                                             |
//! | `numeric`   | uniform in `[0, 100)`                                 |
//! | `date`      | today plus `[0, 30)` days                             |
//! | `timestamp` | now plus `[0, 60)` minutes                            |
//! | `jsonb`     | `{"key1": 5 chars, "key2": [0, 100), "key3": 8 chars}`|
//! | foreign key | uniform in `[0, live rows of the referenced table)`  |
//!
//! # Example
//!
//! ```rust
//! use workload_core::{ResolvedSchema, WorkloadConfig};
//! use workload_generator::RowGenerator;
//!
//! let config = WorkloadConfig::from_yaml(r#"
//! tables:
//!   - name: users
//!     schema:
//!       email: { type: varchar }
//!       age: { type: integer }
//! "#).unwrap();
//! let schema = ResolvedSchema::resolve(&config).unwrap();
//!
//! let mut generator = RowGenerator::new(42);
//! let row = generator.generate_row(&schema, schema.get_table("users").unwrap()).unwrap();
//! assert_eq!(row.len(), 2);
//! ```

pub mod generator;
pub mod generators;

// Re-exports for convenience
pub use generator::{GeneratorError, RowGenerator};
