//! Row generator producing one value tuple per table row.

use crate::generators::{generate_value, reference};
use chrono::{Local, NaiveDateTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use workload_core::{GeneratedValue, ResolvedSchema, ResolvedTable};

/// Error type for generator operations.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// A foreign key was requested while the referenced table has no rows
    #[error("Cannot generate foreign key '{table}.{column}': referenced table '{referenced}' has no rows")]
    EmptyKeyRange {
        table: String,
        column: String,
        referenced: String,
    },

    /// A surrogate-key column is not linked to a table of this schema
    #[error("Column '{table}.{column}' has no resolved reference table")]
    DanglingReference { table: String, column: String },
}

/// Generates rows for the tables of a [`ResolvedSchema`].
///
/// Each worker owns its own generator. With the same seed and the same
/// table counters, the produced values are identical except for dates and
/// timestamps, which are relative to the wall clock.
pub struct RowGenerator {
    rng: StdRng,
}

impl RowGenerator {
    /// Create a generator with a seeded random number generator.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate one row of `table` in its fixed column order.
    pub fn generate_row(
        &mut self,
        schema: &ResolvedSchema,
        table: &ResolvedTable,
    ) -> Result<Vec<GeneratedValue>, GeneratorError> {
        let mut values = Vec::with_capacity(table.column_count());
        self.append_row(schema, table, &mut values)?;
        Ok(values)
    }

    /// Append one row of `table` to `values`.
    ///
    /// Used to build the flattened parameter list of a multi-row INSERT
    /// without intermediate allocations.
    pub fn append_row(
        &mut self,
        schema: &ResolvedSchema,
        table: &ResolvedTable,
        values: &mut Vec<GeneratedValue>,
    ) -> Result<(), GeneratorError> {
        self.append_row_at(schema, table, values, Local::now().naive_local())
    }

    /// Append one row of `table` generated against the given clock reading.
    pub fn append_row_at(
        &mut self,
        schema: &ResolvedSchema,
        table: &ResolvedTable,
        values: &mut Vec<GeneratedValue>,
        now: NaiveDateTime,
    ) -> Result<(), GeneratorError> {
        for column in &table.columns {
            values.push(generate_value(schema, table, column, &mut self.rng, now)?);
        }
        Ok(())
    }

    /// Pick an existing primary key of `table`, or `None` when it has no rows.
    pub fn sample_primary_key(&mut self, table: &ResolvedTable) -> Option<i64> {
        reference::sample_key(&mut self.rng, table.state().live_rows())
    }

    /// Draw a uniform float in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use workload_core::{ColumnConfig, ColumnType, TableConfig, WorkloadConfig};

    fn test_schema() -> ResolvedSchema {
        let yaml = r#"
tables:
  - name: orders
    preload_count: 1000
    schema:
      customer: { type: varchar }
      note: { type: text }
      quantity: { type: integer }
      total_cents: { type: bigint }
      paid: { type: boolean }
      total: { type: numeric }
      due: { type: date }
      placed_at: { type: timestamp }
      extra: { type: jsonb }
  - name: order_items
    schema:
      order_id: { type: bigint, reference: orders }
      sku: { type: varchar }
"#;
        let config = WorkloadConfig::from_yaml(yaml).unwrap();
        ResolvedSchema::resolve(&config).unwrap()
    }

    #[test]
    fn test_row_matches_column_types() {
        let schema = test_schema();
        let orders = schema.get_table("orders").unwrap();
        let mut generator = RowGenerator::new(42);

        let row = generator.generate_row(&schema, orders).unwrap();

        assert_eq!(row.len(), orders.column_count());
        for (value, column) in row.iter().zip(&orders.columns) {
            assert!(
                value.matches_type(column.column_type),
                "{} produced {:?}",
                column.name,
                value
            );
        }
    }

    #[test]
    fn test_foreign_key_within_referenced_live_rows() {
        let schema = test_schema();
        let orders = schema.get_table("orders").unwrap();
        let items = schema.get_table("order_items").unwrap();
        orders.state().record_preloaded(1000);

        let mut generator = RowGenerator::new(42);
        for _ in 0..5000 {
            let row = generator.generate_row(&schema, items).unwrap();
            assert_eq!(items.columns[0].column_type, ColumnType::BigSerial);
            let key = row[0].as_i64().unwrap();
            assert!((0..1000).contains(&key), "key {key} out of range");
        }
    }

    #[test]
    fn test_foreign_key_tracks_referenced_table_not_local() {
        let schema = test_schema();
        let orders = schema.get_table("orders").unwrap();
        let items = schema.get_table("order_items").unwrap();
        orders.state().record_preloaded(3);
        items.state().record_preloaded(1_000_000);

        let mut generator = RowGenerator::new(1);
        for _ in 0..1000 {
            let row = generator.generate_row(&schema, items).unwrap();
            assert!(row[0].as_i64().unwrap() < 3);
        }
    }

    #[test]
    fn test_foreign_key_on_empty_table() {
        let schema = test_schema();
        let items = schema.get_table("order_items").unwrap();
        let mut generator = RowGenerator::new(42);

        let err = generator.generate_row(&schema, items).unwrap_err();
        assert!(matches!(
            err,
            GeneratorError::EmptyKeyRange { ref referenced, .. } if referenced == "orders"
        ));
    }

    #[test]
    fn test_deterministic_generation() {
        let schema = test_schema();
        let orders = schema.get_table("orders").unwrap();
        let now = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();

        let mut gen1 = RowGenerator::new(42);
        let mut gen2 = RowGenerator::new(42);
        let mut row1 = Vec::new();
        let mut row2 = Vec::new();
        gen1.append_row_at(&schema, orders, &mut row1, now).unwrap();
        gen2.append_row_at(&schema, orders, &mut row2, now).unwrap();

        assert_eq!(row1, row2);
    }

    #[test]
    fn test_append_row_flattens() {
        let schema = test_schema();
        let orders = schema.get_table("orders").unwrap();
        let mut generator = RowGenerator::new(42);

        let mut values = Vec::new();
        for _ in 0..3 {
            generator.append_row(&schema, orders, &mut values).unwrap();
        }
        assert_eq!(values.len(), 3 * orders.column_count());
    }

    #[test]
    fn test_sample_primary_key() {
        let config = WorkloadConfig::new(vec![
            TableConfig::new("events").with_column("payload", ColumnConfig::new("jsonb"))
        ]);
        let schema = ResolvedSchema::resolve(&config).unwrap();
        let events = schema.get_table("events").unwrap();
        let mut generator = RowGenerator::new(42);

        assert_eq!(generator.sample_primary_key(events), None);

        events.state().record_preloaded(10);
        events.state().record_insert();
        for _ in 0..1000 {
            let key = generator.sample_primary_key(events).unwrap();
            assert!((0..11).contains(&key));
        }
    }
}
