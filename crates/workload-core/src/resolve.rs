//! Schema resolution.
//!
//! Turns a [`WorkloadConfig`] into an immutable [`ResolvedSchema`]: column
//! types are parsed into the closed [`ColumnType`] set, foreign-key references
//! are linked to the index of their target table, and each table gets a fixed
//! column order that both value generation and statement building consume.
//!
//! The only mutable state in a resolved schema is the per-table
//! [`TableState`] counters, updated by the preload and operation engines.

use crate::schema::{SchemaError, TableConfig, WorkloadConfig};
use crate::types::ColumnType;
use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};

/// A column after resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedColumn {
    /// Column name
    pub name: String,
    /// Resolved type. Foreign-key columns always carry [`ColumnType::BigSerial`].
    pub column_type: ColumnType,
    /// Index of the referenced table in the owning [`ResolvedSchema`]
    pub reference: Option<usize>,
    /// The referenced table is the same table or is not ordered before it, so
    /// it may still be preloading while this column is generated.
    pub forward_reference: bool,
}

/// Row counters of a table, shared by every worker touching it.
///
/// Counters are only incremented after the statement they account for has
/// been executed successfully, so readers never see rows that were not
/// written.
#[derive(Debug, Default)]
pub struct TableState {
    preloaded: AtomicU64,
    inserted: AtomicU64,
    updated: AtomicU64,
}

impl TableState {
    /// Rows written by the preload phase.
    pub fn preloaded(&self) -> u64 {
        self.preloaded.load(Ordering::SeqCst)
    }

    /// Rows inserted by the run phase.
    pub fn inserted(&self) -> u64 {
        self.inserted.load(Ordering::SeqCst)
    }

    /// Rows updated by the run phase.
    pub fn updated(&self) -> u64 {
        self.updated.load(Ordering::SeqCst)
    }

    /// Number of rows that currently exist. Surrogate keys are dense, so this
    /// is also the exclusive upper bound for sampling an existing key.
    pub fn live_rows(&self) -> u64 {
        self.preloaded() + self.inserted()
    }

    /// Account for `rows` rows committed by a preload flush.
    pub fn record_preloaded(&self, rows: u64) {
        self.preloaded.fetch_add(rows, Ordering::SeqCst);
    }

    /// Account for one row inserted by the run phase.
    pub fn record_insert(&self) {
        self.inserted.fetch_add(1, Ordering::SeqCst);
    }

    /// Account for one row updated by the run phase.
    pub fn record_update(&self) {
        self.updated.fetch_add(1, Ordering::SeqCst);
    }

    fn set_preloaded(&self, rows: u64) {
        self.preloaded.store(rows, Ordering::SeqCst);
    }
}

/// A table after resolution.
#[derive(Debug)]
pub struct ResolvedTable {
    /// Table name
    pub name: String,
    /// Primary key column (sequence-assigned, never generated)
    pub primary_key: String,
    /// Non-key columns in their fixed order
    pub columns: Vec<ResolvedColumn>,
    /// Rows inserted by the preload phase
    pub preload_count: u64,
    /// Operations executed by the run phase
    pub operation_count: u64,
    /// Probability that a run-phase operation is an update
    pub update_proportion: f64,
    /// Optional pacing target for the run phase
    pub operations_per_second: Option<f64>,
    state: TableState,
}

impl ResolvedTable {
    /// Live counters of this table.
    pub fn state(&self) -> &TableState {
        &self.state
    }

    /// Column names in their fixed order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Number of non-key columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Rows this table holds once its preload completes, plus run-phase
    /// inserts so far.
    pub fn planned_rows(&self) -> u64 {
        self.preload_count + self.state.inserted()
    }

    /// Exclusive upper bound for a key sampled by `column` of another table
    /// (or of this one) referencing this table.
    pub fn key_range_for(&self, column: &ResolvedColumn) -> u64 {
        if column.forward_reference {
            self.planned_rows()
        } else {
            self.state.live_rows()
        }
    }

    fn resolve(
        config: &TableConfig,
        table_index: &HashMap<String, usize>,
    ) -> Result<Self, SchemaError> {
        if !(0.0..=1.0).contains(&config.update_proportion) {
            return Err(SchemaError::InvalidUpdateProportion {
                table: config.name.clone(),
                value: config.update_proportion,
            });
        }

        if let Some(rate) = config.operations_per_second {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(SchemaError::InvalidRate {
                    table: config.name.clone(),
                    value: rate,
                });
            }
        }

        let mut columns = Vec::with_capacity(config.schema.len());
        for (name, column) in &config.schema {
            // The primary key is assigned by the database.
            if *name == config.primary_key {
                continue;
            }

            let unsupported = || SchemaError::UnsupportedType {
                table: config.name.clone(),
                column: name.clone(),
                column_type: column.column_type.clone(),
            };

            let declared: ColumnType = column.column_type.parse().map_err(|_| unsupported())?;

            let resolved = match column.reference_name() {
                Some(reference) => {
                    let target = table_index.get(reference).copied().ok_or_else(|| {
                        SchemaError::UnresolvedReference {
                            table: config.name.clone(),
                            column: name.clone(),
                            reference: reference.to_string(),
                        }
                    })?;
                    ResolvedColumn {
                        name: name.clone(),
                        column_type: ColumnType::BigSerial,
                        reference: Some(target),
                        forward_reference: false,
                    }
                }
                // A surrogate key without a referenced table has nothing to sample from.
                None if declared.is_surrogate_key() => return Err(unsupported()),
                None => ResolvedColumn {
                    name: name.clone(),
                    column_type: declared,
                    reference: None,
                    forward_reference: false,
                },
            };
            columns.push(resolved);
        }

        Ok(Self {
            name: config.name.clone(),
            primary_key: config.primary_key.clone(),
            columns,
            preload_count: config.preload_count,
            operation_count: config.operation_count,
            update_proportion: config.update_proportion,
            operations_per_second: config.operations_per_second,
            state: TableState::default(),
        })
    }
}

/// Resolved workload schema.
#[derive(Debug)]
pub struct ResolvedSchema {
    tables: Vec<ResolvedTable>,
    table_map: HashMap<String, usize>,
}

impl ResolvedSchema {
    /// Resolve a workload configuration.
    ///
    /// Fails on the first duplicate table, unsupported column type,
    /// unresolvable reference or out-of-range table setting. The input is left
    /// untouched.
    pub fn resolve(config: &WorkloadConfig) -> Result<Self, SchemaError> {
        let mut table_map = HashMap::with_capacity(config.tables.len());
        for (idx, table) in config.tables.iter().enumerate() {
            if table_map.insert(table.name.clone(), idx).is_some() {
                return Err(SchemaError::DuplicateTable(table.name.clone()));
            }
        }

        let tables = config
            .tables
            .iter()
            .map(|table| ResolvedTable::resolve(table, &table_map))
            .collect::<Result<Vec<_>, _>>()?;

        let mut schema = Self { tables, table_map };
        schema.mark_forward_references();
        Ok(schema)
    }

    fn mark_forward_references(&mut self) {
        let mut level_of = vec![0; self.tables.len()];
        for (level, members) in self.dependency_levels().into_iter().enumerate() {
            for idx in members {
                level_of[idx] = level;
            }
        }

        for (idx, table) in self.tables.iter_mut().enumerate() {
            for column in &mut table.columns {
                if let Some(target) = column.reference {
                    column.forward_reference = level_of[target] >= level_of[idx];
                }
            }
        }
    }

    /// All tables in declaration order.
    pub fn tables(&self) -> &[ResolvedTable] {
        &self.tables
    }

    /// Get a table by index.
    pub fn table(&self, index: usize) -> Option<&ResolvedTable> {
        self.tables.get(index)
    }

    /// Get a table index by name.
    pub fn table_index(&self, name: &str) -> Option<usize> {
        self.table_map.get(name).copied()
    }

    /// Get a table by name.
    pub fn get_table(&self, name: &str) -> Option<&ResolvedTable> {
        self.table_index(name).and_then(|idx| self.tables.get(idx))
    }

    /// The table a foreign-key column points at.
    pub fn referenced_table(&self, column: &ResolvedColumn) -> Option<&ResolvedTable> {
        column.reference.and_then(|idx| self.tables.get(idx))
    }

    /// All table names in declaration order.
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }

    /// Group tables so that each table's referenced tables appear in an
    /// earlier group.
    ///
    /// Self-references are ignored. Tables that take part in a reference
    /// cycle cannot be ordered and are returned together as the last group.
    pub fn dependency_levels(&self) -> Vec<Vec<usize>> {
        let dependencies: Vec<BTreeSet<usize>> = self
            .tables
            .iter()
            .enumerate()
            .map(|(idx, table)| {
                table
                    .columns
                    .iter()
                    .filter_map(|c| c.reference)
                    .filter(|&target| target != idx)
                    .collect()
            })
            .collect();

        let mut placed = vec![false; self.tables.len()];
        let mut levels = Vec::new();

        loop {
            let level: Vec<usize> = (0..self.tables.len())
                .filter(|&idx| !placed[idx])
                .filter(|&idx| dependencies[idx].iter().all(|&dep| placed[dep]))
                .collect();

            if level.is_empty() {
                break;
            }
            for &idx in &level {
                placed[idx] = true;
            }
            levels.push(level);
        }

        let cyclic: Vec<usize> = (0..self.tables.len()).filter(|&idx| !placed[idx]).collect();
        if !cyclic.is_empty() {
            levels.push(cyclic);
        }

        levels
    }

    /// Treat every table as fully preloaded.
    ///
    /// Used when the run phase starts in a different process than the one
    /// that preloaded the data.
    pub fn mark_preloaded(&self) {
        for table in &self.tables {
            table.state.set_preloaded(table.preload_count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ColumnConfig;

    fn orders_workload() -> WorkloadConfig {
        WorkloadConfig::new(vec![
            TableConfig::new("order_items")
                .with_column("order_id", ColumnConfig::reference("integer", "orders"))
                .with_column("quantity", ColumnConfig::new("integer")),
            TableConfig::new("orders")
                .with_column("customer", ColumnConfig::new("varchar"))
                .with_column("total", ColumnConfig::new("numeric"))
                .with_preload_count(1000),
        ])
    }

    #[test]
    fn test_resolve_links_references() {
        let schema = ResolvedSchema::resolve(&orders_workload()).unwrap();

        let items = schema.get_table("order_items").unwrap();
        let order_id = &items.columns[0];
        assert_eq!(order_id.column_type, ColumnType::BigSerial);

        let target = schema.referenced_table(order_id).unwrap();
        assert_eq!(target.name, "orders");
        assert_eq!(target.preload_count, 1000);
    }

    #[test]
    fn test_every_reference_resolved_and_typed() {
        let schema = ResolvedSchema::resolve(&orders_workload()).unwrap();
        for table in schema.tables() {
            for column in &table.columns {
                assert!(ColumnType::ALL.contains(&column.column_type));
                if column.reference.is_some() {
                    assert!(schema.referenced_table(column).is_some());
                    assert_eq!(column.column_type, ColumnType::BigSerial);
                }
            }
        }
    }

    #[test]
    fn test_column_order_is_declaration_order() {
        let schema = ResolvedSchema::resolve(&orders_workload()).unwrap();
        let orders = schema.get_table("orders").unwrap();
        assert_eq!(orders.column_names(), vec!["customer", "total"]);
    }

    #[test]
    fn test_forward_references() {
        let config = WorkloadConfig::new(vec![
            TableConfig::new("employees")
                .with_column("manager_id", ColumnConfig::reference("bigint", "employees"))
                .with_column("team_id", ColumnConfig::reference("bigint", "teams"))
                .with_preload_count(100),
            TableConfig::new("teams")
                .with_column("lead_id", ColumnConfig::reference("bigint", "leads"))
                .with_preload_count(10),
            TableConfig::new("leads")
                .with_column("team_id", ColumnConfig::reference("bigint", "teams"))
                .with_preload_count(10),
        ]);
        let schema = ResolvedSchema::resolve(&config).unwrap();

        let employees = schema.get_table("employees").unwrap();
        assert!(employees.columns[0].forward_reference);
        // teams and leads form a cycle, employees depends on it
        assert!(employees.columns[1].forward_reference);
        assert!(schema.get_table("teams").unwrap().columns[0].forward_reference);
        assert!(schema.get_table("leads").unwrap().columns[0].forward_reference);

        let items = ResolvedSchema::resolve(&orders_workload()).unwrap();
        let order_id = &items.get_table("order_items").unwrap().columns[0];
        assert!(!order_id.forward_reference);
    }

    #[test]
    fn test_key_range_for() {
        let config = WorkloadConfig::new(vec![
            TableConfig::new("orders").with_preload_count(50),
            TableConfig::new("order_items")
                .with_column("order_id", ColumnConfig::reference("bigint", "orders")),
            TableConfig::new("employees")
                .with_column("manager_id", ColumnConfig::reference("bigint", "employees"))
                .with_preload_count(20),
        ]);
        let schema = ResolvedSchema::resolve(&config).unwrap();

        let orders = schema.get_table("orders").unwrap();
        let order_id = &schema.get_table("order_items").unwrap().columns[0];
        assert_eq!(orders.key_range_for(order_id), 0);
        orders.state().record_preloaded(50);
        orders.state().record_insert();
        assert_eq!(orders.key_range_for(order_id), 51);

        let employees = schema.get_table("employees").unwrap();
        let manager_id = &employees.columns[0];
        assert_eq!(employees.key_range_for(manager_id), 20);
        employees.state().record_preloaded(5);
        employees.state().record_insert();
        assert_eq!(employees.key_range_for(manager_id), 21);
    }

    #[test]
    fn test_unresolved_reference() {
        let config = WorkloadConfig::new(vec![TableConfig::new("order_items")
            .with_column("order_id", ColumnConfig::reference("bigint", "orders"))]);

        let err = ResolvedSchema::resolve(&config).unwrap_err();
        match err {
            SchemaError::UnresolvedReference {
                table,
                column,
                reference,
            } => {
                assert_eq!(table, "order_items");
                assert_eq!(column, "order_id");
                assert_eq!(reference, "orders");
            }
            other => panic!("Expected UnresolvedReference, got {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_type() {
        let config = WorkloadConfig::new(vec![
            TableConfig::new("users").with_column("avatar", ColumnConfig::new("bytea"))
        ]);

        let err = ResolvedSchema::resolve(&config).unwrap_err();
        match &err {
            SchemaError::UnsupportedType { column_type, .. } => assert_eq!(column_type, "bytea"),
            other => panic!("Expected UnsupportedType, got {other:?}"),
        }
        assert!(err.to_string().contains("avatar"));
    }

    #[test]
    fn test_bigserial_without_reference_rejected() {
        let config = WorkloadConfig::new(vec![
            TableConfig::new("users").with_column("counter", ColumnConfig::new("bigserial"))
        ]);

        let err = ResolvedSchema::resolve(&config).unwrap_err();
        assert!(matches!(err, SchemaError::UnsupportedType { .. }));
    }

    #[test]
    fn test_duplicate_table() {
        let config =
            WorkloadConfig::new(vec![TableConfig::new("users"), TableConfig::new("users")]);
        let err = ResolvedSchema::resolve(&config).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateTable(name) if name == "users"));
    }

    #[test]
    fn test_invalid_update_proportion() {
        let config =
            WorkloadConfig::new(vec![TableConfig::new("users").with_operations(10, 1.5)]);
        let err = ResolvedSchema::resolve(&config).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidUpdateProportion { .. }));
    }

    #[test]
    fn test_invalid_rate() {
        let config = WorkloadConfig::new(vec![TableConfig::new("users").with_rate(0.0)]);
        let err = ResolvedSchema::resolve(&config).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidRate { .. }));
    }

    #[test]
    fn test_primary_key_column_skipped() {
        let config = WorkloadConfig::new(vec![TableConfig::new("users")
            .with_column("id", ColumnConfig::new("bigint"))
            .with_column("name", ColumnConfig::new("text"))]);

        let schema = ResolvedSchema::resolve(&config).unwrap();
        assert_eq!(schema.get_table("users").unwrap().column_names(), vec!["name"]);
    }

    #[test]
    fn test_dependency_levels() {
        let config = WorkloadConfig::new(vec![
            TableConfig::new("order_items")
                .with_column("order_id", ColumnConfig::reference("bigint", "orders"))
                .with_column("product_id", ColumnConfig::reference("bigint", "products")),
            TableConfig::new("orders")
                .with_column("customer_id", ColumnConfig::reference("bigint", "customers")),
            TableConfig::new("customers"),
            TableConfig::new("products"),
        ]);

        let schema = ResolvedSchema::resolve(&config).unwrap();
        assert_eq!(schema.dependency_levels(), vec![vec![2, 3], vec![1], vec![0]]);
    }

    #[test]
    fn test_dependency_levels_self_reference_and_cycle() {
        let config = WorkloadConfig::new(vec![
            TableConfig::new("employees")
                .with_column("manager_id", ColumnConfig::reference("bigint", "employees")),
            TableConfig::new("a").with_column("b_id", ColumnConfig::reference("bigint", "b")),
            TableConfig::new("b").with_column("a_id", ColumnConfig::reference("bigint", "a")),
        ]);

        let schema = ResolvedSchema::resolve(&config).unwrap();
        assert_eq!(schema.dependency_levels(), vec![vec![0], vec![1, 2]]);
    }

    #[test]
    fn test_counters() {
        let schema = ResolvedSchema::resolve(&orders_workload()).unwrap();
        let orders = schema.get_table("orders").unwrap();
        assert_eq!(orders.state().live_rows(), 0);

        orders.state().record_preloaded(10);
        orders.state().record_insert();
        orders.state().record_update();
        assert_eq!(orders.state().live_rows(), 11);
        assert_eq!(orders.state().updated(), 1);

        schema.mark_preloaded();
        assert_eq!(orders.state().preloaded(), 1000);
        assert_eq!(orders.state().live_rows(), 1001);
    }
}
