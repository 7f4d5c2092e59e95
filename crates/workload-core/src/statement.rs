//! Parameterized INSERT and UPDATE statements.
//!
//! Placeholders are positional (`$1`, `$2`, ...) and follow the table's fixed
//! column order, so the flattened value list produced by the generator binds
//! one-to-one.

use crate::resolve::ResolvedTable;
use std::borrow::Cow;

fn quote(identifier: &str) -> String {
    format!("\"{identifier}\"")
}

/// Build an INSERT binding `rows` row tuples of the table's non-key columns.
///
/// Placeholders are numbered row-major: all columns of row 0, then row 1, and
/// so on. A table without non-key columns inserts `DEFAULT` primary keys.
pub fn build_insert(table: &ResolvedTable, rows: usize) -> String {
    debug_assert!(rows > 0, "an INSERT needs at least one row");

    let col_count = table.column_count();

    if col_count == 0 {
        let defaults = vec!["(DEFAULT)"; rows].join(", ");
        return format!(
            "INSERT INTO {} ({}) VALUES {}",
            quote(&table.name),
            quote(&table.primary_key),
            defaults
        );
    }

    let columns = table
        .columns
        .iter()
        .map(|c| quote(&c.name))
        .collect::<Vec<_>>()
        .join(", ");

    let mut placeholders: Vec<String> = Vec::with_capacity(rows);
    let mut param_idx = 1;

    for _ in 0..rows {
        let row_placeholders: Vec<String> = (0..col_count)
            .map(|_| {
                let p = format!("${param_idx}");
                param_idx += 1;
                p
            })
            .collect();
        placeholders.push(format!("({})", row_placeholders.join(", ")));
    }

    format!(
        "INSERT INTO {} ({}) VALUES {}",
        quote(&table.name),
        columns,
        placeholders.join(", ")
    )
}

/// Build an UPDATE setting every non-key column by position.
///
/// The last placeholder is the primary-key predicate; callers append the
/// target key after the column values.
pub fn build_update(table: &ResolvedTable) -> String {
    let col_count = table.column_count();

    let set_clauses = if col_count == 0 {
        format!("{0} = {0}", quote(&table.primary_key))
    } else {
        table
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{} = ${}", quote(&c.name), i + 1))
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "UPDATE {} SET {} WHERE {} = ${}",
        quote(&table.name),
        set_clauses,
        quote(&table.primary_key),
        col_count + 1
    )
}

/// Cached statements for one table.
#[derive(Debug, Clone)]
pub struct StatementSet {
    batch_size: usize,
    batch_insert: String,
    single_insert: String,
    update: String,
}

impl StatementSet {
    /// Build the statements used for `table` with the given batch size.
    pub fn for_table(table: &ResolvedTable, batch_size: usize) -> Self {
        let batch_size = batch_size.max(1);
        Self {
            batch_size,
            batch_insert: build_insert(table, batch_size),
            single_insert: build_insert(table, 1),
            update: build_update(table),
        }
    }

    /// INSERT for exactly `rows` rows, reusing a cached text when possible.
    pub fn insert_for(&self, table: &ResolvedTable, rows: usize) -> Cow<'_, str> {
        if rows == self.batch_size {
            self.batch_insert.as_str().into()
        } else if rows == 1 {
            self.single_insert.as_str().into()
        } else {
            build_insert(table, rows).into()
        }
    }

    /// Single-row INSERT.
    pub fn single_insert(&self) -> &str {
        &self.single_insert
    }

    /// UPDATE by primary key.
    pub fn update(&self) -> &str {
        &self.update
    }
}
