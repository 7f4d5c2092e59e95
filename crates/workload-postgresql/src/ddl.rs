//! PostgreSQL DDL generation for resolved tables.

use workload_core::{ColumnType, ResolvedTable};

/// PostgreSQL column type of a resolved column type.
///
/// Foreign-key columns store another table's surrogate key, so
/// [`ColumnType::BigSerial`] maps to a plain `BIGINT` here. Only the primary
/// key itself is a `BIGSERIAL`.
pub fn to_ddl(column_type: ColumnType) -> &'static str {
    match column_type {
        ColumnType::Integer => "INTEGER",
        ColumnType::BigInt => "BIGINT",
        ColumnType::VarChar => "VARCHAR",
        ColumnType::Text => "TEXT",
        ColumnType::Boolean => "BOOLEAN",
        ColumnType::Numeric => "NUMERIC",
        ColumnType::Date => "DATE",
        ColumnType::Timestamp => "TIMESTAMP",
        ColumnType::Jsonb => "JSONB",
        ColumnType::BigSerial => "BIGINT",
    }
}

/// Generate the CREATE TABLE statement of `table`.
pub fn create_table_sql(table: &ResolvedTable) -> String {
    let mut columns: Vec<String> = table
        .columns
        .iter()
        .map(|c| format!("\"{}\" {}", c.name, to_ddl(c.column_type)))
        .collect();
    columns.push(format!("\"{}\" BIGSERIAL PRIMARY KEY", table.primary_key));

    format!(
        "CREATE TABLE IF NOT EXISTS \"{}\" ({})",
        table.name,
        columns.join(", ")
    )
}

/// Generate the DROP TABLE statement of `table`.
pub fn drop_table_sql(table: &ResolvedTable) -> String {
    format!("DROP TABLE IF EXISTS \"{}\"", table.name)
}
