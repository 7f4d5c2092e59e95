//! Binding generated values as PostgreSQL parameters.

use crate::error::PostgreSQLWorkloadError;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use postgres_types::ToSql;
use workload_core::GeneratedValue;

/// PostgreSQL limit on bind parameters per statement.
pub const MAX_BIND_PARAMETERS: usize = 65_535;

/// Convert a generated value to a boxed `ToSql` parameter.
pub fn to_sql_param(
    value: &GeneratedValue,
) -> Result<Box<dyn ToSql + Sync + Send>, PostgreSQLWorkloadError> {
    let param: Box<dyn ToSql + Sync + Send> = match value {
        GeneratedValue::Int32(i) => Box::new(*i),
        GeneratedValue::Int64(i) => Box::new(*i),
        GeneratedValue::String(s) => Box::new(s.clone()),
        GeneratedValue::Bool(b) => Box::new(*b),
        GeneratedValue::Numeric(n) => {
            let decimal =
                Decimal::from_f64(*n).ok_or_else(|| PostgreSQLWorkloadError::Conversion {
                    value: n.to_string(),
                    target: "NUMERIC",
                })?;
            Box::new(decimal)
        }
        GeneratedValue::Date(d) => Box::new(*d),
        GeneratedValue::Timestamp(ts) => Box::new(*ts),
        GeneratedValue::Json(j) => Box::new(j.clone()),
    };
    Ok(param)
}

/// Convert a flattened parameter list.
pub fn to_sql_params(
    values: &[GeneratedValue],
) -> Result<Vec<Box<dyn ToSql + Sync + Send>>, PostgreSQLWorkloadError> {
    values.iter().map(to_sql_param).collect()
}

/// Reject batch sizes whose INSERT would exceed the bind parameter limit.
pub fn check_batch_size(
    batch_size: usize,
    column_count: usize,
    table: &str,
) -> Result<(), PostgreSQLWorkloadError> {
    let params = batch_size.saturating_mul(column_count);
    if params > MAX_BIND_PARAMETERS {
        return Err(PostgreSQLWorkloadError::Config(format!(
            "batch size {batch_size} with {column_count} columns of table '{table}' needs {params} bind parameters (limit {MAX_BIND_PARAMETERS})"
        )));
    }
    Ok(())
}
