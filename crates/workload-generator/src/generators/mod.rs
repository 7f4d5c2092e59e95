//! Individual value generators for each column type.
//!
//! Each column type has exactly one generation rule; [`generate_value`]
//! dispatches on the resolved column type.

pub mod json;
pub mod numeric;
pub mod reference;
pub mod temporal;
pub mod text;

use crate::generator::GeneratorError;
use chrono::NaiveDateTime;
use rand::Rng;
use workload_core::{ColumnType, GeneratedValue, ResolvedColumn, ResolvedSchema, ResolvedTable};

/// Generate one value for `column` of `table`.
///
/// Foreign-key columns sample from the referenced table, never the local one.
/// A referenced table that is preloaded before this one contributes its
/// committed rows; one that may still be preloading (the same table, or one in
/// a reference cycle) contributes its full preload count plus inserts so far.
pub fn generate_value<R: Rng>(
    schema: &ResolvedSchema,
    table: &ResolvedTable,
    column: &ResolvedColumn,
    rng: &mut R,
    now: NaiveDateTime,
) -> Result<GeneratedValue, GeneratorError> {
    if column.reference.is_some() {
        let referenced = schema.referenced_table(column).ok_or_else(|| {
            GeneratorError::DanglingReference {
                table: table.name.clone(),
                column: column.name.clone(),
            }
        })?;

        let key = reference::sample_key(rng, referenced.key_range_for(column)).ok_or_else(|| {
            GeneratorError::EmptyKeyRange {
                table: table.name.clone(),
                column: column.name.clone(),
                referenced: referenced.name.clone(),
            }
        })?;
        return Ok(GeneratedValue::Int64(key));
    }

    let value = match column.column_type {
        ColumnType::Integer => numeric::generate_integer(rng),
        ColumnType::BigInt => numeric::generate_bigint(rng),
        ColumnType::VarChar => text::generate_varchar(rng),
        ColumnType::Text => text::generate_text(rng),
        ColumnType::Boolean => numeric::generate_boolean(rng),
        ColumnType::Numeric => numeric::generate_numeric(rng),
        ColumnType::Date => temporal::generate_date(rng, now),
        ColumnType::Timestamp => temporal::generate_timestamp(rng, now),
        ColumnType::Jsonb => json::generate_jsonb(rng),
        ColumnType::BigSerial => {
            return Err(GeneratorError::DanglingReference {
                table: table.name.clone(),
                column: column.name.clone(),
            })
        }
    };

    Ok(value)
}
