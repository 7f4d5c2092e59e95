//! Generated values.
//!
//! `GeneratedValue` is the database-agnostic value produced for one column.
//! Executors convert it to their native parameter representation.

use crate::types::ColumnType;
use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;

/// One generated column value.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedValue {
    /// 32-bit signed integer
    Int32(i32),

    /// 64-bit signed integer (also used for surrogate keys)
    Int64(i64),

    /// String value
    String(String),

    /// Boolean value
    Bool(bool),

    /// Numeric value, bound as an exact decimal by executors
    Numeric(f64),

    /// Calendar date
    Date(NaiveDate),

    /// Timestamp without time zone
    Timestamp(NaiveDateTime),

    /// JSON document
    Json(serde_json::Value),
}

impl GeneratedValue {
    /// Whether this value is a valid representation of `column_type`.
    pub fn matches_type(&self, column_type: ColumnType) -> bool {
        matches!(
            (self, column_type),
            (GeneratedValue::Int32(_), ColumnType::Integer)
                | (GeneratedValue::Int64(_), ColumnType::BigInt)
                | (GeneratedValue::Int64(_), ColumnType::BigSerial)
                | (GeneratedValue::String(_), ColumnType::VarChar)
                | (GeneratedValue::String(_), ColumnType::Text)
                | (GeneratedValue::Bool(_), ColumnType::Boolean)
                | (GeneratedValue::Numeric(_), ColumnType::Numeric)
                | (GeneratedValue::Date(_), ColumnType::Date)
                | (GeneratedValue::Timestamp(_), ColumnType::Timestamp)
                | (GeneratedValue::Json(_), ColumnType::Jsonb)
        )
    }

    /// Try to get this value as an i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            GeneratedValue::Int32(v) => Some(i64::from(*v)),
            GeneratedValue::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get this value as a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            GeneratedValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for GeneratedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratedValue::Int32(v) => write!(f, "{v}"),
            GeneratedValue::Int64(v) => write!(f, "{v}"),
            GeneratedValue::String(s) => write!(f, "'{s}'"),
            GeneratedValue::Bool(b) => write!(f, "{b}"),
            GeneratedValue::Numeric(n) => write!(f, "{n}"),
            GeneratedValue::Date(d) => write!(f, "{d}"),
            GeneratedValue::Timestamp(ts) => write!(f, "{ts}"),
            GeneratedValue::Json(j) => write!(f, "{j}"),
        }
    }
}

/// Render a parameter list for diagnostics, e.g. `[1, 'abc', true]`.
pub fn format_values(values: &[GeneratedValue]) -> String {
    let rendered: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("[{}]", rendered.join(", "))
}
