//! Column types supported by the workload generator.
//!
//! The type set is closed: every workload column must be declared with one of
//! the names below, and each name maps to exactly one generation rule and one
//! DDL type. Unknown names are rejected during schema resolution.

use std::fmt;
use std::str::FromStr;

/// Column type of a workload table.
///
/// # YAML Format
///
/// ```yaml
/// schema:
///   customer: { type: varchar }
///   placed_at: { type: timestamp }
///   order_id: { type: bigint, reference: orders }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// 32-bit integer
    Integer,
    /// 64-bit integer
    BigInt,
    /// Short string (10 characters)
    VarChar,
    /// Longer string (20 characters)
    Text,
    /// Boolean
    Boolean,
    /// Arbitrary precision number
    Numeric,
    /// Calendar date
    Date,
    /// Timestamp without time zone
    Timestamp,
    /// Binary JSON document
    Jsonb,
    /// Big-integer surrogate key. Foreign-key columns are resolved to this
    /// type, since they always store surrogate keys of the referenced table.
    BigSerial,
}

impl ColumnType {
    /// Every supported column type.
    pub const ALL: [ColumnType; 10] = [
        ColumnType::Integer,
        ColumnType::BigInt,
        ColumnType::VarChar,
        ColumnType::Text,
        ColumnType::Boolean,
        ColumnType::Numeric,
        ColumnType::Date,
        ColumnType::Timestamp,
        ColumnType::Jsonb,
        ColumnType::BigSerial,
    ];

    /// The name used for this type in workload files.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::BigInt => "bigint",
            ColumnType::VarChar => "varchar",
            ColumnType::Text => "text",
            ColumnType::Boolean => "boolean",
            ColumnType::Numeric => "numeric",
            ColumnType::Date => "date",
            ColumnType::Timestamp => "timestamp",
            ColumnType::Jsonb => "jsonb",
            ColumnType::BigSerial => "bigserial",
        }
    }

    /// Whether this is the surrogate-key type.
    pub fn is_surrogate_key(&self) -> bool {
        matches!(self, ColumnType::BigSerial)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a type name is not part of the supported set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported column type '{0}'")]
pub struct UnknownColumnType(pub String);

impl FromStr for ColumnType {
    type Err = UnknownColumnType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColumnType::ALL
            .iter()
            .find(|t| t.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownColumnType(s.to_string()))
    }
}
