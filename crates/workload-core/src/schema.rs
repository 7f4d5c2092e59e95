//! Workload configuration as declared in YAML.
//!
//! These are the raw, unresolved types. Column types are kept as the strings
//! found in the file and foreign-key references as table names; both are
//! checked and linked by [`crate::resolve::ResolvedSchema::resolve`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ============================================================================
// Error Types
// ============================================================================

/// Error type for schema loading and resolution.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Error reading the workload file
    #[error("Failed to read workload file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Two tables share a name
    #[error("Table '{0}' is declared more than once")]
    DuplicateTable(String),

    /// Column type outside the supported set
    #[error("Column type '{column_type}' (table '{table}', column '{column}') is not supported")]
    UnsupportedType {
        table: String,
        column: String,
        column_type: String,
    },

    /// Foreign key names a table that is not in the workload
    #[error("Invalid reference table '{reference}' (table '{table}', column '{column}')")]
    UnresolvedReference {
        table: String,
        column: String,
        reference: String,
    },

    /// Update proportion is not a probability
    #[error("Update proportion {value} of table '{table}' must be within [0, 1]")]
    InvalidUpdateProportion { table: String, value: f64 },

    /// Target rate is not a positive number
    #[error("Operations per second {value} of table '{table}' must be a positive number")]
    InvalidRate { table: String, value: f64 },

    /// Table not found in schema
    #[error("Table not found: {0}")]
    TableNotFound(String),
}

// ============================================================================
// Raw Configuration
// ============================================================================

/// A column as declared in the workload file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnConfig {
    /// Declared type name (see [`crate::types::ColumnType`])
    #[serde(rename = "type")]
    pub column_type: String,

    /// Name of the table this column references, if it is a foreign key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl ColumnConfig {
    /// Create a plain column.
    pub fn new(column_type: impl Into<String>) -> Self {
        Self {
            column_type: column_type.into(),
            reference: None,
        }
    }

    /// Create a foreign-key column referencing `table`.
    pub fn reference(column_type: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            column_type: column_type.into(),
            reference: Some(table.into()),
        }
    }

    /// The referenced table name, treating an empty string as no reference.
    pub fn reference_name(&self) -> Option<&str> {
        self.reference.as_deref().filter(|r| !r.is_empty())
    }
}

fn default_primary_key() -> String {
    "id".to_string()
}

/// A table as declared in the workload file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    /// Table name
    pub name: String,

    /// Columns in declaration order, excluding the primary key
    #[serde(default)]
    pub schema: IndexMap<String, ColumnConfig>,

    /// Primary key column, assigned by the database sequence
    #[serde(default = "default_primary_key")]
    pub primary_key: String,

    /// Rows inserted by the preload phase
    #[serde(default)]
    pub preload_count: u64,

    /// Operations executed by the run phase
    #[serde(default)]
    pub operation_count: u64,

    /// Probability that a run-phase operation is an update
    #[serde(default)]
    pub update_proportion: f64,

    /// Optional pacing target for the run phase
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operations_per_second: Option<f64>,
}

impl TableConfig {
    /// Create a table with no columns and default counts.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: IndexMap::new(),
            primary_key: default_primary_key(),
            preload_count: 0,
            operation_count: 0,
            update_proportion: 0.0,
            operations_per_second: None,
        }
    }

    /// Add a column.
    pub fn with_column(mut self, name: impl Into<String>, column: ColumnConfig) -> Self {
        self.schema.insert(name.into(), column);
        self
    }

    /// Set the preload row count.
    pub fn with_preload_count(mut self, count: u64) -> Self {
        self.preload_count = count;
        self
    }

    /// Set the run-phase operation count and update proportion.
    pub fn with_operations(mut self, count: u64, update_proportion: f64) -> Self {
        self.operation_count = count;
        self.update_proportion = update_proportion;
        self
    }

    /// Set the run-phase pacing target.
    pub fn with_rate(mut self, operations_per_second: f64) -> Self {
        self.operations_per_second = Some(operations_per_second);
        self
    }
}

/// Complete workload: the set of tables to create, preload and exercise.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkloadConfig {
    /// Table declarations
    #[serde(default)]
    pub tables: Vec<TableConfig>,
}

impl WorkloadConfig {
    /// Create a workload from table declarations.
    pub fn new(tables: Vec<TableConfig>) -> Self {
        Self { tables }
    }

    /// Load a workload from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a workload from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        let config: WorkloadConfig = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Get a table declaration by name.
    pub fn get_table(&self, name: &str) -> Option<&TableConfig> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Get all table names in declaration order.
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }
}
