//! Wire format of the upsert benchmark messages.
//!
//! Field names are part of the contract with downstream consumers and are
//! kept as-is, including the `tenent_id` spelling.

use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::{Builder, Uuid};

/// Number of string arrays in every message payload.
pub const FIELD_ARRAYS: usize = 100;

/// Exclusive upper bound of the length of each string array.
pub const MAX_ARRAY_LEN: usize = 10;

/// Message key: the upserted entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordKey {
    pub company_id: String,
    pub id: String,
}

/// Message value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordValue {
    #[serde(rename = "tenent_id")]
    pub tenant_id: String,
    pub id: String,
    pub data: ComplexData,
}

/// Bulky nested payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexData {
    #[serde(rename = "Field")]
    pub field: Vec<Vec<String>>,
}

/// Generate a random (version 4) UUID string from `rng`.
pub fn random_uuid<R: Rng>(rng: &mut R) -> String {
    let uuid: Uuid = Builder::from_random_bytes(rng.gen()).into_uuid();
    uuid.to_string()
}

/// Generate `count` distinct-with-high-probability UUID strings.
pub fn uuid_pool<R: Rng>(rng: &mut R, count: usize) -> Vec<String> {
    (0..count).map(|_| random_uuid(rng)).collect()
}

impl ComplexData {
    /// Generate [`FIELD_ARRAYS`] arrays of up to `MAX_ARRAY_LEN - 1` UUIDs each.
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let field = (0..FIELD_ARRAYS)
            .map(|_| {
                let len = rng.gen_range(0..MAX_ARRAY_LEN);
                (0..len).map(|_| random_uuid(rng)).collect()
            })
            .collect();
        Self { field }
    }
}

impl RecordValue {
    /// Generate a value with fresh tenant and record ids.
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        Self {
            tenant_id: random_uuid(rng),
            id: random_uuid(rng),
            data: ComplexData::generate(rng),
        }
    }
}
