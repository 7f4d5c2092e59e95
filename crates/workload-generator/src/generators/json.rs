//! JSON document generator.

use crate::generators::text::random_string;
use rand::Rng;
use serde_json::json;
use workload_core::GeneratedValue;

/// Generate a fixed-shape document: a short string, a small integer and a
/// longer string.
pub fn generate_jsonb<R: Rng>(rng: &mut R) -> GeneratedValue {
    GeneratedValue::Json(json!({
        "key1": random_string(rng, 5),
        "key2": rng.gen_range(0..100),
        "key3": random_string(rng, 8),
    }))
}
