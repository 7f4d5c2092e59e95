//! Numeric and boolean value generators.

use rand::Rng;
use workload_core::GeneratedValue;

/// Exclusive upper bound for `integer` columns.
pub const INTEGER_MAX: i32 = 100_000;

/// Exclusive upper bound for `bigint` columns.
pub const BIGINT_MAX: i64 = 100_000_000;

/// Exclusive upper bound for `numeric` columns.
pub const NUMERIC_MAX: f64 = 100.0;

/// Generate a random integer in `[0, 100000)`.
pub fn generate_integer<R: Rng>(rng: &mut R) -> GeneratedValue {
    GeneratedValue::Int32(rng.gen_range(0..INTEGER_MAX))
}

/// Generate a random big integer in `[0, 100000000)`.
pub fn generate_bigint<R: Rng>(rng: &mut R) -> GeneratedValue {
    GeneratedValue::Int64(rng.gen_range(0..BIGINT_MAX))
}

/// Generate a random number in `[0, 100)`.
pub fn generate_numeric<R: Rng>(rng: &mut R) -> GeneratedValue {
    GeneratedValue::Numeric(rng.gen_range(0.0..NUMERIC_MAX))
}

/// Generate a fair random boolean.
pub fn generate_boolean<R: Rng>(rng: &mut R) -> GeneratedValue {
    GeneratedValue::Bool(rng.gen_bool(0.5))
}
