//! Date and timestamp generators.
//!
//! Both are offsets from a reference "now" passed in by the caller, so a row
//! is generated against a single clock reading.

use chrono::{Duration, NaiveDateTime};
use rand::Rng;
use workload_core::GeneratedValue;

/// Dates fall within this many days from today.
pub const DATE_SPREAD_DAYS: i64 = 30;

/// Timestamps fall within this many minutes from now.
pub const TIMESTAMP_SPREAD_MINUTES: i64 = 60;

/// Generate today's date plus `[0, 30)` days.
pub fn generate_date<R: Rng>(rng: &mut R, now: NaiveDateTime) -> GeneratedValue {
    let offset = Duration::days(rng.gen_range(0..DATE_SPREAD_DAYS));
    GeneratedValue::Date(now.date() + offset)
}

/// Generate now plus `[0, 60)` minutes.
pub fn generate_timestamp<R: Rng>(rng: &mut R, now: NaiveDateTime) -> GeneratedValue {
    let offset = Duration::minutes(rng.gen_range(0..TIMESTAMP_SPREAD_MINUTES));
    GeneratedValue::Timestamp(now + offset)
}
