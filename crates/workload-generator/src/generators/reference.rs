//! Surrogate key sampling.
//!
//! Keys are assumed dense, so any value below the live row count of a table
//! is treated as an existing row.

use rand::Rng;

/// Pick a key uniformly from `[0, live_rows)`, or `None` when the table is empty.
pub fn sample_key<R: Rng>(rng: &mut R, live_rows: u64) -> Option<i64> {
    if live_rows == 0 {
        return None;
    }
    let upper = i64::try_from(live_rows).unwrap_or(i64::MAX);
    Some(rng.gen_range(0..upper))
}
