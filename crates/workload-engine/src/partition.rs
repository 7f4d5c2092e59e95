//! Splitting a preload row range across workers.

use std::ops::Range;

/// Split `[0, count)` into `parts` contiguous ranges.
///
/// Every range holds `count / parts` rows except the last one, which also
/// absorbs the remainder. Empty ranges are dropped, so fewer than `parts`
/// ranges are returned when `count < parts`.
pub fn partition_range(count: u64, parts: usize) -> Vec<Range<u64>> {
    let parts = parts.max(1) as u64;
    let per_partition = count / parts;

    (0..parts)
        .map(|i| {
            let start = i * per_partition;
            let end = if i == parts - 1 {
                count
            } else {
                start + per_partition
            };
            start..end
        })
        .filter(|range| !range.is_empty())
        .collect()
}
