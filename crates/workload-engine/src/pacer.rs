//! Operation pacing.
//!
//! [`Pacer`] spaces operations to a target rate using virtual-time token
//! issuance (the generic cell rate algorithm). It keeps a theoretical arrival
//! time `tat`; every operation is assigned the slot
//! `max(tat, now - tolerance)` and the next one becomes eligible one
//! interval later. `tolerance = interval × (burst - 1)`, so after an idle
//! period at most `burst` operations may start back to back. Over any window
//! of length `T` no more than `T × rate + burst` operations are released, and
//! a caller that is never slower than the rate runs at exactly the rate.

use std::time::Duration;
use tokio::time::Instant;

/// Longest spacing between two operations. Slower rates are paced at this
/// interval.
pub const MAX_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Rate limiter for a single operation stream.
#[derive(Debug, Clone)]
pub struct Pacer {
    interval: Duration,
    tolerance: Duration,
    tat: Option<Instant>,
}

impl Pacer {
    /// Pace to `rate` operations per second with no burst allowance.
    pub fn per_second(rate: f64) -> Self {
        Self::with_burst(rate, 1)
    }

    /// Pace to `rate` operations per second, letting up to `burst` operations
    /// start back to back after an idle period.
    ///
    /// The interval is capped at [`MAX_INTERVAL`], which also covers rates
    /// that are not positive and finite.
    pub fn with_burst(rate: f64, burst: u32) -> Self {
        let interval = Duration::try_from_secs_f64(1.0 / rate)
            .map_or(MAX_INTERVAL, |interval| interval.min(MAX_INTERVAL));
        Self {
            interval,
            tolerance: interval * burst.max(1).saturating_sub(1),
            tat: None,
        }
    }

    /// Time between two consecutive operations at the target rate.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Reserve the next slot given the current clock reading.
    ///
    /// Returns how long the caller must wait before starting the operation.
    pub fn reserve(&mut self, now: Instant) -> Duration {
        let earliest = now.checked_sub(self.tolerance).unwrap_or(now);
        let slot = match self.tat {
            Some(tat) if tat > earliest => tat,
            _ => earliest,
        };
        self.tat = Some(slot + self.interval);
        slot.saturating_duration_since(now)
    }

    /// Wait until the next operation may start.
    pub async fn wait(&mut self) {
        let delay = self.reserve(Instant::now());
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}
