//! Monotonic clock backed by the embassy time driver

use embassy_time::Instant;
use ricochet_core::traits::Clock;

/// Milliseconds since boot
pub struct UptimeClock;

impl Clock for UptimeClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}
