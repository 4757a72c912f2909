//! Platform glue: frame pacing and time-derived seeding
//!
//! The simulation itself never reads the wall clock; these helpers keep that
//! at the loop boundary.

use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Paces a loop at a fixed rate against a monotonic deadline
pub struct FrameClock {
    period: Duration,
    next: Instant,
}

impl FrameClock {
    pub fn new(hz: u32) -> Self {
        let period = Duration::from_secs(1) / hz.max(1);
        Self {
            period,
            next: Instant::now() + period,
        }
    }

    /// Sleep out the remainder of the current frame. If the loop fell far
    /// behind, the deadline resynchronizes instead of sprinting to catch up.
    pub fn tick(&mut self) {
        let now = Instant::now();
        if now < self.next {
            thread::sleep(self.next - now);
        }
        self.next += self.period;
        if Instant::now() > self.next + self.period * 3 {
            self.next = Instant::now() + self.period;
        }
    }
}

/// Run seed derived from the system clock
pub fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5EED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_paces_at_least_one_period() {
        let mut clock = FrameClock::new(1000);
        let start = Instant::now();
        clock.tick();
        clock.tick();
        assert!(start.elapsed() >= Duration::from_millis(1));
    }
}
