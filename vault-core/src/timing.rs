//! Deadline tracking for the cooperative control loop
//!
//! All periodic work is driven by comparing the current time against a
//! running deadline once per loop iteration. Nothing here blocks or spins.

/// Countdown tick period
pub const SECOND_MS: u64 = 1000;

/// A repeating deadline in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Deadline {
    next_ms: u64,
    period_ms: u64,
}

impl Deadline {
    /// Create a deadline that first expires one period after `now_ms`
    pub const fn new(period_ms: u64, now_ms: u64) -> Self {
        Self {
            next_ms: now_ms + period_ms,
            period_ms,
        }
    }

    /// Re-arm one period after `now_ms`
    pub fn restart(&mut self, now_ms: u64) {
        self.next_ms = now_ms + self.period_ms;
    }

    /// Next expiry time
    pub fn next_ms(&self) -> u64 {
        self.next_ms
    }

    /// Check for expiry and schedule the next one
    ///
    /// Returns true at most once per call. After a stall the deadline is
    /// moved to one period past `now_ms` rather than firing repeatedly.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if now_ms < self.next_ms {
            return false;
        }
        self.next_ms += self.period_ms;
        if self.next_ms <= now_ms {
            self.next_ms = now_ms + self.period_ms;
        }
        true
    }

    /// Advance past `now_ms` in whole periods
    ///
    /// Returns the number of periods skipped. Expiry is strict: at exactly
    /// `next_ms` nothing has elapsed yet.
    pub fn catch_up(&mut self, now_ms: u64) -> u32 {
        let mut passes = 0;
        while now_ms > self.next_ms {
            self.next_ms += self.period_ms;
            passes += 1;
        }
        passes
    }
}
