//! Monotonic clock sources

use std::cell::Cell;
use std::time::Instant;

use super::Millis;

/// Source of unscaled monotonic milliseconds.
///
/// Game pause and slow-motion must not affect this reading, otherwise
/// gesture windows and ability durations would stretch with them.
pub trait Clock {
    fn now_ms(&self) -> Millis;
}

/// Wall clock measured from construction
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> Millis {
        self.origin.elapsed().as_millis() as Millis
    }
}

/// Hand-advanced clock for replays, demos and tests
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Millis>,
}

impl ManualClock {
    pub fn new(start: Millis) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Move time forward (negative steps are ignored to stay monotonic)
    pub fn advance(&self, ms: Millis) {
        if ms > 0 {
            self.now.set(self.now.get() + ms);
        }
    }

    /// Jump to an absolute reading, never backwards
    pub fn set(&self, ms: Millis) {
        if ms > self.now.get() {
            self.now.set(ms);
        }
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> Millis {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_is_monotonic() {
        let clock = ManualClock::new(100);
        clock.advance(50);
        assert_eq!(clock.now_ms(), 150);

        clock.advance(-20);
        clock.set(10);
        assert_eq!(clock.now_ms(), 150);

        clock.set(400);
        assert_eq!(clock.now_ms(), 400);
    }

    #[test]
    fn test_system_clock_never_goes_back() {
        let clock = SystemClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(a >= 0);
        assert!(b >= a);
    }
}
