//! Time sources for animation and debouncing.

use std::cell::Cell;

use web_time::Instant;

/// A monotonic time source, in seconds since an arbitrary origin.
pub trait Clock {
    fn now_secs(&self) -> f64;
}

/// Wall-clock time since the clock was created.
///
/// Backed by `web_time`, so it also works in the browser.
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
    fn now_secs(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// A clock that only moves when told to.
///
/// Frame-driven hosts set it once per frame from their own timebase; tests
/// step it explicitly.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(now_secs: f64) -> Self {
        Self {
            now: Cell::new(now_secs),
        }
    }

    pub fn set(&self, now_secs: f64) {
        self.now.set(now_secs);
    }

    pub fn advance(&self, secs: f64) {
        self.now.set(self.now.get() + secs);
    }
}

impl Clock for ManualClock {
    fn now_secs(&self) -> f64 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_moves_only_when_told() {
        let clock = ManualClock::new(1.0);
        assert_eq!(clock.now_secs(), 1.0);
        clock.advance(0.5);
        assert_eq!(clock.now_secs(), 1.5);
        clock.set(10.0);
        assert_eq!(clock.now_secs(), 10.0);
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now_secs();
        let b = clock.now_secs();
        assert!(a >= 0.0);
        assert!(b >= a);
    }
}
