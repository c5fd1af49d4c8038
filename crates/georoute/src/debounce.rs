//! Timer-reset debouncing of input edits.

/// Coalesces bursts of requests into a single action.
///
/// Each [`trigger`](Self::trigger) pushes the deadline back to `now + delay`;
/// [`poll`](Self::poll) fires once the most recent deadline has passed.
/// Earlier pending requests are dropped rather than queued.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay_secs: f64,
    deadline: Option<f64>,
}

impl Debouncer {
    pub fn new(delay_secs: f64) -> Self {
        Self {
            delay_secs: delay_secs.max(0.0),
            deadline: None,
        }
    }

    /// Request the action, replacing any pending request.
    pub fn trigger(&mut self, now: f64) {
        self.deadline = Some(now + self.delay_secs);
    }

    /// Returns true exactly once when the pending request is due.
    pub fn poll(&mut self, now: f64) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drop any pending request.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_after_delay() {
        let mut debouncer = Debouncer::new(0.15);
        debouncer.trigger(1.0);
        assert!(!debouncer.poll(1.1));
        assert!(debouncer.poll(1.15));
        assert!(!debouncer.poll(1.2));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_rapid_triggers_coalesce() {
        let mut debouncer = Debouncer::new(0.15);
        debouncer.trigger(0.0);
        debouncer.trigger(0.1);
        assert!(!debouncer.poll(0.2));
        assert!(debouncer.poll(0.25));
        assert!(!debouncer.poll(0.4));
    }

    #[test]
    fn test_cancel_drops_pending() {
        let mut debouncer = Debouncer::new(0.15);
        debouncer.trigger(0.0);
        debouncer.cancel();
        assert!(!debouncer.poll(1.0));
    }

    #[test]
    fn test_idle_never_fires() {
        let mut debouncer = Debouncer::new(0.0);
        assert!(!debouncer.poll(100.0));
    }
}
