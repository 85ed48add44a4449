use std::time::{Duration, Instant};

/// Fires once per `interval` while active
#[derive(Clone, Debug)]
pub struct Periodic {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Periodic {
    /// First firing is one interval after `now`
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_due: Some(now + interval),
        }
    }

    /// Never fires until `restart` is called
    pub fn inactive(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn restart(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    /// True at most once per call when the interval has elapsed.
    ///
    /// Missed intervals are skipped rather than replayed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                let mut next = due + self.interval;
                if next <= now {
                    next = now + self.interval;
                }
                self.next_due = Some(next);
                true
            }
            _ => false,
        }
    }
}

/// One-shot timeout carrying a payload, e.g. a tooltip to dismiss
#[derive(Clone, Debug)]
pub struct Deadline<T> {
    pending: Option<(Instant, T)>,
}

impl<T> Default for Deadline<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> Deadline<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any pending payload with `value`, expiring after `timeout`
    pub fn arm(&mut self, value: T, timeout: Duration, now: Instant) {
        self.pending = Some((now + timeout, value));
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, value)| value)
    }

    /// The payload while it has not expired
    pub fn active(&self, now: Instant) -> Option<&T> {
        match &self.pending {
            Some((due, value)) if now < *due => Some(value),
            _ => None,
        }
    }

    /// Take the payload once it has expired
    pub fn poll_expired(&mut self, now: Instant) -> Option<T> {
        let expired = matches!(&self.pending, Some((due, _)) if now >= *due);
        if expired {
            self.cancel()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periodic_fires_each_interval() {
        let start = Instant::now();
        let mut tick = Periodic::new(Duration::from_millis(500), start);
        assert!(!tick.poll(start + Duration::from_millis(499)));
        assert!(tick.poll(start + Duration::from_millis(500)));
        assert!(!tick.poll(start + Duration::from_millis(600)));
        assert!(tick.poll(start + Duration::from_millis(1000)));
    }

    #[test]
    fn test_periodic_skips_missed_intervals() {
        let start = Instant::now();
        let mut tick = Periodic::new(Duration::from_secs(1), start);
        assert!(tick.poll(start + Duration::from_secs(10)));
        assert!(!tick.poll(start + Duration::from_millis(10_500)));
        assert!(tick.poll(start + Duration::from_secs(11)));
    }

    #[test]
    fn test_periodic_cancel() {
        let start = Instant::now();
        let mut tick = Periodic::new(Duration::from_secs(1), start);
        tick.cancel();
        assert!(!tick.is_active());
        assert!(!tick.poll(start + Duration::from_secs(5)));
        tick.restart(start + Duration::from_secs(5));
        assert!(tick.poll(start + Duration::from_secs(6)));
    }

    #[test]
    fn test_deadline_expires() {
        let start = Instant::now();
        let mut deadline = Deadline::new();
        deadline.arm("UL", Duration::from_secs(1), start);
        assert_eq!(deadline.active(start), Some(&"UL"));
        assert_eq!(deadline.poll_expired(start + Duration::from_millis(999)), None);
        assert_eq!(deadline.poll_expired(start + Duration::from_secs(1)), Some("UL"));
        assert_eq!(deadline.active(start + Duration::from_secs(1)), None);
    }

    #[test]
    fn test_deadline_rearm_replaces() {
        let start = Instant::now();
        let mut deadline = Deadline::new();
        deadline.arm("UL", Duration::from_secs(1), start);
        deadline.arm("UR", Duration::from_secs(1), start + Duration::from_millis(800));
        assert_eq!(deadline.active(start + Duration::from_millis(1500)), Some(&"UR"));
        assert_eq!(deadline.cancel(), Some("UR"));
        assert_eq!(deadline.cancel(), None);
    }
}
