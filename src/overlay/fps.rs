use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::config::{FPS_MIN_SAMPLE_SIZE, FPS_SAMPLE_SIZE};

/// Rolling average of recent frame intervals
#[derive(Clone, Debug)]
pub struct FrameRateCalculator {
    capacity: usize,
    intervals: VecDeque<Duration>,
    last_frame: Option<Instant>,
}

impl Default for FrameRateCalculator {
    fn default() -> Self {
        Self::new(FPS_SAMPLE_SIZE)
    }
}

impl FrameRateCalculator {
    /// Windows smaller than `FPS_MIN_SAMPLE_SIZE` fall back to the default size
    pub fn new(sample_size: usize) -> Self {
        let capacity = if sample_size < FPS_MIN_SAMPLE_SIZE {
            FPS_SAMPLE_SIZE
        } else {
            sample_size
        };
        Self {
            capacity,
            intervals: VecDeque::with_capacity(capacity),
            last_frame: None,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Record that a frame was presented at `now`
    pub fn record_frame(&mut self, now: Instant) {
        if let Some(prev) = self.last_frame.replace(now) {
            if self.intervals.len() == self.capacity {
                self.intervals.pop_front();
            }
            self.intervals.push_back(now.saturating_duration_since(prev));
        }
    }

    /// Mean frames per second over the window; None until two frames are seen
    pub fn frames_per_second(&self) -> Option<f64> {
        if self.intervals.is_empty() {
            return None;
        }
        let total: Duration = self.intervals.iter().sum();
        let mean = total.as_secs_f64() / self.intervals.len() as f64;
        (mean > 0.0).then(|| 1.0 / mean)
    }
}
