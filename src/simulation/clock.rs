use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayState {
    /// Never started
    Stopped,
    Playing,
    Paused,
}

/// Animation commands from the presentation layer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Play,
    Pause,
    TogglePlay,
    Reverse,
}

/// Maps wall-clock time to a cyclic simulation time in `[0, stop_time)`.
///
/// The clock never reads the system clock itself: callers pass `now`, which
/// keeps `sample` pure and the clock deterministic under test. Every command
/// re-anchors the clock so the sampled time is continuous across commands.
#[derive(Clone, Debug)]
pub struct AnimationClock {
    state: PlayState,
    rate_sign: f64,
    stop_time: f64,
    cycle: Duration,
    /// Simulation time at `anchor`
    anchor_time: f64,
    /// Wall-clock instant the current playing stretch started
    anchor: Option<Instant>,
}

impl AnimationClock {
    pub fn new(stop_time: f64, cycle: Duration, autoplay: bool, now: Instant) -> Self {
        Self {
            state: if autoplay { PlayState::Playing } else { PlayState::Stopped },
            rate_sign: 1.0,
            stop_time,
            cycle,
            anchor_time: 0.0,
            anchor: autoplay.then_some(now),
        }
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    /// +1.0 forward, -1.0 reversed
    pub fn rate_sign(&self) -> f64 {
        self.rate_sign
    }

    /// Simulation units per wall-clock second, including direction
    pub fn rate(&self) -> f64 {
        self.stop_time / self.cycle.as_secs_f64() * self.rate_sign
    }

    /// Current simulation time
    pub fn sample(&self, now: Instant) -> f64 {
        let raw = match (self.state, self.anchor) {
            (PlayState::Playing, Some(anchor)) => {
                let elapsed = now.saturating_duration_since(anchor).as_secs_f64();
                self.anchor_time + self.rate() * elapsed
            }
            _ => self.anchor_time,
        };
        wrap_time(raw, self.stop_time)
    }

    pub fn apply(&mut self, command: Command, now: Instant) {
        match command {
            Command::Play => self.play(now),
            Command::Pause => self.pause(now),
            Command::TogglePlay => {
                if self.state == PlayState::Playing {
                    self.pause(now);
                } else {
                    self.play(now);
                }
            }
            Command::Reverse => self.reverse(now),
        }
    }

    pub fn play(&mut self, now: Instant) {
        if self.state != PlayState::Playing {
            self.anchor_time = self.sample(now);
            self.anchor = Some(now);
            self.state = PlayState::Playing;
            log::debug!("Animation playing from t = {:.3}", self.anchor_time);
        }
    }

    pub fn pause(&mut self, now: Instant) {
        if self.state == PlayState::Playing {
            self.anchor_time = self.sample(now);
            self.anchor = None;
            self.state = PlayState::Paused;
            log::debug!("Animation paused at t = {:.3}", self.anchor_time);
        }
    }

    /// Flip direction without resetting the current time
    pub fn reverse(&mut self, now: Instant) {
        self.anchor_time = self.sample(now);
        if self.anchor.is_some() {
            self.anchor = Some(now);
        }
        self.rate_sign = -self.rate_sign;
        log::debug!("Animation rate sign now {}", self.rate_sign);
    }
}

/// Reduce `raw` into `[0, stop_time)`.
///
/// `rem_euclid` of a tiny negative value rounds up to `stop_time` itself,
/// which is folded back to the start of the cycle.
fn wrap_time(raw: f64, stop_time: f64) -> f64 {
    let t = raw.rem_euclid(stop_time);
    if t >= stop_time {
        0.0
    } else {
        t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CYCLE_DURATION, STOP_TIME};

    fn clock(autoplay: bool) -> (AnimationClock, Instant) {
        let start = Instant::now();
        (AnimationClock::new(STOP_TIME, CYCLE_DURATION, autoplay, start), start)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_autoplay_advances() {
        let (clock, start) = clock(true);
        assert_eq!(clock.state(), PlayState::Playing);
        assert!(approx(clock.sample(start + Duration::from_secs(2)), 2.0));
    }

    #[test]
    fn test_without_autoplay_starts_stopped() {
        let (clock, start) = clock(false);
        assert_eq!(clock.state(), PlayState::Stopped);
        assert_eq!(clock.sample(start + Duration::from_secs(3)), 0.0);
    }

    #[test]
    fn test_wraps_forward() {
        let (clock, start) = clock(true);
        assert!(approx(clock.sample(start + Duration::from_millis(6500)), 1.5));
        assert!(approx(clock.sample(start + Duration::from_secs(5)), 0.0));
    }

    #[test]
    fn test_pause_freezes() {
        let (mut clock, start) = clock(true);
        let paused_at = start + Duration::from_millis(1200);
        let expected = clock.sample(paused_at);
        clock.apply(Command::TogglePlay, paused_at);
        assert_eq!(clock.state(), PlayState::Paused);
        assert_eq!(clock.sample(paused_at + Duration::from_secs(10)), expected);

        // Resume continues from the frozen value
        let resumed_at = paused_at + Duration::from_secs(10);
        clock.apply(Command::TogglePlay, resumed_at);
        assert!(approx(clock.sample(resumed_at + Duration::from_secs(1)), expected + 1.0));
    }

    #[test]
    fn test_play_then_pause() {
        let (mut clock, start) = clock(false);
        clock.apply(Command::Play, start);
        let pause_at = start + Duration::from_millis(700);
        let at_pause = clock.sample(pause_at);
        clock.apply(Command::Pause, pause_at);
        assert!(approx(at_pause, 0.7));
        assert_eq!(clock.sample(pause_at + Duration::from_secs(4)), at_pause);
    }

    #[test]
    fn test_reverse_continues_from_current_time() {
        let (mut clock, start) = clock(true);
        let flip = start + Duration::from_secs(3);
        clock.apply(Command::Reverse, flip);
        assert_eq!(clock.rate_sign(), -1.0);
        assert!(approx(clock.sample(flip), 3.0));
        assert!(approx(clock.sample(flip + Duration::from_secs(1)), 2.0));
        // Wraps below zero back toward stop_time
        assert!(approx(clock.sample(flip + Duration::from_secs(4)), 4.0));
    }

    #[test]
    fn test_reverse_twice_restores() {
        let (mut clock, start) = clock(true);
        clock.apply(Command::Reverse, start + Duration::from_secs(1));
        clock.apply(Command::Reverse, start + Duration::from_secs(2));
        assert_eq!(clock.rate_sign(), 1.0);
        // One second forward, one second back
        assert!(approx(clock.sample(start + Duration::from_secs(2)), 0.0));
        assert!(approx(clock.sample(start + Duration::from_secs(3)), 1.0));
    }

    #[test]
    fn test_reverse_while_paused_keeps_time() {
        let (mut clock, start) = clock(true);
        let t = start + Duration::from_secs(2);
        clock.apply(Command::Pause, t);
        clock.apply(Command::Reverse, t + Duration::from_secs(1));
        assert!(approx(clock.sample(t + Duration::from_secs(5)), 2.0));
        clock.apply(Command::Play, t + Duration::from_secs(5));
        assert!(approx(clock.sample(t + Duration::from_secs(6)), 1.0));
    }

    #[test]
    fn test_sample_is_pure() {
        let (clock, start) = clock(true);
        let at = start + Duration::from_millis(2500);
        assert_eq!(clock.sample(at), clock.sample(at));
    }

    #[test]
    fn test_wrap_excludes_stop_time() {
        assert_eq!(wrap_time(-1e-17, STOP_TIME), 0.0);
        assert_eq!(wrap_time(STOP_TIME, STOP_TIME), 0.0);
        assert_eq!(wrap_time(-STOP_TIME, STOP_TIME), 0.0);
        assert!(approx(wrap_time(-1.0, STOP_TIME), 4.0));
    }

    #[test]
    fn test_reverse_at_start_stays_below_stop_time() {
        let (mut clock, start) = clock(true);
        clock.apply(Command::Reverse, start);
        for nanos in [1, 2, 10, 1_000, 1_000_000] {
            let t = clock.sample(start + Duration::from_nanos(nanos));
            assert!((0.0..STOP_TIME).contains(&t), "t = {} after {} ns", t, nanos);
        }
    }
}
