//! Timed presentation helpers that sit beside the geometry engine.
//!
//! Each task is polled with the frame's `Instant` instead of sleeping on its
//! own thread, so they can be cancelled at any time and stepped exactly in tests.
//! None of them write to the speed store or the animation clock.

mod fps;
mod marquee;
mod timer;

pub use fps::FrameRateCalculator;
pub use marquee::TitleMarquee;
pub use timer::{Deadline, Periodic};
