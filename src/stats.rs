//! Frame counting for the exit report.

use std::fmt;
use std::time::{Duration, Instant};

#[derive(Clone, Debug)]
pub struct FrameStats {
    frames: u64,
    started: Instant,
}

impl FrameStats {
    pub fn start() -> Self {
        FrameStats {
            frames: 0,
            started: Instant::now(),
        }
    }

    pub fn record_frame(&mut self) {
        self.frames += 1;
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn report(&self) -> StatsReport {
        StatsReport::new(self.frames, self.started.elapsed())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatsReport {
    pub frames: u64,
    pub seconds: u64,
    pub fps: f64,
}

impl StatsReport {
    pub fn new(frames: u64, elapsed: Duration) -> Self {
        let secs = elapsed.as_secs_f64();
        StatsReport {
            frames,
            seconds: elapsed.as_secs(),
            fps: if secs > 0.0 { frames as f64 / secs } else { 0.0 },
        }
    }
}

impl fmt::Display for StatsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} frames / {} seconds, {:.2} frames/sec",
            self.frames, self.seconds, self.fps
        )
    }
}
