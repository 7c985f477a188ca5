//! Fixed-cadence frame clock
//!
//! Turns wall-clock timestamps (ms, as given by `requestAnimationFrame`) into
//! a whole number of logical frames. Physics constants are per frame, so the
//! simulation stays deterministic regardless of display refresh rate.

use crate::consts::{MAX_FRAME_DELTA_MS, MAX_SUBSTEPS};

#[derive(Debug, Clone)]
pub struct GameClock {
    frame_ms: f64,
    accumulator: f64,
    last_time: Option<f64>,
    /// Logical frames produced so far
    frames: u64,
}

impl GameClock {
    pub fn new(frame_rate: u32) -> Self {
        Self {
            frame_ms: 1000.0 / frame_rate.max(1) as f64,
            accumulator: 0.0,
            last_time: None,
            frames: 0,
        }
    }

    /// Feed the current timestamp; returns how many logical frames to run
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let Some(last) = self.last_time.replace(now_ms) else {
            return 0;
        };

        let dt = (now_ms - last).clamp(0.0, MAX_FRAME_DELTA_MS);
        self.accumulator += dt;

        let mut steps = 0;
        // Small epsilon so 16.666.. ms deltas are not lost to rounding
        while self.accumulator + 1e-6 >= self.frame_ms && steps < MAX_SUBSTEPS {
            self.accumulator -= self.frame_ms;
            steps += 1;
        }
        if steps == MAX_SUBSTEPS && self.accumulator >= self.frame_ms {
            // Drop the backlog instead of catching up later
            self.accumulator = 0.0;
        }
        self.accumulator = self.accumulator.max(0.0);

        self.frames += steps as u64;
        steps
    }

    /// Forget the previous timestamp (e.g. after the tab was hidden)
    pub fn resync(&mut self) {
        self.last_time = None;
        self.accumulator = 0.0;
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
