//! Elapsed-time tracking for a puzzle session
//!
//! The host advances the timer from its frame loop (nominally every
//! [`TIMER_TICK_SECS`](crate::consts::TIMER_TICK_SECS)). The reading is for
//! display and for the completion time; it never feeds back into board state.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PuzzleTimer {
    elapsed: f64,
    running: bool,
}

impl PuzzleTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Stop and zero
    pub fn reset(&mut self) {
        self.running = false;
        self.elapsed = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance by `dt` seconds if running; negative steps are ignored
    pub fn tick(&mut self, dt: f64) {
        if self.running && dt > 0.0 {
            self.elapsed += dt;
        }
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// `mm:ss` display string
    pub fn formatted(&self) -> String {
        crate::format_time(self.elapsed)
    }
}
