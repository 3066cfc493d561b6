//! Frame pacing for host-driven animation callbacks
//!
//! The host calls back on every display refresh. Physics constants are per
//! tick, so on high refresh displays the clock skips callbacks until the
//! minimum frame duration has passed.

/// Throttles host frame callbacks down to a target tick rate
#[derive(Debug, Clone)]
pub struct FrameClock {
    min_frame_ms: f64,
    last_tick_ms: f64,
}

impl FrameClock {
    /// `start_ms` is the host timestamp at creation
    pub fn new(min_frame_ms: f64, start_ms: f64) -> Self {
        Self {
            min_frame_ms,
            last_tick_ms: start_ms,
        }
    }

    /// Returns the elapsed milliseconds if a tick should run at `now_ms`
    pub fn poll(&mut self, now_ms: f64) -> Option<f32> {
        let elapsed = now_ms - self.last_tick_ms;
        if elapsed > self.min_frame_ms {
            self.last_tick_ms = now_ms;
            Some(elapsed as f32)
        } else {
            None
        }
    }
}
