//! Host frame timing
//!
//! Converts the host's frame timestamps (ms, e.g. `requestAnimationFrame`)
//! into per-tick delta time. The simulation clamps every dt, so a long pause
//! (backgrounded tab, debugger) costs at most one bounded step.

/// Clamp a raw delta time to `[0, max_dt]`; garbage becomes zero
#[inline]
pub fn clamp_dt(dt: f32, max_dt: f32) -> f32 {
    if dt.is_finite() { dt.clamp(0.0, max_dt) } else { 0.0 }
}

/// Tracks the previous frame timestamp
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous frame (0 on the first frame)
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0).max(0.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt
    }

    /// Forget the previous timestamp (next frame reports 0)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
