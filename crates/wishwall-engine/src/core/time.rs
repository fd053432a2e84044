/// Variable-step frame clock.
/// Turns raw frame deltas from the host into the `dt` every system sees,
/// capped so a long gap (tab in background, debugger pause) can't launch
/// the drift integration into instability.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Largest delta handed to the systems, in seconds.
    max_dt: f32,
    /// Total simulated time.
    elapsed: f32,
    /// Number of frames advanced.
    frames: u64,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            max_dt: max_dt.max(0.0),
            elapsed: 0.0,
            frames: 0,
        }
    }

    /// Advance by a raw frame delta. Returns the clamped delta.
    /// Negative and non-finite deltas count as zero.
    pub fn advance(&mut self, frame_dt: f32) -> f32 {
        let dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, self.max_dt)
        } else {
            0.0
        };
        self.elapsed += dt;
        self.frames += 1;
        dt
    }

    pub fn max_dt(&self) -> f32 {
        self.max_dt
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
