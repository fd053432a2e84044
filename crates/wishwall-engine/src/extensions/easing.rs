// extensions/easing.rs
//
// Easing curves for the detail-view transition and the breathing loop.
// Pure math, no knowledge of bubbles.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

/// Easing curve applied to normalized time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    #[default]
    Linear,
    /// Slow start, used when the detail view shrinks back into its bubble.
    CubicIn,
    /// Slow end, used when the detail view grows out of its bubble.
    CubicOut,
    /// Smooth at both ends; drives breathing.
    SineInOut,
}

impl Easing {
    /// Map `t` in [0, 1] (clamped) to eased progress in [0, 1].
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::CubicIn => t * t * t,
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
        }
    }
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
