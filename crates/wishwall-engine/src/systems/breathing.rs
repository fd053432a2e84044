//! Breathing: a slow scale/tilt oscillation per bubble, on its own clock.
//! Runs for every bubble every frame; hover and press don't pause it.

use serde::{Deserialize, Serialize};

use crate::components::bubble::{Breath, Bubble};
use crate::core::rng::Rng;

/// Breathing ranges. Periods are full cycles in seconds, angles in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BreathConfig {
    pub scale_swing: f32,
    pub scale_period: f32,
    pub scale_period_spread: f32,
    pub tilt_swing_deg: f32,
    pub rotation_period: f32,
    pub rotation_period_spread: f32,
    /// Starting tilt is drawn from [-max_tilt_deg, max_tilt_deg).
    pub max_tilt_deg: f32,
}

impl Default for BreathConfig {
    fn default() -> Self {
        Self {
            scale_swing: 0.02,
            scale_period: 4.8,
            scale_period_spread: 1.6,
            tilt_swing_deg: 6.0,
            rotation_period: 10.0,
            rotation_period_spread: 4.0,
            max_tilt_deg: 6.0,
        }
    }
}

impl BreathConfig {
    pub(crate) fn roll(&self, rng: &mut Rng) -> Breath {
        let scale_period = self.scale_period + rng.next_f32() * self.scale_period_spread;
        let rotation_period = self.rotation_period + rng.next_f32() * self.rotation_period_spread;
        let base_tilt = rng.range(-self.max_tilt_deg, self.max_tilt_deg).to_radians();
        Breath::new(
            scale_period,
            self.scale_swing,
            rotation_period,
            base_tilt,
            self.tilt_swing_deg.to_radians(),
        )
    }
}

/// Advance breathing and the press spring of every bubble.
pub fn tick_breathing<'a>(bubbles: impl Iterator<Item = &'a mut Bubble>, dt: f32) {
    for bubble in bubbles {
        bubble.tick_visuals(dt);
    }
}
