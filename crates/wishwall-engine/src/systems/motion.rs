//! Per-frame drift integration with wall bounces.
//!
//! Bubbles never interact with each other, so update order within a
//! frame does not matter. Hovered or pressed bubbles are skipped whole:
//! no position, velocity or phase change until the pointer lets go.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::types::Bounds;
use crate::components::bubble::Bubble;
use crate::systems::layout::clamp_axis;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MotionConfig {
    /// Upper bound on a frame delta, in seconds.
    pub max_dt: f32,
    /// Per-tick velocity multiplier (drag).
    pub damping: f32,
    /// Phase advance in radians per second.
    pub angular_rate: f32,
    /// Frequency ratio of the vertical oscillator to the horizontal one.
    pub harmonic: f32,
    /// Oscillatory acceleration added per tick.
    pub drift_accel: f32,
    /// Pixels per velocity unit per second.
    pub velocity_scale: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            max_dt: 0.032,
            damping: 0.994,
            angular_rate: 0.9,
            harmonic: 0.92,
            drift_accel: 0.09,
            velocity_scale: 30.0,
        }
    }
}

impl MotionConfig {
    /// Largest speed the drift term can sustain against damping
    /// (per axis), ignoring the initial velocity.
    pub fn terminal_speed(&self) -> f32 {
        let drag = 1.0 - self.damping;
        if drag <= 0.0 {
            f32::INFINITY
        } else {
            self.drift_accel / drag
        }
    }
}

/// Advance one bubble by `dt`. Returns false if the bubble was frozen.
pub fn step_bubble(bubble: &mut Bubble, dt: f32, bounds: Bounds, cfg: &MotionConfig) -> bool {
    if bubble.is_frozen() {
        return false;
    }

    let d = &mut bubble.drift;
    d.vel *= cfg.damping;
    d.phase += dt * cfg.angular_rate;
    d.vel += Vec2::new(
        d.phase.sin() * cfg.drift_accel,
        (d.phase * cfg.harmonic).cos() * cfg.drift_accel,
    );
    d.pos += d.vel * dt * cfg.velocity_scale;

    let r = bubble.radius;
    let nx = clamp_axis(d.pos.x, r, bounds.width);
    let ny = clamp_axis(d.pos.y, r, bounds.height);
    if nx != d.pos.x {
        d.vel.x = -d.vel.x;
    }
    if ny != d.pos.y {
        d.vel.y = -d.vel.y;
    }
    d.pos = Vec2::new(nx, ny);
    true
}

/// Advance every non-frozen bubble with the same `dt`.
/// Does nothing until bounds are known. Returns how many bubbles moved.
pub fn step_field<'a>(
    bubbles: impl Iterator<Item = &'a mut Bubble>,
    dt: f32,
    bounds: Bounds,
    cfg: &MotionConfig,
) -> usize {
    if !bounds.is_ready() {
        return 0;
    }
    bubbles
        .map(|b| step_bubble(b, dt, bounds, cfg))
        .filter(|moved| *moved)
        .count()
}
