// extensions/tween.rs
//
// Time-based interpolation of a single value.
// Owned by whatever animates (a bubble's breathing, the detail view);
// there is no global tween registry, so dropping the owner stops the tween.
//
// Usage:
//   let mut t = Tween::new(origin, target, 0.32, Easing::CubicOut);
//   let rect = t.tick(dt);

use crate::api::types::Rect;
use super::easing::{Easing, lerp};

/// A value that can be interpolated by a tween.
pub trait Tweenable: Copy {
    fn interpolate(from: Self, to: Self, t: f32) -> Self;
}

impl Tweenable for f32 {
    fn interpolate(from: Self, to: Self, t: f32) -> Self {
        lerp(from, to, t)
    }
}

impl Tweenable for Rect {
    fn interpolate(from: Self, to: Self, t: f32) -> Self {
        Rect {
            x: lerp(from.x, to.x, t),
            y: lerp(from.y, to.y, t),
            width: lerp(from.width, to.width, t),
            height: lerp(from.height, to.height, t),
        }
    }
}

/// What happens when a tween reaches its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TweenLoop {
    /// Hold the end value.
    #[default]
    Once,
    /// Reverse direction (ping-pong).
    PingPong,
}

#[derive(Debug, Clone)]
pub struct Tween<T: Tweenable> {
    from: T,
    to: T,
    /// Duration of one pass in seconds.
    duration: f32,
    elapsed: f32,
    easing: Easing,
    loop_mode: TweenLoop,
    /// For ping-pong: current direction (true = from -> to).
    forward: bool,
}

impl<T: Tweenable> Tween<T> {
    pub fn new(from: T, to: T, duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: 0.0,
            easing,
            loop_mode: TweenLoop::Once,
            forward: true,
        }
    }

    pub fn with_loop(mut self, mode: TweenLoop) -> Self {
        self.loop_mode = mode;
        self
    }

    /// Advance time and return the current value.
    pub fn tick(&mut self, dt: f32) -> T {
        self.elapsed += dt.max(0.0);

        if self.duration > 0.0 && self.elapsed >= self.duration {
            match self.loop_mode {
                TweenLoop::Once => {
                    self.elapsed = self.duration;
                }
                TweenLoop::PingPong => {
                    self.elapsed %= self.duration;
                    self.forward = !self.forward;
                }
            }
        }

        self.value()
    }

    /// Current value without advancing.
    pub fn value(&self) -> T {
        let raw_t = self.progress();
        let t = if self.forward { raw_t } else { 1.0 - raw_t };
        T::interpolate(self.from, self.to, self.easing.apply(t))
    }

    /// Normalized progress of the current pass [0, 1].
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    /// Whether a `Once` tween has reached its end value.
    pub fn is_complete(&self) -> bool {
        self.loop_mode == TweenLoop::Once && self.progress() >= 1.0
    }
}
