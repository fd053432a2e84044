use std::rc::Rc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::types::{Rect, Wish};
use crate::extensions::{Easing, Spring, SpringParams, Tween, TweenLoop};

/// Cosmetic colour variant, assigned from creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    Cyan,
    Violet,
    Rose,
}

impl Tint {
    pub const COUNT: usize = 3;

    pub fn from_index(index: usize) -> Self {
        match index % Self::COUNT {
            0 => Tint::Cyan,
            1 => Tint::Violet,
            _ => Tint::Rose,
        }
    }

    /// Wire value written into the render instance.
    pub fn as_f32(self) -> f32 {
        match self {
            Tint::Cyan => 0.0,
            Tint::Violet => 1.0,
            Tint::Rose => 2.0,
        }
    }
}

/// Mutable drift state, advanced by the motion system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drift {
    /// Centre of the bubble in container pixels.
    pub pos: Vec2,
    pub vel: Vec2,
    /// Oscillator phase in radians; grows monotonically.
    pub phase: f32,
}

/// Scale targets the press spring chases while the pointer is on a bubble.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionScale {
    pub hover: f32,
    pub press: f32,
}

impl Default for InteractionScale {
    fn default() -> Self {
        Self {
            hover: 1.06,
            press: 0.985,
        }
    }
}

/// Slow scale/tilt oscillation. Runs on its own clock and ignores
/// hover/press entirely.
#[derive(Debug, Clone)]
pub struct Breath {
    scale: Tween<f32>,
    rotation: Tween<f32>,
}

impl Breath {
    /// `scale_period` and `rotation_period` are full out-and-back cycles
    /// in seconds; `base_tilt` and `tilt_swing` are radians.
    pub fn new(
        scale_period: f32,
        scale_swing: f32,
        rotation_period: f32,
        base_tilt: f32,
        tilt_swing: f32,
    ) -> Self {
        Self {
            scale: Tween::new(1.0, 1.0 + scale_swing, scale_period * 0.5, Easing::SineInOut)
                .with_loop(TweenLoop::PingPong),
            rotation: Tween::new(base_tilt, base_tilt + tilt_swing, rotation_period * 0.5, Easing::SineInOut)
                .with_loop(TweenLoop::PingPong),
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.scale.tick(dt);
        self.rotation.tick(dt);
    }

    pub fn scale(&self) -> f32 {
        self.scale.value()
    }

    pub fn rotation(&self) -> f32 {
        self.rotation.value()
    }
}

/// One floating wish. Owns its drift, breathing and interaction state;
/// the wish itself is shared and never touched.
#[derive(Debug, Clone)]
pub struct Bubble {
    pub wish: Rc<Wish>,
    pub radius: f32,
    pub tint: Tint,
    pub drift: Drift,
    pub breath: Breath,
    hovered: bool,
    pressed: bool,
    press_scale: Spring,
    targets: InteractionScale,
}

impl Bubble {
    pub fn new(
        wish: Rc<Wish>,
        radius: f32,
        tint: Tint,
        drift: Drift,
        breath: Breath,
        spring: SpringParams,
        targets: InteractionScale,
    ) -> Self {
        Self {
            wish,
            radius,
            tint,
            drift,
            breath,
            hovered: false,
            pressed: false,
            press_scale: Spring::new(1.0, spring),
            targets,
        }
    }

    /// Render key: the source wish's id.
    pub fn id(&self) -> &str {
        &self.wish.id
    }

    pub fn pos(&self) -> Vec2 {
        self.drift.pos
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Drift is suspended while the pointer rests on or presses the bubble.
    pub fn is_frozen(&self) -> bool {
        self.hovered || self.pressed
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
        self.retarget();
    }

    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
        self.retarget();
    }

    fn retarget(&mut self) {
        let target = if self.pressed {
            self.targets.press
        } else if self.hovered {
            self.targets.hover
        } else {
            1.0
        };
        self.press_scale.set_target(target);
    }

    /// Advance breathing and the press spring. Never gated by interaction.
    pub fn tick_visuals(&mut self, dt: f32) {
        self.breath.tick(dt);
        self.press_scale.step(dt);
    }

    /// Rendered scale: breathing times interaction.
    pub fn scale(&self) -> f32 {
        self.breath.scale() * self.press_scale.value()
    }

    pub fn rotation(&self) -> f32 {
        self.breath.rotation()
    }

    /// On-screen rectangle, the origin of the detail transition.
    pub fn screen_rect(&self) -> Rect {
        Rect::around_circle(self.drift.pos, self.radius * self.scale())
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.drift.pos.distance_squared(point) <= (self.radius * self.scale()).powi(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bubble_at(pos: Vec2, radius: f32) -> Bubble {
        let wish = Rc::new(Wish {
            id: "w1".into(),
            name: "Asha".into(),
            message: "Happy New Year".into(),
            created_at: 0,
        });
        Bubble::new(
            wish,
            radius,
            Tint::from_index(4),
            Drift { pos, vel: Vec2::ZERO, phase: 0.0 },
            Breath::new(5.0, 0.02, 12.0, 0.0, 0.1),
            SpringParams::default(),
            InteractionScale::default(),
        )
    }

    #[test]
    fn tint_cycles_over_three() {
        assert_eq!(Tint::from_index(0), Tint::Cyan);
        assert_eq!(Tint::from_index(4), Tint::Violet);
        assert_eq!(Tint::from_index(5), Tint::Rose);
    }

    #[test]
    fn hover_or_press_freezes() {
        let mut b = bubble_at(Vec2::new(100.0, 100.0), 50.0);
        assert!(!b.is_frozen());
        b.set_hovered(true);
        assert!(b.is_frozen());
        b.set_hovered(false);
        b.set_pressed(true);
        assert!(b.is_frozen());
    }

    #[test]
    fn hover_grows_scale() {
        let mut b = bubble_at(Vec2::new(100.0, 100.0), 50.0);
        b.set_hovered(true);
        for _ in 0..120 {
            b.tick_visuals(1.0 / 60.0);
        }
        assert!(b.scale() > 1.04, "scale {}", b.scale());
    }

    #[test]
    fn breathing_runs_while_frozen() {
        let mut b = bubble_at(Vec2::new(100.0, 100.0), 50.0);
        b.set_pressed(true);
        let before = b.rotation();
        b.tick_visuals(1.0);
        assert_ne!(before, b.rotation());
    }

    #[test]
    fn hit_test_uses_radius() {
        let b = bubble_at(Vec2::new(100.0, 100.0), 50.0);
        assert!(b.contains(Vec2::new(140.0, 100.0)));
        assert!(!b.contains(Vec2::new(160.0, 100.0)));
    }
}
