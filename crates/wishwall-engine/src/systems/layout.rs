//! Bubble layout: turns the newest wishes plus the container size into a
//! freshly randomized set of bubbles. The whole set is rebuilt on every
//! data or bounds change; nothing is patched incrementally.

use std::f32::consts::TAU;
use std::rc::Rc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::types::{Bounds, Wish};
use crate::components::bubble::{Bubble, Drift, InteractionScale, Tint};
use crate::core::rng::Rng;
use crate::extensions::SpringParams;
use crate::systems::breathing::BreathConfig;

/// Radius multiplier applied when the container is narrower than `below`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeBreakpoint {
    pub below: f32,
    pub scale: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Only the newest this-many wishes get a bubble.
    pub max_bubbles: usize,
    /// Gap kept between a bubble's edge and the container edge at spawn.
    pub padding: f32,
    pub base_radius: f32,
    /// Radius growth per position within a cycle.
    pub radius_step: f32,
    pub radius_cycle: usize,
    pub jitter_min: f32,
    pub jitter_max: f32,
    /// Checked in order; the first matching breakpoint wins.
    pub breakpoints: Vec<SizeBreakpoint>,
    /// Initial velocity per axis is drawn from [-initial_speed, initial_speed).
    pub initial_speed: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_bubbles: 40,
            padding: 18.0,
            base_radius: 52.0,
            radius_step: 5.0,
            radius_cycle: 7,
            jitter_min: -2.0,
            jitter_max: 10.0,
            breakpoints: vec![
                SizeBreakpoint { below: 420.0, scale: 0.86 },
                SizeBreakpoint { below: 640.0, scale: 0.92 },
            ],
            initial_speed: 12.0,
        }
    }
}

impl LayoutConfig {
    /// Radius scale for a container of the given width.
    pub fn size_scale(&self, width: f32) -> f32 {
        self.breakpoints
            .iter()
            .find(|bp| width < bp.below)
            .map(|bp| bp.scale)
            .unwrap_or(1.0)
    }
}

/// Everything a seeded bubble copies out of the wall configuration.
#[derive(Debug, Clone, Copy)]
pub struct BubbleStyle<'a> {
    pub layout: &'a LayoutConfig,
    pub breath: &'a BreathConfig,
    pub spring: SpringParams,
    pub interaction_scale: InteractionScale,
}

/// Clamp one coordinate so a circle of `radius` stays inside `[0, extent]`.
/// Returns the clamped value; if the extent can't hold the circle at all,
/// the midpoint is used instead of an inverted range.
pub fn clamp_axis(value: f32, radius: f32, extent: f32) -> f32 {
    let lo = radius;
    let hi = extent - radius;
    if hi < lo {
        extent * 0.5
    } else {
        value.clamp(lo, hi)
    }
}

fn spawn_axis(rng: &mut Rng, radius: f32, padding: f32, extent: f32) -> f32 {
    let min = padding + radius;
    let free = extent - min * 2.0;
    let raw = if free > 0.0 { min + rng.next_f32() * free } else { min };
    clamp_axis(raw, radius, extent)
}

/// Build the bubble set for `wishes` (newest first) inside `bounds`.
/// Returns nothing until the bounds are real.
pub fn seed(wishes: &[Rc<Wish>], bounds: Bounds, style: BubbleStyle<'_>, rng: &mut Rng) -> Vec<Bubble> {
    if !bounds.is_ready() {
        return Vec::new();
    }

    let cfg = style.layout;
    let size_k = cfg.size_scale(bounds.width);
    let cycle = cfg.radius_cycle.max(1);

    wishes
        .iter()
        .take(cfg.max_bubbles)
        .enumerate()
        .map(|(i, wish)| {
            let base = cfg.base_radius
                + (i % cycle) as f32 * cfg.radius_step
                + rng.range(cfg.jitter_min, cfg.jitter_max);
            let radius = (base * size_k).round().max(1.0);

            let pos = Vec2::new(
                spawn_axis(rng, radius, cfg.padding, bounds.width),
                spawn_axis(rng, radius, cfg.padding, bounds.height),
            );
            let vel = Vec2::new(
                rng.range(-cfg.initial_speed, cfg.initial_speed),
                rng.range(-cfg.initial_speed, cfg.initial_speed),
            );
            let phase = rng.next_f32() * TAU;

            Bubble::new(
                Rc::clone(wish),
                radius,
                Tint::from_index(i),
                Drift { pos, vel, phase },
                style.breath.roll(rng),
                style.spring,
                style.interaction_scale,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wishes(n: usize) -> Vec<Rc<Wish>> {
        (0..n)
            .map(|i| {
                Rc::new(Wish {
                    id: format!("w{}", i),
                    name: format!("name {}", i),
                    message: "hello".into(),
                    created_at: i as u64,
                })
            })
            .collect()
    }

    fn seed_with(n: usize, bounds: Bounds) -> Vec<Bubble> {
        let layout = LayoutConfig::default();
        let breath = BreathConfig::default();
        let style = BubbleStyle {
            layout: &layout,
            breath: &breath,
            spring: SpringParams::default(),
            interaction_scale: InteractionScale::default(),
        };
        seed(&wishes(n), bounds, style, &mut Rng::new(99))
    }

    #[test]
    fn one_bubble_per_wish_up_to_cap() {
        let bounds = Bounds::new(1200.0, 600.0);
        assert_eq!(seed_with(0, bounds).len(), 0);
        assert_eq!(seed_with(7, bounds).len(), 7);
        assert_eq!(seed_with(40, bounds).len(), 40);
    }

    #[test]
    fn cap_keeps_newest_prefix() {
        let bubbles = seed_with(55, Bounds::new(1200.0, 600.0));
        assert_eq!(bubbles.len(), 40);
        for (i, b) in bubbles.iter().enumerate() {
            assert_eq!(b.id(), format!("w{}", i));
        }
    }

    #[test]
    fn zero_bounds_yield_nothing() {
        assert!(seed_with(10, Bounds::new(0.0, 600.0)).is_empty());
        assert!(seed_with(10, Bounds::new(600.0, 0.0)).is_empty());
    }

    #[test]
    fn spawn_inside_padding() {
        let bounds = Bounds::new(1200.0, 600.0);
        for b in seed_with(40, bounds) {
            let r = b.radius;
            assert!(b.pos().x >= 18.0 + r && b.pos().x <= bounds.width - 18.0 - r);
            assert!(b.pos().y >= 18.0 + r && b.pos().y <= bounds.height - 18.0 - r);
        }
    }

    #[test]
    fn radius_follows_cycle_and_breakpoints() {
        let wide = seed_with(14, Bounds::new(1200.0, 600.0));
        for (i, b) in wide.iter().enumerate() {
            let base = 52.0 + (i % 7) as f32 * 5.0;
            assert!(b.radius >= (base - 2.0).round() && b.radius <= (base + 10.0).round());
        }

        let narrow = seed_with(1, Bounds::new(400.0, 600.0));
        assert!(narrow[0].radius <= (62.0f32 * 0.86).round());
    }

    #[test]
    fn tints_cycle_by_index() {
        let bubbles = seed_with(6, Bounds::new(1200.0, 600.0));
        let tints: Vec<Tint> = bubbles.iter().map(|b| b.tint).collect();
        assert_eq!(
            tints,
            vec![Tint::Cyan, Tint::Violet, Tint::Rose, Tint::Cyan, Tint::Violet, Tint::Rose]
        );
    }

    #[test]
    fn tiny_viewport_clamps_to_midpoint() {
        let bounds = Bounds::new(40.0, 30.0);
        for b in seed_with(3, bounds) {
            assert_eq!(b.pos(), Vec2::new(20.0, 15.0));
        }
    }

    #[test]
    fn clamp_axis_handles_inverted_range() {
        assert_eq!(clamp_axis(-5.0, 10.0, 100.0), 10.0);
        assert_eq!(clamp_axis(95.0, 10.0, 100.0), 90.0);
        assert_eq!(clamp_axis(3.0, 60.0, 100.0), 50.0);
    }

    #[test]
    fn size_scale_breakpoints() {
        let cfg = LayoutConfig::default();
        assert_eq!(cfg.size_scale(419.0), 0.86);
        assert_eq!(cfg.size_scale(420.0), 0.92);
        assert_eq!(cfg.size_scale(639.0), 0.92);
        assert_eq!(cfg.size_scale(640.0), 1.0);
    }
}
