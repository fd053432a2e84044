//! Detail view: the selected wish shown full-size, growing out of the
//! bubble that was clicked and shrinking back into it on dismissal.
//!
//! The shared-element effect is explicit: one `amount` value runs 0 -> 1
//! on open and back to 0 on close, and the on-screen rectangle is always
//! `interpolate(origin, target, amount)`. Reversing mid-flight therefore
//! starts from wherever the view currently is.

use std::rc::Rc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::types::{Bounds, Rect, Wish};
use crate::extensions::{Easing, Tween, Tweenable};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DetailConfig {
    pub max_width: f32,
    pub max_height: f32,
    /// Minimum gap between the view and the container edge.
    pub margin: f32,
    pub open_duration: f32,
    pub close_duration: f32,
    pub backdrop_fade: f32,
}

impl Default for DetailConfig {
    fn default() -> Self {
        Self {
            max_width: 576.0,
            max_height: 280.0,
            margin: 24.0,
            open_duration: 0.32,
            close_duration: 0.24,
            backdrop_fade: 0.18,
        }
    }
}

impl DetailConfig {
    /// Resting rectangle of a fully open view, centred in `bounds`.
    pub fn target_rect(&self, bounds: Bounds) -> Rect {
        let width = self.max_width.min(bounds.width - self.margin * 2.0).max(0.0);
        let height = self.max_height.min(bounds.height - self.margin * 2.0).max(0.0);
        Rect::new(
            (bounds.width - width) * 0.5,
            (bounds.height - height) * 0.5,
            width,
            height,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailPhase {
    Opening,
    Shown,
    Closing,
}

impl DetailPhase {
    pub fn as_f32(self) -> f32 {
        match self {
            DetailPhase::Opening => 1.0,
            DetailPhase::Shown => 2.0,
            DetailPhase::Closing => 3.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DetailView {
    wish: Rc<Wish>,
    origin: Rect,
    target: Rect,
    amount: Tween<f32>,
    backdrop: Tween<f32>,
    phase: DetailPhase,
}

impl DetailView {
    /// Start opening from `origin`, the bubble's last on-screen rectangle.
    pub fn open(wish: Rc<Wish>, origin: Rect, bounds: Bounds, cfg: &DetailConfig) -> Self {
        Self {
            wish,
            origin,
            target: cfg.target_rect(bounds),
            amount: Tween::new(0.0, 1.0, cfg.open_duration, Easing::CubicOut),
            backdrop: Tween::new(0.0, 1.0, cfg.backdrop_fade, Easing::Linear),
            phase: DetailPhase::Opening,
        }
    }

    /// Reverse toward the origin from the current state.
    /// Calling it again while already closing changes nothing.
    pub fn close(&mut self, cfg: &DetailConfig) {
        if self.phase == DetailPhase::Closing {
            return;
        }
        self.amount = Tween::new(self.amount.value(), 0.0, cfg.close_duration, Easing::CubicIn);
        self.backdrop = Tween::new(self.backdrop.value(), 0.0, cfg.backdrop_fade, Easing::Linear);
        self.phase = DetailPhase::Closing;
    }

    /// Advance the transition. Returns true once a close has fully finished
    /// and the view can be dropped.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.amount.tick(dt);
        self.backdrop.tick(dt);
        match self.phase {
            DetailPhase::Opening if self.amount.is_complete() => {
                self.phase = DetailPhase::Shown;
                false
            }
            DetailPhase::Closing => self.amount.is_complete() && self.backdrop.is_complete(),
            _ => false,
        }
    }

    /// Container resized: re-centre the resting rectangle.
    pub fn retarget(&mut self, bounds: Bounds, cfg: &DetailConfig) {
        self.target = cfg.target_rect(bounds);
    }

    pub fn rect(&self) -> Rect {
        Rect::interpolate(self.origin, self.target, self.amount.value())
    }

    /// 0 = collapsed onto the bubble, 1 = fully open.
    pub fn amount(&self) -> f32 {
        self.amount.value()
    }

    pub fn backdrop_alpha(&self) -> f32 {
        self.backdrop.value()
    }

    pub fn phase(&self) -> DetailPhase {
        self.phase
    }

    pub fn wish(&self) -> &Rc<Wish> {
        &self.wish
    }

    pub fn origin(&self) -> Rect {
        self.origin
    }

    pub fn copy_text(&self) -> String {
        self.wish.copy_text()
    }

    /// Whether `point` lands on the visible detail surface.
    pub fn surface_contains(&self, point: Vec2) -> bool {
        self.rect().contains(point)
    }
}
