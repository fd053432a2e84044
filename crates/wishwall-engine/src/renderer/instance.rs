use bytemuck::{Pod, Zeroable};

use crate::components::bubble::Bubble;
use crate::interaction::detail::DetailView;

/// Per-bubble transform read by the JS renderer.
/// Wire format: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BubbleInstance {
    /// Centre X in container pixels.
    pub x: f32,
    /// Centre Y in container pixels.
    pub y: f32,
    /// Unscaled radius.
    pub radius: f32,
    /// Breathing times hover/press scale.
    pub scale: f32,
    /// Tilt in radians.
    pub rotation: f32,
    /// Tint variant (0, 1, 2).
    pub tint: f32,
    /// 0 = idle, 1 = hovered, 2 = pressed.
    pub state: f32,
    /// 1 when this bubble's wish is the open selection.
    pub selected: f32,
}

impl BubbleInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn from_bubble(bubble: &Bubble, selected: bool) -> Self {
        let state = if bubble.is_pressed() {
            2.0
        } else if bubble.is_hovered() {
            1.0
        } else {
            0.0
        };
        Self {
            x: bubble.drift.pos.x,
            y: bubble.drift.pos.y,
            radius: bubble.radius,
            scale: bubble.scale(),
            rotation: bubble.rotation(),
            tint: bubble.tint.as_f32(),
            state,
            selected: if selected { 1.0 } else { 0.0 },
        }
    }
}

/// Detail view geometry for the current frame. Wire format: 8 floats.
/// All zeros (phase 0) means no detail view is visible.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct DetailInstance {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// 0 = collapsed onto the bubble, 1 = fully open.
    pub amount: f32,
    pub backdrop_alpha: f32,
    /// 0 hidden, 1 opening, 2 shown, 3 closing.
    pub phase: f32,
    /// Index of the originating bubble in this frame, or -1.
    pub bubble_index: f32,
}

impl DetailInstance {
    pub const FLOATS: usize = 8;

    pub fn from_view(view: &DetailView, bubble_index: Option<usize>) -> Self {
        let rect = view.rect();
        Self {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            amount: view.amount(),
            backdrop_alpha: view.backdrop_alpha(),
            phase: view.phase().as_f32(),
            bubble_index: bubble_index.map(|i| i as f32).unwrap_or(-1.0),
        }
    }
}

/// Everything the renderer needs for one frame.
pub struct FrameBuffer {
    pub bubbles: Vec<BubbleInstance>,
    pub detail: DetailInstance,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bubbles: Vec::with_capacity(capacity),
            detail: DetailInstance::default(),
        }
    }

    pub fn clear(&mut self) {
        self.bubbles.clear();
        self.detail = DetailInstance::default();
    }

    pub fn push(&mut self, instance: BubbleInstance) {
        self.bubbles.push(instance);
    }

    pub fn bubble_count(&self) -> u32 {
        self.bubbles.len() as u32
    }

    /// Raw pointer to bubble data for zero-copy reads from JS.
    pub fn bubbles_ptr(&self) -> *const f32 {
        self.bubbles.as_ptr() as *const f32
    }

    pub fn detail_ptr(&self) -> *const f32 {
        &self.detail as *const DetailInstance as *const f32
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
