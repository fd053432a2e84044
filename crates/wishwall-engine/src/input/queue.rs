/// Key code the host forwards for Escape.
pub const KEY_ESCAPE: u32 = 27;

/// Actions raised by buttons in the host's detail overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    /// The detail view's close button.
    Close,
    /// The detail view's copy button.
    Copy,
}

/// Input events the wall understands, in container pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f32, y: f32 },
    PointerUp { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    /// The pointer left the container.
    PointerLeave,
    KeyDown { key_code: u32 },
    /// The container was measured (or re-measured).
    Resize { width: f32, height: f32 },
    Ui(UiAction),
}

/// A queue of input events.
/// The host pushes events as they arrive; the wall drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events in arrival order.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
