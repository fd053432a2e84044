use wishwall_engine::{
    InputEvent, InputQueue, ProtocolLayout, WallConfig, WallEvent, Wish, WishWall,
};

/// Owns the wall and everything the host reads back each frame.
///
/// `lib.rs` keeps one of these in a `thread_local!` slot and exports free
/// functions via `#[wasm_bindgen]` that borrow it.
pub struct WallRunner {
    wall: WishWall,
    input: InputQueue,
    layout: ProtocolLayout,
    /// Events from the last tick, copied out before the wall clears them.
    events: Vec<WallEvent>,
    /// Whole frame packed per `ProtocolLayout`, for single-buffer reads.
    packed: Vec<f32>,
}

impl WallRunner {
    pub fn new(config: WallConfig, seed: u64) -> Self {
        let layout = ProtocolLayout::from_config(&config);
        Self {
            events: Vec::with_capacity(config.max_events),
            packed: vec![0.0; layout.buffer_total_floats],
            wall: WishWall::new(config, seed),
            input: InputQueue::new(),
            layout,
        }
    }

    /// Push an input event into the queue; applied on the next tick.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Replace the wish list. A document that doesn't parse empties the wall.
    pub fn set_wishes_json(&mut self, json: &str) {
        if let Err(e) = self.wall.set_wishes_json(json) {
            log::warn!("wishwall: bad wish list ({}), showing none", e);
            self.wall.set_wishes(Vec::new());
        }
    }

    /// Prepend one freshly created wish. Returns false if it didn't parse.
    pub fn push_wish_json(&mut self, json: &str) -> bool {
        match Wish::from_json(json) {
            Ok(wish) => {
                self.wall.push_wish(wish);
                true
            }
            Err(e) => {
                log::warn!("wishwall: bad wish ({})", e);
                false
            }
        }
    }

    /// Run one frame: apply input, advance the wall, pack the frame.
    pub fn tick(&mut self, dt: f32) {
        self.wall.handle_input(&mut self.input);
        self.wall.tick(dt);

        self.events.clear();
        self.events.extend_from_slice(self.wall.events());
        self.wall.clear_frame_data();

        self.layout.pack(
            &mut self.packed,
            self.wall.frame(),
            &self.events,
            self.wall.frames(),
            self.wall.bounds(),
        );
    }

    pub fn wall(&self) -> &WishWall {
        &self.wall
    }

    pub fn selected_wish_json(&self) -> String {
        self.wall
            .selected_wish()
            .and_then(|wish| serde_json::to_string(wish.as_ref()).ok())
            .unwrap_or_default()
    }

    pub fn copy_text(&self) -> String {
        self.wall.copy_text().unwrap_or_default()
    }

    // ---- Pointer accessors for zero-copy reads ----

    pub fn bubbles_ptr(&self) -> *const f32 {
        self.wall.frame().bubbles_ptr()
    }

    pub fn bubble_count(&self) -> u32 {
        self.wall.frame().bubble_count()
    }

    pub fn detail_ptr(&self) -> *const f32 {
        self.wall.frame().detail_ptr()
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.events.as_ptr() as *const f32
    }

    pub fn events_len(&self) -> u32 {
        self.events.len() as u32
    }

    pub fn buffer_ptr(&self) -> *const f32 {
        self.packed.as_ptr()
    }

    // ---- Capacity accessors ----

    pub fn max_bubbles(&self) -> u32 {
        self.layout.max_bubbles as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}
