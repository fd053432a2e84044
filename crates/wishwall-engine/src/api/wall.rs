use std::rc::Rc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::types::{Bounds, WallEvent, Wish};
use crate::components::bubble::InteractionScale;
use crate::core::rng::Rng;
use crate::core::scene::BubbleField;
use crate::core::time::FrameClock;
use crate::extensions::SpringParams;
use crate::input::queue::{InputEvent, InputQueue, UiAction};
use crate::interaction::detail::DetailConfig;
use crate::interaction::selection::{DismissReason, PointerOutcome, SelectionController};
use crate::renderer::instance::FrameBuffer;
use crate::systems::breathing::{tick_breathing, BreathConfig};
use crate::systems::layout::{self, BubbleStyle, LayoutConfig};
use crate::systems::motion::{step_field, MotionConfig};
use crate::systems::render::build_frame;

/// Every tunable of the wall. All fields default, so a partial JSON
/// document only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WallConfig {
    pub layout: LayoutConfig,
    pub motion: MotionConfig,
    pub breath: BreathConfig,
    pub detail: DetailConfig,
    pub spring: SpringParams,
    pub interaction_scale: InteractionScale,
    /// Maximum wall events per frame (default: 32).
    pub max_events: usize,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            motion: MotionConfig::default(),
            breath: BreathConfig::default(),
            detail: DetailConfig::default(),
            spring: SpringParams::default(),
            interaction_scale: InteractionScale::default(),
            max_events: 32,
        }
    }
}

impl WallConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// The wish wall: bubble field, selection and detail view, driven one
/// frame at a time by the host.
///
/// The bubble set is rebuilt from scratch whenever the wish list or the
/// container size changes. Until the container has a real size the wall
/// holds no bubbles and every tick is a no-op apart from the clock.
pub struct WishWall {
    config: WallConfig,
    wishes: Vec<Rc<Wish>>,
    bounds: Bounds,
    field: BubbleField,
    selection: SelectionController,
    clock: FrameClock,
    rng: Rng,
    events: Vec<WallEvent>,
    frame: FrameBuffer,
    /// Wish id of the bubble under an unreleased pointer press.
    pressed: Option<String>,
}

impl WishWall {
    pub fn new(config: WallConfig, seed: u64) -> Self {
        Self {
            wishes: Vec::new(),
            bounds: Bounds::default(),
            field: BubbleField::new(),
            selection: SelectionController::new(config.detail.clone()),
            clock: FrameClock::new(config.motion.max_dt),
            rng: Rng::new(seed),
            events: Vec::with_capacity(config.max_events),
            frame: FrameBuffer::with_capacity(config.layout.max_bubbles),
            pressed: None,
            config,
        }
    }

    /// Replace the wish list (newest first) and rebuild the field.
    pub fn set_wishes(&mut self, wishes: Vec<Wish>) {
        self.wishes = wishes.into_iter().map(Rc::new).collect();
        self.reseed();
    }

    /// Parse and apply a wish list.
    /// On error the current wishes are left alone.
    pub fn set_wishes_json(&mut self, json: &str) -> Result<usize, serde_json::Error> {
        let wishes = Wish::list_from_json(json)?;
        let count = wishes.len();
        self.set_wishes(wishes);
        Ok(count)
    }

    /// A freshly created wish goes to the front and the field is rebuilt.
    pub fn push_wish(&mut self, wish: Wish) {
        self.wishes.insert(0, Rc::new(wish));
        self.reseed();
    }

    /// Container measured. A size change rebuilds the field and re-centres
    /// any visible detail view.
    pub fn resize(&mut self, width: f32, height: f32) {
        let bounds = Bounds::new(width, height);
        if !bounds.is_ready() {
            log::warn!("wall: unusable container size {}x{}", width, height);
        }
        if bounds == self.bounds {
            return;
        }
        self.bounds = bounds;
        self.reseed();
        self.selection.resize(bounds);
    }

    fn reseed(&mut self) {
        let style = BubbleStyle {
            layout: &self.config.layout,
            breath: &self.config.breath,
            spring: self.config.spring,
            interaction_scale: self.config.interaction_scale,
        };
        let bubbles = layout::seed(&self.wishes, self.bounds, style, &mut self.rng);
        let count = bubbles.len();
        self.field.replace(bubbles);
        self.pressed = None;
        log::debug!(
            "wall: seeded {} bubbles from {} wishes in {}x{}",
            count,
            self.wishes.len(),
            self.bounds.width,
            self.bounds.height
        );
        self.emit(WallEvent::new(WallEvent::FIELD_RESEEDED, count as f32));
    }

    /// Open the detail view for the bubble showing wish `id`.
    /// Replaces whatever is open. Returns false if no such bubble exists.
    pub fn select(&mut self, id: &str) -> bool {
        let Some(index) = self.field.index_of(id) else {
            return false;
        };
        let Some(bubble) = self.field.at(index) else {
            return false;
        };
        let wish = Rc::clone(&bubble.wish);
        let origin = bubble.screen_rect();
        self.selection.open(wish, origin, self.bounds);
        self.field.release_all();
        self.pressed = None;
        self.emit(WallEvent::new(WallEvent::SELECTION_OPENED, index as f32));
        true
    }

    /// Close the open selection, if any.
    pub fn dismiss(&mut self, reason: DismissReason) -> bool {
        let closed = self.selection.dismiss(reason);
        if closed {
            self.emit(WallEvent::new(WallEvent::SELECTION_CLOSED, reason.code()));
        }
        closed
    }

    /// Apply every queued input event in arrival order.
    pub fn handle_input(&mut self, input: &mut InputQueue) {
        for event in input.drain() {
            self.handle(event);
        }
    }

    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { x, y } => self.pointer_down(Vec2::new(x, y)),
            InputEvent::PointerUp { x, y } => self.pointer_up(Vec2::new(x, y)),
            InputEvent::PointerMove { x, y } => self.pointer_move(Vec2::new(x, y)),
            InputEvent::PointerLeave => {
                self.field.release_all();
                self.pressed = None;
            }
            InputEvent::KeyDown { key_code } => {
                if let Some(reason) = self.selection.key_down(key_code) {
                    self.emit(WallEvent::new(WallEvent::SELECTION_CLOSED, reason.code()));
                }
            }
            InputEvent::Resize { width, height } => self.resize(width, height),
            InputEvent::Ui(UiAction::Close) => {
                self.dismiss(DismissReason::CloseAction);
            }
            InputEvent::Ui(UiAction::Copy) => {
                if self.selection.is_open() {
                    self.emit(WallEvent::new(WallEvent::COPY_REQUESTED, 0.0));
                }
            }
        }
    }

    fn pointer_down(&mut self, point: Vec2) {
        match self.selection.pointer_down(point) {
            PointerOutcome::PassThrough => {}
            PointerOutcome::InsideDetail => return,
            PointerOutcome::Dismissed => {
                self.emit(WallEvent::new(
                    WallEvent::SELECTION_CLOSED,
                    DismissReason::OutsideClick.code(),
                ));
                return;
            }
        }
        if let Some(bubble) = self.field.hit_test(point).and_then(|i| self.field.at_mut(i)) {
            bubble.set_pressed(true);
            self.pressed = Some(bubble.id().to_string());
        }
    }

    fn pointer_up(&mut self, point: Vec2) {
        let Some(id) = self.pressed.take() else {
            return;
        };
        let released_on_same = match self.field.get_mut(&id) {
            Some(bubble) => {
                bubble.set_pressed(false);
                bubble.contains(point)
            }
            None => false,
        };
        if released_on_same {
            self.select(&id);
        }
    }

    fn pointer_move(&mut self, point: Vec2) {
        if self.selection.detail().is_some() {
            return;
        }
        let hovered = self.field.hit_test(point);
        for (i, bubble) in self.field.iter_mut().enumerate() {
            let over = hovered == Some(i);
            if bubble.is_hovered() != over {
                bubble.set_hovered(over);
            }
        }
    }

    /// Advance one frame: drift, breathing, detail transition, then publish.
    pub fn tick(&mut self, frame_dt: f32) {
        let dt = self.clock.advance(frame_dt);

        if !self.field.is_empty() {
            step_field(self.field.iter_mut(), dt, self.bounds, &self.config.motion);
        }
        tick_breathing(self.field.iter_mut(), dt);

        if self.selection.tick(dt) {
            self.emit(WallEvent::new(WallEvent::DETAIL_HIDDEN, 0.0));
        }

        build_frame(&self.field, &self.selection, &mut self.frame);
    }

    fn emit(&mut self, event: WallEvent) {
        if self.events.len() >= self.config.max_events {
            log::warn!("wall: event buffer full, dropping kind {}", event.kind);
            return;
        }
        self.events.push(event);
    }

    /// Clear per-frame transient data (events).
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }

    pub fn events(&self) -> &[WallEvent] {
        &self.events
    }

    pub fn selected_wish(&self) -> Option<&Rc<Wish>> {
        self.selection.selected_wish()
    }

    /// Clipboard text for the open wish.
    pub fn copy_text(&self) -> Option<String> {
        self.selection.copy_text()
    }

    pub fn wishes(&self) -> &[Rc<Wish>] {
        &self.wishes
    }

    pub fn field(&self) -> &BubbleField {
        &self.field
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn frames(&self) -> u64 {
        self.clock.frames()
    }

    pub fn config(&self) -> &WallConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::queue::KEY_ESCAPE;
    use crate::interaction::selection::Selection;

    fn wishes(n: usize) -> Vec<Wish> {
        (0..n)
            .map(|i| Wish {
                id: format!("w{}", i),
                name: format!("name {}", i),
                message: format!("message {}", i),
                created_at: 1_000 + i as u64,
            })
            .collect()
    }

    fn wall(n: usize) -> WishWall {
        let mut wall = WishWall::new(WallConfig::default(), 7);
        wall.resize(1200.0, 800.0);
        wall.set_wishes(wishes(n));
        wall.clear_frame_data();
        wall
    }

    fn kinds(wall: &WishWall) -> Vec<f32> {
        wall.events().iter().map(|e| e.kind).collect()
    }

    /// Press and release on the topmost bubble at bubble `index`'s centre.
    /// Returns the index that actually got the click.
    fn click_bubble(wall: &mut WishWall, index: usize) -> usize {
        let p = wall.field().at(index).unwrap().pos();
        let hit = wall.field().hit_test(p).unwrap();
        wall.handle(InputEvent::PointerDown { x: p.x, y: p.y });
        wall.handle(InputEvent::PointerUp { x: p.x, y: p.y });
        hit
    }

    #[test]
    fn zero_bounds_is_inert() {
        let mut wall = WishWall::new(WallConfig::default(), 1);
        wall.set_wishes(wishes(5));
        assert!(wall.field().is_empty());
        for _ in 0..10 {
            wall.tick(0.016);
        }
        assert_eq!(wall.frame().bubble_count(), 0);
        assert_eq!(wall.frames(), 10);
    }

    #[test]
    fn reseed_caps_and_reports_count() {
        let mut wall = WishWall::new(WallConfig::default(), 3);
        wall.resize(800.0, 600.0);
        wall.set_wishes(wishes(55));
        assert_eq!(wall.field().len(), 40);
        let last = wall.events().last().unwrap();
        assert_eq!(last.kind, WallEvent::FIELD_RESEEDED);
        assert_eq!(last.a, 40.0);

        wall.push_wish(Wish {
            id: "new".into(),
            name: "Asha".into(),
            message: "Happy New Year".into(),
            created_at: 9_999,
        });
        assert_eq!(wall.field().len(), 40);
        assert_eq!(wall.field().at(0).unwrap().id(), "new");
        assert_eq!(wall.wishes().len(), 56);
    }

    #[test]
    fn resize_to_same_size_keeps_field() {
        let mut wall = wall(3);
        let before = wall.field().at(0).unwrap().pos();
        wall.resize(1200.0, 800.0);
        assert!(wall.events().is_empty());
        assert_eq!(wall.field().at(0).unwrap().pos(), before);
    }

    #[test]
    fn click_opens_detail_and_releases_press() {
        let mut wall = wall(6);
        let hit = click_bubble(&mut wall, 2);
        let id = wall.field().at(hit).unwrap().id().to_string();

        assert_eq!(wall.selected_wish().map(|w| w.id.clone()), Some(id));
        assert!(wall.field().iter().all(|b| !b.is_frozen()));
        assert_eq!(kinds(&wall), vec![WallEvent::SELECTION_OPENED]);
        assert_eq!(wall.events()[0].a, hit as f32);
    }

    #[test]
    fn press_then_release_elsewhere_does_not_open() {
        let mut wall = wall(1);
        let p = wall.field().at(0).unwrap().pos();
        wall.handle(InputEvent::PointerDown { x: p.x, y: p.y });
        assert!(wall.field().at(0).unwrap().is_pressed());
        wall.handle(InputEvent::PointerUp { x: -500.0, y: -500.0 });
        assert!(!wall.selection().is_open());
        assert!(!wall.field().at(0).unwrap().is_pressed());
    }

    #[test]
    fn escape_closes_then_detail_hides() {
        let mut wall = wall(4);
        click_bubble(&mut wall, 0);
        wall.tick(0.016);
        wall.clear_frame_data();

        wall.handle(InputEvent::KeyDown { key_code: KEY_ESCAPE });
        assert_eq!(wall.selection().selection(), &Selection::Idle);
        assert_eq!(wall.events()[0].kind, WallEvent::SELECTION_CLOSED);
        assert_eq!(wall.events()[0].a, DismissReason::Escape.code());

        for _ in 0..20 {
            wall.tick(0.032);
        }
        assert!(kinds(&wall).contains(&WallEvent::DETAIL_HIDDEN));
        assert!(wall.selection().detail().is_none());
        assert_eq!(wall.frame().detail.phase, 0.0);
    }

    #[test]
    fn outside_press_dismisses() {
        let mut wall = wall(4);
        click_bubble(&mut wall, 1);
        for _ in 0..20 {
            wall.tick(0.032);
        }
        wall.clear_frame_data();

        wall.handle(InputEvent::PointerDown { x: 600.0, y: 400.0 });
        assert!(wall.selection().is_open());

        wall.handle(InputEvent::PointerDown { x: 2.0, y: 2.0 });
        assert!(!wall.selection().is_open());
        assert_eq!(wall.events()[0].a, DismissReason::OutsideClick.code());
        assert!(wall.field().iter().all(|b| !b.is_pressed()));
    }

    #[test]
    fn only_one_selection_at_a_time() {
        let mut wall = wall(5);
        assert!(wall.select("w1"));
        assert!(wall.select("w3"));
        wall.tick(0.016);

        let selected: Vec<_> = wall.frame().bubbles.iter().filter(|b| b.selected == 1.0).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(wall.selected_wish().unwrap().id, "w3");
        assert!(!wall.select("missing"));
    }

    #[test]
    fn hover_freezes_only_that_bubble() {
        let mut wall = wall(6);
        let p = wall.field().at(3).unwrap().pos();
        wall.handle(InputEvent::PointerMove { x: p.x, y: p.y });
        let hovered = wall.field().hit_test(p).unwrap();
        let before = wall.field().at(hovered).unwrap().drift;

        for _ in 0..120 {
            wall.tick(0.016);
        }
        assert_eq!(wall.field().at(hovered).unwrap().drift, before);
        assert_eq!(wall.field().iter().filter(|b| b.is_hovered()).count(), 1);

        wall.handle(InputEvent::PointerLeave);
        wall.tick(0.016);
        assert_ne!(wall.field().at(hovered).unwrap().drift, before);
    }

    #[test]
    fn hover_ignored_while_detail_visible() {
        let mut wall = wall(3);
        wall.select("w0");
        let p = wall.field().at(1).unwrap().pos();
        wall.handle(InputEvent::PointerMove { x: p.x, y: p.y });
        assert!(wall.field().iter().all(|b| !b.is_hovered()));
    }

    #[test]
    fn copy_only_while_open() {
        let mut wall = wall(2);
        wall.handle(InputEvent::Ui(UiAction::Copy));
        assert!(wall.events().is_empty());
        assert_eq!(wall.copy_text(), None);

        wall.select("w0");
        wall.clear_frame_data();
        wall.handle(InputEvent::Ui(UiAction::Copy));
        assert_eq!(kinds(&wall), vec![WallEvent::COPY_REQUESTED]);
        assert_eq!(wall.copy_text().as_deref(), Some("name 0: message 0"));

        wall.handle(InputEvent::Ui(UiAction::Close));
        assert!(!wall.selection().is_open());
    }

    #[test]
    fn queue_is_drained_in_order() {
        let mut wall = WishWall::new(WallConfig::default(), 11);
        wall.set_wishes(wishes(3));
        let mut queue = InputQueue::new();
        queue.push(InputEvent::Resize { width: 640.0, height: 480.0 });
        queue.push(InputEvent::KeyDown { key_code: KEY_ESCAPE });
        wall.handle_input(&mut queue);

        assert!(queue.is_empty());
        assert_eq!(wall.field().len(), 3);
        assert_eq!(wall.bounds(), Bounds::new(640.0, 480.0));
    }

    #[test]
    fn bad_wish_json_keeps_current_list() {
        let mut wall = wall(3);
        assert!(wall.set_wishes_json("{oops").is_err());
        assert_eq!(wall.field().len(), 3);
        assert_eq!(wall.set_wishes_json(r#"{"wishes":[]}"#).unwrap(), 0);
        assert!(wall.field().is_empty());
    }

    #[test]
    fn numeric_ids_and_bad_records_still_seed() {
        let mut wall = wall(0);
        let json = r#"{"wishes":[
            {"id":7,"name":"Asha","message":"Happy New Year","createdAt":2},
            {"id":"x","name":"Ravi"},
            {"id":"a","name":"Mei","message":"Peace","createdAt":1}
        ]}"#;
        assert_eq!(wall.set_wishes_json(json).unwrap(), 2);
        assert_eq!(wall.field().len(), 2);
        assert!(wall.select("7"));
        assert_eq!(wall.copy_text().as_deref(), Some("Asha: Happy New Year"));
    }

    #[test]
    fn events_are_capped_per_frame() {
        let mut config = WallConfig::default();
        config.max_events = 2;
        let mut wall = WishWall::new(config, 5);
        for i in 0..5 {
            wall.resize(300.0 + i as f32, 300.0);
        }
        assert_eq!(wall.events().len(), 2);
    }

    #[test]
    fn config_from_partial_json() {
        let cfg = WallConfig::from_json(r#"{"maxEvents": 8, "motion": {"damping": 0.5}}"#).unwrap();
        assert_eq!(cfg.max_events, 8);
        assert_eq!(cfg.motion.damping, 0.5);
        assert_eq!(cfg.motion.max_dt, 0.032);
        assert_eq!(cfg.layout.max_bubbles, 40);
    }

    #[test]
    fn bubbles_stay_inside_over_a_long_run() {
        let mut wall = wall(40);
        for _ in 0..2_000 {
            wall.tick(0.05);
        }
        for b in wall.field().iter() {
            assert!(b.pos().x >= b.radius - 1e-3 && b.pos().x <= 1200.0 - b.radius + 1e-3);
            assert!(b.pos().y >= b.radius - 1e-3 && b.pos().y <= 800.0 - b.radius + 1e-3);
        }
    }
}
