pub mod escape;
pub mod runner;

pub use escape::EscapeListener;
pub use runner::WallRunner;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use wishwall_engine::{InputEvent, UiAction, WallConfig, KEY_ESCAPE};

/// The live wall plus the window listener that belongs to it.
/// Dropping the slot tears both down.
struct Slot {
    runner: WallRunner,
    _escape: Option<EscapeListener>,
}

thread_local! {
    static RUNNER: RefCell<Option<Slot>> = const { RefCell::new(None) };
}

/// Run `f` against the live runner. `None` before `wall_init` or after
/// `wall_destroy`.
fn with_runner<R>(f: impl FnOnce(&mut WallRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.try_borrow_mut().ok()?;
        let slot = borrow.as_mut()?;
        Some(f(&mut slot.runner))
    })
}

fn push(event: InputEvent) {
    if with_runner(|r| r.push_input(event)).is_none() {
        log::warn!("wishwall: input before wall_init()");
    }
}

fn install(config: WallConfig, seed: u32) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let seed = if seed == 0 {
        (js_sys::Math::random() * u32::MAX as f64) as u64 | 1
    } else {
        seed as u64
    };

    // Replacing a live wall drops its listener before the new one attaches.
    let previous = RUNNER.with(|cell| cell.borrow_mut().take());
    drop(previous);

    let escape = match EscapeListener::attach(|| push(InputEvent::KeyDown { key_code: KEY_ESCAPE })) {
        Ok(listener) => Some(listener),
        Err(e) => {
            log::warn!("wishwall: no Escape listener ({:?})", e);
            None
        }
    };

    let slot = Slot {
        runner: WallRunner::new(config, seed),
        _escape: escape,
    };
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(slot);
    });
    log::info!("wishwall: initialized");
}

/// Create the wall with default tuning. A zero seed picks a random one.
#[wasm_bindgen]
pub fn wall_init(seed: u32) {
    install(WallConfig::default(), seed);
}

/// Create the wall from a JSON `WallConfig`; unknown or bad JSON falls
/// back to the defaults.
#[wasm_bindgen]
pub fn wall_init_with_config(config_json: &str, seed: u32) {
    let config = WallConfig::from_json(config_json).unwrap_or_else(|e| {
        log::warn!("wishwall: bad config ({}), using defaults", e);
        WallConfig::default()
    });
    install(config, seed);
}

/// Drop the wall and remove its window listener.
#[wasm_bindgen]
pub fn wall_destroy() {
    let previous = RUNNER.with(|cell| cell.borrow_mut().take());
    if previous.is_some() {
        log::info!("wishwall: destroyed");
    }
}

#[wasm_bindgen]
pub fn wall_set_wishes(json: &str) {
    with_runner(|r| r.set_wishes_json(json));
}

/// Prepend a wish just returned by the store. Returns false if it didn't parse.
#[wasm_bindgen]
pub fn wall_push_wish(json: &str) -> bool {
    with_runner(|r| r.push_wish_json(json)).unwrap_or(false)
}

#[wasm_bindgen]
pub fn wall_resize(width: f32, height: f32) {
    push(InputEvent::Resize { width, height });
}

#[wasm_bindgen]
pub fn wall_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn wall_pointer_down(x: f32, y: f32) {
    push(InputEvent::PointerDown { x, y });
}

#[wasm_bindgen]
pub fn wall_pointer_up(x: f32, y: f32) {
    push(InputEvent::PointerUp { x, y });
}

#[wasm_bindgen]
pub fn wall_pointer_move(x: f32, y: f32) {
    push(InputEvent::PointerMove { x, y });
}

#[wasm_bindgen]
pub fn wall_pointer_leave() {
    push(InputEvent::PointerLeave);
}

#[wasm_bindgen]
pub fn wall_key_down(key_code: u32) {
    push(InputEvent::KeyDown { key_code });
}

#[wasm_bindgen]
pub fn wall_close_detail() {
    push(InputEvent::Ui(UiAction::Close));
}

#[wasm_bindgen]
pub fn wall_copy_detail() {
    push(InputEvent::Ui(UiAction::Copy));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_bubbles_ptr() -> *const f32 {
    with_runner(|r| r.bubbles_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_bubble_count() -> u32 {
    with_runner(|r| r.bubble_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_detail_ptr() -> *const f32 {
    with_runner(|r| r.detail_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_events_ptr() -> *const f32 {
    with_runner(|r| r.events_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_events_len() -> u32 {
    with_runner(|r| r.events_len()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_buffer_ptr() -> *const f32 {
    with_runner(|r| r.buffer_ptr()).unwrap_or(std::ptr::null())
}

/// JSON of the open wish, or an empty string.
#[wasm_bindgen]
pub fn get_selected_wish_json() -> String {
    with_runner(|r| r.selected_wish_json()).unwrap_or_default()
}

/// `"{name}: {message}"` for the open wish, or an empty string.
#[wasm_bindgen]
pub fn get_copy_text() -> String {
    with_runner(|r| r.copy_text()).unwrap_or_default()
}

// ---- Capacity accessors ----

#[wasm_bindgen]
pub fn get_max_bubbles() -> u32 {
    with_runner(|r| r.max_bubbles()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_max_events() -> u32 {
    with_runner(|r| r.max_events()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats()).unwrap_or(0)
}
