use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;

/// A `keydown` listener on `window` that fires for Escape only.
/// The listener is removed when this is dropped.
pub struct EscapeListener {
    window: web_sys::Window,
    closure: Closure<dyn FnMut(KeyboardEvent)>,
}

impl EscapeListener {
    pub fn attach(mut on_escape: impl FnMut() + 'static) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        let closure = Closure::wrap(Box::new(move |event: KeyboardEvent| {
            if event.key() == "Escape" {
                on_escape();
            }
        }) as Box<dyn FnMut(KeyboardEvent)>);

        window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        Ok(Self { window, closure })
    }
}

impl Drop for EscapeListener {
    fn drop(&mut self) {
        if let Err(e) = self
            .window
            .remove_event_listener_with_callback("keydown", self.closure.as_ref().unchecked_ref())
        {
            log::warn!("wishwall: failed to remove keydown listener: {:?}", e);
        }
    }
}
