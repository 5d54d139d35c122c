//! Input event registration
//!
//! Listeners live for the whole page, so their closures are leaked with
//! `forget()`; page teardown is the only cleanup.

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Event, EventTarget, MouseEvent, TouchEvent};

/// Attach `handler` to `event_type` on `target` for the page lifetime
pub fn listen(
    target: &EventTarget,
    event_type: &str,
    passive: bool,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    let options = AddEventListenerOptions::new();
    options.set_passive(passive);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        event_type,
        closure.as_ref().unchecked_ref(),
        &options,
    )?;
    closure.forget();
    Ok(())
}

/// Viewport position of a mouse event
pub fn mouse_point(event: &Event) -> Option<Vec2> {
    let event = event.dyn_ref::<MouseEvent>()?;
    Some(Vec2::new(event.client_x() as f32, event.client_y() as f32))
}

/// Viewport position of a touch event's first contact point, if any
pub fn touch_point(event: &Event) -> Option<Vec2> {
    event
        .dyn_ref::<TouchEvent>()?
        .touches()
        .get(0)
        .map(|t| Vec2::new(t.client_x() as f32, t.client_y() as f32))
}
