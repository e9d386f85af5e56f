// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event bindings.
//!
//! Each binding returns a [`Listener`] guard that unregisters the handler
//! when dropped. Scroll and pointer handlers are registered as passive so
//! they never delay scrolling.

use alloc::boxed::Box;

use kurbo::Point;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Event, EventTarget, HtmlElement, MouseEvent, Window};

use scrollfx_core::time::HostTime;

type Handler = Closure<dyn FnMut(Event)>;

/// A registered event handler; dropping it removes the handler.
pub struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Handler,
}

impl core::fmt::Debug for Listener {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Listener")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

fn listen(
    target: &EventTarget,
    kind: &'static str,
    handler: impl FnMut(Event) + 'static,
) -> Result<Listener, JsValue> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        kind,
        closure.as_ref().unchecked_ref(),
        &options,
    )?;
    Ok(Listener {
        target: target.clone(),
        kind,
        closure,
    })
}

/// Calls `handler` with the window's scroll offset and the event time on
/// every scroll event.
///
/// # Errors
///
/// Fails if the browser rejects the listener.
pub fn on_scroll(
    window: &Window,
    mut handler: impl FnMut(f64, HostTime) + 'static,
) -> Result<Listener, JsValue> {
    let source = window.clone();
    listen(window, "scroll", move |_| {
        if let Ok(offset) = source.scroll_y() {
            handler(offset, crate::now());
        }
    })
}

/// Calls `handler` on every window resize.
///
/// # Errors
///
/// Fails if the browser rejects the listener.
pub fn on_resize(
    window: &Window,
    mut handler: impl FnMut() + 'static,
) -> Result<Listener, JsValue> {
    listen(window, "resize", move |_| handler())
}

/// Calls `handler` with the pointer's viewport position while it moves over
/// `element`.
///
/// # Errors
///
/// Fails if the browser rejects the listener.
pub fn on_pointer_move(
    element: &HtmlElement,
    mut handler: impl FnMut(Point) + 'static,
) -> Result<Listener, JsValue> {
    listen(element, "pointermove", move |event| {
        if let Ok(event) = event.dyn_into::<MouseEvent>() {
            handler(Point::new(
                f64::from(event.client_x()),
                f64::from(event.client_y()),
            ));
        }
    })
}

/// Calls `handler` when the pointer leaves `element`.
///
/// # Errors
///
/// Fails if the browser rejects the listener.
pub fn on_pointer_leave(
    element: &HtmlElement,
    mut handler: impl FnMut() + 'static,
) -> Result<Listener, JsValue> {
    listen(element, "pointerleave", move |_| handler())
}
