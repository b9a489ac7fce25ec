// Copyright 2026 the Canvallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport size source and resize notifications.

use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use web_sys::Window;

use canvallax_core::{SurfaceError, Viewport};

use crate::dom_error;

const RESIZE_EVENT: &str = "resize";

/// Reads `innerWidth` × `innerHeight` from `window`.
///
/// Missing or non-numeric values read as 0.
#[must_use]
pub fn window_viewport(window: &Window) -> Viewport {
    let read = |value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    Viewport::from_css_pixels(read(window.inner_width()), read(window.inner_height()))
}

/// A `resize` listener on `window` that reports the new [`Viewport`].
///
/// The listener is removed when this value is dropped.
pub struct ResizeListener {
    window: Window,
    closure: Closure<dyn FnMut()>,
}

impl ResizeListener {
    /// Registers `on_resize` to run on every window `resize` event.
    pub fn new(
        window: &Window,
        mut on_resize: impl FnMut(Viewport) + 'static,
    ) -> Result<Self, SurfaceError> {
        let source = window.clone();
        let closure = Closure::wrap(Box::new(move || {
            on_resize(window_viewport(&source));
        }) as Box<dyn FnMut()>);

        window
            .add_event_listener_with_callback(RESIZE_EVENT, closure.as_ref().unchecked_ref())
            .map_err(dom_error)?;

        Ok(Self {
            window: window.clone(),
            closure,
        })
    }
}

impl Drop for ResizeListener {
    fn drop(&mut self) {
        let _ = self.window.remove_event_listener_with_callback(
            RESIZE_EVENT,
            self.closure.as_ref().unchecked_ref(),
        );
    }
}

impl core::fmt::Debug for ResizeListener {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ResizeListener")
            .field("event", &RESIZE_EVENT)
            .finish_non_exhaustive()
    }
}
