// Copyright 2026 the Canvallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for canvallax.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`CanvasSurface`]: [`DrawSurface`] over a full-viewport `<canvas>` and
//!   its 2D context
//! - [`ImageAsset`]: [`SpriteAsset`] over an `HTMLImageElement`
//! - [`RafLoop`]: `requestAnimationFrame` tick source
//! - [`ResizeListener`]: window `resize` subscription
//! - [`Canvallax`]: the mounted effect, tying the pieces to a
//!   [`Parallax`](canvallax_core::Parallax) engine
//! - [`bindings`]: `Canvallax` and `Cloud` classes for JavaScript callers
//! - [`logging`]: a `log` sink writing to the browser console
//!
//! [`DrawSurface`]: canvallax_core::DrawSurface
//! [`SpriteAsset`]: canvallax_core::SpriteAsset

#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

mod canvas;
mod handle;
mod image;
mod raf;
mod viewport;

pub mod bindings;
pub mod logging;

pub use canvas::CanvasSurface;
pub use handle::{Canvallax, MountHandle, WebParallax};
pub use image::ImageAsset;
pub use raf::RafLoop;
pub use viewport::{ResizeListener, window_viewport};

use canvallax_core::{FrameTime, SurfaceError};
use wasm_bindgen::{JsCast as _, JsValue};

/// Returns the current host time from `performance.now()`.
#[must_use]
pub fn now() -> FrameTime {
    FrameTime::from_millis(raf::performance_now())
}

/// Extracts a readable message from a thrown JavaScript value.
pub(crate) fn js_message(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// Maps a failed DOM call to a [`SurfaceError`].
pub(crate) fn dom_error(value: JsValue) -> SurfaceError {
    SurfaceError::Dom(js_message(&value))
}

/// Converts an engine error into a JavaScript `Error`.
pub(crate) fn to_js_error(err: impl core::fmt::Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}
