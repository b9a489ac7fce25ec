// Copyright 2026 the Canvallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core sprite model and frame loop for drifting parallax backgrounds.
//!
//! `canvallax_core` holds everything about the effect that does not depend on
//! a particular host: the [`Sprite`](sprite::Sprite) model, the
//! [`DrawSurface`](surface::DrawSurface) contract that render targets
//! implement, and the [`Parallax`](parallax::Parallax) engine that composes
//! sprites into frames. It is `no_std` compatible (with `alloc`).
//!
//! # Architecture
//!
//! ```text
//!   Backend (tick source, e.g. requestAnimationFrame)
//!       │
//!       ▼
//!   FrameTick ──► Parallax::animate()
//!                     │  clear surface
//!                     │  for each sprite, in insertion order:
//!                     │      Sprite::update(1, viewport)
//!                     │      Sprite::draw(surface)
//!                     ▼
//!                 FrameReport (visited sprites, per-sprite draw failures)
//!
//!   Viewport change ──► Parallax::resize()
//! ```
//!
//! **[`sprite`]**: Position, drift, scale and opacity, plus fixed
//! orientation jitter for one visual element, with wrap-around update and a
//! failure-isolated draw.
//!
//! **[`surface`]**: The [`DrawSurface`](surface::DrawSurface) and
//! [`SpriteAsset`](surface::SpriteAsset) traits, plus [`Viewport`](surface::Viewport).
//!
//! **[`parallax`]**: The owning engine: surface, sprites, loop state.
//!
//! **[`config`]**: Construction options and their default substitution.
//!
//! **[`timing`]**: Frame timestamps delivered by tick sources.
//!
//! **[`error`]**: Construction and per-sprite draw errors.
//!
//! **[`testing`]**: A recording [`DrawSurface`](surface::DrawSurface) and
//! sized test asset for exercising frame loops without a host.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod config;
pub mod error;
pub mod parallax;
pub mod sprite;
pub mod surface;
pub mod testing;
pub mod timing;

#[cfg(test)]
mod log_capture;

pub use config::ParallaxConfig;
pub use error::{DrawError, SurfaceError};
pub use parallax::{FrameReport, LoopState, Parallax};
pub use sprite::{Jitter, Sprite, SpriteBounds, SpriteHandle, SpriteOptions};
pub use surface::{DrawSurface, SpriteAsset, Viewport};
pub use timing::{FrameTick, FrameTime};
