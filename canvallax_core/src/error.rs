// Copyright 2026 the Canvallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.
//!
//! Two classes of failure exist:
//!
//! - [`SurfaceError`] is fatal to construction. A surface that cannot get a
//!   drawing context is never handed to a [`Parallax`](crate::parallax::Parallax).
//! - [`DrawError`] is scoped to one sprite in one frame. It is logged and
//!   reported, and the frame carries on with the remaining sprites.

use alloc::string::String;

/// Failure while building a drawable surface.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    /// The host has no global window.
    #[error("no global window")]
    NoWindow,
    /// The window has no document.
    #[error("window has no document")]
    NoDocument,
    /// The host refused to create a 2D drawing context.
    #[error("failed to acquire a 2d drawing context")]
    ContextUnavailable,
    /// A host DOM call failed.
    #[error("DOM operation failed: {0}")]
    Dom(String),
}

/// Failure while drawing a single sprite.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DrawError {
    /// The asset has not finished loading, or failed to decode.
    #[error("asset is not ready to draw")]
    NotReady,
    /// The render target rejected the draw call.
    #[error("draw rejected: {0}")]
    Rejected(String),
}
