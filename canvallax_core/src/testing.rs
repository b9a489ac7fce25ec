// Copyright 2026 the Canvallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-free test doubles.
//!
//! [`RecordingSurface`] implements [`DrawSurface`] by appending every call to
//! an event log, so frame loops can be checked for draw order, alpha
//! handling, and save/restore balance. [`TestImage`] is a sized asset that
//! can be marked broken or still loading to exercise draw failures.

use alloc::format;
use alloc::vec::Vec;

use kurbo::{Point, Size};

use crate::error::DrawError;
use crate::surface::{DrawSurface, SpriteAsset, Viewport};

/// A sized stand-in for a decoded image.
#[derive(Clone, Debug, PartialEq)]
pub struct TestImage {
    /// Identifier recorded with each draw.
    pub id: u32,
    /// Intrinsic size.
    pub size: Size,
    /// When set, every draw of this image fails.
    pub broken: bool,
    /// When set, draws report the image as not yet loaded.
    pub loading: bool,
}

impl TestImage {
    /// A healthy image.
    #[must_use]
    pub fn new(id: u32, width: f64, height: f64) -> Self {
        Self {
            id,
            size: Size::new(width, height),
            broken: false,
            loading: false,
        }
    }

    /// An image whose draws are rejected.
    #[must_use]
    pub fn broken(id: u32, width: f64, height: f64) -> Self {
        Self {
            broken: true,
            ..Self::new(id, width, height)
        }
    }

    /// An image that has not finished loading.
    #[must_use]
    pub fn loading(id: u32, width: f64, height: f64) -> Self {
        Self {
            loading: true,
            ..Self::new(id, width, height)
        }
    }
}

impl SpriteAsset for TestImage {
    fn size(&self) -> Size {
        self.size
    }
}

/// One successful draw.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawCall {
    /// [`TestImage::id`] of the drawn image.
    pub image: u32,
    /// Top-left destination.
    pub origin: Point,
    /// Destination size.
    pub size: Size,
    /// Global alpha in effect during the draw.
    pub alpha: f64,
}

/// Everything a [`RecordingSurface`] observed, in order.
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceEvent {
    /// `set_pixel_size` was called.
    Resize(Viewport),
    /// The whole surface was cleared.
    Clear,
    /// An image was drawn.
    Draw(DrawCall),
    /// A draw of the image with this id failed.
    Failed(u32),
}

/// A [`DrawSurface`] that records calls instead of rendering.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    size: Viewport,
    alpha: f64,
    saved: Vec<f64>,
    events: Vec<SurfaceEvent>,
}

impl RecordingSurface {
    /// Creates a surface with the given initial size and an alpha of 1.
    ///
    /// The initial size is not recorded as a resize event.
    #[must_use]
    pub fn new(size: Viewport) -> Self {
        Self {
            size,
            alpha: 1.0,
            saved: Vec::new(),
            events: Vec::new(),
        }
    }

    /// All recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[SurfaceEvent] {
        &self.events
    }

    /// Successful draws, oldest first.
    pub fn draws(&self) -> impl Iterator<Item = &DrawCall> + '_ {
        self.events.iter().filter_map(|event| match event {
            SurfaceEvent::Draw(call) => Some(call),
            _ => None,
        })
    }

    /// Number of `clear` calls.
    #[must_use]
    pub fn clear_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, SurfaceEvent::Clear))
            .count()
    }

    /// Number of unmatched `save` calls.
    #[must_use]
    pub fn save_depth(&self) -> usize {
        self.saved.len()
    }

    /// Forgets recorded events, keeping size and drawing state.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }
}

impl DrawSurface for RecordingSurface {
    type Asset = TestImage;

    fn pixel_size(&self) -> Viewport {
        self.size
    }

    fn set_pixel_size(&mut self, size: Viewport) {
        self.size = size;
        self.events.push(SurfaceEvent::Resize(size));
    }

    fn clear(&mut self) {
        self.events.push(SurfaceEvent::Clear);
    }

    fn save(&mut self) {
        self.saved.push(self.alpha);
    }

    fn restore(&mut self) {
        // Unbalanced restores are ignored, as on a canvas.
        if let Some(alpha) = self.saved.pop() {
            self.alpha = alpha;
        }
    }

    fn global_alpha(&self) -> f64 {
        self.alpha
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.alpha = alpha;
    }

    fn draw_image(
        &mut self,
        asset: &Self::Asset,
        origin: Point,
        size: Size,
    ) -> Result<(), DrawError> {
        if asset.loading {
            self.events.push(SurfaceEvent::Failed(asset.id));
            return Err(DrawError::NotReady);
        }
        if asset.broken {
            self.events.push(SurfaceEvent::Failed(asset.id));
            return Err(DrawError::Rejected(format!("image {} is broken", asset.id)));
        }
        self.events.push(SurfaceEvent::Draw(DrawCall {
            image: asset.id,
            origin,
            size,
            alpha: self.alpha,
        }));
        Ok(())
    }
}
