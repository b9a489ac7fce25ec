// Copyright 2026 the Canvallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Image assets.

use kurbo::Size;
use web_sys::HtmlImageElement;

use canvallax_core::SpriteAsset;

/// An `HTMLImageElement` used as a sprite image.
///
/// Cloning is cheap: clones refer to the same DOM element. Loading and
/// decoding are the caller's job; an image that has not finished loading is
/// skipped by [`CanvasSurface`](crate::CanvasSurface) with
/// [`DrawError::NotReady`](canvallax_core::DrawError::NotReady).
#[derive(Clone, Debug)]
pub struct ImageAsset {
    element: HtmlImageElement,
}

impl ImageAsset {
    /// Wraps an image element.
    #[must_use]
    pub fn new(element: HtmlImageElement) -> Self {
        Self { element }
    }

    /// The wrapped element.
    #[must_use]
    pub fn element(&self) -> &HtmlImageElement {
        &self.element
    }

    /// Returns `true` once the image has loaded and decoded to a non-empty
    /// bitmap.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.element.complete() && self.element.natural_width() > 0
    }
}

impl From<HtmlImageElement> for ImageAsset {
    fn from(element: HtmlImageElement) -> Self {
        Self::new(element)
    }
}

impl SpriteAsset for ImageAsset {
    /// The element's `width`/`height`, i.e. its layout size when set,
    /// otherwise its intrinsic size.
    fn size(&self) -> Size {
        Size::new(
            f64::from(self.element.width()),
            f64::from(self.element.height()),
        )
    }
}
