// Copyright 2026 the Canvallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render-target contract.
//!
//! Backends implement [`DrawSurface`] over a host drawing API (e.g. a 2D
//! canvas context) and [`SpriteAsset`] over the host's image type. The
//! [`Parallax`](crate::parallax::Parallax) engine only talks to these traits,
//! which also lets tests drive it with
//! [`RecordingSurface`](crate::testing::RecordingSurface).

use alloc::rc::Rc;

use kurbo::{Point, Size};

use crate::error::DrawError;

/// Current viewport dimensions in device pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Creates a viewport.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Builds a viewport from host-reported dimensions.
    ///
    /// Negative and `NaN` inputs become 0; fractional inputs are truncated.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "viewport dimensions are small non-negative values; `as` saturates"
    )]
    pub fn from_css_pixels(width: f64, height: f64) -> Self {
        Self {
            width: width.max(0.0) as u32,
            height: height.max(0.0) as u32,
        }
    }

    /// Returns the dimensions as a [`Size`].
    #[must_use]
    pub fn size(self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

/// A visual resource a sprite can draw.
///
/// Only the intrinsic size is visible to the engine; pixel content belongs to
/// the backend.
pub trait SpriteAsset {
    /// Intrinsic width and height in pixels.
    fn size(&self) -> Size;
}

impl<T: SpriteAsset + ?Sized> SpriteAsset for &T {
    fn size(&self) -> Size {
        (**self).size()
    }
}

impl<T: SpriteAsset + ?Sized> SpriteAsset for Rc<T> {
    fn size(&self) -> Size {
        (**self).size()
    }
}

/// A pixel-addressable render target.
///
/// The state model follows a 2D canvas: [`save`](Self::save) pushes the
/// current drawing state (at least the global alpha), and
/// [`restore`](Self::restore) pops it.
pub trait DrawSurface {
    /// The image type this surface can draw.
    type Asset: SpriteAsset;

    /// Returns the current pixel dimensions.
    fn pixel_size(&self) -> Viewport;

    /// Sets the pixel dimensions of the backing store.
    fn set_pixel_size(&mut self, size: Viewport);

    /// Clears the whole drawable region to transparent.
    fn clear(&mut self);

    /// Pushes the current drawing state.
    fn save(&mut self);

    /// Pops the most recently saved drawing state.
    fn restore(&mut self);

    /// Returns the alpha applied to subsequent draws.
    fn global_alpha(&self) -> f64;

    /// Sets the alpha applied to subsequent draws.
    fn set_global_alpha(&mut self, alpha: f64);

    /// Draws `asset` with its top-left corner at `origin`, scaled to `size`.
    fn draw_image(
        &mut self,
        asset: &Self::Asset,
        origin: Point,
        size: Size,
    ) -> Result<(), DrawError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_pixels_are_clamped_and_truncated() {
        assert_eq!(Viewport::from_css_pixels(800.0, 600.0), Viewport::new(800, 600));
        assert_eq!(Viewport::from_css_pixels(1280.9, 719.2), Viewport::new(1280, 719));
        assert_eq!(Viewport::from_css_pixels(-5.0, f64::NAN), Viewport::new(0, 0));
    }

    #[test]
    fn shared_assets_report_inner_size() {
        struct Square;
        impl SpriteAsset for Square {
            fn size(&self) -> Size {
                Size::new(32.0, 32.0)
            }
        }

        let shared = Rc::new(Square);
        assert_eq!(shared.size(), Size::new(32.0, 32.0));
        assert_eq!((&Square).size(), Size::new(32.0, 32.0));
    }
}
