// Copyright 2026 the Canvallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drifting sprites.
//!
//! A [`Sprite`] moves left by a fixed `speed` every tick and wraps back to
//! the right once it is far enough off the left edge. Two widths are in
//! play and they are deliberately not unified:
//!
//! - the **render size**, `asset.size() * scale`, used by
//!   [`draw`](Sprite::draw) and [`bounds`](Sprite::bounds);
//! - the **wrap width**, `asset.width * scale * WRAP_WIDTH_FACTOR`, used by
//!   [`update`](Sprite::update) both as the off-screen threshold and as the
//!   re-entry offset.
//!
//! Both are recomputed on every call and never cached.
//!
//! A [`SpriteHandle`] shares one sprite between the engine and its creator,
//! so positions read through the handle follow the animation.

use alloc::rc::Rc;
use core::cell::{Ref, RefCell, RefMut};

use kurbo::{Point, Rect, Size};
use rand::Rng;

use crate::config::or_default;
use crate::error::DrawError;
use crate::surface::{DrawSurface, SpriteAsset, Viewport};

/// Default horizontal drift in pixels per tick.
pub const DEFAULT_SPEED: f64 = 1.0;

/// Default uniform scale.
pub const DEFAULT_SCALE: f64 = 1.0;

/// Default opacity.
pub const DEFAULT_OPACITY: f64 = 0.7;

/// Multiplier applied to the scaled asset width when deciding whether a
/// sprite has left the viewport and where it re-enters.
pub const WRAP_WIDTH_FACTOR: f64 = 5.0;

/// Construction options for a [`Sprite`].
#[derive(Clone, Debug)]
pub struct SpriteOptions<A> {
    /// Initial horizontal position.
    pub x: f64,
    /// Vertical position (fixed for the sprite's lifetime).
    pub y: f64,
    /// The image to draw.
    pub asset: A,
    /// Drift in pixels per tick. Defaults to [`DEFAULT_SPEED`].
    pub speed: Option<f64>,
    /// Uniform scale. Defaults to [`DEFAULT_SCALE`].
    pub scale: Option<f64>,
    /// Opacity in `[0, 1]`. Defaults to [`DEFAULT_OPACITY`].
    pub opacity: Option<f64>,
}

impl<A> SpriteOptions<A> {
    /// Options with a position and asset; everything else defaulted.
    #[must_use]
    pub fn new(x: f64, y: f64, asset: A) -> Self {
        Self {
            x,
            y,
            asset,
            speed: None,
            scale: None,
            opacity: None,
        }
    }

    /// Sets the drift speed.
    #[must_use]
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Sets the scale.
    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Sets the opacity.
    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }
}

/// Per-instance orientation variety, sampled once at construction.
///
/// Stored for future use by the draw routine; not applied today.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Jitter {
    /// Horizontal skew, in `[-SKEW_X_LIMIT, SKEW_X_LIMIT)`.
    pub skew_x: f64,
    /// Vertical skew, in `[-SKEW_Y_LIMIT, SKEW_Y_LIMIT)`.
    pub skew_y: f64,
    /// Rotation in radians, in `[-ROTATION_LIMIT, ROTATION_LIMIT)`.
    pub rotation: f64,
}

impl Jitter {
    /// Half-width of the horizontal skew range.
    pub const SKEW_X_LIMIT: f64 = 0.05;
    /// Half-width of the vertical skew range.
    pub const SKEW_Y_LIMIT: f64 = 0.025;
    /// Half-width of the rotation range.
    pub const ROTATION_LIMIT: f64 = 0.01;

    /// Draws each component independently and uniformly from its range.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            skew_x: rng.gen_range(-Self::SKEW_X_LIMIT..Self::SKEW_X_LIMIT),
            skew_y: rng.gen_range(-Self::SKEW_Y_LIMIT..Self::SKEW_Y_LIMIT),
            rotation: rng.gen_range(-Self::ROTATION_LIMIT..Self::ROTATION_LIMIT),
        }
    }
}

/// Current position and rendered size of a sprite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteBounds {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Rendered width (`asset width * scale`).
    pub width: f64,
    /// Rendered height (`asset height * scale`).
    pub height: f64,
}

impl SpriteBounds {
    /// Returns the bounds as a [`Rect`].
    #[must_use]
    pub fn to_rect(self) -> Rect {
        Rect::from_origin_size((self.x, self.y), (self.width, self.height))
    }
}

/// An independently drifting, semi-transparent image.
#[derive(Clone, Debug)]
pub struct Sprite<A> {
    position: Point,
    asset: A,
    speed: f64,
    scale: f64,
    opacity: f64,
    jitter: Jitter,
}

impl<A: SpriteAsset> Sprite<A> {
    /// Creates a sprite, substituting defaults for unset or falsy options and
    /// sampling its [`Jitter`] from `rng`.
    ///
    /// Negative values are accepted as given.
    pub fn new<R: Rng + ?Sized>(options: SpriteOptions<A>, rng: &mut R) -> Self {
        Self {
            position: Point::new(options.x, options.y),
            asset: options.asset,
            speed: or_default(options.speed, DEFAULT_SPEED),
            scale: or_default(options.scale, DEFAULT_SCALE),
            opacity: or_default(options.opacity, DEFAULT_OPACITY),
            jitter: Jitter::sample(rng),
        }
    }

    /// Current top-left position.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    /// The image this sprite draws.
    #[must_use]
    pub fn asset(&self) -> &A {
        &self.asset
    }

    /// Drift in pixels per tick.
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Uniform scale.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Opacity used for drawing.
    #[must_use]
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Orientation jitter fixed at construction.
    #[must_use]
    pub fn jitter(&self) -> Jitter {
        self.jitter
    }

    /// Size the sprite is drawn at.
    #[must_use]
    pub fn render_size(&self) -> Size {
        self.asset.size() * self.scale
    }

    /// Horizontal extent used by the wrap rule.
    #[must_use]
    pub fn wrap_width(&self) -> f64 {
        self.asset.size().width * self.scale * WRAP_WIDTH_FACTOR
    }

    /// Advances one step.
    ///
    /// The sprite moves `speed` pixels left per call. `_delta_ticks` is
    /// accepted for API symmetry but does not scale the displacement, so
    /// motion is tied to the tick rate. Once the sprite is a full wrap width
    /// past the left edge it reappears a wrap width past the right edge of
    /// `viewport`.
    pub fn update(&mut self, _delta_ticks: u32, viewport: Viewport) {
        self.position.x -= self.speed;

        let wrap_width = self.wrap_width();
        if self.position.x + wrap_width < 0.0 {
            self.position.x = f64::from(viewport.width) + wrap_width;
        }
    }

    /// Draws the sprite at its current position with its opacity.
    ///
    /// The surface's drawing state is saved before and restored after the
    /// draw, whether or not it succeeds, so opacity never bleeds into later
    /// draws. A failure is logged here and returned for the caller's
    /// bookkeeping; callers should not log it again. An asset that is still
    /// loading is logged at `debug`, any other failure at `error`.
    pub fn draw<S>(&self, surface: &mut S) -> Result<(), DrawError>
    where
        S: DrawSurface<Asset = A> + ?Sized,
    {
        surface.save();
        surface.set_global_alpha(self.opacity);
        let result = surface.draw_image(&self.asset, self.position, self.render_size());
        surface.restore();

        match &result {
            Ok(()) => {}
            // Expected every frame until the image finishes decoding.
            Err(err @ DrawError::NotReady) => log::debug!(
                "skipped sprite at ({:.1}, {:.1}): {err}",
                self.position.x,
                self.position.y
            ),
            Err(err) => log::error!(
                "error drawing sprite at ({:.1}, {:.1}): {err}",
                self.position.x,
                self.position.y
            ),
        }
        result
    }

    /// Current position and rendered size.
    #[must_use]
    pub fn bounds(&self) -> SpriteBounds {
        let size = self.render_size();
        SpriteBounds {
            x: self.position.x,
            y: self.position.y,
            width: size.width,
            height: size.height,
        }
    }
}

/// A shared reference to a [`Sprite`].
///
/// Clones refer to the same sprite. The engine animates sprites through
/// handles, so a handle kept by the caller always sees the current position.
/// Adding one handle to an engine twice makes it advance and draw twice per
/// frame.
#[derive(Debug)]
pub struct SpriteHandle<A>(Rc<RefCell<Sprite<A>>>);

impl<A> Clone for SpriteHandle<A> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<A> From<Sprite<A>> for SpriteHandle<A> {
    fn from(sprite: Sprite<A>) -> Self {
        Self(Rc::new(RefCell::new(sprite)))
    }
}

impl<A: SpriteAsset> SpriteHandle<A> {
    /// Wraps `sprite` in a new handle.
    #[must_use]
    pub fn new(sprite: Sprite<A>) -> Self {
        sprite.into()
    }

    /// Borrows the sprite.
    ///
    /// Panics if the sprite is currently borrowed mutably.
    pub fn borrow(&self) -> Ref<'_, Sprite<A>> {
        self.0.borrow()
    }

    /// Mutably borrows the sprite.
    pub fn borrow_mut(&self) -> RefMut<'_, Sprite<A>> {
        self.0.borrow_mut()
    }

    /// Current top-left position.
    #[must_use]
    pub fn position(&self) -> Point {
        self.borrow().position()
    }

    /// Current position and rendered size.
    #[must_use]
    pub fn bounds(&self) -> SpriteBounds {
        self.borrow().bounds()
    }

    /// Returns `true` if both handles refer to the same sprite.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
