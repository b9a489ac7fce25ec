// Copyright 2026 the Canvallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The mounted effect.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use web_sys::{Element, HtmlCanvasElement};

use canvallax_core::{
    Parallax, ParallaxConfig, Sprite, SpriteBounds, SpriteHandle, SpriteOptions, SurfaceError,
    Viewport,
};

use crate::canvas::CanvasSurface;
use crate::image::ImageAsset;
use crate::raf::RafLoop;
use crate::viewport::{ResizeListener, window_viewport};
use crate::{dom_error, now};

/// The engine type driven by the web backend.
pub type WebParallax = Parallax<CanvasSurface>;

/// A parallax canvas bound to the browser window.
///
/// Construction creates the canvas, sizes it to the window, and subscribes
/// to window resizes. [`mount`](Self::mount) attaches the canvas and starts
/// drawing. Clones share the same engine. The resize subscription lasts
/// until the last clone and the last running loop are gone.
#[derive(Clone)]
pub struct Canvallax {
    engine: Rc<RefCell<WebParallax>>,
    canvas: HtmlCanvasElement,
    resize: Rc<ResizeListener>,
}

impl core::fmt::Debug for Canvallax {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Canvallax")
            .field("engine", &self.engine.try_borrow().ok())
            .finish_non_exhaustive()
    }
}

impl Canvallax {
    /// Creates the canvas and engine for the current window.
    ///
    /// Fails if there is no window or document, or if the canvas cannot
    /// provide a 2D context. Nothing is attached to the page yet.
    pub fn new(config: &ParallaxConfig) -> Result<Self, SurfaceError> {
        let window = web_sys::window().ok_or(SurfaceError::NoWindow)?;
        let document = window.document().ok_or(SurfaceError::NoDocument)?;

        let resolved = config.normalized();
        let surface = CanvasSurface::new(&document, resolved.class_name.as_deref())?;
        let canvas = surface.canvas().clone();

        let engine = Rc::new(RefCell::new(Parallax::new(
            surface,
            window_viewport(&window),
            config,
        )));

        // Weak so the listener does not keep an unmounted engine alive.
        let weak = Rc::downgrade(&engine);
        let resize = ResizeListener::new(&window, move |viewport| {
            if let Some(engine) = weak.upgrade() {
                engine.borrow_mut().resize(viewport);
            }
        })?;

        Ok(Self {
            engine,
            canvas,
            resize: Rc::new(resize),
        })
    }

    /// Appends the canvas to `container` and starts a frame loop.
    ///
    /// Each call starts another loop; mount once per instance. The loop, and
    /// the resize subscription it depends on, run while the returned
    /// [`MountHandle`] is alive, or for the rest of the page's life after
    /// [`MountHandle::detach`], even if every `Canvallax` clone is dropped.
    pub fn mount(&self, container: &Element) -> Result<MountHandle, SurfaceError> {
        container.append_child(&self.canvas).map_err(dom_error)?;

        let started_at = now();
        self.engine.borrow_mut().start(started_at);

        let engine = Rc::clone(&self.engine);
        let raf = RafLoop::new(move |tick| {
            engine.borrow_mut().animate(tick);
        });
        raf.start();

        let viewport = self.viewport();
        log::info!(
            "parallax mounted at {}x{}, clock started at {:.1}ms",
            viewport.width,
            viewport.height,
            started_at.as_millis()
        );
        let resize: Rc<dyn Any> = self.resize.clone();
        Ok(MountHandle::new(raf, resize))
    }

    /// Appends a sprite to the back of the draw order.
    pub fn add_sprite(&self, sprite: Sprite<ImageAsset>) -> SpriteHandle<ImageAsset> {
        self.engine.borrow_mut().add_sprite(sprite)
    }

    /// Appends a shared sprite to the back of the draw order.
    pub fn add_handle(&self, handle: SpriteHandle<ImageAsset>) {
        self.engine.borrow_mut().add_handle(handle);
    }

    /// Builds a sprite from `options` with thread-local randomness for its
    /// jitter, and appends it.
    pub fn add_cloud(&self, options: SpriteOptions<ImageAsset>) -> SpriteHandle<ImageAsset> {
        let sprite = Sprite::new(options, &mut rand::thread_rng());
        self.add_sprite(sprite)
    }

    /// Runs `f` with the sprites in draw order.
    pub fn with_sprites<R>(&self, f: impl FnOnce(&[SpriteHandle<ImageAsset>]) -> R) -> R {
        f(self.engine.borrow().sprites())
    }

    /// Current bounds of every sprite, in draw order.
    #[must_use]
    pub fn sprite_bounds(&self) -> Vec<SpriteBounds> {
        self.with_sprites(|sprites| sprites.iter().map(SpriteHandle::bounds).collect())
    }

    /// The viewport from the most recent resize.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.engine.borrow().viewport()
    }

    /// Damping factor in effect.
    #[must_use]
    pub fn damping(&self) -> f64 {
        self.engine.borrow().damping()
    }

    /// The canvas element.
    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

/// Keeps a mounted frame loop and its resize subscription alive.
///
/// Dropping the handle cancels the pending animation frame. The canvas stays
/// in the document showing its last frame.
#[derive(Debug)]
pub struct MountHandle {
    raf: RafLoop,
    /// Resources the loop's frames depend on, released with the loop.
    _keep_alive: Rc<dyn Any>,
}

impl MountHandle {
    fn new(raf: RafLoop, keep_alive: Rc<dyn Any>) -> Self {
        Self {
            raf,
            _keep_alive: keep_alive,
        }
    }

    /// Stops the loop. It can be resumed with [`resume`](Self::resume).
    pub fn stop(&self) {
        self.raf.stop();
    }

    /// Resumes a stopped loop.
    pub fn resume(&self) {
        self.raf.start();
    }

    /// Returns `true` while frames are being scheduled.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.raf.is_running()
    }

    /// Lets the loop, and the resize subscription, run for the rest of the
    /// page's life.
    pub fn detach(self) {
        core::mem::forget(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mount_with(subscription: &Rc<()>) -> MountHandle {
        let keep_alive: Rc<dyn Any> = subscription.clone();
        MountHandle::new(RafLoop::new(|_| {}), keep_alive)
    }

    #[test]
    fn detached_mount_keeps_its_subscription_forever() {
        let subscription = Rc::new(());
        let handle = mount_with(&subscription);
        assert_eq!(Rc::strong_count(&subscription), 2);

        handle.detach();
        assert_eq!(
            Rc::strong_count(&subscription),
            2,
            "detaching leaks the subscription together with the loop"
        );
    }

    #[test]
    fn dropped_mount_releases_its_subscription() {
        let subscription = Rc::new(());
        let handle = mount_with(&subscription);
        drop(handle);
        assert_eq!(Rc::strong_count(&subscription), 1);
    }
}
