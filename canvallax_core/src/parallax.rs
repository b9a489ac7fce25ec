// Copyright 2026 the Canvallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The parallax engine.
//!
//! [`Parallax`] exclusively owns a [`DrawSurface`] and an ordered collection
//! of [`Sprite`]s. Backends drive it:
//!
//! 1. [`Parallax::new`] sizes the surface to the initial viewport.
//! 2. Viewport changes call [`Parallax::resize`].
//! 3. Mounting calls [`Parallax::start`], moving the loop from
//!    [`LoopState::Idle`] to [`LoopState::Running`]. There is no way back.
//! 4. Every display refresh calls [`Parallax::animate`] and re-arms the tick
//!    source.
//!
//! # Frame loop pseudocode
//!
//! ```rust,ignore
//! let mut engine = Parallax::new(surface, viewport, config);
//! engine.add_sprite(cloud);
//! engine.start(now());
//!
//! fn on_frame(tick: FrameTick) {
//!     let report = engine.animate(tick);
//!     // report.failures lists sprites whose draw failed this frame
//! }
//! ```

use alloc::vec::Vec;
use core::fmt;

use crate::config::{ParallaxConfig, ResolvedConfig};
use crate::error::DrawError;
use crate::sprite::{Sprite, SpriteHandle};
use crate::surface::{DrawSurface, Viewport};
use crate::timing::{FrameTick, FrameTime};

/// Whether the animation loop has been started.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LoopState {
    /// Constructed but not mounted; frames draw nothing.
    Idle,
    /// Mounted. Frames clear, update, and draw.
    Running {
        /// Host time recorded when the loop started.
        started_at: FrameTime,
    },
}

/// The outcome of one [`Parallax::animate`] call.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameReport {
    /// Frame counter from the tick that produced this report.
    pub frame_index: u64,
    /// Number of sprites updated and drawn.
    pub visited: usize,
    /// Draw failures as `(sprite index, error)`, in draw order.
    pub failures: Vec<(usize, DrawError)>,
}

impl FrameReport {
    fn skipped(frame_index: u64) -> Self {
        Self {
            frame_index,
            visited: 0,
            failures: Vec::new(),
        }
    }

    /// Returns `true` if every visited sprite drew successfully.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Owns a drawable surface and the sprites composed onto it each frame.
pub struct Parallax<S: DrawSurface> {
    surface: S,
    viewport: Viewport,
    sprites: Vec<SpriteHandle<S::Asset>>,
    config: ResolvedConfig,
    state: LoopState,
    last_frame: Option<FrameTime>,
    frames_drawn: u64,
}

impl<S: DrawSurface> fmt::Debug for Parallax<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parallax")
            .field("viewport", &self.viewport)
            .field("sprites_len", &self.sprites.len())
            .field("config", &self.config)
            .field("state", &self.state)
            .field("last_frame", &self.last_frame)
            .field("frames_drawn", &self.frames_drawn)
            .finish_non_exhaustive()
    }
}

impl<S: DrawSurface> Parallax<S> {
    /// Takes ownership of `surface` and sizes it to `viewport`.
    ///
    /// Unset or falsy config values are replaced by their defaults.
    pub fn new(surface: S, viewport: Viewport, config: &ParallaxConfig) -> Self {
        let mut engine = Self {
            surface,
            viewport,
            sprites: Vec::new(),
            config: config.normalized(),
            state: LoopState::Idle,
            last_frame: None,
            frames_drawn: 0,
        };
        engine.resize(viewport);
        log::debug!(
            "parallax surface created at {}x{} (damping {})",
            viewport.width,
            viewport.height,
            engine.config.damping
        );
        engine
    }

    /// Matches the surface's pixel size to `viewport`.
    ///
    /// Safe to call any number of times; repeated calls with the same
    /// viewport leave the surface unchanged.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.surface.set_pixel_size(viewport);
        log::debug!("parallax surface resized to {}x{}", viewport.width, viewport.height);
    }

    /// Starts the animation clock.
    ///
    /// Starting twice is not rejected: the clock restarts and the caller is
    /// responsible for any extra tick sources it created.
    pub fn start(&mut self, now: FrameTime) {
        if let LoopState::Running { started_at } = self.state {
            log::warn!(
                "parallax loop started again (first start at {:.1}ms); \
                 each mount drives its own frame loop",
                started_at.as_millis()
            );
        }
        self.state = LoopState::Running { started_at: now };
        self.last_frame = Some(now);
    }

    /// Appends a sprite to the back of the draw order and returns a handle
    /// that follows it.
    pub fn add_sprite(&mut self, sprite: Sprite<S::Asset>) -> SpriteHandle<S::Asset> {
        let handle = SpriteHandle::new(sprite);
        self.sprites.push(handle.clone());
        handle
    }

    /// Appends a shared sprite to the back of the draw order.
    ///
    /// The same handle may be added more than once; each entry advances and
    /// draws it again.
    pub fn add_handle(&mut self, handle: SpriteHandle<S::Asset>) {
        self.sprites.push(handle);
    }

    /// Sprites in draw order (back to front).
    #[must_use]
    pub fn sprites(&self) -> &[SpriteHandle<S::Asset>] {
        &self.sprites
    }

    /// Runs one frame.
    ///
    /// While [`Idle`](LoopState::Idle) nothing is touched. While running, the
    /// surface is cleared and every sprite, in insertion order, advances one
    /// step and draws itself. A sprite whose draw fails is recorded in the
    /// report and the frame continues with the next sprite.
    pub fn animate(&mut self, tick: FrameTick) -> FrameReport {
        if self.state == LoopState::Idle {
            log::trace!("frame {} skipped: loop not started", tick.frame_index);
            return FrameReport::skipped(tick.frame_index);
        }

        self.last_frame = Some(tick.time);
        self.frames_drawn += 1;
        self.surface.clear();

        let viewport = self.viewport;
        let mut failures = Vec::new();
        for (index, handle) in self.sprites.iter().enumerate() {
            let mut sprite = handle.borrow_mut();
            sprite.update(1, viewport);
            if let Err(err) = sprite.draw(&mut self.surface) {
                failures.push((index, err));
            }
        }

        log::trace!(
            "frame {} drew {} sprites ({} failed)",
            tick.frame_index,
            self.sprites.len(),
            failures.len()
        );

        FrameReport {
            frame_index: tick.frame_index,
            visited: self.sprites.len(),
            failures,
        }
    }

    /// The owned surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the owned surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The viewport from the most recent resize.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Configuration with defaults applied.
    #[must_use]
    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// Damping factor (reserved; not used by any motion formula).
    #[must_use]
    pub fn damping(&self) -> f64 {
        self.config.damping
    }

    /// Current loop state.
    #[must_use]
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Time of the last drawn frame, or of [`start`](Self::start) if no frame
    /// has been drawn since.
    #[must_use]
    pub fn last_frame_time(&self) -> Option<FrameTime> {
        self.last_frame
    }

    /// Number of frames drawn while running.
    #[must_use]
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use kurbo::Point;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::config::DEFAULT_DAMPING;
    use crate::log_capture;
    use crate::sprite::SpriteOptions;
    use crate::testing::{RecordingSurface, SurfaceEvent, TestImage};

    fn engine(viewport: Viewport) -> Parallax<RecordingSurface> {
        Parallax::new(
            RecordingSurface::new(Viewport::default()),
            viewport,
            &ParallaxConfig::new(),
        )
    }

    fn cloud(rng: &mut StdRng, id: u32, x: f64) -> Sprite<TestImage> {
        Sprite::new(SpriteOptions::new(x, 10.0, TestImage::new(id, 50.0, 20.0)), rng)
    }

    fn tick(frame_index: u64) -> FrameTick {
        let ms = frame_index as f64 * 16.0;
        FrameTick::new(FrameTime::from_millis(ms), frame_index)
    }

    fn drawn_ids(surface: &RecordingSurface) -> Vec<u32> {
        surface.draws().map(|d| d.image).collect()
    }

    #[test]
    fn construction_resizes_before_anything_else() {
        let e = engine(Viewport::new(800, 600));
        assert_eq!(e.surface().pixel_size(), Viewport::new(800, 600));
        assert_eq!(e.surface().events(), [SurfaceEvent::Resize(Viewport::new(800, 600))]);
        assert_eq!(e.state(), LoopState::Idle);
        assert_eq!(e.damping(), DEFAULT_DAMPING);
    }

    #[test]
    fn config_overrides_are_applied() {
        let e = Parallax::new(
            RecordingSurface::new(Viewport::default()),
            Viewport::new(10, 10),
            &ParallaxConfig::new().with_damping(12.0).with_class_name("sky"),
        );
        assert_eq!(e.damping(), 12.0);
        assert_eq!(e.config().class_name.as_deref(), Some("sky"));
    }

    #[test]
    fn resize_is_idempotent() {
        let mut e = engine(Viewport::new(800, 600));
        e.resize(Viewport::new(1024, 768));
        let first = e.surface().pixel_size();
        e.resize(Viewport::new(1024, 768));
        assert_eq!(e.surface().pixel_size(), first);
        assert_eq!(e.viewport(), Viewport::new(1024, 768));
    }

    #[test]
    fn idle_frames_draw_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut e = engine(Viewport::new(800, 600));
        e.add_sprite(cloud(&mut rng, 1, 100.0));
        e.surface_mut().clear_events();

        let report = e.animate(tick(0));
        assert_eq!(report.visited, 0);
        assert!(e.surface().events().is_empty(), "no clear or draw before start");
        assert_eq!(e.sprites()[0].position(), Point::new(100.0, 10.0));
        assert_eq!(e.frames_drawn(), 0);
    }

    #[test]
    fn start_transitions_to_running_and_records_clock() {
        let mut e = engine(Viewport::new(800, 600));
        e.start(FrameTime::from_millis(1234.0));
        assert_eq!(
            e.state(),
            LoopState::Running {
                started_at: FrameTime::from_millis(1234.0)
            }
        );
        assert_eq!(e.last_frame_time(), Some(FrameTime::from_millis(1234.0)));
    }

    #[test]
    fn second_start_warns_but_is_not_rejected() {
        log_capture::install();

        let mut e = engine(Viewport::new(800, 600));
        e.start(FrameTime::from_millis(1.0));
        e.start(FrameTime::from_millis(2.0));
        assert_eq!(
            e.state(),
            LoopState::Running {
                started_at: FrameTime::from_millis(2.0)
            }
        );
        assert_eq!(log_capture::at_level(log::Level::Warn).len(), 1);
    }

    #[test]
    fn frame_clears_then_updates_and_draws_each_sprite() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut e = engine(Viewport::new(800, 600));
        e.add_sprite(cloud(&mut rng, 1, 100.0));
        e.add_sprite(cloud(&mut rng, 2, 200.0));
        e.start(FrameTime::from_millis(0.0));
        e.surface_mut().clear_events();

        let report = e.animate(tick(1));
        assert_eq!(report.visited, 2);
        assert!(report.is_clean(), "failures: {:?}", report.failures);
        assert_eq!(e.last_frame_time(), Some(FrameTime::from_millis(16.0)));

        let events = e.surface().events();
        assert_eq!(events[0], SurfaceEvent::Clear, "clear comes first");
        assert_eq!(events.len(), 3);
        let origins: Vec<Point> = e.surface().draws().map(|d| d.origin).collect();
        assert_eq!(
            origins,
            [Point::new(99.0, 10.0), Point::new(199.0, 10.0)],
            "each sprite advanced one step before drawing"
        );
    }

    #[test]
    fn draw_order_is_insertion_order() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut e = engine(Viewport::new(800, 600));
        let ids = [7, 3, 9, 1, 4, 4, 2];
        for &id in &ids {
            e.add_sprite(cloud(&mut rng, id, 400.0));
        }
        e.start(FrameTime::from_millis(0.0));

        for frame in 0..3 {
            e.surface_mut().clear_events();
            e.animate(tick(frame));
            assert_eq!(drawn_ids(e.surface()), ids, "frame {frame}");
        }

        let listed: Vec<u32> = e.sprites().iter().map(|s| s.borrow().asset().id).collect();
        assert_eq!(listed, ids);
    }

    #[test]
    fn sprites_added_while_running_draw_last() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut e = engine(Viewport::new(800, 600));
        e.add_sprite(cloud(&mut rng, 1, 100.0));
        e.start(FrameTime::from_millis(0.0));
        e.animate(tick(0));

        e.add_sprite(cloud(&mut rng, 2, 100.0));
        e.surface_mut().clear_events();
        e.animate(tick(1));
        assert_eq!(drawn_ids(e.surface()), [1, 2]);
    }

    #[test]
    fn alpha_does_not_bleed_between_sprites() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut e = engine(Viewport::new(800, 600));
        for (id, opacity) in [(1, 0.3), (2, 0.9), (3, 0.55)] {
            e.add_sprite(Sprite::new(
                SpriteOptions::new(100.0, 0.0, TestImage::new(id, 10.0, 10.0))
                    .with_opacity(opacity),
                &mut rng,
            ));
        }
        e.start(FrameTime::from_millis(0.0));
        e.animate(tick(0));

        let alphas: Vec<f64> = e.surface().draws().map(|d| d.alpha).collect();
        assert_eq!(alphas, [0.3, 0.9, 0.55]);
        assert_eq!(e.surface().global_alpha(), 1.0);
        assert_eq!(e.surface().save_depth(), 0);
    }

    #[test]
    fn failing_sprite_is_isolated() {
        log_capture::install();

        let mut rng = StdRng::seed_from_u64(6);
        let mut e = engine(Viewport::new(800, 600));
        let broken_index = 2;
        for id in 0..5 {
            let image = if id == broken_index {
                TestImage::broken(id, 50.0, 20.0)
            } else {
                TestImage::new(id, 50.0, 20.0)
            };
            e.add_sprite(Sprite::new(
                SpriteOptions::new(300.0, 0.0, image).with_speed(2.0),
                &mut rng,
            ));
        }
        e.start(FrameTime::from_millis(0.0));
        e.surface_mut().clear_events();

        let report = e.animate(tick(0));

        assert_eq!(report.visited, 5);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, broken_index as usize);
        assert_eq!(log_capture::errors().len(), 1, "exactly one error logged");

        // Every sprite was updated, including the broken one.
        for sprite in e.sprites() {
            assert_eq!(sprite.position().x, 298.0);
        }

        // Order preserved around the failure.
        let sequence: Vec<SurfaceEvent> = e.surface().events()[1..].to_vec();
        let ids: Vec<u32> = sequence
            .iter()
            .map(|event| match event {
                SurfaceEvent::Draw(call) => call.image,
                SurfaceEvent::Failed(id) => *id,
                other => panic!("unexpected event {other:?}"),
            })
            .collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
        assert!(matches!(sequence[2], SurfaceEvent::Failed(2)), "got {:?}", sequence[2]);

        // The loop keeps going on the next tick.
        let next = e.animate(tick(1));
        assert_eq!(next.visited, 5);
        assert_eq!(next.failures.len(), 1);
        assert_eq!(e.frames_drawn(), 2);
    }

    #[test]
    fn handles_follow_the_animation() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut e = engine(Viewport::new(800, 600));
        let kept = e.add_sprite(cloud(&mut rng, 1, 100.0));
        e.start(FrameTime::from_millis(0.0));

        e.animate(tick(0));
        e.animate(tick(1));
        assert_eq!(kept.position(), Point::new(98.0, 10.0));
        assert!(kept.ptr_eq(&e.sprites()[0]), "engine and caller share one sprite");
    }

    #[test]
    fn handle_added_twice_moves_twice_per_frame() {
        let mut rng = StdRng::seed_from_u64(10);
        let mut e = engine(Viewport::new(800, 600));
        let shared = SpriteHandle::new(cloud(&mut rng, 1, 100.0));
        e.add_handle(shared.clone());
        e.add_handle(shared.clone());
        e.start(FrameTime::from_millis(0.0));
        e.surface_mut().clear_events();

        e.animate(tick(0));
        assert_eq!(shared.position().x, 98.0);
        let origins: Vec<f64> = e.surface().draws().map(|d| d.origin.x).collect();
        assert_eq!(origins, [99.0, 98.0]);
    }

    #[test]
    fn wrapping_uses_current_viewport_width() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut e = engine(Viewport::new(800, 600));
        // 10px wide: wrap width 50, so x = -50 wraps on the next step.
        e.add_sprite(Sprite::new(
            SpriteOptions::new(-50.0, 0.0, TestImage::new(1, 10.0, 10.0)),
            &mut rng,
        ));
        e.start(FrameTime::from_millis(0.0));
        e.resize(Viewport::new(1920, 1080));
        e.animate(tick(0));
        assert_eq!(e.sprites()[0].position().x, 1970.0);
    }
}
