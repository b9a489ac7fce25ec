// Copyright 2026 the Canvallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JavaScript classes.
//!
//! ```js
//! import init, { Canvallax, Cloud, initLogging } from "./canvallax_backend_web.js";
//!
//! await init();
//! initLogging("info");
//! const sky = new Canvallax({ className: "sky", damping: 40 });
//! sky.mount(document.body);
//! sky.addCloud(new Cloud({ x: 900, y: 40, image, speed: 0.5, scale: 0.8 }));
//! console.log(sky.getClouds()); // [{ x, y, width, height }]
//! ```
//!
//! Option objects follow the same defaulting rules as the Rust API: absent,
//! `null`, `0`, and `NaN` values take their defaults.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlImageElement};

use canvallax_core::{
    ParallaxConfig, Sprite, SpriteAsset, SpriteBounds, SpriteHandle, SpriteOptions,
};

use crate::handle::{Canvallax, MountHandle};
use crate::image::ImageAsset;
use crate::to_js_error;

/// `new Canvallax(options)` options.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CanvallaxOptions {
    /// Style class for the canvas.
    pub class_name: Option<String>,
    /// Damping factor.
    pub damping: Option<f64>,
}

impl From<CanvallaxOptions> for ParallaxConfig {
    fn from(options: CanvallaxOptions) -> Self {
        Self {
            class_name: options.class_name,
            damping: options.damping,
        }
    }
}

/// `new Cloud(options)` options.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CloudOptions {
    x: f64,
    y: f64,
    #[serde(with = "serde_wasm_bindgen::preserve")]
    image: JsValue,
    #[serde(default)]
    speed: Option<f64>,
    #[serde(default)]
    scale: Option<f64>,
    #[serde(default)]
    opacity: Option<f64>,
}

/// `{ x, y, width, height }` as returned to JavaScript.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BoundsObject {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Rendered width.
    pub width: f64,
    /// Rendered height.
    pub height: f64,
}

impl From<SpriteBounds> for BoundsObject {
    fn from(bounds: SpriteBounds) -> Self {
        Self {
            x: bounds.x,
            y: bounds.y,
            width: bounds.width,
            height: bounds.height,
        }
    }
}

impl BoundsObject {
    /// Bounds of the sprite behind `handle` as of the last frame.
    pub fn of<A: SpriteAsset>(handle: &SpriteHandle<A>) -> Self {
        handle.bounds().into()
    }
}

/// The `Canvallax` JavaScript class.
///
/// Frame loops started by `mount` run until the object is freed.
#[wasm_bindgen(js_name = Canvallax)]
#[derive(Debug)]
pub struct JsCanvallax {
    inner: Canvallax,
    mounts: Vec<MountHandle>,
}

#[wasm_bindgen(js_class = Canvallax)]
impl JsCanvallax {
    /// `new Canvallax({ className?, damping? })`. Throws if no 2D context is
    /// available.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<Self, JsValue> {
        let options: Option<CanvallaxOptions> = serde_wasm_bindgen::from_value(options)?;
        let config = ParallaxConfig::from(options.unwrap_or_default());
        let inner = Canvallax::new(&config).map_err(to_js_error)?;
        Ok(Self {
            inner,
            mounts: Vec::new(),
        })
    }

    /// Appends the canvas to `container` and starts animating.
    pub fn mount(&mut self, container: &Element) -> Result<(), JsValue> {
        let handle = self.inner.mount(container).map_err(to_js_error)?;
        self.mounts.push(handle);
        Ok(())
    }

    /// Stops every frame loop started by `mount`.
    pub fn stop(&mut self) {
        self.mounts.clear();
    }

    /// Appends `cloud` to the back of the draw order.
    ///
    /// The engine animates the same cloud the caller holds, so
    /// `cloud.getPosition()` follows it. Adding a cloud twice draws it twice.
    #[wasm_bindgen(js_name = addCloud)]
    pub fn add_cloud(&self, cloud: &JsCloud) {
        self.inner.add_handle(cloud.sprite.clone());
    }

    /// Bounds of every cloud, in draw order.
    #[wasm_bindgen(js_name = getClouds)]
    pub fn get_clouds(&self) -> Result<JsValue, JsValue> {
        let bounds: Vec<BoundsObject> = self
            .inner
            .sprite_bounds()
            .into_iter()
            .map(BoundsObject::from)
            .collect();
        Ok(serde_wasm_bindgen::to_value(&bounds)?)
    }

    /// Damping factor in effect.
    #[wasm_bindgen(getter)]
    pub fn damping(&self) -> f64 {
        self.inner.damping()
    }
}

/// The `Cloud` JavaScript class.
#[wasm_bindgen(js_name = Cloud)]
#[derive(Debug)]
pub struct JsCloud {
    sprite: SpriteHandle<ImageAsset>,
}

#[wasm_bindgen(js_class = Cloud)]
impl JsCloud {
    /// `new Cloud({ x, y, image, speed?, scale?, opacity? })`. Throws if
    /// `image` is not an `HTMLImageElement`.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<Self, JsValue> {
        let options: CloudOptions = serde_wasm_bindgen::from_value(options)?;
        let image: HtmlImageElement = options
            .image
            .dyn_into()
            .map_err(|_| to_js_error("cloud `image` must be an HTMLImageElement"))?;

        let sprite_options = SpriteOptions {
            x: options.x,
            y: options.y,
            asset: ImageAsset::new(image),
            speed: options.speed,
            scale: options.scale,
            opacity: options.opacity,
        };
        let sprite = Sprite::new(sprite_options, &mut rand::thread_rng());
        Ok(Self {
            sprite: SpriteHandle::new(sprite),
        })
    }

    /// Current `{ x, y, width, height }` of this cloud.
    #[wasm_bindgen(js_name = getPosition)]
    pub fn get_position(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&BoundsObject::of(&self.sprite))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canvallax_core::config::DEFAULT_DAMPING;
    use canvallax_core::testing::{RecordingSurface, TestImage};
    use canvallax_core::{FrameTick, FrameTime, Parallax, Viewport};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn options_map_onto_config() {
        let config = ParallaxConfig::from(CanvallaxOptions {
            class_name: Some("sky".into()),
            damping: Some(0.0),
        });
        let resolved = config.normalized();
        assert_eq!(resolved.class_name.as_deref(), Some("sky"));
        assert_eq!(resolved.damping, DEFAULT_DAMPING, "falsy damping falls back");
    }

    #[test]
    fn bounds_object_copies_every_field() {
        let bounds = SpriteBounds {
            x: 1.0,
            y: 2.0,
            width: 3.0,
            height: 4.0,
        };
        assert_eq!(
            BoundsObject::from(bounds),
            BoundsObject {
                x: 1.0,
                y: 2.0,
                width: 3.0,
                height: 4.0
            }
        );
    }

    #[test]
    fn added_cloud_reports_its_animated_position() {
        let mut engine = Parallax::new(
            RecordingSurface::new(Viewport::default()),
            Viewport::new(800, 600),
            &ParallaxConfig::new(),
        );
        let options = SpriteOptions::new(300.0, 40.0, TestImage::new(1, 100.0, 50.0))
            .with_speed(2.0)
            .with_scale(0.5);
        let cloud = SpriteHandle::new(Sprite::new(options, &mut StdRng::seed_from_u64(3)));
        engine.add_handle(cloud.clone());
        engine.start(FrameTime::from_millis(0.0));

        for frame in 0..3 {
            engine.animate(FrameTick::new(FrameTime::from_millis(16.0), frame));
        }

        assert_eq!(
            BoundsObject::of(&cloud),
            BoundsObject {
                x: 294.0,
                y: 40.0,
                width: 50.0,
                height: 25.0
            }
        );
    }
}
