// Copyright 2026 the Canvallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web demo: clouds drifting right to left behind the page content.
//!
//! Mounts a full-viewport canvas on `<body>` and adds a configurable number
//! of clouds (via `?clouds=N` query parameter, default 6) at random
//! positions, speeds and scales. Log verbosity follows `?log=LEVEL`.
//!
//! Build with: `wasm-pack build --target web demos/web_clouds`
//!
//! Then serve `demos/web_clouds/` with a `cloud.png` next to `index.html`.

#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

use rand::Rng;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlImageElement, Window};

use canvallax_backend_web::{Canvallax, ImageAsset, logging};
use canvallax_core::{ParallaxConfig, SpriteOptions, Viewport};

const DEFAULT_CLOUDS: usize = 6;
const CLOUD_IMAGE: &str = "cloud.png";
const SPEED_RANGE: core::ops::Range<f64> = 0.2..1.5;
const SCALE_RANGE: core::ops::Range<f64> = 0.4..1.0;

/// Entry point, called automatically by `wasm_bindgen(start)`.
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no global window")?;
    let search = window.location().search().unwrap_or_default();

    let _ = logging::init(logging::parse_level(query_param(&search, "log")));

    let count = query_param(&search, "clouds")
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_CLOUDS);

    let body = window
        .document()
        .and_then(|document| document.body())
        .ok_or("no document body")?;

    let sky = Canvallax::new(&ParallaxConfig::new().with_class_name("sky"))
        .map_err(|err| JsValue::from_str(&err.to_string()))?;
    sky.mount(&body)
        .map_err(|err| JsValue::from_str(&err.to_string()))?
        .detach();

    wasm_bindgen_futures::spawn_local(async move {
        if let Err(err) = populate(&window, &sky, count).await {
            log::error!("could not load {CLOUD_IMAGE}: {err:?}");
        }
    });

    Ok(())
}

/// Loads the cloud image once and adds `count` clouds that share it.
async fn populate(window: &Window, sky: &Canvallax, count: usize) -> Result<(), JsValue> {
    let image = HtmlImageElement::new()?;
    image.set_src(CLOUD_IMAGE);
    JsFuture::from(image.decode()).await?;

    let viewport = canvallax_backend_web::window_viewport(window);
    let mut rng = rand::thread_rng();
    for _ in 0..count {
        sky.add_cloud(random_cloud(&mut rng, viewport, ImageAsset::new(image.clone())));
    }
    log::info!("added {count} clouds");
    Ok(())
}

/// A cloud somewhere across the viewport, in its upper half.
fn random_cloud<R: Rng + ?Sized, A>(rng: &mut R, viewport: Viewport, asset: A) -> SpriteOptions<A> {
    let width = f64::from(viewport.width.max(1));
    let height = f64::from(viewport.height.max(2)) / 2.0;
    SpriteOptions::new(rng.gen_range(0.0..width), rng.gen_range(0.0..height), asset)
        .with_speed(rng.gen_range(SPEED_RANGE))
        .with_scale(rng.gen_range(SCALE_RANGE))
}

/// Finds `key=value` in a `?a=b&c=d` query string.
fn query_param<'a>(search: &'a str, key: &str) -> Option<&'a str> {
    search.trim_start_matches('?').split('&').find_map(|pair| {
        let (k, value) = pair.split_once('=')?;
        (k == key).then_some(value)
    })
}
