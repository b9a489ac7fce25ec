// Copyright 2026 the Canvallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Full-viewport 2D canvas surface.

use kurbo::{Point, Size};
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use canvallax_core::{DrawError, DrawSurface, SurfaceError, Viewport};

use crate::image::ImageAsset;
use crate::{dom_error, js_message};

/// Fixed presentation: cover the viewport, sit behind the UI (which uses
/// `z-index: 1`), and let pointer events through.
const CANVAS_STYLE: [(&str, &str); 7] = [
    ("position", "fixed"),
    ("top", "0"),
    ("left", "0"),
    ("width", "100vw"),
    ("height", "100vh"),
    ("pointer-events", "none"),
    ("z-index", "0"),
];

/// A `<canvas>` element and its 2D context, implementing [`DrawSurface`].
///
/// The canvas is created detached; [`Canvallax::mount`](crate::Canvallax::mount)
/// appends it to a container.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl core::fmt::Debug for CanvasSurface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CanvasSurface")
            .field("width", &self.canvas.width())
            .field("height", &self.canvas.height())
            .field("class_name", &self.canvas.class_name())
            .finish_non_exhaustive()
    }
}

impl CanvasSurface {
    /// Creates a styled canvas and acquires its 2D context.
    ///
    /// `class_name` is applied verbatim when present. Fails with
    /// [`SurfaceError::ContextUnavailable`] if the browser will not provide a
    /// 2D context.
    pub fn new(document: &Document, class_name: Option<&str>) -> Result<Self, SurfaceError> {
        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(dom_error)?
            .dyn_into()
            .map_err(|_| SurfaceError::Dom("created element is not a canvas".into()))?;

        let style = canvas.style();
        for (property, value) in CANVAS_STYLE {
            style.set_property(property, value).map_err(dom_error)?;
        }
        if let Some(class_name) = class_name {
            canvas.set_class_name(class_name);
        }

        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &"alpha".into(), &JsValue::TRUE).map_err(dom_error)?;

        let ctx: CanvasRenderingContext2d = canvas
            .get_context_with_context_options("2d", &options)
            .map_err(dom_error)?
            .ok_or(SurfaceError::ContextUnavailable)?
            .dyn_into()
            .map_err(|_| SurfaceError::ContextUnavailable)?;

        ctx.set_image_smoothing_enabled(true);
        // Not every web-sys build exposes the typed setter.
        js_sys::Reflect::set(&ctx, &"imageSmoothingQuality".into(), &"high".into())
            .map_err(dom_error)?;

        Ok(Self { canvas, ctx })
    }

    /// The underlying canvas element.
    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// The 2D rendering context.
    #[must_use]
    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.ctx
    }
}

impl DrawSurface for CanvasSurface {
    type Asset = ImageAsset;

    fn pixel_size(&self) -> Viewport {
        Viewport::new(self.canvas.width(), self.canvas.height())
    }

    fn set_pixel_size(&mut self, size: Viewport) {
        self.canvas.set_width(size.width);
        self.canvas.set_height(size.height);
    }

    fn clear(&mut self) {
        let size = self.pixel_size().size();
        self.ctx.clear_rect(0.0, 0.0, size.width, size.height);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn global_alpha(&self) -> f64 {
        self.ctx.global_alpha()
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
    }

    fn draw_image(
        &mut self,
        asset: &Self::Asset,
        origin: Point,
        size: Size,
    ) -> Result<(), DrawError> {
        if !asset.is_ready() {
            return Err(DrawError::NotReady);
        }
        self.ctx
            .draw_image_with_html_image_element_and_dw_and_dh(
                asset.element(),
                origin.x,
                origin.y,
                size.width,
                size.height,
            )
            .map_err(|err| DrawError::Rejected(js_message(&err)))
    }
}
