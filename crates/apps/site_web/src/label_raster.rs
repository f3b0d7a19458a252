//! Draws destination labels onto offscreen 2D canvases.

use scene::labels::LabelSprite;
use scene::prefabs::TextureImage;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

pub fn rasterize_label(document: &Document, label: &LabelSprite) -> Result<TextureImage, JsValue> {
    let raster = label.raster;
    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()?;
    canvas.set_width(raster.width);
    canvas.set_height(raster.height);

    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()?;

    ctx.set_font(raster.font);
    ctx.set_text_align("center");
    ctx.set_shadow_color(raster.shadow_color);
    ctx.set_shadow_blur(raster.shadow_blur);
    ctx.set_fill_style_str(raster.fill);
    ctx.fill_text(&label.text, raster.anchor[0], raster.anchor[1])?;

    let data = ctx.get_image_data(0.0, 0.0, raster.width as f64, raster.height as f64)?;
    Ok(TextureImage {
        width: data.width(),
        height: data.height(),
        rgba: data.data().0,
    })
}
