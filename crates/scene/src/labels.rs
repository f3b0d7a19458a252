//! Destination name labels: rasterized text drawn as camera-facing sprites.

use crate::components::LabelId;

/// How a label's text is rasterized onto its offscreen canvas.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LabelRaster {
    pub width: u32,
    pub height: u32,
    pub font: &'static str,
    pub fill: &'static str,
    pub shadow_color: &'static str,
    pub shadow_blur: f64,
    /// Baseline anchor of the centred text, in canvas pixels.
    pub anchor: [f64; 2],
}

impl Default for LabelRaster {
    fn default() -> Self {
        Self {
            width: 256,
            height: 64,
            font: "Bold 22px Arial",
            fill: "rgba(255,255,255,1.0)",
            shadow_color: "rgba(0,0,0,0.8)",
            shadow_blur: 3.0,
            anchor: [128.0, 38.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelSprite {
    pub id: LabelId,
    pub text: String,
    pub raster: LabelRaster,
}

/// Labels float slightly above the surface point they name.
pub const LABEL_LIFT: f64 = 1.08;
pub const LABEL_SIZE: [f32; 2] = [2.0, 0.5];
