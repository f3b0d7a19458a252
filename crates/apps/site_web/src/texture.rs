//! Globe texture fetch and decode.

use gloo_net::http::Request;
use image::imageops::FilterType;
use scene::prefabs::{TextureImage, TextureOutcome};

/// Largest texture edge the WebGL2 fallback limits guarantee.
pub const MAX_TEXTURE_DIMENSION: u32 = 2048;

/// Fetches and decodes the globe texture once. Every failure becomes a
/// [`TextureOutcome::Fallback`]; there is no retry.
pub async fn load_texture(url: &str) -> TextureOutcome {
    let result = match fetch_bytes(url).await {
        Ok(bytes) => decode_texture(&bytes, MAX_TEXTURE_DIMENSION),
        Err(err) => Err(err),
    };
    match result {
        Ok(image) => TextureOutcome::Loaded(image),
        Err(reason) => TextureOutcome::Fallback { reason },
    }
}

async fn fetch_bytes(url: &str) -> Result<Vec<u8>, String> {
    let resp = Request::get(url).send().await.map_err(|e| e.to_string())?;
    if !resp.ok() {
        return Err(format!("HTTP {} for {url}", resp.status()));
    }
    resp.binary().await.map_err(|e| e.to_string())
}

/// Decodes an encoded image into RGBA8, shrinking it to fit `max_dimension`.
pub fn decode_texture(bytes: &[u8], max_dimension: u32) -> Result<TextureImage, String> {
    let mut decoded = image::load_from_memory(bytes).map_err(|e| format!("decode failed: {e}"))?;
    if decoded.width() == 0 || decoded.height() == 0 {
        return Err("image has no pixels".to_string());
    }
    if decoded.width() > max_dimension || decoded.height() > max_dimension {
        decoded = decoded.resize(max_dimension, max_dimension, FilterType::Triangle);
    }
    let rgba = decoded.to_rgba8();
    Ok(TextureImage {
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::decode_texture;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let mut img = RgbaImage::new(width, height);
        img.put_pixel(0, 0, Rgba([10, 20, 30, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).expect("encode");
        out.into_inner()
    }

    #[test]
    fn decodes_to_rgba_rows() {
        let tex = decode_texture(&png(4, 2), 2048).expect("decode");
        assert_eq!((tex.width, tex.height), (4, 2));
        assert_eq!(tex.rgba.len(), 4 * 2 * 4);
        assert_eq!(&tex.rgba[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn oversized_images_are_shrunk_keeping_aspect() {
        let tex = decode_texture(&png(64, 32), 16).expect("decode");
        assert_eq!((tex.width, tex.height), (16, 8));
        assert_eq!(tex.rgba.len(), 16 * 8 * 4);
    }

    #[test]
    fn garbage_is_an_error() {
        let err = decode_texture(b"<html>not found</html>", 2048).expect_err("garbage");
        assert!(err.starts_with("decode failed"));
    }
}
