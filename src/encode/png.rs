use std::io::Cursor;

use crate::foundation::error::{BoardError, BoardResult};
use crate::render::backend::FrameRGBA;

/// Longest edge of a generated thumbnail.
pub const THUMBNAIL_MAX_EDGE: u32 = 320;

fn to_image(frame: &FrameRGBA) -> BoardResult<image::RgbaImage> {
    image::RgbaImage::from_raw(frame.width, frame.height, frame.to_straight_rgba())
        .ok_or_else(|| BoardError::validation("frame data does not match width*height*4"))
}

fn png_bytes(img: &image::RgbaImage) -> BoardResult<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .map_err(|e| BoardError::export(format!("png encode failed: {e}")))?;
    Ok(out.into_inner())
}

/// Encode a frame as PNG.
pub fn encode_png(frame: &FrameRGBA) -> BoardResult<Vec<u8>> {
    png_bytes(&to_image(frame)?)
}

/// Downscaled PNG of a frame, longest edge at most `max_edge`.
pub fn encode_thumbnail_png(frame: &FrameRGBA, max_edge: u32) -> BoardResult<Vec<u8>> {
    let img = to_image(frame)?;
    let max_edge = max_edge.max(1);
    let longest = frame.width.max(frame.height);
    if longest <= max_edge {
        return png_bytes(&img);
    }
    let scale = f64::from(max_edge) / f64::from(longest);
    let w = ((f64::from(frame.width) * scale).round() as u32).max(1);
    let h = ((f64::from(frame.height) * scale).round() as u32).max(1);
    let small = image::imageops::resize(&img, w, h, image::imageops::FilterType::Triangle);
    png_bytes(&small)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
