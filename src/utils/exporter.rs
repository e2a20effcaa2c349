use std::io::Cursor;

use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::canvas::buffer::PixelBuffer;
use crate::error::EditError;
use crate::utils::color::Rgba32;

/// Encode the canvas as PNG bytes for the embedding layer to persist.
/// Opaque pixels round-trip losslessly through [`decode_png`].
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>, EditError> {
    let mut bytes = Vec::with_capacity(buffer.len() * 4);
    for pixel in buffer.as_slice() {
        bytes.extend_from_slice(&pixel.to_bytes());
    }

    let rgba = RgbaImage::from_raw(buffer.width() as u32, buffer.height() as u32, bytes)
        .ok_or_else(|| EditError::Encode("failed to build RGBA image".to_string()))?;

    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(rgba)
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|e| EditError::Encode(e.to_string()))?;
    Ok(out.into_inner())
}

/// Decode a persisted PNG back into a pixel buffer with the given display
/// scale. Fails with [`EditError::Decode`] if the bytes hold no usable
/// pixel data.
pub fn decode_png(bytes: &[u8], scale: f32) -> Result<PixelBuffer, EditError> {
    let decoded = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = (decoded.width() as usize, decoded.height() as usize);

    let pixels = decoded
        .as_raw()
        .chunks_exact(4)
        .map(|px| Rgba32::from_bytes([px[0], px[1], px[2], px[3]]))
        .collect();

    PixelBuffer::from_raw(width, height, scale, pixels)
}
