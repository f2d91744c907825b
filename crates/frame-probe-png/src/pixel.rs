//! Pixel assembly from reconstructed scanline bytes

use frame_probe_core::{FrameProbeError, Result, Rgb};

/// Slice reconstructed rows into RGB triples
///
/// Each pixel is the first three bytes of its `bpp`-byte group; any alpha
/// byte is dropped. A group that cannot supply three bytes within its row
/// (one-byte-per-pixel color types) is a decode error.
pub fn assemble(raw: &[u8], width: u32, height: u32, bpp: usize) -> Result<Vec<Rgb>> {
    let width = width as usize;
    let stride = width * bpp;
    if stride == 0 {
        return Ok(Vec::new());
    }
    let mut pixels = Vec::with_capacity(width * height as usize);

    for (y, row) in raw.chunks_exact(stride).take(height as usize).enumerate() {
        for x in 0..width {
            let offset = x * bpp;
            match row.get(offset..offset + 3) {
                Some(&[r, g, b]) => pixels.push((r, g, b)),
                _ => {
                    return Err(FrameProbeError::Decode(format!(
                        "Pixel ({}, {}) has fewer than 3 channel bytes at {} bytes per pixel",
                        x, y, bpp
                    )));
                }
            }
        }
    }

    if pixels.len() != width * height as usize {
        return Err(FrameProbeError::Decode(format!(
            "Assembled {} pixels, expected {}",
            pixels.len(),
            width * height as usize
        )));
    }

    Ok(pixels)
}
