//! PNG decode entry point

use flate2::{Decompress, FlushDecompress, Status};
use frame_probe_core::{DecodedImage, FrameProbeError, Result};
use tracing::debug;

use crate::chunk::read_chunks;
use crate::filter::{row_stride, unfilter};
use crate::pixel::assemble;

const INFLATE_CHUNK: usize = 64 * 1024;

/// Inflate a zlib stream
///
/// Fails on corrupt data and on streams that end before their end marker.
/// `size_hint` pre-sizes the output buffer.
pub fn inflate(compressed: &[u8], size_hint: usize) -> Result<Vec<u8>> {
    let mut inflater = Decompress::new(true);
    let mut out = Vec::with_capacity(size_hint.clamp(1, 256 * 1024 * 1024));

    loop {
        if out.len() == out.capacity() {
            out.reserve(out.capacity().max(INFLATE_CHUNK));
        }

        let before_in = inflater.total_in();
        let before_out = inflater.total_out();
        let input = compressed.get(before_in as usize..).unwrap_or(&[]);

        let status = inflater
            .decompress_vec(input, &mut out, FlushDecompress::None)
            .map_err(|e| FrameProbeError::Decode(format!("Corrupt zlib stream: {}", e)))?;

        if status == Status::StreamEnd {
            return Ok(out);
        }

        let progressed = inflater.total_in() != before_in || inflater.total_out() != before_out;
        if !progressed && out.len() < out.capacity() {
            return Err(FrameProbeError::Decode(format!(
                "zlib stream truncated after {} of {} compressed bytes",
                inflater.total_in(),
                compressed.len()
            )));
        }
    }
}

/// Decode PNG bytes into RGB pixels
///
/// Supports 8-bit, non-interlaced images. Truecolor and truecolor+alpha
/// decode fully; other color types are framed at one byte per pixel and
/// fail during pixel assembly.
pub fn decode(bytes: &[u8]) -> Result<DecodedImage> {
    let stream = read_chunks(bytes)?;
    let header = stream.header;

    if header.bit_depth != 8 {
        return Err(FrameProbeError::Format(format!(
            "Unsupported bit depth: {}",
            header.bit_depth
        )));
    }
    if header.interlace != 0 {
        return Err(FrameProbeError::Format(
            "Interlaced PNG is not supported".to_string(),
        ));
    }

    let bpp = header.bytes_per_pixel();
    let expected = row_stride(header.width, bpp)?
        .saturating_add(1)
        .saturating_mul(header.height as usize);

    let raw = inflate(&stream.compressed, expected)?;
    debug!("Inflated {} -> {} bytes", stream.compressed.len(), raw.len());

    let unfiltered = unfilter(&raw, header.width, header.height, bpp)?;
    let pixels = assemble(&unfiltered, header.width, header.height, bpp)?;

    let image = DecodedImage {
        width: header.width,
        height: header.height,
        pixels,
    };
    debug!(
        "Decoded {}x{} image ({} pixels)",
        image.width,
        image.height,
        image.pixel_count()
    );
    Ok(image)
}
