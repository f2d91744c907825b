//! Builders for synthetic PNG files used in tests

use crate::chunk::PNG_SIGNATURE;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use std::io::Write;

/// Frame one chunk with a correct CRC
pub fn chunk(kind: &[u8; 4], data: &[u8]) -> Vec<u8> {
    let mut crc = flate2::Crc::new();
    crc.update(kind);
    crc.update(data);

    let mut out = Vec::with_capacity(12 + data.len());
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(kind);
    out.extend_from_slice(data);
    out.extend_from_slice(&crc.sum().to_be_bytes());
    out
}

/// 13-byte IHDR payload, non-interlaced
pub fn ihdr(width: u32, height: u32, bit_depth: u8, color_type: u8) -> Vec<u8> {
    let mut data = Vec::with_capacity(13);
    data.extend_from_slice(&width.to_be_bytes());
    data.extend_from_slice(&height.to_be_bytes());
    data.extend_from_slice(&[bit_depth, color_type, 0, 0, 0]);
    data
}

/// Replace the interlace method byte of an IHDR payload
pub fn with_interlace(mut ihdr: Vec<u8>, method: u8) -> Vec<u8> {
    ihdr[12] = method;
    ihdr
}

/// Signature followed by the given framed chunks
pub fn png_from_chunks(chunks: &[Vec<u8>]) -> Vec<u8> {
    let mut out = PNG_SIGNATURE.to_vec();
    for c in chunks {
        out.extend_from_slice(c);
    }
    out
}

/// zlib-compress a buffer
pub fn zlib(data: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Full PNG from already-filtered scanlines (filter byte included per row)
pub fn png_from_scanlines(width: u32, height: u32, color_type: u8, scanlines: &[u8]) -> Vec<u8> {
    png_from_chunks(&[
        chunk(b"IHDR", &ihdr(width, height, 8, color_type)),
        chunk(b"IDAT", &zlib(scanlines)),
        chunk(b"IEND", &[]),
    ])
}

/// Truecolor PNG with every row stored unfiltered
pub fn png_rgb(width: u32, height: u32, pixels: &[(u8, u8, u8)]) -> Vec<u8> {
    let mut scanlines = Vec::new();
    for row in pixels.chunks(width as usize) {
        scanlines.push(0);
        for &(r, g, b) in row {
            scanlines.extend_from_slice(&[r, g, b]);
        }
    }
    png_from_scanlines(width, height, 2, &scanlines)
}
