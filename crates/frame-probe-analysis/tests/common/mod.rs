//! Synthetic PNG writers for integration tests

#![allow(dead_code)]

use flate2::Compression;
use flate2::write::ZlibEncoder;
use std::io::Write;
use std::path::{Path, PathBuf};

const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

fn chunk(out: &mut Vec<u8>, kind: &[u8; 4], data: &[u8]) {
    let mut crc = flate2::Crc::new();
    crc.update(kind);
    crc.update(data);
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(kind);
    out.extend_from_slice(data);
    out.extend_from_slice(&crc.sum().to_be_bytes());
}

/// Encode an 8-bit truecolor PNG, every row filtered with `filter`
///
/// Only filters whose encoding does not depend on neighbours are produced
/// here: 0 (None) stores bytes as-is, 1 (Sub) stores left differences.
pub fn encode_rgb(width: u32, height: u32, pixels: &[(u8, u8, u8)], filter: u8) -> Vec<u8> {
    assert_eq!(pixels.len(), (width * height) as usize);

    let mut scanlines = Vec::new();
    for row in pixels.chunks(width as usize) {
        let bytes: Vec<u8> = row.iter().flat_map(|&(r, g, b)| [r, g, b]).collect();
        scanlines.push(filter);
        match filter {
            0 => scanlines.extend_from_slice(&bytes),
            1 => {
                for i in 0..bytes.len() {
                    let left = if i >= 3 { bytes[i - 3] } else { 0 };
                    scanlines.push(bytes[i].wrapping_sub(left));
                }
            }
            other => panic!("unsupported test filter {}", other),
        }
    }

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&scanlines).unwrap();
    let compressed = encoder.finish().unwrap();

    let mut ihdr = Vec::new();
    ihdr.extend_from_slice(&width.to_be_bytes());
    ihdr.extend_from_slice(&height.to_be_bytes());
    ihdr.extend_from_slice(&[8, 2, 0, 0, 0]);

    let mut out = SIGNATURE.to_vec();
    chunk(&mut out, b"IHDR", &ihdr);
    chunk(&mut out, b"IDAT", &compressed);
    chunk(&mut out, b"IEND", &[]);
    out
}

/// Write a solid-color PNG into `dir`
pub fn write_solid(dir: &Path, name: &str, width: u32, height: u32, rgb: (u8, u8, u8)) -> PathBuf {
    let pixels = vec![rgb; (width * height) as usize];
    let path = dir.join(name);
    std::fs::write(&path, encode_rgb(width, height, &pixels, 0)).unwrap();
    path
}

/// Write a PNG whose deflate stream starts with an invalid block type
pub fn write_corrupt(dir: &Path, name: &str) -> PathBuf {
    let pixels: Vec<_> = (0..64u32).map(|i| (i as u8, (i * 3) as u8, 255 - i as u8)).collect();
    let mut bytes = encode_rgb(8, 8, &pixels, 0);
    // Clobber the deflate data after the two-byte zlib header
    let idat = bytes
        .windows(4)
        .position(|w| w == b"IDAT")
        .unwrap();
    for b in &mut bytes[idat + 6..idat + 14] {
        *b = 0xFF;
    }
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}
