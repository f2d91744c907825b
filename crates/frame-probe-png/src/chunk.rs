//! PNG chunk stream reader
//!
//! Chunks are framed as `[length:u32 BE][type:4][data:length][crc:4]`.
//! CRCs are read but not verified.

use frame_probe_core::{FrameProbeError, Result};
use tracing::debug;

/// The 8-byte PNG file signature
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Chunk type constants
pub mod chunk_type {
    pub const IHDR: [u8; 4] = *b"IHDR";
    pub const IDAT: [u8; 4] = *b"IDAT";
    pub const IEND: [u8; 4] = *b"IEND";
}

const IHDR_LEN: usize = 13;

/// Fields from the `IHDR` chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_type: u8,
    pub interlace: u8,
}

impl Header {
    /// Parse the 13-byte `IHDR` payload
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() != IHDR_LEN {
            return Err(FrameProbeError::Format(format!(
                "IHDR chunk has {} bytes, expected {}",
                data.len(),
                IHDR_LEN
            )));
        }

        Ok(Self {
            width: u32::from_be_bytes([data[0], data[1], data[2], data[3]]),
            height: u32::from_be_bytes([data[4], data[5], data[6], data[7]]),
            bit_depth: data[8],
            color_type: data[9],
            interlace: data[12],
        })
    }

    /// Bytes per pixel as used for scanline filtering
    ///
    /// Only truecolor (2) and truecolor with alpha (6) are known; every other
    /// color type is taken as one byte per pixel.
    pub fn bytes_per_pixel(&self) -> usize {
        match self.color_type {
            2 => 3,
            6 => 4,
            _ => 1,
        }
    }
}

/// A single chunk borrowed from the input buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawChunk<'b> {
    pub kind: [u8; 4],
    pub data: &'b [u8],
    pub crc: u32,
}

impl RawChunk<'_> {
    /// Chunk type as text, for logging
    pub fn kind_str(&self) -> String {
        String::from_utf8_lossy(&self.kind).into_owned()
    }
}

/// Iterator over the chunks following the signature
///
/// Iteration ends at the end of input or at the first chunk whose declared
/// length runs past the end of the buffer.
#[derive(Debug, Clone)]
pub struct ChunkIter<'b> {
    rest: &'b [u8],
}

impl<'b> ChunkIter<'b> {
    /// Iterate over `bytes`, which must start right after the signature
    pub fn new(bytes: &'b [u8]) -> Self {
        Self { rest: bytes }
    }
}

impl<'b> Iterator for ChunkIter<'b> {
    type Item = RawChunk<'b>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.len() < 8 {
            self.rest = &[];
            return None;
        }

        let length = u32::from_be_bytes([self.rest[0], self.rest[1], self.rest[2], self.rest[3]])
            as usize;
        let kind = [self.rest[4], self.rest[5], self.rest[6], self.rest[7]];
        let body = &self.rest[8..];

        let Some(data) = body.get(..length) else {
            debug!(
                "Chunk {} declares {} bytes but only {} remain",
                String::from_utf8_lossy(&kind),
                length,
                body.len()
            );
            self.rest = &[];
            return None;
        };

        let after = &body[length..];
        let crc = match after {
            [a, b, c, d, ..] => u32::from_be_bytes([*a, *b, *c, *d]),
            _ => 0,
        };
        self.rest = after.get(4..).unwrap_or(&[]);

        Some(RawChunk { kind, data, crc })
    }
}

/// Header plus the concatenated `IDAT` payloads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkStream {
    pub header: Header,
    pub compressed: Vec<u8>,
}

/// Check the PNG signature
pub fn has_png_signature(bytes: &[u8]) -> bool {
    bytes.starts_with(&PNG_SIGNATURE)
}

/// Read the signature and chunk stream
///
/// Collects `IHDR` fields and every `IDAT` payload in order, stopping at
/// `IEND`. Unknown chunks are skipped.
pub fn read_chunks(bytes: &[u8]) -> Result<ChunkStream> {
    if !has_png_signature(bytes) {
        return Err(FrameProbeError::Format("Not a valid PNG file".to_string()));
    }

    let mut header = None;
    let mut compressed = Vec::new();
    let mut idat_count = 0usize;

    for chunk in ChunkIter::new(&bytes[PNG_SIGNATURE.len()..]) {
        match chunk.kind {
            chunk_type::IHDR => header = Some(Header::parse(chunk.data)?),
            chunk_type::IDAT => {
                compressed.extend_from_slice(chunk.data);
                idat_count += 1;
            }
            chunk_type::IEND => break,
            _ => debug!("Skipping {} chunk ({} bytes)", chunk.kind_str(), chunk.data.len()),
        }
    }

    let header = header
        .ok_or_else(|| FrameProbeError::Format("Could not read PNG dimensions".to_string()))?;

    if header.width == 0 || header.height == 0 {
        return Err(FrameProbeError::Format(format!(
            "Invalid PNG dimensions: {}x{}",
            header.width, header.height
        )));
    }

    debug!(
        "PNG {}x{} depth={} color_type={} ({} IDAT chunks, {} bytes)",
        header.width,
        header.height,
        header.bit_depth,
        header.color_type,
        idat_count,
        compressed.len()
    );

    Ok(ChunkStream { header, compressed })
}
