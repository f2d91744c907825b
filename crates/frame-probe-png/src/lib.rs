//! # frame-probe-png
//!
//! Minimal PNG decoder for rendered frames.
//!
//! This crate provides:
//! - Signature check and chunk stream reader
//! - zlib inflate of the concatenated `IDAT` payloads
//! - Scanline defiltering (None, Sub, Up, Average, Paeth)
//! - RGB pixel assembly
//!
//! CRCs are not verified. Ancillary chunks are skipped.

pub mod chunk;
pub mod decode;
pub mod filter;
pub mod pixel;

#[cfg(test)]
pub(crate) mod fixtures;

pub use chunk::{ChunkStream, Header, PNG_SIGNATURE, read_chunks};
pub use decode::{decode, inflate};
pub use filter::{FilterType, paeth_predictor, unfilter};
pub use pixel::assemble;
