//! Decoded image types

/// One RGB pixel
pub type Rgb = (u8, u8, u8);

/// A fully decoded image, alpha discarded
///
/// `pixels` is row-major and holds exactly `width * height` entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Row-major RGB triples
    pub pixels: Vec<Rgb>,
}

impl DecodedImage {
    /// Total number of pixels declared by the dimensions
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}
