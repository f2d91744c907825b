//! Scanline defiltering
//!
//! Each row of the inflated stream is one filter-type byte followed by
//! `width * bpp` filtered bytes. Reconstruction runs top to bottom, the
//! finished row serving as `prev` for the next one. All arithmetic wraps
//! modulo 256.

use frame_probe_core::{FrameProbeError, Result};

/// Per-row filter algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    None,
    Sub,
    Up,
    Average,
    Paeth,
}

impl TryFrom<u8> for FilterType {
    type Error = FrameProbeError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(FilterType::None),
            1 => Ok(FilterType::Sub),
            2 => Ok(FilterType::Up),
            3 => Ok(FilterType::Average),
            4 => Ok(FilterType::Paeth),
            other => Err(FrameProbeError::Format(format!(
                "Unknown scanline filter type: {}",
                other
            ))),
        }
    }
}

/// Paeth predictor; ties go to left, then up, then upper-left
#[inline]
pub fn paeth_predictor(left: u8, up: u8, up_left: u8) -> u8 {
    let (a, b, c) = (i16::from(left), i16::from(up), i16::from(up_left));
    let p = a + b - c;
    let pa = (p - a).abs();
    let pb = (p - b).abs();
    let pc = (p - c).abs();
    if pa <= pb && pa <= pc {
        left
    } else if pb <= pc {
        up
    } else {
        up_left
    }
}

/// Reconstruct one row in place
///
/// `prev` is the previous reconstructed row (all zeros for the first row)
/// and must be as long as `row`.
pub fn unfilter_row(filter: FilterType, row: &mut [u8], prev: &[u8], bpp: usize) {
    debug_assert_eq!(row.len(), prev.len());

    match filter {
        FilterType::None => {}
        FilterType::Sub => {
            for i in bpp..row.len() {
                row[i] = row[i].wrapping_add(row[i - bpp]);
            }
        }
        FilterType::Up => {
            for (out, &up) in row.iter_mut().zip(prev) {
                *out = out.wrapping_add(up);
            }
        }
        FilterType::Average => {
            for i in 0..row.len() {
                let left = if i >= bpp { u16::from(row[i - bpp]) } else { 0 };
                let avg = ((left + u16::from(prev[i])) / 2) as u8;
                row[i] = row[i].wrapping_add(avg);
            }
        }
        FilterType::Paeth => {
            for i in 0..row.len() {
                let (left, up_left) = if i >= bpp {
                    (row[i - bpp], prev[i - bpp])
                } else {
                    (0, 0)
                };
                row[i] = row[i].wrapping_add(paeth_predictor(left, prev[i], up_left));
            }
        }
    }
}

/// Bytes in one reconstructed row, checked against overflow
pub fn row_stride(width: u32, bpp: usize) -> Result<usize> {
    (width as usize).checked_mul(bpp).ok_or_else(|| {
        FrameProbeError::Decode(format!("Row of {} pixels is too large", width))
    })
}

/// Reconstruct every row of an inflated stream
///
/// Returns `height * width * bpp` bytes with the filter bytes removed. Data
/// beyond the last declared row is ignored.
pub fn unfilter(data: &[u8], width: u32, height: u32, bpp: usize) -> Result<Vec<u8>> {
    let stride = row_stride(width, bpp)?;
    let rows = height as usize;
    let needed = (stride + 1)
        .checked_mul(rows)
        .ok_or_else(|| FrameProbeError::Decode("Image dimensions too large".to_string()))?;

    if data.len() < needed {
        return Err(FrameProbeError::Decode(format!(
            "Pixel data truncated: expected {} bytes for {}x{}, got {}",
            needed,
            width,
            height,
            data.len()
        )));
    }

    let mut out = vec![0u8; stride * rows];
    let zero_row = vec![0u8; stride];

    for (y, line) in data[..needed].chunks_exact(stride + 1).enumerate() {
        let filter = FilterType::try_from(line[0])?;

        let (done, rest) = out.split_at_mut(y * stride);
        let row = &mut rest[..stride];
        row.copy_from_slice(&line[1..]);

        let prev = if y == 0 {
            &zero_row[..]
        } else {
            &done[(y - 1) * stride..]
        };
        unfilter_row(filter, row, prev, bpp);
    }

    Ok(out)
}
