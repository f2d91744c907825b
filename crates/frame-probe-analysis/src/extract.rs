//! Metrics extraction over decoded pixels
//!
//! Sums are accumulated sequentially in row-major pixel order and the
//! standard deviation is a second pass over the stored luminances, so results
//! are bit-for-bit reproducible. Extraction runs on one thread; batch runs
//! parallelise across files.

use frame_probe_core::{
    DecodedImage, FrameProbeError, HISTOGRAM_BUCKETS, Histogram, ImageMetrics, Result,
};

/// BT.601 luminance
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> f64 {
    0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b)
}

/// `(max - min) / max` over the channels, 0 for black
#[inline]
pub fn saturation(r: u8, g: u8, b: u8) -> f64 {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    if max == 0 {
        0.0
    } else {
        f64::from(max - min) / f64::from(max)
    }
}

/// Histogram bucket for a luminance value
#[inline]
pub fn histogram_bucket(luminance: f64) -> usize {
    ((luminance / 16.0) as usize).min(HISTOGRAM_BUCKETS - 1)
}

/// Compute metrics for a decoded image
pub fn extract_metrics(image: &DecodedImage, path: impl Into<String>) -> Result<ImageMetrics> {
    if image.pixels.is_empty() {
        return Err(FrameProbeError::Decode("Image has no pixels".to_string()));
    }

    let n = image.pixels.len() as f64;
    let mut luminances = Vec::with_capacity(image.pixels.len());
    let mut histogram: Histogram = [0; HISTOGRAM_BUCKETS];
    let mut lum_sum = 0.0;
    let mut sat_sum = 0.0;
    let mut lum_min = f64::INFINITY;
    let mut lum_max = f64::NEG_INFINITY;
    let mut red_sum = 0u64;
    let mut blue_sum = 0u64;

    for &(r, g, b) in &image.pixels {
        let l = luminance(r, g, b);
        luminances.push(l);
        lum_sum += l;
        lum_min = lum_min.min(l);
        lum_max = lum_max.max(l);
        histogram[histogram_bucket(l)] += 1;

        sat_sum += saturation(r, g, b);
        red_sum += u64::from(r);
        blue_sum += u64::from(b);
    }

    let brightness_mean = lum_sum / n;
    let variance = luminances
        .iter()
        .fold(0.0, |acc, &l| acc + (l - brightness_mean) * (l - brightness_mean))
        / n;

    let brightness_min = lum_min as u8;
    let brightness_max = lum_max as u8;
    // An all-dark frame (max below 1) reads as flat rather than 0x
    let contrast_ratio = f64::from(brightness_max.max(1)) / f64::from(brightness_min.max(1));

    let red_blue = red_sum + blue_sum;
    let color_temp = if red_blue > 0 {
        blue_sum as f64 / red_blue as f64
    } else {
        0.5
    };

    Ok(ImageMetrics {
        brightness_mean,
        brightness_std: variance.sqrt(),
        brightness_min,
        brightness_max,
        contrast_ratio,
        color_temp,
        saturation_mean: sat_sum / n,
        histogram,
        width: image.width,
        height: image.height,
        path: path.into(),
    })
}
