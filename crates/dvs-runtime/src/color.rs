//! Color to grayscale conversion
//!
//! Sources decode color video; the sensor consumes luma. Conversion uses the
//! BT.601 weights and rounds to an 8-bit value before widening to float, so a
//! converted frame carries the same quantised intensities a camera's gray
//! output would.

use dvs_core::{DvsError, DvsResult, IntensityFrame, Resolution};

const R_WEIGHT: f32 = 0.299;
const G_WEIGHT: f32 = 0.587;
const B_WEIGHT: f32 = 0.114;

/// Luma of one pixel, rounded to the nearest byte
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let y = R_WEIGHT * f32::from(r) + G_WEIGHT * f32::from(g) + B_WEIGHT * f32::from(b);
    y.round().clamp(0.0, 255.0) as u8
}

/// Channel order of packed 3-byte pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelOrder {
    Rgb,
    Bgr,
}

/// Convert packed 3-channel bytes to 8-bit luma
pub fn to_luma8(
    resolution: Resolution,
    pixels: &[u8],
    order: ChannelOrder,
) -> DvsResult<Vec<u8>> {
    let expected = resolution.pixel_count() * 3;
    if pixels.len() != expected {
        return Err(DvsError::BufferLength {
            expected,
            actual: pixels.len(),
        });
    }

    Ok(pixels
        .chunks_exact(3)
        .map(|px| match order {
            ChannelOrder::Rgb => luma(px[0], px[1], px[2]),
            ChannelOrder::Bgr => luma(px[2], px[1], px[0]),
        })
        .collect())
}

/// Convert packed RGB bytes into an intensity frame
pub fn rgb8_to_intensity(resolution: Resolution, pixels: &[u8]) -> DvsResult<IntensityFrame> {
    let gray = to_luma8(resolution, pixels, ChannelOrder::Rgb)?;
    IntensityFrame::from_luma8(resolution, &gray)
}

/// Convert packed BGR bytes into an intensity frame
pub fn bgr8_to_intensity(resolution: Resolution, pixels: &[u8]) -> DvsResult<IntensityFrame> {
    let gray = to_luma8(resolution, pixels, ChannelOrder::Bgr)?;
    IntensityFrame::from_luma8(resolution, &gray)
}
