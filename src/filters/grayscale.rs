//! Grayscale pre-pass for the edge filter.
//!
//! Operates in place on BGRA byte buffers. Luminance is
//! `0.11 * B + 0.59 * G + 0.30 * R`, truncated, written back to all three
//! color channels with alpha forced to 255.
//!
//! Weights are held in hundredths and evaluated with integer arithmetic, so
//! the formula is exact: a pixel with B == G == R == L maps back to L and a
//! second pass over the same buffer changes nothing.

use crate::error::FilterError;
use crate::raster::CHANNELS;

/// Per-channel luminance weights in hundredths.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LumaWeights {
    pub blue: u32,
    pub green: u32,
    pub red: u32,
}

impl LumaWeights {
    /// 0.11 blue, 0.59 green, 0.30 red
    pub const KIRSCH: LumaWeights = LumaWeights {
        blue: 11,
        green: 59,
        red: 30,
    };

    /// Custom weights. Luminance is divided by the weight sum, so any
    /// non-zero triple is normalized.
    pub fn custom(blue: u32, green: u32, red: u32) -> Self {
        Self { blue, green, red }
    }

    #[inline]
    fn total(&self) -> u64 {
        (self.blue as u64 + self.green as u64 + self.red as u64).max(1)
    }
}

impl Default for LumaWeights {
    fn default() -> Self {
        Self::KIRSCH
    }
}

/// Grayscale one BGRA pixel in place.
#[inline]
pub fn grayscale_pixel(px: &mut [u8], weights: LumaWeights) {
    let sum = px[0] as u64 * weights.blue as u64
        + px[1] as u64 * weights.green as u64
        + px[2] as u64 * weights.red as u64;
    let luma = (sum / weights.total()).min(255) as u8;

    px[0] = luma;
    px[1] = luma;
    px[2] = luma;
    px[3] = 255;
}

/// Grayscale a packed BGRA buffer in place with the default weights.
///
/// # Errors
/// [`FilterError::InvalidBuffer`] if `buf.len()` is not a multiple of 4.
/// The buffer is not modified in that case.
pub fn grayscale_bgra_in_place(buf: &mut [u8]) -> Result<(), FilterError> {
    grayscale_bgra_weighted_in_place(buf, LumaWeights::KIRSCH)
}

/// Grayscale a packed BGRA buffer in place with custom weights.
pub fn grayscale_bgra_weighted_in_place(
    buf: &mut [u8],
    weights: LumaWeights,
) -> Result<(), FilterError> {
    if buf.len() % CHANNELS != 0 {
        return Err(FilterError::InvalidBuffer(format!(
            "length {} is not a multiple of {CHANNELS}",
            buf.len()
        )));
    }
    for px in buf.chunks_exact_mut(CHANNELS) {
        grayscale_pixel(px, weights);
    }
    Ok(())
}

/// Grayscale the pixel region of every row of a strided buffer.
pub(crate) fn grayscale_rows_in_place(
    data: &mut [u8],
    width: usize,
    stride: usize,
    weights: LumaWeights,
) {
    if stride == 0 {
        return;
    }
    for row in data.chunks_exact_mut(stride) {
        for px in row[..width * CHANNELS].chunks_exact_mut(CHANNELS) {
            grayscale_pixel(px, weights);
        }
    }
}
