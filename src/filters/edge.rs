//! Edge detection: Kirsch gradient magnitude.
//!
//! Two directional kernels are correlated with the 3x3 (or NxN) neighbourhood
//! of every pixel, independently for blue, green and red. The two responses
//! are combined into a Euclidean magnitude, clamped to [0, 255] and truncated.
//! Alpha is always written as 255.
//!
//! The source image is only read. The result is a freshly allocated image
//! with the same width, height and stride. When grayscale is requested the
//! pre-pass runs on a private copy.
//!
//! ## Borders
//!
//! With [`BorderPolicy::Zero`] the ring of pixels the kernel cannot be centered
//! on is left transparent black. With [`BorderPolicy::Clamp`] those pixels are
//! convolved with neighbour coordinates clamped to the image.
//!
//! ## Performance
//!
//! Each output row depends only on the read-only source, so rows are
//! processed in parallel with Rayon unless disabled in [`EdgeOptions`].

use log::{debug, trace};
use ndarray::ArrayView3;
use rayon::prelude::*;

use crate::config::{BorderPolicy, EdgeOptions};
use crate::error::FilterError;
use crate::filters::core::{
    clamp_to_u8, gradient_magnitude, CancelToken, Kernel, KIRSCH_HORIZONTAL, KIRSCH_VERTICAL,
};
use crate::raster::{RasterImage, CHANNELS};

const COLOR_CHANNELS: usize = 3;

// ============================================================================
// Kirsch
// ============================================================================

/// Kirsch edge detection with the default border policy.
///
/// # Arguments
/// * `image` - Source BGRA image, at least 3x3
/// * `grayscale` - Convert a copy of the source to luminance first
///
/// # Returns
/// New image of identical dimensions and stride
pub fn apply_edge_detection(
    image: &RasterImage,
    grayscale: bool,
) -> Result<RasterImage, FilterError> {
    kirsch_filter(image, &EdgeOptions::default().with_grayscale(grayscale))
}

/// Kirsch edge detection with explicit options.
pub fn kirsch_filter(image: &RasterImage, options: &EdgeOptions) -> Result<RasterImage, FilterError> {
    convolution_filter(image, &KIRSCH_HORIZONTAL, &KIRSCH_VERTICAL, options)
}

// ============================================================================
// Generic gradient convolution
// ============================================================================

/// Gradient-magnitude convolution with an arbitrary odd-sized kernel pair.
///
/// # Errors
/// * [`FilterError::DimensionTooSmall`] if either side is shorter than `N`
pub fn convolution_filter<const N: usize>(
    image: &RasterImage,
    x_kernel: &Kernel<N>,
    y_kernel: &Kernel<N>,
    options: &EdgeOptions,
) -> Result<RasterImage, FilterError> {
    run_filter(image, x_kernel, y_kernel, options, None)
}

/// Same as [`convolution_filter`], checking `cancel` before every row.
///
/// Returns [`FilterError::Cancelled`] once the token fires; the partially
/// written output is dropped.
pub fn convolution_filter_cancellable<const N: usize>(
    image: &RasterImage,
    x_kernel: &Kernel<N>,
    y_kernel: &Kernel<N>,
    options: &EdgeOptions,
    cancel: &CancelToken,
) -> Result<RasterImage, FilterError> {
    run_filter(image, x_kernel, y_kernel, options, Some(cancel))
}

fn run_filter<const N: usize>(
    image: &RasterImage,
    x_kernel: &Kernel<N>,
    y_kernel: &Kernel<N>,
    options: &EdgeOptions,
    cancel: Option<&CancelToken>,
) -> Result<RasterImage, FilterError> {
    let (width, height, stride) = (image.width(), image.height(), image.stride());
    if width < N || height < N {
        return Err(FilterError::DimensionTooSmall {
            width,
            height,
            min: N,
        });
    }

    debug!(
        "convolution {n}x{n}: {width}x{height} stride={stride} grayscale={} border={} parallel={}",
        options.grayscale,
        options.border,
        options.parallel,
        n = N
    );

    let grayscaled;
    let source = if options.grayscale {
        grayscaled = image.to_grayscale();
        &grayscaled
    } else {
        image
    };
    let input = source.view();
    let margin = x_kernel.margin();

    let mut output = RasterImage::zeroed(width, height, stride);

    let filter_row = |(y, row): (usize, &mut [u8])| -> Result<(), FilterError> {
        if cancel.is_some_and(CancelToken::is_cancelled) {
            trace!("convolution cancelled at row {y}");
            return Err(FilterError::Cancelled);
        }

        let columns = match options.border {
            BorderPolicy::Zero => {
                if y < margin || y >= height - margin {
                    return Ok(());
                }
                margin..width - margin
            }
            BorderPolicy::Clamp => 0..width,
        };

        for x in columns {
            let px = convolve_at(&input, x, y, x_kernel, y_kernel);
            row[x * CHANNELS..(x + 1) * CHANNELS].copy_from_slice(&px);
        }
        Ok(())
    };

    if options.parallel {
        output
            .data_mut()
            .par_chunks_mut(stride)
            .enumerate()
            .try_for_each(filter_row)?;
    } else {
        output
            .data_mut()
            .chunks_mut(stride)
            .enumerate()
            .try_for_each(filter_row)?;
    }

    Ok(output)
}

/// Gradient magnitude of one pixel, BGRA with alpha 255.
///
/// Neighbour coordinates are clamped to the image, which is a no-op for
/// pixels at least `margin` away from every edge.
#[inline]
fn convolve_at<const N: usize>(
    input: &ArrayView3<u8>,
    x: usize,
    y: usize,
    x_kernel: &Kernel<N>,
    y_kernel: &Kernel<N>,
) -> [u8; 4] {
    let (height, width, _) = input.dim();
    let margin = (N / 2) as isize;

    let mut response_x = [0.0f64; COLOR_CHANNELS];
    let mut response_y = [0.0f64; COLOR_CHANNELS];

    for ky in 0..N {
        let sy = (y as isize + ky as isize - margin).clamp(0, height as isize - 1) as usize;
        for kx in 0..N {
            let sx = (x as isize + kx as isize - margin).clamp(0, width as isize - 1) as usize;
            let wx = x_kernel.weight(ky, kx);
            let wy = y_kernel.weight(ky, kx);

            for c in 0..COLOR_CHANNELS {
                let v = input[[sy, sx, c]] as f64;
                response_x[c] += v * wx;
                response_y[c] += v * wy;
            }
        }
    }

    [
        clamp_to_u8(gradient_magnitude(response_x[0], response_y[0])),
        clamp_to_u8(gradient_magnitude(response_x[1], response_y[1])),
        clamp_to_u8(gradient_magnitude(response_x[2], response_y[2])),
        255,
    ]
}
