//! WebAssembly exports for the Kirsch filter.
//!
//! These functions are exposed to JavaScript via wasm-bindgen.
//! Buffers are BGRA bytes. Rows are processed sequentially.

use wasm_bindgen::prelude::*;

use crate::config::EdgeOptions;
use crate::error::FilterError;
use crate::filters::edge::kirsch_filter;
use crate::filters::grayscale::grayscale_bgra_in_place;
use crate::raster::RasterImage;

fn to_js_err(err: FilterError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

// ============================================================================
// Kirsch Edge Detection
// ============================================================================

/// Kirsch edge detection on a BGRA byte buffer.
///
/// # Arguments
/// * `data` - Flat array of BGRA bytes (length = stride * height)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `stride` - Bytes per row (pass width * 4 for packed data)
/// * `grayscale` - Convert to luminance before filtering
///
/// # Returns
/// Flat array of BGRA bytes with the same layout as the input
#[wasm_bindgen]
pub fn kirsch_bgra_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    stride: usize,
    grayscale: bool,
) -> Result<Vec<u8>, JsValue> {
    let source = RasterImage::new(width, height, stride, data.to_vec()).map_err(to_js_err)?;
    let options = EdgeOptions::default()
        .with_grayscale(grayscale)
        .with_parallel(false);

    let result = kirsch_filter(&source, &options).map_err(to_js_err)?;
    Ok(result.into_raw())
}

// ============================================================================
// Grayscale
// ============================================================================

/// Grayscale a packed BGRA byte buffer.
///
/// # Returns
/// Flat array of BGRA bytes with B = G = R = luminance and alpha 255
#[wasm_bindgen]
pub fn grayscale_bgra_wasm(data: &[u8]) -> Result<Vec<u8>, JsValue> {
    let mut output = data.to_vec();
    grayscale_bgra_in_place(&mut output).map_err(to_js_err)?;
    Ok(output)
}
