//! Kirsch Edge Detection
//!
//! Directional gradient filter for 8-bit BGRA raster images, implemented in
//! Rust with optional Python bindings via PyO3 and WASM bindings for
//! JavaScript.
//!
//! ## Image Format
//! Images are decoded elsewhere and handed over as a flat byte buffer:
//! - **BGRA**: blue, green, red, alpha per pixel, one byte each
//! - **Stride**: bytes per row, at least `width * 4` (rows may be padded)
//!
//! ## Filter Architecture
//! [`apply_edge_detection`] is the whole contract: it borrows the source,
//! optionally grayscales a private copy, correlates both Kirsch kernels with
//! every pixel's neighbourhood and returns a new image of the same size.
//! The border ring is handled according to [`BorderPolicy`].
//!
//! ```
//! use kirsch_edge::{apply_edge_detection, RasterImage};
//!
//! let image = RasterImage::from_bgra(3, 3, vec![0; 36]).unwrap();
//! let edges = apply_edge_detection(&image, true).unwrap();
//! assert_eq!(edges.pixel(1, 1), [0, 0, 0, 255]);
//! ```

pub mod config;
pub mod error;
pub mod filters;
pub mod raster;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::{BorderPolicy, EdgeOptions};
pub use error::FilterError;
pub use filters::core::{CancelToken, Kernel, KIRSCH_HORIZONTAL, KIRSCH_VERTICAL};
pub use filters::edge::{
    apply_edge_detection, convolution_filter, convolution_filter_cancellable, kirsch_filter,
};
pub use filters::grayscale::{grayscale_bgra_in_place, LumaWeights};
pub use raster::RasterImage;

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::config::{BorderPolicy, EdgeOptions};
    use crate::error::FilterError;
    use crate::filters::edge::kirsch_filter;
    use crate::raster::RasterImage;

    fn to_py_err(err: FilterError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }

    // ========================================================================
    // Kirsch Edge Detection
    // ========================================================================

    /// Kirsch edge detection on a BGRA u8 image.
    ///
    /// # Arguments
    /// * `image` - Array of shape (height, width, 4), channels B, G, R, A
    /// * `grayscale` - Convert to luminance before filtering (default: True)
    /// * `border` - "zero" or "clamp" (default: "zero")
    #[pyfunction]
    #[pyo3(signature = (image, grayscale=true, border="zero"))]
    pub fn kirsch<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        grayscale: bool,
        border: &str,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let border: BorderPolicy = border.parse().map_err(PyValueError::new_err)?;
        let source = RasterImage::from_array(image.as_array()).map_err(to_py_err)?;
        let options = EdgeOptions::default()
            .with_grayscale(grayscale)
            .with_border(border);

        let result = py
            .allow_threads(|| kirsch_filter(&source, &options))
            .map_err(to_py_err)?;
        Ok(result.into_array().into_pyarray(py))
    }

    /// Grayscale a BGRA u8 image (0.11 B + 0.59 G + 0.30 R), alpha set to 255.
    #[pyfunction]
    pub fn grayscale_bgra<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let source = RasterImage::from_array(image.as_array()).map_err(to_py_err)?;
        Ok(source.to_grayscale().into_array().into_pyarray(py))
    }

    #[pymodule]
    pub fn kirsch_edge(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(kirsch, m)?)?;
        m.add_function(wrap_pyfunction!(grayscale_bgra, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::kirsch_edge;
