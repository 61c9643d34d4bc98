//! Owned BGRA raster image with row stride.
//!
//! Pixels are four 8-bit channels in blue, green, red, alpha order. Rows may
//! carry trailing padding, so `stride >= width * 4`. The buffer is exposed to
//! the filters as an `ndarray` view of shape `(height, width, 4)` whose row
//! stride is the byte stride, so padded buffers are never copied.

use ndarray::{Array3, ArrayView3, ShapeBuilder};

use crate::error::FilterError;
use crate::filters::grayscale::{grayscale_rows_in_place, LumaWeights};

/// Bytes per pixel (B, G, R, A).
pub const CHANNELS: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    width: usize,
    height: usize,
    stride: usize, // bytes between rows
    data: Vec<u8>,
}

impl RasterImage {
    /// Wrap a decoded BGRA buffer.
    ///
    /// Fails with [`FilterError::InvalidBuffer`] when the buffer length is not a
    /// multiple of 4, the stride cannot hold a row, or `stride * height` does
    /// not match the buffer length.
    pub fn new(
        width: usize,
        height: usize,
        stride: usize,
        data: Vec<u8>,
    ) -> Result<Self, FilterError> {
        if data.len() % CHANNELS != 0 {
            return Err(FilterError::InvalidBuffer(format!(
                "length {} is not a multiple of {CHANNELS}",
                data.len()
            )));
        }
        if stride < width * CHANNELS {
            return Err(FilterError::InvalidBuffer(format!(
                "stride {stride} is smaller than a row of {width} pixels"
            )));
        }
        if stride * height != data.len() {
            return Err(FilterError::InvalidBuffer(format!(
                "stride {stride} x height {height} does not match length {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    /// Wrap a tightly packed BGRA buffer (`stride == width * 4`).
    pub fn from_bgra(width: usize, height: usize, data: Vec<u8>) -> Result<Self, FilterError> {
        Self::new(width, height, width * CHANNELS, data)
    }

    /// Copy an `(height, width, 4)` array into a packed image.
    pub fn from_array(array: ArrayView3<u8>) -> Result<Self, FilterError> {
        let (height, width, channels) = array.dim();
        if channels != CHANNELS {
            return Err(FilterError::InvalidBuffer(format!(
                "expected {CHANNELS} channels, got {channels}"
            )));
        }
        let data: Vec<u8> = array.iter().copied().collect();
        Self::from_bgra(width, height, data)
    }

    /// All-zero image (transparent black) with the given layout.
    pub(crate) fn zeroed(width: usize, height: usize, stride: usize) -> Self {
        Self {
            width,
            height,
            stride,
            data: vec![0u8; stride * height],
        }
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes between the starts of consecutive rows
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// BGRA value of the pixel at column `x`, row `y`.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let offset = y * self.stride + x * CHANNELS;
        [
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
            self.data[offset + 3],
        ]
    }

    /// Borrow as a `(height, width, 4)` view that skips row padding.
    pub fn view(&self) -> ArrayView3<'_, u8> {
        if self.width == 0 || self.height == 0 {
            return ArrayView3::from_shape((self.height, self.width, CHANNELS), &self.data[..0])
                .expect("empty shape fits an empty slice");
        }
        ArrayView3::from_shape(
            (self.height, self.width, CHANNELS).strides((self.stride, CHANNELS, 1)),
            &self.data,
        )
        .expect("RasterImage layout is validated on construction")
    }

    /// Copy out as a standard-layout `(height, width, 4)` array.
    pub fn into_array(self) -> Array3<u8> {
        self.view().to_owned()
    }

    /// Grayscaled copy, leaving `self` untouched.
    ///
    /// Only the pixel region of each row is converted; padding bytes are
    /// copied verbatim.
    pub fn to_grayscale(&self) -> RasterImage {
        let mut copy = self.clone();
        grayscale_rows_in_place(
            &mut copy.data,
            self.width,
            self.stride,
            LumaWeights::KIRSCH,
        );
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_length_not_multiple_of_four() {
        let err = RasterImage::new(1, 1, 4, vec![0u8; 5]).unwrap_err();
        assert!(matches!(err, FilterError::InvalidBuffer(_)));
    }

    #[test]
    fn test_new_rejects_short_stride() {
        let err = RasterImage::new(3, 2, 8, vec![0u8; 16]).unwrap_err();
        assert!(matches!(err, FilterError::InvalidBuffer(_)));
    }

    #[test]
    fn test_new_rejects_stride_height_mismatch() {
        let err = RasterImage::new(2, 2, 8, vec![0u8; 24]).unwrap_err();
        assert!(matches!(err, FilterError::InvalidBuffer(_)));
    }

    #[test]
    fn test_view_skips_padding() {
        // 2x2 image, 4 padding bytes per row
        let mut data = vec![0u8; 24];
        data[0] = 1; // (0, 0) blue
        data[8] = 99; // padding
        data[12 + 4 + 2] = 7; // (1, 1) red
        let img = RasterImage::new(2, 2, 12, data).unwrap();

        let view = img.view();
        assert_eq!(view.dim(), (2, 2, 4));
        assert_eq!(view[[0, 0, 0]], 1);
        assert_eq!(view[[1, 1, 2]], 7);
        assert!(!view.iter().any(|&v| v == 99));
        assert_eq!(img.pixel(1, 1), [0, 0, 7, 0]);
    }

    #[test]
    fn test_array_roundtrip_drops_padding() {
        let mut data = vec![0u8; 2 * 12];
        data[4] = 42;
        data[8] = 200; // padding
        let img = RasterImage::new(2, 2, 12, data).unwrap();

        let array = img.into_array();
        assert_eq!(array.dim(), (2, 2, 4));
        assert_eq!(array[[0, 1, 0]], 42);

        let packed = RasterImage::from_array(array.view()).unwrap();
        assert_eq!(packed.stride(), 8);
        assert_eq!(packed.pixel(1, 0), [42, 0, 0, 0]);
    }

    #[test]
    fn test_empty_layouts() {
        for (width, height, stride) in [(0, 0, 0), (2, 0, 8), (0, 3, 0), (0, 2, 4)] {
            let img = RasterImage::new(width, height, stride, vec![0u8; stride * height]).unwrap();

            assert_eq!(img.view().dim(), (height, width, 4));
            let gray = img.to_grayscale();
            assert_eq!(gray.data(), img.data());
            assert_eq!(img.into_array().dim(), (height, width, 4));
        }
    }

    #[test]
    fn test_from_array_empty_rows() {
        let array = Array3::<u8>::zeros((0, 5, 4));
        let img = RasterImage::from_array(array.view()).unwrap();
        assert_eq!(img.to_grayscale().into_array().dim(), (0, 5, 4));
    }

    #[test]
    fn test_from_array_rejects_rgb() {
        let array = Array3::<u8>::zeros((2, 2, 3));
        assert!(matches!(
            RasterImage::from_array(array.view()),
            Err(FilterError::InvalidBuffer(_))
        ));
    }

    #[test]
    fn test_to_grayscale_leaves_source_and_padding() {
        let mut data = vec![0u8; 12];
        data[0..4].copy_from_slice(&[0, 0, 200, 10]);
        data[8..12].copy_from_slice(&[1, 2, 3, 5]); // padding
        let img = RasterImage::new(2, 1, 12, data.clone()).unwrap();

        let gray = img.to_grayscale();
        assert_eq!(img.data(), &data[..]);
        assert_eq!(gray.pixel(0, 0), [60, 60, 60, 255]);
        assert_eq!(gray.pixel(1, 0), [0, 0, 0, 255]);
        assert_eq!(&gray.data()[8..12], &[1, 2, 3, 5]);
    }
}
