//! Error type shared by every filter in the crate.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// Buffer length, stride or channel layout does not describe a BGRA image.
    #[error("Invalid buffer: {0}")]
    InvalidBuffer(String),
    /// Image is smaller than the kernel, so no interior pixel exists.
    #[error("Image {width}x{height} is too small, both sides must be at least {min}")]
    DimensionTooSmall {
        width: usize,
        height: usize,
        min: usize,
    },
    #[error("Filter cancelled")]
    Cancelled,
}
