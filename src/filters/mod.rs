//! Filter modules for edge detection.
//!
//! ## Supported Format
//!
//! | Format | Layout | Type | Description |
//! |--------|--------|------|-------------|
//! | BGRA8 | (H, W, 4), row stride >= W * 4 | u8 | Blue, green, red, alpha, 0-255 |
//!
//! ## Architecture
//!
//! - **Read-only input** - Filters borrow the source and allocate the result
//! - **In-place grayscale** - The pre-pass mutates a buffer the caller owns
//! - **Thread-safe** - Rows are split across Rayon workers, no locking

pub mod core;
pub mod grayscale;
pub mod edge;
