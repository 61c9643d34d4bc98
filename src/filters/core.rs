//! Core utilities for convolution filters.
//!
//! This module provides shared functionality used by the edge filter:
//! - Fixed-size square kernels and the Kirsch pair
//! - Gradient magnitude and 8-bit clamping
//! - Cooperative cancellation between rows

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Square convolution kernel of odd size `N`.
///
/// Weights are indexed `[row][column]`; the center element sits at
/// `[N / 2][N / 2]` and is aligned with the output pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Kernel<const N: usize> {
    weights: [[f64; N]; N],
}

impl<const N: usize> Kernel<N> {
    /// # Panics
    /// If `N` is even (evaluated at compile time for `const` kernels).
    pub const fn new(weights: [[f64; N]; N]) -> Self {
        assert!(N % 2 == 1, "kernel size must be odd");
        Self { weights }
    }

    /// Border width the kernel cannot be centered on.
    #[inline]
    pub const fn margin(&self) -> usize {
        N / 2
    }

    #[inline]
    pub fn weight(&self, row: usize, col: usize) -> f64 {
        self.weights[row][col]
    }

    pub fn weights(&self) -> &[[f64; N]; N] {
        &self.weights
    }
}

/// Kirsch horizontal gradient kernel.
pub const KIRSCH_HORIZONTAL: Kernel<3> = Kernel::new([
    [5.0, 5.0, 5.0],
    [-3.0, 0.0, -3.0],
    [-3.0, -3.0, -3.0],
]);

/// Kirsch vertical gradient kernel.
pub const KIRSCH_VERTICAL: Kernel<3> = Kernel::new([
    [-3.0, -3.0, 5.0],
    [-3.0, 0.0, 5.0],
    [-3.0, -3.0, 5.0],
]);

/// Euclidean norm of the two directional responses.
#[inline]
pub fn gradient_magnitude(response_x: f64, response_y: f64) -> f64 {
    (response_x * response_x + response_y * response_y).sqrt()
}

/// Clamp to [0, 255] and truncate.
#[inline]
pub fn clamp_to_u8(value: f64) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

/// Shared cancellation flag, checked by the filter before each row.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kirsch_kernels_are_3x3() {
        assert_eq!(KIRSCH_HORIZONTAL.margin(), 1);
        assert_eq!(KIRSCH_VERTICAL.margin(), 1);
        assert_eq!(KIRSCH_HORIZONTAL.weight(0, 1), 5.0);
        assert_eq!(KIRSCH_VERTICAL.weight(1, 2), 5.0);
        assert_eq!(KIRSCH_HORIZONTAL.weight(1, 1), 0.0);
    }

    #[test]
    fn test_kirsch_kernels_sum_to_zero() {
        // Flat regions must produce no response
        for kernel in [KIRSCH_HORIZONTAL, KIRSCH_VERTICAL] {
            let sum: f64 = kernel.weights().iter().flatten().sum();
            assert_eq!(sum, 0.0);
        }
    }

    #[test]
    fn test_larger_kernel_margin() {
        let k = Kernel::<5>::new([[0.0; 5]; 5]);
        assert_eq!(k.margin(), 2);
    }

    #[test]
    #[should_panic(expected = "kernel size must be odd")]
    fn test_even_kernel_panics() {
        let _ = Kernel::<2>::new([[0.0; 2]; 2]);
    }

    #[test]
    fn test_clamp_to_u8() {
        assert_eq!(clamp_to_u8(-12.0), 0);
        assert_eq!(clamp_to_u8(58.99), 58);
        assert_eq!(clamp_to_u8(255.7), 255);
        assert_eq!(clamp_to_u8(1e9), 255);
    }

    #[test]
    fn test_gradient_magnitude() {
        assert_eq!(gradient_magnitude(3.0, 4.0), 5.0);
        assert_eq!(gradient_magnitude(-3.0, -4.0), 5.0);
    }

    #[test]
    fn test_cancel_token_shared_between_clones() {
        let token = CancelToken::new();
        let other = token.clone();
        assert!(!other.is_cancelled());
        token.cancel();
        assert!(other.is_cancelled());
    }
}
