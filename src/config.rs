//! Options for the edge filter.
//!
//! Deserializable so callers can keep them next to the rest of their
//! configuration; missing fields fall back to the defaults below.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What the filter writes into the ring of pixels the kernel cannot be
/// centered on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderPolicy {
    /// Leave the border transparent black (0, 0, 0, 0).
    #[default]
    Zero,
    /// Convolve border pixels too, clamping neighbour coordinates to the
    /// image. The whole output is opaque.
    Clamp,
}

impl FromStr for BorderPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "zero" => Ok(BorderPolicy::Zero),
            "clamp" => Ok(BorderPolicy::Clamp),
            other => Err(format!("Unknown border policy '{other}', expected 'zero' or 'clamp'")),
        }
    }
}

impl fmt::Display for BorderPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BorderPolicy::Zero => f.write_str("zero"),
            BorderPolicy::Clamp => f.write_str("clamp"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeOptions {
    /// Run the grayscale pre-pass on a copy of the input first.
    pub grayscale: bool,
    pub border: BorderPolicy,
    /// Split rows across the rayon thread pool. Output is identical either way.
    pub parallel: bool,
}

impl Default for EdgeOptions {
    fn default() -> Self {
        Self {
            grayscale: true,
            border: BorderPolicy::Zero,
            parallel: true,
        }
    }
}

impl EdgeOptions {
    pub fn with_grayscale(mut self, grayscale: bool) -> Self {
        self.grayscale = grayscale;
        self
    }

    pub fn with_border(mut self, border: BorderPolicy) -> Self {
        self.border = border;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
