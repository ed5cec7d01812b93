//! Enumeration types for Light configuration.

use burn::prelude::*;

/// Defines the interpolation used when the decoder doubles spatial resolution.
#[derive(Config, Debug, PartialEq, Eq)]
pub enum UpsampleMode {
    /// Nearest-neighbour interpolation.
    Nearest,
    /// Bilinear interpolation.
    Bilinear,
}
