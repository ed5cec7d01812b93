//! # Model Architectures
//!
//! This module aggregates the core components of the Light architecture:
//!
//! - `light`: the main `Light` encoder-decoder model.
//! - `modules`: the building blocks it is assembled from, most notably the
//!   dense-connection residual block.

pub mod light;
pub mod modules;
