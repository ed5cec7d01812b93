//! A dense-residual encoder-decoder network for image-to-image tasks,
//! built on the Burn deep learning framework.

mod config;
mod error;
mod models;
mod special;
mod tests;

pub use config::*;
pub use error::{LightError, LightResult};
pub use models::light::{Light, LightConfig, LightRecord};
pub use models::modules::{DenseBlock, DenseBlockConfig};
