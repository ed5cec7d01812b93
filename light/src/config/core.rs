//! Core configuration structure for the Light network.

use crate::error::{LightError, LightResult};
use burn::prelude::*;

use super::enums::UpsampleMode;

/// Main configuration for the Light model.
///
/// Describes the tensor interface of the network (input and output channel
/// counts), the residual weighting used inside every dense block, and the
/// interpolation mode of the decoder.
#[derive(Config, Debug)]
pub struct ModelConfig {
    /// Number of channels of the input tensor.
    #[config(default = "3")]
    pub in_channels: usize,
    /// Number of channels of the output tensor.
    #[config(default = "3")]
    pub out_channels: usize,
    /// Residual weighting applied to the fused branch of every dense block.
    #[config(default = "0.5")]
    pub residual_beta: f64,
    /// Interpolation mode used by the decoder when doubling resolution.
    #[config(default = "UpsampleMode::Nearest")]
    pub upsample: UpsampleMode,
}

impl ModelConfig {
    /// Validate the configuration and return appropriate errors for invalid settings.
    ///
    /// # Errors
    ///
    /// Returns [`LightError::InvalidConfiguration`] if a parameter is out of range.
    pub fn validate(&self) -> LightResult<()> {
        if self.in_channels == 0 {
            return Err(LightError::InvalidConfiguration {
                reason: "in_channels must be greater than zero".to_string(),
            });
        }

        if self.out_channels == 0 {
            return Err(LightError::InvalidConfiguration {
                reason: "out_channels must be greater than zero".to_string(),
            });
        }

        if !self.residual_beta.is_finite() {
            return Err(LightError::InvalidConfiguration {
                reason: "residual_beta must be finite".to_string(),
            });
        }

        if self.residual_beta < 0.0 {
            return Err(LightError::InvalidConfiguration {
                reason: "residual_beta must be non-negative".to_string(),
            });
        }

        Ok(())
    }
}
