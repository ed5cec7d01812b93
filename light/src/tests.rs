#[cfg(test)]
mod tests {
    use crate::config::{ModelConfig, UpsampleMode};
    use crate::error::LightError;

    #[test]
    fn test_zero_input_channels_rejected() {
        let config = ModelConfig::new().with_in_channels(0);

        match config.validate() {
            Err(LightError::InvalidConfiguration { reason }) => {
                assert!(reason.contains("in_channels"));
            }
            _ => panic!("Expected InvalidConfiguration error"),
        }
    }

    #[test]
    fn test_zero_output_channels_rejected() {
        let config = ModelConfig::new().with_out_channels(0);

        match config.validate() {
            Err(LightError::InvalidConfiguration { reason }) => {
                assert!(reason.contains("out_channels"));
            }
            _ => panic!("Expected InvalidConfiguration error"),
        }
    }

    #[test]
    fn test_negative_residual_beta_rejected() {
        let config = ModelConfig::new().with_residual_beta(-0.5);

        match config.validate() {
            Err(LightError::InvalidConfiguration { reason }) => {
                assert!(reason.contains("residual_beta"));
            }
            _ => panic!("Expected InvalidConfiguration error"),
        }
    }

    #[test]
    fn test_non_finite_residual_beta_rejected() {
        let config = ModelConfig::new().with_residual_beta(f64::NAN);

        let result = config.validate();
        assert!(result.is_err());
        match result.unwrap_err() {
            LightError::InvalidConfiguration { reason } => {
                assert!(reason.contains("finite"));
            }
        }
    }

    #[test]
    fn test_valid_configuration() {
        let config = ModelConfig::new()
            .with_in_channels(1)
            .with_out_channels(3)
            .with_residual_beta(0.25)
            .with_upsample(UpsampleMode::Bilinear);

        assert!(config.validate().is_ok());
    }
}
