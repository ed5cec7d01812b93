use thiserror::Error;

/// The error type for `light-burn` operations.
#[derive(Error, Debug)]
pub enum LightError {
    /// Error for when an invalid model configuration is provided.
    /// This can happen if configuration parameters are logically inconsistent.
    #[error("Invalid model configuration: {reason}")]
    InvalidConfiguration {
        /// The reason why the configuration is invalid.
        reason: String,
    },
}

/// A specialized `Result` type for `light-burn` operations.
pub type LightResult<T> = Result<T, LightError>;
