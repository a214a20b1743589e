//! Error types for the bandit-sim library.

use thiserror::Error;

/// Result type alias for bandit operations.
pub type Result<T> = std::result::Result<T, BanditError>;

/// Errors that can occur during bandit operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BanditError {
    /// The arm is not part of the configured arm set.
    #[error("invalid arm: {arm}")]
    InvalidArm { arm: String },

    /// The same arm was listed more than once at construction.
    #[error("duplicate arm: {arm}")]
    DuplicateArm { arm: String },

    /// A bandit was constructed without any arms.
    #[error("arm set is empty")]
    EmptyArmSet,

    /// Every arm has been discarded and the policy is configured to fail
    /// rather than fall back to exploitation.
    #[error("all {n_arms} arms have been discarded")]
    AllArmsDiscarded { n_arms: usize },

    /// A reward was NaN or infinite.
    #[error("invalid reward: {reward}")]
    InvalidReward { reward: f64 },

    /// Mismatch in the dimensions of input data.
    #[error("dimension mismatch: {message}")]
    DimensionMismatch { message: String },

    /// Invalid parameter value.
    #[error("invalid parameter: {message}")]
    InvalidParameter { message: String },

    /// Builder configuration error.
    #[error("builder error: {message}")]
    BuilderError { message: String },
}

impl BanditError {
    pub(crate) fn invalid_arm(arm: impl std::fmt::Debug) -> Self {
        BanditError::InvalidArm {
            arm: format!("{arm:?}"),
        }
    }

    pub(crate) fn invalid_parameter(message: impl Into<String>) -> Self {
        BanditError::InvalidParameter {
            message: message.into(),
        }
    }
}
