//! Validation error types
//!
//! Defines all validation error variants for optimizer configs.

/// Validation error type
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid optimizer: {0} (must be one of: sgd, adam, adamw, rmsprop, lars, lazy_adam)")]
    InvalidOptimizer(String),

    #[error("Invalid learning rate: {0} (must be > 0.0)")]
    InvalidLearningRate(f32),

    #[error("Invalid decay steps: {0} (must be > 0)")]
    InvalidDecaySteps(i64),

    #[error("Schedule boundaries must be strictly ascending: {0:?}")]
    UnsortedBoundaries(Vec<i64>),

    #[error("Invalid decay rate: {0} (must be > 0.0)")]
    InvalidDecayRate(f32),

    #[error("Custom schedule needs a non-empty lr_lbn")]
    EmptyLrLbn,

    #[error("Invalid warmup steps: {0} (must be > 0)")]
    InvalidWarmupSteps(i64),

    #[error("Invalid warmup multiplier: {0} (must be in (0.0, 1.0])")]
    InvalidWarmupMultiplier(f32),

    #[error("Invalid gradient clip value: {0} (must be > 0.0)")]
    InvalidGradClip(f32),

    #[error("Invalid loss scale factor: {0} (must be > 0.0)")]
    InvalidLossScale(f32),
}
