//! Configuration validation logic
//!
//! Validates optimizer configs for correctness before building.

use super::error::ValidationError;
use crate::config::schema::{ClipSpec, DecaySpec, TrainSpec, WarmupSpec};

/// Optimizer names accepted in `optimizer.name`
pub const SUPPORTED_OPTIMIZERS: [&str; 6] = ["sgd", "adam", "adamw", "rmsprop", "lars", "lazy_adam"];

/// Validate an optimizer config
///
/// Checks:
/// - Numeric values are in valid ranges
/// - Enums match allowed values
/// - Schedule boundaries are ascending
///
/// Shape errors (boundary/value counts, conflicting weight-decay filters)
/// are reported by the builder.
pub fn validate_config(spec: &TrainSpec) -> Result<(), ValidationError> {
    // Validate optimizer name
    let name = spec.optimizer.optimizer_name();
    if !SUPPORTED_OPTIMIZERS.contains(&name.as_str()) {
        return Err(ValidationError::InvalidOptimizer(spec.optimizer.name.clone()));
    }

    validate_decay(&spec.lr_scheduler.decay)?;

    // Validate warmup if present
    if let Some(warmup) = &spec.lr_scheduler.warmup {
        let (steps, multiplier) = match warmup {
            WarmupSpec::Constant { steps, multiplier } => (*steps, *multiplier),
            WarmupSpec::Linear { steps, start_multiplier } => (*steps, *start_multiplier),
        };
        if steps <= 0 {
            return Err(ValidationError::InvalidWarmupSteps(steps));
        }
        if multiplier <= 0.0 || multiplier > 1.0 {
            return Err(ValidationError::InvalidWarmupMultiplier(multiplier));
        }
    }

    // Validate gradient clipping
    if let Some(ClipSpec::GlobalNorm { clip_norm }) = &spec.grad_clipping {
        if *clip_norm <= 0.0 {
            return Err(ValidationError::InvalidGradClip(*clip_norm));
        }
    }

    if let Some(factor) = spec.loss_scale_factor {
        if factor <= 0.0 {
            return Err(ValidationError::InvalidLossScale(factor));
        }
    }

    Ok(())
}

fn validate_decay(decay: &DecaySpec) -> Result<(), ValidationError> {
    match decay {
        DecaySpec::PiecewiseConstant { boundaries, values } => {
            check_boundaries(boundaries)?;
            if let Some(&lr) = values.iter().find(|v| **v <= 0.0) {
                return Err(ValidationError::InvalidLearningRate(lr));
            }
        }
        DecaySpec::PiecewiseScaling { boundaries, .. } => check_boundaries(boundaries)?,
        DecaySpec::Exponential { decay_rate, .. }
        | DecaySpec::InverseTime { decay_rate, .. }
        | DecaySpec::NaturalExp { decay_rate, .. } => {
            if *decay_rate <= 0.0 {
                return Err(ValidationError::InvalidDecayRate(*decay_rate));
            }
        }
        DecaySpec::Custom { lr_lbn } => {
            if lr_lbn.trim().is_empty() {
                return Err(ValidationError::EmptyLrLbn);
            }
        }
        _ => {}
    }

    if let Some(lr) = decay.base_lr() {
        if lr <= 0.0 {
            return Err(ValidationError::InvalidLearningRate(lr));
        }
    }

    if let Some(steps) = decay.steps() {
        if steps <= 0 {
            return Err(ValidationError::InvalidDecaySteps(steps));
        }
    }

    Ok(())
}

fn check_boundaries(boundaries: &[i64]) -> Result<(), ValidationError> {
    if boundaries.windows(2).any(|w| w[0] >= w[1]) {
        return Err(ValidationError::UnsortedBoundaries(boundaries.to_vec()));
    }
    Ok(())
}
