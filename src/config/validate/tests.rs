//! Unit tests for configuration validation

use super::error::ValidationError;
use super::validator::validate_config;
use crate::config::schema::*;
use std::collections::HashMap;

fn create_valid_spec() -> TrainSpec {
    TrainSpec {
        optimizer: OptimSpec { name: "adam".to_string(), params: HashMap::new() },
        lr_scheduler: SchedulerSpec {
            decay: DecaySpec::Cosine { base_lr: 0.01, steps: 1000, alpha: 0.0 },
            warmup: None,
        },
        grad_clipping: None,
        loss_scale_factor: None,
        train_step_lbn: None,
    }
}

#[test]
fn test_valid_config() {
    let spec = create_valid_spec();
    assert!(validate_config(&spec).is_ok());
}

#[test]
fn test_invalid_optimizer() {
    let mut spec = create_valid_spec();
    spec.optimizer.name = "adagrad".to_string();
    let err = validate_config(&spec).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidOptimizer(ref name) if name == "adagrad"));
}

#[test]
fn test_optimizer_name_case_insensitive() {
    let mut spec = create_valid_spec();
    spec.optimizer.name = "LazY_Adam".to_string();
    assert!(validate_config(&spec).is_ok());
}

#[test]
fn test_invalid_learning_rate() {
    let mut spec = create_valid_spec();
    spec.lr_scheduler.decay = DecaySpec::Cosine { base_lr: 0.0, steps: 1000, alpha: 0.0 };
    let err = validate_config(&spec).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidLearningRate(_)));
}

#[test]
fn test_invalid_piecewise_value() {
    let mut spec = create_valid_spec();
    spec.lr_scheduler.decay =
        DecaySpec::PiecewiseConstant { boundaries: vec![10], values: vec![0.1, -0.01] };
    let err = validate_config(&spec).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidLearningRate(_)));
}

#[test]
fn test_invalid_decay_steps() {
    let mut spec = create_valid_spec();
    spec.lr_scheduler.decay = DecaySpec::Exponential {
        base_lr: 0.1,
        steps: 0,
        decay_rate: 0.9,
        staircase: false,
    };
    let err = validate_config(&spec).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidDecaySteps(0)));
}

#[test]
fn test_invalid_decay_rate() {
    let mut spec = create_valid_spec();
    spec.lr_scheduler.decay = DecaySpec::NaturalExp {
        base_lr: 0.1,
        steps: 10,
        decay_rate: 0.0,
        staircase: true,
    };
    let err = validate_config(&spec).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidDecayRate(_)));
}

#[test]
fn test_unsorted_boundaries() {
    let mut spec = create_valid_spec();
    spec.lr_scheduler.decay = DecaySpec::PiecewiseScaling {
        base_lr: 0.1,
        boundaries: vec![100, 50],
        scale: ScaleSpec::Scalar(0.1),
    };
    let err = validate_config(&spec).unwrap_err();
    assert!(matches!(err, ValidationError::UnsortedBoundaries(_)));
}

#[test]
fn test_duplicate_boundaries() {
    let mut spec = create_valid_spec();
    spec.lr_scheduler.decay =
        DecaySpec::PiecewiseConstant { boundaries: vec![10, 10], values: vec![0.1, 0.01, 0.001] };
    assert!(matches!(validate_config(&spec), Err(ValidationError::UnsortedBoundaries(_))));
}

#[test]
fn test_empty_custom_lbn() {
    let mut spec = create_valid_spec();
    spec.lr_scheduler.decay = DecaySpec::Custom { lr_lbn: "  ".to_string() };
    assert!(matches!(validate_config(&spec), Err(ValidationError::EmptyLrLbn)));
}

#[test]
fn test_invalid_warmup() {
    let mut spec = create_valid_spec();
    spec.lr_scheduler.warmup = Some(WarmupSpec::Linear { steps: 0, start_multiplier: 0.1 });
    assert!(matches!(validate_config(&spec), Err(ValidationError::InvalidWarmupSteps(0))));

    spec.lr_scheduler.warmup = Some(WarmupSpec::Constant { steps: 10, multiplier: 1.5 });
    assert!(matches!(validate_config(&spec), Err(ValidationError::InvalidWarmupMultiplier(_))));

    spec.lr_scheduler.warmup = Some(WarmupSpec::Constant { steps: 10, multiplier: 1.0 });
    assert!(validate_config(&spec).is_ok());
}

#[test]
fn test_invalid_grad_clip() {
    let mut spec = create_valid_spec();
    spec.grad_clipping = Some(ClipSpec::GlobalNorm { clip_norm: 0.0 });
    let err = validate_config(&spec).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidGradClip(_)));
}

#[test]
fn test_invalid_loss_scale() {
    let mut spec = create_valid_spec();
    spec.loss_scale_factor = Some(-1.0);
    assert!(matches!(validate_config(&spec), Err(ValidationError::InvalidLossScale(_))));
}

#[test]
fn test_error_messages_name_the_value() {
    let err = ValidationError::InvalidGradClip(-2.0);
    assert!(err.to_string().contains("-2"));
    let err = ValidationError::UnsortedBoundaries(vec![3, 1]);
    assert!(err.to_string().contains("[3, 1]"));
}
