//! Build optimizers and schedules from configuration

use super::schema::{ClipSpec, DecaySpec, OptimSpec, ScaleSpec, SchedulerSpec, TrainSpec, WarmupSpec};
use crate::error::{Error, Result};
use crate::optim::{
    Adam, AdamW, Algorithm, ClipPolicy, CosineDecay, Lars, LazyAdam, LinearCosineDecay,
    LrScheduler, Optimizer, PolynomialDecay, RateDecay, RmsProp, Scale, Sgd, WarmupPolicy,
};

// Optimizer parameter field name constants
const PARAM_MOMENTUM: &str = "momentum";
const PARAM_BETA1: &str = "beta1";
const PARAM_BETA2: &str = "beta2";
const PARAM_EPSILON: &str = "epsilon";
const PARAM_DO_BIAS_CORRECTION: &str = "do_bias_correction";
const PARAM_WEIGHT_DECAY: &str = "weight_decay";
const PARAM_WEIGHT_DECAY_INCLUDES: &str = "weight_decay_includes";
const PARAM_WEIGHT_DECAY_EXCLUDES: &str = "weight_decay_excludes";
const PARAM_DECAY_RATE: &str = "decay_rate";
const PARAM_MOMENTUM_BETA: &str = "momentum_beta";
const PARAM_LARS_COEFFICIENT: &str = "lars_coefficient";

/// Parameters each optimizer understands
fn known_params(name: &str) -> &'static [&'static str] {
    match name {
        "sgd" => &[PARAM_MOMENTUM],
        "adam" => &[PARAM_BETA1, PARAM_BETA2, PARAM_EPSILON, PARAM_DO_BIAS_CORRECTION],
        "adamw" => &[
            PARAM_BETA1,
            PARAM_BETA2,
            PARAM_EPSILON,
            PARAM_DO_BIAS_CORRECTION,
            PARAM_WEIGHT_DECAY,
            PARAM_WEIGHT_DECAY_INCLUDES,
            PARAM_WEIGHT_DECAY_EXCLUDES,
        ],
        "rmsprop" => &[PARAM_DECAY_RATE, PARAM_EPSILON],
        "lars" => &[PARAM_MOMENTUM_BETA, PARAM_EPSILON, PARAM_LARS_COEFFICIENT],
        "lazy_adam" => &[PARAM_BETA1, PARAM_BETA2, PARAM_EPSILON],
        _ => &[],
    }
}

fn f32_param(spec: &OptimSpec, key: &str, default: f32) -> Result<f32> {
    match spec.params.get(key) {
        None => Ok(default),
        Some(value) => value.as_f64().map(|v| v as f32).ok_or_else(|| {
            Error::Config(format!("optimizer.{key} must be a number, got {value}"))
        }),
    }
}

fn opt_f32_param(spec: &OptimSpec, key: &str) -> Result<Option<f32>> {
    match spec.params.get(key) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(_) => f32_param(spec, key, 0.0).map(Some),
    }
}

fn bool_param(spec: &OptimSpec, key: &str, default: bool) -> Result<bool> {
    match spec.params.get(key) {
        None => Ok(default),
        Some(value) => value
            .as_bool()
            .ok_or_else(|| Error::Config(format!("optimizer.{key} must be a boolean, got {value}"))),
    }
}

/// A single pattern or a list of patterns
fn patterns_param(spec: &OptimSpec, key: &str) -> Result<Option<Vec<String>>> {
    let invalid = || Error::Config(format!("optimizer.{key} must be a string or a list of strings"));
    match spec.params.get(key) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(pattern)) => Ok(Some(vec![pattern.clone()])),
        Some(serde_json::Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string).ok_or_else(invalid))
            .collect::<Result<Vec<_>>>()
            .map(Some),
        Some(_) => Err(invalid()),
    }
}

fn build_adam(spec: &OptimSpec) -> Result<Adam> {
    let defaults = Adam::default();
    Ok(Adam::new(
        f32_param(spec, PARAM_BETA1, defaults.beta1)?,
        f32_param(spec, PARAM_BETA2, defaults.beta2)?,
        f32_param(spec, PARAM_EPSILON, defaults.epsilon)?,
    )
    .with_bias_correction(bool_param(spec, PARAM_DO_BIAS_CORRECTION, defaults.do_bias_correction)?))
}

/// Build the optimization algorithm from configuration
pub fn build_algorithm(spec: &OptimSpec) -> Result<Algorithm> {
    let name = spec.optimizer_name();

    for key in spec.params.keys() {
        if !known_params(&name).contains(&key.as_str()) {
            tracing::warn!(optimizer = %name, param = %key, "ignoring unknown optimizer parameter");
        }
    }

    match name.as_str() {
        "sgd" => {
            let momentum = f32_param(spec, PARAM_MOMENTUM, Sgd::default().momentum)?;
            Ok(Sgd::new(momentum).into())
        }
        "adam" => Ok(build_adam(spec)?.into()),
        "adamw" => {
            let adamw = AdamW {
                adam: build_adam(spec)?,
                weight_decay: opt_f32_param(spec, PARAM_WEIGHT_DECAY)?,
                weight_decay_includes: patterns_param(spec, PARAM_WEIGHT_DECAY_INCLUDES)?,
                weight_decay_excludes: patterns_param(spec, PARAM_WEIGHT_DECAY_EXCLUDES)?,
            };
            Ok(adamw.into())
        }
        "rmsprop" => {
            let defaults = RmsProp::default();
            Ok(RmsProp::new(
                f32_param(spec, PARAM_DECAY_RATE, defaults.decay_rate)?,
                f32_param(spec, PARAM_EPSILON, defaults.epsilon)?,
            )
            .into())
        }
        "lars" => {
            let defaults = Lars::default();
            Ok(Lars::new(
                f32_param(spec, PARAM_MOMENTUM_BETA, defaults.momentum_beta)?,
                f32_param(spec, PARAM_EPSILON, defaults.epsilon)?,
                f32_param(spec, PARAM_LARS_COEFFICIENT, defaults.lars_coefficient)?,
            )
            .into())
        }
        "lazy_adam" => {
            let defaults = LazyAdam::default();
            Ok(LazyAdam::new(
                f32_param(spec, PARAM_BETA1, defaults.beta1)?,
                f32_param(spec, PARAM_BETA2, defaults.beta2)?,
                f32_param(spec, PARAM_EPSILON, defaults.epsilon)?,
            )
            .into())
        }
        name => Err(Error::Config(format!(
            "Unknown optimizer: {name}. Supported: sgd, adam, adamw, rmsprop, lars, lazy_adam"
        ))),
    }
}

/// Build a learning rate schedule from configuration
pub fn build_lr_scheduler(spec: &SchedulerSpec) -> Result<LrScheduler> {
    let scheduler = match &spec.decay {
        DecaySpec::PiecewiseConstant { boundaries, values } => {
            LrScheduler::piecewise_constant(boundaries.clone(), values.clone())?
        }
        DecaySpec::PiecewiseScaling { base_lr, boundaries, scale } => {
            let scale = match scale {
                ScaleSpec::Scalar(s) => Scale::Scalar(*s),
                ScaleSpec::List(s) => Scale::PerBoundary(s.clone()),
            };
            LrScheduler::piecewise_scaling(*base_lr, boundaries.clone(), scale)?
        }
        DecaySpec::Polynomial { base_lr, steps, end_learning_rate, power, cycle } => {
            LrScheduler::polynomial(
                *base_lr,
                PolynomialDecay::new(*steps)
                    .with_end_learning_rate(*end_learning_rate)
                    .with_power(*power)
                    .with_cycle(*cycle),
            )
        }
        DecaySpec::Cosine { base_lr, steps, alpha } => {
            LrScheduler::cosine(*base_lr, CosineDecay::new(*steps).with_alpha(*alpha))
        }
        DecaySpec::LinearCosine { base_lr, steps, num_periods, alpha, beta } => {
            LrScheduler::linear_cosine(
                *base_lr,
                LinearCosineDecay::new(*steps)
                    .with_num_periods(*num_periods)
                    .with_alpha(*alpha)
                    .with_beta(*beta),
            )
        }
        DecaySpec::Exponential { base_lr, steps, decay_rate, staircase } => LrScheduler::exponential(
            *base_lr,
            RateDecay::new(*steps, *decay_rate).with_staircase(*staircase),
        ),
        DecaySpec::InverseTime { base_lr, steps, decay_rate, staircase } => {
            LrScheduler::inverse_time(
                *base_lr,
                RateDecay::new(*steps, *decay_rate).with_staircase(*staircase),
            )
        }
        DecaySpec::NaturalExp { base_lr, steps, decay_rate, staircase } => LrScheduler::natural_exp(
            *base_lr,
            RateDecay::new(*steps, *decay_rate).with_staircase(*staircase),
        ),
        DecaySpec::Custom { lr_lbn } => LrScheduler::custom(lr_lbn.clone()),
    };

    Ok(match &spec.warmup {
        Some(warmup) => scheduler.with_warmup(build_warmup(warmup)),
        None => scheduler,
    })
}

fn build_warmup(spec: &WarmupSpec) -> WarmupPolicy {
    match spec {
        WarmupSpec::Constant { steps, multiplier } => WarmupPolicy::constant(*steps, *multiplier),
        WarmupSpec::Linear { steps, start_multiplier } => {
            WarmupPolicy::linear(*steps, *start_multiplier)
        }
    }
}

/// Build the complete optimizer from configuration
pub fn build_optimizer(spec: &TrainSpec) -> Result<Optimizer> {
    let mut optimizer =
        Optimizer::new(build_lr_scheduler(&spec.lr_scheduler)?, build_algorithm(&spec.optimizer)?);

    if let Some(ClipSpec::GlobalNorm { clip_norm }) = &spec.grad_clipping {
        optimizer = optimizer.with_grad_clipping(ClipPolicy::by_global_norm(*clip_norm));
    }
    if let Some(factor) = spec.loss_scale_factor {
        optimizer = optimizer.with_loss_scale_factor(factor);
    }
    if let Some(lbn) = &spec.train_step_lbn {
        optimizer = optimizer.with_train_step_lbn(lbn.clone());
    }
    Ok(optimizer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optim::{UpdateRule, WeightDecayFilter};
    use std::collections::HashMap;

    fn optim(name: &str, params: serde_json::Value) -> OptimSpec {
        let params: HashMap<String, serde_json::Value> =
            serde_json::from_value(params).expect("operation should succeed");
        OptimSpec { name: name.to_string(), params }
    }

    #[test]
    fn test_build_sgd_defaults() {
        let algo = build_algorithm(&optim("sgd", serde_json::json!({})))
            .expect("operation should succeed");
        assert_eq!(algo, Algorithm::Sgd(Sgd::new(0.9)));
    }

    #[test]
    fn test_build_sgd_zero_momentum() {
        let algo = build_algorithm(&optim("SGD", serde_json::json!({ "momentum": 0 })))
            .expect("operation should succeed");
        assert_eq!(algo, Algorithm::Sgd(Sgd::new(0.0)));
    }

    #[test]
    fn test_build_adam() {
        let algo = build_algorithm(&optim(
            "adam",
            serde_json::json!({ "beta1": 0.8, "do_bias_correction": true }),
        ))
        .expect("operation should succeed");
        assert_eq!(algo, Algorithm::Adam(Adam::new(0.8, 0.999, 1e-8).with_bias_correction(true)));
    }

    #[test]
    fn test_build_adamw_single_pattern() {
        let algo = build_algorithm(&optim(
            "adamw",
            serde_json::json!({ "weight_decay": 0.01, "weight_decay_excludes": "bias" }),
        ))
        .expect("operation should succeed");
        let Algorithm::AdamW(adamw) = algo else {
            panic!("expected AdamW");
        };
        assert_eq!(adamw.weight_decay, Some(0.01));
        assert_eq!(adamw.weight_decay_excludes, Some(vec!["bias".to_string()]));
        assert_eq!(adamw.weight_decay_includes, None);
    }

    #[test]
    fn test_build_adamw_pattern_list() {
        let algo = build_algorithm(&optim(
            "adamw",
            serde_json::json!({ "weight_decay": 0.01, "weight_decay_includes": ["dense", "conv"] }),
        ))
        .expect("operation should succeed");
        let Algorithm::AdamW(adamw) = algo else {
            panic!("expected AdamW");
        };
        assert_eq!(adamw.weight_decay_includes, Some(vec!["dense".to_string(), "conv".to_string()]));
    }

    #[test]
    fn test_build_rmsprop_lars_lazy_adam() {
        let rms = build_algorithm(&optim("rmsprop", serde_json::json!({ "decay_rate": 0.9 })))
            .expect("operation should succeed");
        assert_eq!(rms, Algorithm::RmsProp(RmsProp::new(0.9, 1e-8)));

        let lars = build_algorithm(&optim("lars", serde_json::json!({})))
            .expect("operation should succeed");
        assert_eq!(lars, Algorithm::Lars(Lars::default()));

        let lazy = build_algorithm(&optim("lazy_adam", serde_json::json!({ "epsilon": 1e-6 })))
            .expect("operation should succeed");
        assert_eq!(lazy, Algorithm::LazyAdam(LazyAdam::new(0.9, 0.999, 1e-6)));
    }

    #[test]
    fn test_wrong_param_type() {
        let err = build_algorithm(&optim("sgd", serde_json::json!({ "momentum": "high" })))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = build_algorithm(&optim(
            "adamw",
            serde_json::json!({ "weight_decay_includes": [1, 2] }),
        ))
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_unknown_optimizer() {
        let err = build_algorithm(&optim("adagrad", serde_json::json!({}))).unwrap_err();
        assert!(err.to_string().contains("Unknown optimizer: adagrad"));
    }

    #[test]
    fn test_build_scheduler_with_warmup() {
        let spec = SchedulerSpec {
            decay: DecaySpec::Exponential { base_lr: 0.1, steps: 10, decay_rate: 0.5, staircase: true },
            warmup: Some(WarmupSpec::Constant { steps: 5, multiplier: 0.5 }),
        };
        let scheduler = build_lr_scheduler(&spec).expect("operation should succeed");
        assert_eq!(scheduler.warmup(), Some(&WarmupPolicy::constant(5, 0.5)));
        assert_eq!(scheduler.base_lr(), Some(0.1));
    }

    #[test]
    fn test_build_scheduler_shape_error() {
        let spec = SchedulerSpec {
            decay: DecaySpec::PiecewiseConstant { boundaries: vec![10, 20], values: vec![0.1, 0.01] },
            warmup: None,
        };
        assert!(matches!(
            build_lr_scheduler(&spec),
            Err(Error::BoundaryValueMismatch { boundaries: 2, values: 2 })
        ));
    }

    #[test]
    fn test_build_optimizer_full() {
        let spec = TrainSpec {
            optimizer: optim("adamw", serde_json::json!({ "weight_decay": 0.05 })),
            lr_scheduler: SchedulerSpec {
                decay: DecaySpec::Custom { lr_lbn: "lr/out".to_string() },
                warmup: None,
            },
            grad_clipping: Some(ClipSpec::GlobalNorm { clip_norm: 5.0 }),
            loss_scale_factor: Some(128.0),
            train_step_lbn: Some("step/out".to_string()),
        };
        let conf = build_optimizer(&spec)
            .expect("operation should succeed")
            .train_conf()
            .expect("operation should succeed");
        assert_eq!(conf.primary_lr_lbn.as_deref(), Some("lr/out"));
        assert_eq!(conf.train_step_lbn.as_deref(), Some("step/out"));
        assert!(matches!(conf.model_update_conf.update_rule, UpdateRule::Adam { .. }));
        let wd = conf.model_update_conf.weight_decay_conf.expect("weight decay is set");
        assert_eq!(wd.weight_decay_rate, 0.05);
        assert_eq!(wd.filter, None::<WeightDecayFilter>);
    }
}
