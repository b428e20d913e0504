//! YAML schema definitions for declarative optimizer configuration

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Complete optimizer configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainSpec {
    /// Optimization algorithm
    pub optimizer: OptimSpec,

    /// Learning rate schedule
    pub lr_scheduler: SchedulerSpec,

    /// Optional gradient clipping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grad_clipping: Option<ClipSpec>,

    /// Static loss scaling factor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loss_scale_factor: Option<f32>,

    /// Logical blob name of an external train-step counter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub train_step_lbn: Option<String>,
}

/// Optimizer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimSpec {
    /// Optimizer name: "sgd" | "adam" | "adamw" | "rmsprop" | "lars" | "lazy_adam"
    pub name: String,

    /// Optimizer-specific parameters (momentum, beta1, weight_decay, etc.)
    #[serde(flatten)]
    pub params: HashMap<String, serde_json::Value>,
}

impl OptimSpec {
    /// Lower-cased optimizer name
    pub fn optimizer_name(&self) -> String {
        self.name.to_lowercase()
    }
}

/// Learning rate schedule with optional warmup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerSpec {
    #[serde(flatten)]
    pub decay: DecaySpec,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warmup: Option<WarmupSpec>,
}

/// Scale given as one factor for every boundary or one factor each
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScaleSpec {
    Scalar(f32),
    List(Vec<f32>),
}

fn default_end_learning_rate() -> f32 {
    0.0001
}

fn default_power() -> f32 {
    1.0
}

fn default_num_periods() -> f32 {
    0.5
}

fn default_beta() -> f32 {
    0.001
}

/// Decay policy, selected by `name`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum DecaySpec {
    PiecewiseConstant {
        boundaries: Vec<i64>,
        values: Vec<f32>,
    },
    PiecewiseScaling {
        base_lr: f32,
        boundaries: Vec<i64>,
        scale: ScaleSpec,
    },
    Polynomial {
        base_lr: f32,
        steps: i64,
        #[serde(default = "default_end_learning_rate")]
        end_learning_rate: f32,
        #[serde(default = "default_power")]
        power: f32,
        #[serde(default)]
        cycle: bool,
    },
    Cosine {
        base_lr: f32,
        steps: i64,
        #[serde(default)]
        alpha: f32,
    },
    LinearCosine {
        base_lr: f32,
        steps: i64,
        #[serde(default = "default_num_periods")]
        num_periods: f32,
        #[serde(default)]
        alpha: f32,
        #[serde(default = "default_beta")]
        beta: f32,
    },
    Exponential {
        base_lr: f32,
        steps: i64,
        decay_rate: f32,
        #[serde(default)]
        staircase: bool,
    },
    InverseTime {
        base_lr: f32,
        steps: i64,
        decay_rate: f32,
        #[serde(default)]
        staircase: bool,
    },
    NaturalExp {
        base_lr: f32,
        steps: i64,
        decay_rate: f32,
        #[serde(default)]
        staircase: bool,
    },
    /// Learning rate read from an external blob
    Custom {
        lr_lbn: String,
    },
}

impl DecaySpec {
    /// Configured base learning rate, `None` for external schedules
    pub fn base_lr(&self) -> Option<f32> {
        match self {
            Self::PiecewiseConstant { values, .. } => values.first().copied(),
            Self::PiecewiseScaling { base_lr, .. }
            | Self::Polynomial { base_lr, .. }
            | Self::Cosine { base_lr, .. }
            | Self::LinearCosine { base_lr, .. }
            | Self::Exponential { base_lr, .. }
            | Self::InverseTime { base_lr, .. }
            | Self::NaturalExp { base_lr, .. } => Some(*base_lr),
            Self::Custom { .. } => None,
        }
    }

    /// Decay horizon in batches, where the policy has one
    pub fn steps(&self) -> Option<i64> {
        match self {
            Self::Polynomial { steps, .. }
            | Self::Cosine { steps, .. }
            | Self::LinearCosine { steps, .. }
            | Self::Exponential { steps, .. }
            | Self::InverseTime { steps, .. }
            | Self::NaturalExp { steps, .. } => Some(*steps),
            _ => None,
        }
    }

    /// Schedule name as written in configuration files
    pub fn name(&self) -> &'static str {
        match self {
            Self::PiecewiseConstant { .. } => "piecewise_constant",
            Self::PiecewiseScaling { .. } => "piecewise_scaling",
            Self::Polynomial { .. } => "polynomial",
            Self::Cosine { .. } => "cosine",
            Self::LinearCosine { .. } => "linear_cosine",
            Self::Exponential { .. } => "exponential",
            Self::InverseTime { .. } => "inverse_time",
            Self::NaturalExp { .. } => "natural_exp",
            Self::Custom { .. } => "custom",
        }
    }
}

/// Warmup policy, selected by `name`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum WarmupSpec {
    Constant { steps: i64, multiplier: f32 },
    Linear { steps: i64, start_multiplier: f32 },
}

/// Gradient clipping policy, selected by `name`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum ClipSpec {
    GlobalNorm { clip_norm: f32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_spec() {
        let yaml = r"
optimizer:
  name: adamw
  beta1: 0.8
  weight_decay: 0.01
  weight_decay_excludes: [bias]
lr_scheduler:
  name: cosine
  base_lr: 0.01
  steps: 1000
  warmup: { name: linear, steps: 100, start_multiplier: 0.1 }
grad_clipping: { name: global_norm, clip_norm: 1.0 }
loss_scale_factor: 1024
";
        let spec: TrainSpec = serde_yaml::from_str(yaml).expect("operation should succeed");
        assert_eq!(spec.optimizer.name, "adamw");
        assert_eq!(spec.optimizer.params["beta1"], serde_json::json!(0.8));
        assert_eq!(spec.optimizer.params["weight_decay_excludes"], serde_json::json!(["bias"]));
        assert_eq!(
            spec.lr_scheduler.decay,
            DecaySpec::Cosine { base_lr: 0.01, steps: 1000, alpha: 0.0 }
        );
        assert_eq!(
            spec.lr_scheduler.warmup,
            Some(WarmupSpec::Linear { steps: 100, start_multiplier: 0.1 })
        );
        assert_eq!(spec.grad_clipping, Some(ClipSpec::GlobalNorm { clip_norm: 1.0 }));
        assert_eq!(spec.loss_scale_factor, Some(1024.0));
        assert_eq!(spec.train_step_lbn, None);
    }

    #[test]
    fn test_polynomial_defaults() {
        let spec: SchedulerSpec =
            serde_yaml::from_str("name: polynomial\nbase_lr: 0.1\nsteps: 50\n")
                .expect("operation should succeed");
        assert_eq!(
            spec.decay,
            DecaySpec::Polynomial {
                base_lr: 0.1,
                steps: 50,
                end_learning_rate: 0.0001,
                power: 1.0,
                cycle: false
            }
        );
        assert_eq!(spec.warmup, None);
    }

    #[test]
    fn test_scale_scalar_or_list() {
        let scalar: SchedulerSpec = serde_yaml::from_str(
            "name: piecewise_scaling\nbase_lr: 0.1\nboundaries: [10, 20]\nscale: 0.5\n",
        )
        .expect("operation should succeed");
        assert!(matches!(
            scalar.decay,
            DecaySpec::PiecewiseScaling { scale: ScaleSpec::Scalar(_), .. }
        ));

        let list: SchedulerSpec = serde_yaml::from_str(
            "name: piecewise_scaling\nbase_lr: 0.1\nboundaries: [10, 20]\nscale: [0.5, 0.1]\n",
        )
        .expect("operation should succeed");
        assert!(matches!(list.decay, DecaySpec::PiecewiseScaling { scale: ScaleSpec::List(_), .. }));
    }

    #[test]
    fn test_custom_schedule() {
        let spec: SchedulerSpec =
            serde_yaml::from_str("name: custom\nlr_lbn: lr/out\n").expect("operation should succeed");
        assert_eq!(spec.decay.base_lr(), None);
        assert_eq!(spec.decay.name(), "custom");
    }

    #[test]
    fn test_unknown_schedule_rejected() {
        let result: std::result::Result<SchedulerSpec, _> =
            serde_yaml::from_str("name: step\nbase_lr: 0.1\n");
        assert!(result.is_err());
    }
}
