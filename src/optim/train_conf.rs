//! Flattened training-configuration record handed to the execution engine
//!
//! Mirrors the engine's job configuration: a primary learning rate (or a
//! reference to a blob producing it) plus a model-update section that holds
//! the update rule and every optional policy.

use serde::{Deserialize, Serialize};

/// Training configuration produced by [`Optimizer::train_conf`](super::Optimizer::train_conf)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConf {
    /// Base learning rate; `0.0` when `primary_lr_lbn` supplies it
    pub primary_lr: f32,

    /// Logical blob name producing the learning rate each step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_lr_lbn: Option<String>,

    /// Logical blob name of an external train-step counter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub train_step_lbn: Option<String>,

    pub model_update_conf: ModelUpdateConf,
}

/// Per-parameter update section of [`TrainConf`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelUpdateConf {
    pub update_rule: UpdateRule,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learning_rate_decay: Option<LearningRateDecayConf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warmup_conf: Option<WarmupConf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clip_conf: Option<ClipConf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loss_scale_factor: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_decay_conf: Option<WeightDecayConf>,
}

impl ModelUpdateConf {
    pub(crate) fn new(update_rule: UpdateRule) -> Self {
        Self {
            update_rule,
            learning_rate_decay: None,
            warmup_conf: None,
            clip_conf: None,
            loss_scale_factor: None,
            weight_decay_conf: None,
        }
    }
}

/// Parameter update rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UpdateRule {
    /// Plain gradient descent
    Naive,
    Momentum {
        beta: f32,
    },
    Adam {
        beta1: f32,
        beta2: f32,
        epsilon: f32,
        do_bias_correction: bool,
    },
    #[serde(rename = "rmsprop")]
    RmsProp {
        decay_rate: f32,
        epsilon: f32,
    },
    Lars {
        momentum_beta: f32,
        epsilon: f32,
        lars_coefficient: f32,
    },
    /// Adam updating only rows touched by the gradient; carries no bias-correction flag
    LazyAdam {
        beta1: f32,
        beta2: f32,
        epsilon: f32,
    },
}

/// Learning rate decay shape, one per decayed schedule kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LearningRateDecayConf {
    PiecewiseConstant {
        boundaries: Vec<i64>,
        values: Vec<f32>,
    },
    PiecewiseScaling {
        boundaries: Vec<i64>,
        /// Always one longer than `boundaries`, starting with `1.0`
        scales: Vec<f32>,
    },
    Polynomial {
        decay_batches: i64,
        end_learning_rate: f32,
        power: f32,
        cycle: bool,
    },
    Cosine {
        decay_batches: i64,
        alpha: f32,
    },
    LinearCosine {
        decay_batches: i64,
        num_periods: f32,
        alpha: f32,
        beta: f32,
    },
    Exponential {
        decay_batches: i64,
        decay_rate: f32,
        staircase: bool,
    },
    InverseTime {
        decay_batches: i64,
        decay_rate: f32,
        staircase: bool,
    },
    NaturalExp {
        decay_batches: i64,
        decay_rate: f32,
        staircase: bool,
    },
}

/// Warmup shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WarmupConf {
    Constant { warmup_batches: i64, multiplier: f32 },
    Linear { warmup_batches: i64, start_multiplier: f32 },
}

/// Gradient clipping shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClipConf {
    ClipByGlobalNorm { clip_norm: f32 },
}

/// Decoupled weight decay applied by AdamW
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightDecayConf {
    pub weight_decay_rate: f32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<WeightDecayFilter>,
}

/// Which variables weight decay applies to, by name pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightDecayFilter {
    Includes(Vec<String>),
    Excludes(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_rule_serializes_with_type_tag() {
        let json = serde_json::to_value(UpdateRule::Momentum { beta: 0.9 })
            .expect("serialization should succeed");
        assert_eq!(json["type"], "momentum");
        assert!((json["beta"].as_f64().unwrap() - 0.9).abs() < 1e-6);

        let json = serde_json::to_value(UpdateRule::RmsProp { decay_rate: 0.99, epsilon: 1e-8 })
            .expect("serialization should succeed");
        assert_eq!(json["type"], "rmsprop");
    }

    #[test]
    fn test_optional_sections_are_omitted() {
        let conf = TrainConf {
            primary_lr: 0.1,
            primary_lr_lbn: None,
            train_step_lbn: None,
            model_update_conf: ModelUpdateConf::new(UpdateRule::Naive),
        };
        let yaml = serde_yaml::to_string(&conf).expect("serialization should succeed");
        assert!(!yaml.contains("warmup_conf"));
        assert!(!yaml.contains("clip_conf"));
        assert!(!yaml.contains("primary_lr_lbn"));
    }

    #[test]
    fn test_train_conf_yaml_round_trip_keeps_weight_decay_filter() {
        let mut update = ModelUpdateConf::new(UpdateRule::Adam {
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-8,
            do_bias_correction: true,
        });
        update.weight_decay_conf = Some(WeightDecayConf {
            weight_decay_rate: 0.01,
            filter: Some(WeightDecayFilter::Excludes(vec!["bias".into()])),
        });
        let conf = TrainConf {
            primary_lr: 0.001,
            primary_lr_lbn: None,
            train_step_lbn: Some("train_step".into()),
            model_update_conf: update,
        };

        let yaml = serde_yaml::to_string(&conf).expect("serialization should succeed");
        let back: TrainConf = serde_yaml::from_str(&yaml).expect("deserialization should succeed");
        assert_eq!(back, conf);
    }
}
