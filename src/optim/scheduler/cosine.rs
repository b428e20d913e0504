//! Cosine-shaped decay policies

use std::f32::consts::PI;

use crate::optim::train_conf::LearningRateDecayConf;

/// Cosine decay
///
/// Formula:
/// - cos_decay = 0.5 * (1 + cos(pi * t / T))
/// - lr_t = lr_base * ((1 - alpha) * cos_decay + alpha)
///
/// After `T` steps the rate stays at `lr_base * alpha`.
#[derive(Debug, Clone, PartialEq)]
pub struct CosineDecay {
    pub steps: i64,
    pub alpha: f32,
}

impl CosineDecay {
    pub fn new(steps: i64) -> Self {
        Self { steps, alpha: 0.0 }
    }

    #[must_use]
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub(crate) fn decay_conf(&self) -> LearningRateDecayConf {
        LearningRateDecayConf::Cosine { decay_batches: self.steps, alpha: self.alpha }
    }

    pub(crate) fn decayed_lr(&self, base_lr: f32, step: i64) -> f32 {
        if self.steps <= 0 {
            return base_lr;
        }
        let t = step.clamp(0, self.steps) as f32 / self.steps as f32;
        let cos_decay = 0.5 * (1.0 + (PI * t).cos());
        base_lr * ((1.0 - self.alpha) * cos_decay + self.alpha)
    }
}

/// Linear cosine decay
///
/// Formula:
/// - linear = (T - t) / T
/// - cosine = 0.5 * (1 + cos(2 * pi * num_periods * t / T))
/// - lr_t = lr_base * ((alpha + linear) * cosine + beta)
#[derive(Debug, Clone, PartialEq)]
pub struct LinearCosineDecay {
    pub steps: i64,
    pub num_periods: f32,
    pub alpha: f32,
    pub beta: f32,
}

impl LinearCosineDecay {
    pub fn new(steps: i64) -> Self {
        Self { steps, num_periods: 0.5, alpha: 0.0, beta: 0.001 }
    }

    #[must_use]
    pub fn with_num_periods(mut self, num_periods: f32) -> Self {
        self.num_periods = num_periods;
        self
    }

    #[must_use]
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    #[must_use]
    pub fn with_beta(mut self, beta: f32) -> Self {
        self.beta = beta;
        self
    }

    pub(crate) fn decay_conf(&self) -> LearningRateDecayConf {
        LearningRateDecayConf::LinearCosine {
            decay_batches: self.steps,
            num_periods: self.num_periods,
            alpha: self.alpha,
            beta: self.beta,
        }
    }

    pub(crate) fn decayed_lr(&self, base_lr: f32, step: i64) -> f32 {
        if self.steps <= 0 {
            return base_lr;
        }
        let t = step.clamp(0, self.steps) as f32 / self.steps as f32;
        let linear = 1.0 - t;
        let cosine = 0.5 * (1.0 + (2.0 * PI * self.num_periods * t).cos());
        base_lr * ((self.alpha + linear) * cosine + self.beta)
    }
}
