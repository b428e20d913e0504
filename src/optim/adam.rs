//! Adam and LazyAdam

use super::train_conf::UpdateRule;

/// Adam hyperparameters
#[derive(Debug, Clone, PartialEq)]
pub struct Adam {
    pub beta1: f32,
    pub beta2: f32,
    pub epsilon: f32,
    pub do_bias_correction: bool,
}

impl Default for Adam {
    fn default() -> Self {
        Self { beta1: 0.9, beta2: 0.999, epsilon: 1e-8, do_bias_correction: false }
    }
}

impl Adam {
    pub fn new(beta1: f32, beta2: f32, epsilon: f32) -> Self {
        Self { beta1, beta2, epsilon, ..Self::default() }
    }

    #[must_use]
    pub fn with_bias_correction(mut self, do_bias_correction: bool) -> Self {
        self.do_bias_correction = do_bias_correction;
        self
    }

    pub(crate) fn update_rule(&self) -> UpdateRule {
        UpdateRule::Adam {
            beta1: self.beta1,
            beta2: self.beta2,
            epsilon: self.epsilon,
            do_bias_correction: self.do_bias_correction,
        }
    }
}

/// LazyAdam hyperparameters
///
/// Unlike [`Adam`] there is no bias-correction switch; the engine's lazy
/// update never applies it.
#[derive(Debug, Clone, PartialEq)]
pub struct LazyAdam {
    pub beta1: f32,
    pub beta2: f32,
    pub epsilon: f32,
}

impl Default for LazyAdam {
    fn default() -> Self {
        Self { beta1: 0.9, beta2: 0.999, epsilon: 1e-8 }
    }
}

impl LazyAdam {
    pub fn new(beta1: f32, beta2: f32, epsilon: f32) -> Self {
        Self { beta1, beta2, epsilon }
    }

    pub(crate) fn update_rule(&self) -> UpdateRule {
        UpdateRule::LazyAdam { beta1: self.beta1, beta2: self.beta2, epsilon: self.epsilon }
    }
}
