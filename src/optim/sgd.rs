//! Stochastic Gradient Descent

use super::train_conf::UpdateRule;

/// SGD hyperparameters
///
/// A momentum of exactly zero selects the plain (naive) update rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Sgd {
    pub momentum: f32,
}

impl Default for Sgd {
    fn default() -> Self {
        Self { momentum: 0.9 }
    }
}

impl Sgd {
    pub fn new(momentum: f32) -> Self {
        Self { momentum }
    }

    pub(crate) fn update_rule(&self) -> UpdateRule {
        if self.momentum == 0.0 {
            UpdateRule::Naive
        } else {
            UpdateRule::Momentum { beta: self.momentum }
        }
    }
}
