//! Layer-wise Adaptive Rate Scaling

use super::train_conf::UpdateRule;

/// LARS hyperparameters
#[derive(Debug, Clone, PartialEq)]
pub struct Lars {
    pub momentum_beta: f32,
    pub epsilon: f32,
    pub lars_coefficient: f32,
}

impl Default for Lars {
    fn default() -> Self {
        Self { momentum_beta: 0.9, epsilon: 1e-9, lars_coefficient: 0.0001 }
    }
}

impl Lars {
    pub fn new(momentum_beta: f32, epsilon: f32, lars_coefficient: f32) -> Self {
        Self { momentum_beta, epsilon, lars_coefficient }
    }

    pub(crate) fn update_rule(&self) -> UpdateRule {
        UpdateRule::Lars {
            momentum_beta: self.momentum_beta,
            epsilon: self.epsilon,
            lars_coefficient: self.lars_coefficient,
        }
    }
}
