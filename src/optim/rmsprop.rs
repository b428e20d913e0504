//! RMSProp

use super::train_conf::UpdateRule;

/// RMSProp hyperparameters
#[derive(Debug, Clone, PartialEq)]
pub struct RmsProp {
    pub decay_rate: f32,
    pub epsilon: f32,
}

impl Default for RmsProp {
    fn default() -> Self {
        Self { decay_rate: 0.99, epsilon: 1e-8 }
    }
}

impl RmsProp {
    pub fn new(decay_rate: f32, epsilon: f32) -> Self {
        Self { decay_rate, epsilon }
    }

    pub(crate) fn update_rule(&self) -> UpdateRule {
        UpdateRule::RmsProp { decay_rate: self.decay_rate, epsilon: self.epsilon }
    }
}
