//! Polynomial decay policy

use crate::optim::train_conf::LearningRateDecayConf;

/// Polynomial decay
///
/// Without cycling the step is clamped to `steps`; with cycling the decay
/// horizon grows to the next multiple of `steps`:
///
/// Formula: lr_t = (lr_base - lr_end) * (1 - t / T)^power + lr_end
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialDecay {
    pub steps: i64,
    pub end_learning_rate: f32,
    pub power: f32,
    pub cycle: bool,
}

impl PolynomialDecay {
    /// Linear decay to `0.0001` over `steps`
    pub fn new(steps: i64) -> Self {
        Self { steps, end_learning_rate: 0.0001, power: 1.0, cycle: false }
    }

    #[must_use]
    pub fn with_end_learning_rate(mut self, end_learning_rate: f32) -> Self {
        self.end_learning_rate = end_learning_rate;
        self
    }

    #[must_use]
    pub fn with_power(mut self, power: f32) -> Self {
        self.power = power;
        self
    }

    #[must_use]
    pub fn with_cycle(mut self, cycle: bool) -> Self {
        self.cycle = cycle;
        self
    }

    pub(crate) fn decay_conf(&self) -> LearningRateDecayConf {
        LearningRateDecayConf::Polynomial {
            decay_batches: self.steps,
            end_learning_rate: self.end_learning_rate,
            power: self.power,
            cycle: self.cycle,
        }
    }

    pub(crate) fn decayed_lr(&self, base_lr: f32, step: i64) -> f32 {
        if self.steps <= 0 {
            return base_lr;
        }

        let step = step.max(0);
        let (step, horizon) = if self.cycle {
            let cycles = ((step as f32 / self.steps as f32).ceil()).max(1.0);
            (step as f32, self.steps as f32 * cycles)
        } else {
            (step.min(self.steps) as f32, self.steps as f32)
        };

        let remaining = 1.0 - step / horizon;
        (base_lr - self.end_learning_rate) * remaining.powf(self.power) + self.end_learning_rate
    }
}
