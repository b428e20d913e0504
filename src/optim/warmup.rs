//! Learning rate warmup strategies

use super::train_conf::WarmupConf;

/// Warmup applied on top of any learning rate schedule
///
/// - `Constant`: for the first `steps` batches the rate is `lr * multiplier`,
///   afterwards the scheduled rate is used unchanged.
/// - `Linear`: the multiplier ramps from `start_multiplier` to 1 over `steps`
///   batches: `m_t = start + (1 - start) * t / steps`.
#[derive(Debug, Clone, PartialEq)]
pub enum WarmupPolicy {
    Constant { steps: i64, multiplier: f32 },
    Linear { steps: i64, start_multiplier: f32 },
}

impl WarmupPolicy {
    /// Constant-multiplier warmup
    pub fn constant(steps: i64, multiplier: f32) -> Self {
        Self::Constant { steps, multiplier }
    }

    /// Linear-ramp warmup
    pub fn linear(steps: i64, start_multiplier: f32) -> Self {
        Self::Linear { steps, start_multiplier }
    }

    /// Number of warmup batches
    pub fn steps(&self) -> i64 {
        match self {
            Self::Constant { steps, .. } | Self::Linear { steps, .. } => *steps,
        }
    }

    /// Configuration record for this warmup
    pub fn warmup_conf(&self) -> WarmupConf {
        match *self {
            Self::Constant { steps, multiplier } => {
                WarmupConf::Constant { warmup_batches: steps, multiplier }
            }
            Self::Linear { steps, start_multiplier } => {
                WarmupConf::Linear { warmup_batches: steps, start_multiplier }
            }
        }
    }

    /// Multiplier applied to the scheduled learning rate at `step`
    ///
    /// Returns `1.0` once warmup is over. Negative steps count as step 0.
    pub fn multiplier_at(&self, step: i64) -> f32 {
        let step = step.max(0);
        if step >= self.steps() {
            return 1.0;
        }
        match *self {
            Self::Constant { multiplier, .. } => multiplier,
            Self::Linear { steps, start_multiplier } => {
                let progress = step as f32 / steps as f32;
                start_multiplier + (1.0 - start_multiplier) * progress
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_constant_warmup_conf() {
        let conf = WarmupPolicy::constant(10, 0.1).warmup_conf();
        assert_eq!(conf, WarmupConf::Constant { warmup_batches: 10, multiplier: 0.1 });
    }

    #[test]
    fn test_linear_warmup_conf() {
        let conf = WarmupPolicy::linear(100, 0.25).warmup_conf();
        assert_eq!(conf, WarmupConf::Linear { warmup_batches: 100, start_multiplier: 0.25 });
    }

    #[test]
    fn test_constant_multiplier_until_steps() {
        let warmup = WarmupPolicy::constant(10, 0.1);
        assert_abs_diff_eq!(warmup.multiplier_at(0), 0.1);
        assert_abs_diff_eq!(warmup.multiplier_at(9), 0.1);
        assert_abs_diff_eq!(warmup.multiplier_at(10), 1.0);
        assert_abs_diff_eq!(warmup.multiplier_at(1000), 1.0);
    }

    #[test]
    fn test_linear_multiplier_ramps() {
        let warmup = WarmupPolicy::linear(10, 0.1);
        assert_abs_diff_eq!(warmup.multiplier_at(0), 0.1, epsilon = 1e-6);
        assert_abs_diff_eq!(warmup.multiplier_at(5), 0.55, epsilon = 1e-6);
        assert_abs_diff_eq!(warmup.multiplier_at(10), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_linear_multiplier_increases_monotonically() {
        let warmup = WarmupPolicy::linear(50, 0.0);
        let mut prev = warmup.multiplier_at(0);
        for step in 1..=60 {
            let current = warmup.multiplier_at(step);
            assert!(current >= prev, "multiplier decreased at step {step}: {prev} -> {current}");
            prev = current;
        }
    }

    #[test]
    fn test_zero_step_warmup_is_noop() {
        assert_abs_diff_eq!(WarmupPolicy::linear(0, 0.1).multiplier_at(0), 1.0);
        assert_abs_diff_eq!(WarmupPolicy::constant(0, 0.1).multiplier_at(0), 1.0);
    }

    #[test]
    fn test_zero_step_warmup_ignores_negative_step() {
        assert_abs_diff_eq!(WarmupPolicy::linear(0, 0.1).multiplier_at(-1), 1.0);
        assert_abs_diff_eq!(WarmupPolicy::constant(0, 0.1).multiplier_at(-1), 1.0);
    }

    #[test]
    fn test_negative_step_uses_start_multiplier() {
        assert_abs_diff_eq!(WarmupPolicy::linear(10, 0.2).multiplier_at(-5), 0.2);
        assert_abs_diff_eq!(WarmupPolicy::constant(10, 0.5).multiplier_at(-5), 0.5);
    }
}
