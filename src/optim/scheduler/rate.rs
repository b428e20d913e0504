//! Parameters shared by the exponential, inverse-time and natural-exp policies

/// Rate-based decay parameters
///
/// Decay progress is `t / steps`, floored when `staircase` is set so the
/// rate changes only every `steps` batches.
#[derive(Debug, Clone, PartialEq)]
pub struct RateDecay {
    pub steps: i64,
    pub decay_rate: f32,
    pub staircase: bool,
}

impl RateDecay {
    pub fn new(steps: i64, decay_rate: f32) -> Self {
        Self { steps, decay_rate, staircase: false }
    }

    #[must_use]
    pub fn with_staircase(mut self, staircase: bool) -> Self {
        self.staircase = staircase;
        self
    }

    pub(crate) fn progress(&self, step: i64) -> f32 {
        if self.steps <= 0 {
            return 0.0;
        }
        let p = step.max(0) as f32 / self.steps as f32;
        if self.staircase {
            p.floor()
        } else {
            p
        }
    }
}
