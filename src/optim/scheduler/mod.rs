//! Learning rate schedulers
//!
//! A schedule either decays a base learning rate with one of eight policies,
//! or defers to an external blob that produces the rate each step:
//! - `PiecewiseConstant` / `PiecewiseScaling` - step functions over boundaries
//! - `Polynomial` - polynomial decay towards an end rate, optionally cyclic
//! - `Cosine` / `LinearCosine` - cosine-shaped decay
//! - `Exponential` / `InverseTime` / `NaturalExp` - rate-based decay
//! - `Custom` - external learning rate reference
//!
//! Any schedule may be combined with a [`WarmupPolicy`].

mod cosine;
mod piecewise;
mod polynomial;
mod rate;


pub use cosine::{CosineDecay, LinearCosineDecay};
pub use piecewise::{PiecewiseConstant, PiecewiseScaling, Scale};
pub use polynomial::PolynomialDecay;
pub use rate::RateDecay;

use super::train_conf::{LearningRateDecayConf, WarmupConf};
use super::warmup::WarmupPolicy;
use crate::error::Result;

/// Learning rate scheduler trait
pub trait LRScheduler {
    /// Get the current learning rate
    fn get_lr(&self) -> f32;

    /// Step the scheduler (called after each batch)
    fn step(&mut self);
}

/// Decay policy applied to a base learning rate
#[derive(Debug, Clone, PartialEq)]
pub enum DecayPolicy {
    PiecewiseConstant(PiecewiseConstant),
    PiecewiseScaling(PiecewiseScaling),
    Polynomial(PolynomialDecay),
    Cosine(CosineDecay),
    LinearCosine(LinearCosineDecay),
    Exponential(RateDecay),
    InverseTime(RateDecay),
    NaturalExp(RateDecay),
}

impl DecayPolicy {
    /// Configuration record for this policy
    pub fn decay_conf(&self) -> LearningRateDecayConf {
        match self {
            Self::PiecewiseConstant(p) => p.decay_conf(),
            Self::PiecewiseScaling(p) => p.decay_conf(),
            Self::Polynomial(p) => p.decay_conf(),
            Self::Cosine(p) => p.decay_conf(),
            Self::LinearCosine(p) => p.decay_conf(),
            Self::Exponential(p) => LearningRateDecayConf::Exponential {
                decay_batches: p.steps,
                decay_rate: p.decay_rate,
                staircase: p.staircase,
            },
            Self::InverseTime(p) => LearningRateDecayConf::InverseTime {
                decay_batches: p.steps,
                decay_rate: p.decay_rate,
                staircase: p.staircase,
            },
            Self::NaturalExp(p) => LearningRateDecayConf::NaturalExp {
                decay_batches: p.steps,
                decay_rate: p.decay_rate,
                staircase: p.staircase,
            },
        }
    }

    /// Decayed learning rate at `step`
    pub fn decayed_lr(&self, base_lr: f32, step: i64) -> f32 {
        match self {
            Self::PiecewiseConstant(p) => p.decayed_lr(step),
            Self::PiecewiseScaling(p) => p.decayed_lr(base_lr, step),
            Self::Polynomial(p) => p.decayed_lr(base_lr, step),
            Self::Cosine(p) => p.decayed_lr(base_lr, step),
            Self::LinearCosine(p) => p.decayed_lr(base_lr, step),
            Self::Exponential(p) => base_lr * p.decay_rate.powf(p.progress(step)),
            Self::InverseTime(p) => base_lr / (1.0 + p.decay_rate * p.progress(step)),
            Self::NaturalExp(p) => base_lr * (-p.decay_rate * p.progress(step)).exp(),
        }
    }
}

/// Where the learning rate comes from
#[derive(Debug, Clone, PartialEq)]
pub enum LrSource {
    /// Base rate decayed by a policy
    Decayed { base_lr: f32, decay: DecayPolicy },
    /// Rate read from an external logical blob each step
    External { lr_lbn: String },
}

/// Learning rate schedule with optional warmup
#[derive(Debug, Clone, PartialEq)]
pub struct LrScheduler {
    source: LrSource,
    warmup: Option<WarmupPolicy>,
}

impl LrScheduler {
    fn decayed(base_lr: f32, decay: DecayPolicy) -> Self {
        Self { source: LrSource::Decayed { base_lr, decay }, warmup: None }
    }

    /// Piecewise constant schedule
    ///
    /// `values[i]` applies from `boundaries[i - 1]` (inclusive) to
    /// `boundaries[i]` (exclusive). Requires `values.len() == boundaries.len() + 1`.
    pub fn piecewise_constant(boundaries: Vec<i64>, values: Vec<f32>) -> Result<Self> {
        let policy = PiecewiseConstant::new(boundaries, values)?;
        Ok(Self::decayed(policy.values[0], DecayPolicy::PiecewiseConstant(policy)))
    }

    /// Piecewise scaling schedule
    ///
    /// A scalar `scale` is broadcast to every boundary; the rate before the
    /// first boundary is always `base_lr`.
    pub fn piecewise_scaling(
        base_lr: f32,
        boundaries: Vec<i64>,
        scale: impl Into<Scale>,
    ) -> Result<Self> {
        let policy = PiecewiseScaling::new(boundaries, scale.into())?;
        Ok(Self::decayed(base_lr, DecayPolicy::PiecewiseScaling(policy)))
    }

    /// Polynomial decay schedule
    pub fn polynomial(base_lr: f32, decay: PolynomialDecay) -> Self {
        Self::decayed(base_lr, DecayPolicy::Polynomial(decay))
    }

    /// Cosine decay schedule
    pub fn cosine(base_lr: f32, decay: CosineDecay) -> Self {
        Self::decayed(base_lr, DecayPolicy::Cosine(decay))
    }

    /// Linear cosine decay schedule
    pub fn linear_cosine(base_lr: f32, decay: LinearCosineDecay) -> Self {
        Self::decayed(base_lr, DecayPolicy::LinearCosine(decay))
    }

    /// Exponential decay: `lr = base_lr * rate^(step / steps)`
    pub fn exponential(base_lr: f32, decay: RateDecay) -> Self {
        Self::decayed(base_lr, DecayPolicy::Exponential(decay))
    }

    /// Inverse time decay: `lr = base_lr / (1 + rate * step / steps)`
    pub fn inverse_time(base_lr: f32, decay: RateDecay) -> Self {
        Self::decayed(base_lr, DecayPolicy::InverseTime(decay))
    }

    /// Natural exponential decay: `lr = base_lr * exp(-rate * step / steps)`
    pub fn natural_exp(base_lr: f32, decay: RateDecay) -> Self {
        Self::decayed(base_lr, DecayPolicy::NaturalExp(decay))
    }

    /// Learning rate read from the blob `lr_lbn`
    pub fn custom(lr_lbn: impl Into<String>) -> Self {
        Self { source: LrSource::External { lr_lbn: lr_lbn.into() }, warmup: None }
    }

    /// Attach a warmup policy
    #[must_use]
    pub fn with_warmup(mut self, warmup: WarmupPolicy) -> Self {
        self.warmup = Some(warmup);
        self
    }

    pub fn source(&self) -> &LrSource {
        &self.source
    }

    pub fn warmup(&self) -> Option<&WarmupPolicy> {
        self.warmup.as_ref()
    }

    /// Base learning rate, `None` for external schedules
    pub fn base_lr(&self) -> Option<f32> {
        match &self.source {
            LrSource::Decayed { base_lr, .. } => Some(*base_lr),
            LrSource::External { .. } => None,
        }
    }

    /// Decay record, `None` for external schedules
    pub fn learning_rate_decay_conf(&self) -> Option<LearningRateDecayConf> {
        match &self.source {
            LrSource::Decayed { decay, .. } => Some(decay.decay_conf()),
            LrSource::External { .. } => None,
        }
    }

    pub fn warmup_conf(&self) -> Option<WarmupConf> {
        self.warmup.as_ref().map(WarmupPolicy::warmup_conf)
    }

    /// Learning rate the engine would use at `step`
    ///
    /// While warmup is active the warmup multiplier applies to the base rate;
    /// afterwards the decay policy applies. Negative steps count as step 0.
    /// Returns `None` when the rate comes from an external blob.
    pub fn learning_rate_at(&self, step: i64) -> Option<f32> {
        let LrSource::Decayed { base_lr, decay } = &self.source else {
            return None;
        };
        let step = step.max(0);
        match &self.warmup {
            Some(warmup) if step < warmup.steps() => Some(base_lr * warmup.multiplier_at(step)),
            _ => Some(decay.decayed_lr(*base_lr, step)),
        }
    }

    /// Step-by-step view of this schedule, `None` for external schedules
    pub fn cursor(&self) -> Option<ScheduleCursor<'_>> {
        match self.source {
            LrSource::Decayed { .. } => Some(ScheduleCursor { scheduler: self, current_step: 0 }),
            LrSource::External { .. } => None,
        }
    }
}

/// Walks a decayed schedule one batch at a time
pub struct ScheduleCursor<'a> {
    scheduler: &'a LrScheduler,
    current_step: i64,
}

impl ScheduleCursor<'_> {
    pub fn current_step(&self) -> i64 {
        self.current_step
    }
}

impl LRScheduler for ScheduleCursor<'_> {
    fn get_lr(&self) -> f32 {
        // Cursors are only handed out for decayed schedules.
        self.scheduler.learning_rate_at(self.current_step).unwrap_or(0.0)
    }

    fn step(&mut self) {
        self.current_step += 1;
    }
}
