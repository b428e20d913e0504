//! Optimizer definition and training-configuration assembly

use super::adam::{Adam, LazyAdam};
use super::adamw::AdamW;
use super::clip::ClipPolicy;
use super::job::{JobBuildContext, LossTerms};
use super::lars::Lars;
use super::rmsprop::RmsProp;
use super::scheduler::{LrScheduler, LrSource};
use super::sgd::Sgd;
use super::train_conf::{ModelUpdateConf, TrainConf, UpdateRule, WeightDecayConf};
use crate::error::Result;

/// Optimization algorithm and its hyperparameters
#[derive(Debug, Clone, PartialEq)]
pub enum Algorithm {
    Sgd(Sgd),
    Adam(Adam),
    AdamW(AdamW),
    RmsProp(RmsProp),
    Lars(Lars),
    LazyAdam(LazyAdam),
}

impl Algorithm {
    /// Lower-case name used in configuration files
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sgd(_) => "sgd",
            Self::Adam(_) => "adam",
            Self::AdamW(_) => "adamw",
            Self::RmsProp(_) => "rmsprop",
            Self::Lars(_) => "lars",
            Self::LazyAdam(_) => "lazy_adam",
        }
    }

    fn update_rule(&self) -> UpdateRule {
        match self {
            Self::Sgd(p) => p.update_rule(),
            Self::Adam(p) => p.update_rule(),
            Self::AdamW(p) => p.update_rule(),
            Self::RmsProp(p) => p.update_rule(),
            Self::Lars(p) => p.update_rule(),
            Self::LazyAdam(p) => p.update_rule(),
        }
    }

    fn weight_decay_conf(&self) -> Result<Option<WeightDecayConf>> {
        match self {
            Self::AdamW(p) => p.weight_decay_conf(),
            _ => Ok(None),
        }
    }
}

impl From<Sgd> for Algorithm {
    fn from(p: Sgd) -> Self {
        Self::Sgd(p)
    }
}

impl From<Adam> for Algorithm {
    fn from(p: Adam) -> Self {
        Self::Adam(p)
    }
}

impl From<AdamW> for Algorithm {
    fn from(p: AdamW) -> Self {
        Self::AdamW(p)
    }
}

impl From<RmsProp> for Algorithm {
    fn from(p: RmsProp) -> Self {
        Self::RmsProp(p)
    }
}

impl From<Lars> for Algorithm {
    fn from(p: Lars) -> Self {
        Self::Lars(p)
    }
}

impl From<LazyAdam> for Algorithm {
    fn from(p: LazyAdam) -> Self {
        Self::LazyAdam(p)
    }
}

/// Complete optimizer config
///
/// Combines a learning rate schedule with an algorithm and the optional
/// policies shared by every algorithm. Nothing is validated until
/// [`train_conf`](Self::train_conf) or [`minimize`](Self::minimize).
#[derive(Debug, Clone, PartialEq)]
pub struct Optimizer {
    pub lr_scheduler: LrScheduler,
    pub loss_scale_factor: Option<f32>,
    pub grad_clipping: Option<ClipPolicy>,
    pub train_step_lbn: Option<String>,
    pub algorithm: Algorithm,
}

impl Optimizer {
    pub fn new(lr_scheduler: LrScheduler, algorithm: impl Into<Algorithm>) -> Self {
        Self {
            lr_scheduler,
            loss_scale_factor: None,
            grad_clipping: None,
            train_step_lbn: None,
            algorithm: algorithm.into(),
        }
    }

    /// SGD with momentum `0.9`
    pub fn sgd(lr_scheduler: LrScheduler) -> Self {
        Self::new(lr_scheduler, Sgd::default())
    }

    pub fn adam(lr_scheduler: LrScheduler) -> Self {
        Self::new(lr_scheduler, Adam::default())
    }

    pub fn adamw(lr_scheduler: LrScheduler) -> Self {
        Self::new(lr_scheduler, AdamW::default())
    }

    pub fn rmsprop(lr_scheduler: LrScheduler) -> Self {
        Self::new(lr_scheduler, RmsProp::default())
    }

    pub fn lars(lr_scheduler: LrScheduler) -> Self {
        Self::new(lr_scheduler, Lars::default())
    }

    pub fn lazy_adam(lr_scheduler: LrScheduler) -> Self {
        Self::new(lr_scheduler, LazyAdam::default())
    }

    #[must_use]
    pub fn with_loss_scale_factor(mut self, factor: f32) -> Self {
        self.loss_scale_factor = Some(factor);
        self
    }

    #[must_use]
    pub fn with_grad_clipping(mut self, clip: ClipPolicy) -> Self {
        self.grad_clipping = Some(clip);
        self
    }

    #[must_use]
    pub fn with_train_step_lbn(mut self, lbn: impl Into<String>) -> Self {
        self.train_step_lbn = Some(lbn.into());
        self
    }

    /// Assemble the flattened training configuration
    ///
    /// A custom schedule sets `primary_lr_lbn` and leaves `primary_lr` at
    /// zero; every other schedule sets `primary_lr` to its base rate and
    /// emits its decay record.
    pub fn train_conf(&self) -> Result<TrainConf> {
        let mut model_update_conf = ModelUpdateConf::new(self.algorithm.update_rule());
        model_update_conf.weight_decay_conf = self.algorithm.weight_decay_conf()?;
        model_update_conf.clip_conf = self.grad_clipping.as_ref().map(ClipPolicy::clip_conf);
        model_update_conf.loss_scale_factor = self.loss_scale_factor;
        model_update_conf.warmup_conf = self.lr_scheduler.warmup_conf();

        let (primary_lr, primary_lr_lbn) = match self.lr_scheduler.source() {
            LrSource::Decayed { base_lr, decay } => {
                model_update_conf.learning_rate_decay = Some(decay.decay_conf());
                (*base_lr, None)
            }
            LrSource::External { lr_lbn } => (0.0, Some(lr_lbn.clone())),
        };

        Ok(TrainConf {
            primary_lr,
            primary_lr_lbn,
            train_step_lbn: self.train_step_lbn.clone(),
            model_update_conf,
        })
    }

    /// Register the training configuration and enqueue every loss
    ///
    /// Stops at the first failing call; anything already handed to `ctx`
    /// stays there.
    pub fn minimize<C, L>(&self, ctx: &mut C, losses: L) -> Result<()>
    where
        C: JobBuildContext,
        L: Into<LossTerms<C::Loss>>,
    {
        let conf = self.train_conf()?;
        let losses = losses.into().into_vec();

        tracing::info!(
            algorithm = self.algorithm.name(),
            losses = losses.len(),
            "minimize"
        );

        ctx.set_train_conf(conf)?;
        tracing::debug!("train conf registered");

        for loss in losses {
            ctx.add_loss(loss)?;
        }
        Ok(())
    }
}
