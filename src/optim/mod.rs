//! Optimizer and learning-rate configuration
//!
//! Builds the flattened [`TrainConf`] record a training engine consumes from
//! a schedule, an algorithm and optional warmup, clipping and loss-scaling
//! policies.

mod adam;
mod adamw;
mod clip;
mod job;
mod lars;
mod optimizer;
mod rmsprop;
pub mod scheduler;
mod sgd;
pub mod train_conf;
mod warmup;

pub use adam::{Adam, LazyAdam};
pub use adamw::{AdamW, Patterns};
pub use clip::ClipPolicy;
pub use job::{JobBuildContext, LossTerms, RecordingJob};
pub use lars::Lars;
pub use optimizer::{Algorithm, Optimizer};
pub use rmsprop::RmsProp;
pub use scheduler::{
    CosineDecay, DecayPolicy, LRScheduler, LinearCosineDecay, LrScheduler, LrSource,
    PiecewiseConstant, PiecewiseScaling, PolynomialDecay, RateDecay, Scale, ScheduleCursor,
};
pub use sgd::Sgd;
pub use train_conf::{
    ClipConf, LearningRateDecayConf, ModelUpdateConf, TrainConf, UpdateRule, WarmupConf,
    WeightDecayConf, WeightDecayFilter,
};
pub use warmup::WarmupPolicy;
