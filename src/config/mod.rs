//! Declarative YAML configuration
//!
//! ```yaml
//! optimizer:
//!   name: adamw
//!   weight_decay: 0.01
//!   weight_decay_excludes: [bias]
//! lr_scheduler:
//!   name: cosine
//!   base_lr: 0.01
//!   steps: 1000
//!   warmup: { name: linear, steps: 100, start_multiplier: 0.1 }
//! grad_clipping: { name: global_norm, clip_norm: 1.0 }
//! ```

mod builder;
mod loader;
mod schema;
mod validate;

pub use builder::{build_algorithm, build_lr_scheduler, build_optimizer};
pub use loader::{load_config, parse_config};
pub use schema::{ClipSpec, DecaySpec, OptimSpec, ScaleSpec, SchedulerSpec, TrainSpec, WarmupSpec};
pub use validate::{validate_config, ValidationError, SUPPORTED_OPTIMIZERS};
