//! Training configuration and ONNX import for a dataflow training engine.
//!
//! This crate provides:
//! - Learning-rate schedules with optional warmup
//! - Gradient clipping and loss scaling policies
//! - Optimizers that fold everything into one [`TrainConf`](optim::TrainConf)
//! - Declarative YAML optimizer configs with validation
//! - Versioned dispatch of ONNX nodes onto backend primitives
//!
//! # Example
//!
//! ```
//! use trainconf::optim::{CosineDecay, LrScheduler, Optimizer, RecordingJob, Sgd, WarmupPolicy};
//!
//! let scheduler = LrScheduler::cosine(0.1, CosineDecay::new(1000))
//!     .with_warmup(WarmupPolicy::linear(100, 0.1));
//! let optimizer = Optimizer::new(scheduler, Sgd::new(0.9));
//!
//! let mut job = RecordingJob::new();
//! optimizer.minimize(&mut job, "loss")?;
//! assert_eq!(job.losses(), ["loss"]);
//! # Ok::<(), trainconf::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod onnx;
pub mod optim;

pub use config::{build_optimizer, load_config, parse_config, TrainSpec};
pub use error::{Error, Result};
pub use onnx::{Backend, OnnxImporter, OnnxNode};
pub use optim::{LrScheduler, Optimizer, TrainConf};
