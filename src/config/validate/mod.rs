//! Configuration validation
//!
//! Validates optimizer configs for correctness before building.

mod error;
mod validator;

#[cfg(test)]
mod proptests;
#[cfg(test)]
mod tests;

pub use error::ValidationError;
pub use validator::{validate_config, SUPPORTED_OPTIMIZERS};
