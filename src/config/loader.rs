//! Load optimizer configs from YAML

use std::fs;
use std::path::Path;

use super::schema::TrainSpec;
use super::validate::validate_config;
use crate::error::{Error, Result};

/// Parse and validate a YAML optimizer config
pub fn parse_config(yaml: &str) -> Result<TrainSpec> {
    let spec: TrainSpec = serde_yaml::from_str(yaml)?;
    validate_config(&spec)?;
    Ok(spec)
}

/// Load optimizer spec from YAML file
///
/// Reads, parses and validates; nothing is built.
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<TrainSpec> {
    let path = config_path.as_ref();
    let yaml_content = fs::read_to_string(path)
        .map_err(|e| Error::io(format!("Failed to read config file {}", path.display()), e))?;

    let spec = parse_config(&yaml_content)?;
    tracing::debug!(
        path = %path.display(),
        optimizer = %spec.optimizer.name,
        schedule = spec.lr_scheduler.decay.name(),
        "loaded config"
    );
    Ok(spec)
}
