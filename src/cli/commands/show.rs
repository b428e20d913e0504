//! Show command implementation

use crate::cli::logging::log;
use crate::cli::{LogLevel, OutputFormat, ShowArgs};
use crate::config::{build_optimizer, load_config};
use crate::optim::TrainConf;

/// Serialize a training configuration in the requested format
pub fn format_train_conf(conf: &TrainConf, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(conf)
            .map_err(|e| format!("Failed to serialize train conf: {e}")),
        OutputFormat::Yaml => serde_yaml::to_string(conf)
            .map_err(|e| format!("Failed to serialize train conf: {e}")),
    }
}

pub fn run_show(args: ShowArgs, level: LogLevel) -> Result<(), String> {
    log(level, LogLevel::Verbose, &format!("Loading config: {}", args.config.display()));

    let spec = load_config(&args.config).map_err(|e| format!("Config error: {e}"))?;
    let conf = build_optimizer(&spec)
        .and_then(|optimizer| optimizer.train_conf())
        .map_err(|e| format!("Failed to build train conf: {e}"))?;

    println!("{}", format_train_conf(&conf, args.format)?);
    Ok(())
}
