//! Validate command implementation

use crate::cli::logging::log;
use crate::cli::{LogLevel, ValidateArgs};
use crate::config::{build_optimizer, load_config, DecaySpec, TrainSpec, WarmupSpec};

/// Format optimizer configuration as a string
pub fn format_optimizer_info(spec: &TrainSpec) -> String {
    let mut lines = vec![format!("  Optimizer: {}", spec.optimizer.optimizer_name())];
    let mut keys: Vec<_> = spec.optimizer.params.keys().collect();
    keys.sort();
    for key in keys {
        lines.push(format!("    {key}: {}", spec.optimizer.params[key]));
    }
    lines.join("\n")
}

/// Format learning-rate schedule as a string
pub fn format_schedule_info(spec: &TrainSpec) -> String {
    let decay = &spec.lr_scheduler.decay;
    let mut lines = vec![format!("  Schedule: {}", decay.name())];
    match decay {
        DecaySpec::Custom { lr_lbn } => lines.push(format!("  Learning rate blob: {lr_lbn}")),
        _ => {
            if let Some(base_lr) = decay.base_lr() {
                lines.push(format!("  Base learning rate: {base_lr}"));
            }
            if let Some(steps) = decay.steps() {
                lines.push(format!("  Decay steps: {steps}"));
            }
        }
    }
    match &spec.lr_scheduler.warmup {
        Some(WarmupSpec::Constant { steps, multiplier }) => {
            lines.push(format!("  Warmup: constant x{multiplier} for {steps} steps"));
        }
        Some(WarmupSpec::Linear { steps, start_multiplier }) => {
            lines.push(format!("  Warmup: linear from x{start_multiplier} over {steps} steps"));
        }
        None => {}
    }
    lines.join("\n")
}

/// Format clipping and loss scaling as a string, if any is set
pub fn format_training_info(spec: &TrainSpec) -> Option<String> {
    let mut lines = Vec::new();
    if let Some(crate::config::ClipSpec::GlobalNorm { clip_norm }) = &spec.grad_clipping {
        lines.push(format!("  Gradient clipping: global norm {clip_norm}"));
    }
    if let Some(factor) = spec.loss_scale_factor {
        lines.push(format!("  Loss scale factor: {factor}"));
    }
    if let Some(lbn) = &spec.train_step_lbn {
        lines.push(format!("  Train step blob: {lbn}"));
    }
    (!lines.is_empty()).then(|| lines.join("\n"))
}

/// Print detailed configuration summary
pub fn print_detailed_summary(spec: &TrainSpec) {
    println!();
    println!("Configuration Summary:");
    println!("{}", format_optimizer_info(spec));
    println!();
    println!("{}", format_schedule_info(spec));

    if let Some(training_info) = format_training_info(spec) {
        println!();
        println!("{training_info}");
    }
}

pub fn run_validate(args: ValidateArgs, level: LogLevel) -> Result<(), String> {
    log(level, LogLevel::Normal, &format!("Validating config: {}", args.config.display()));

    let spec = load_config(&args.config).map_err(|e| format!("Config error: {e}"))?;

    // Builder errors (bad parameter types, conflicting filters) surface here too.
    let optimizer = build_optimizer(&spec).map_err(|e| format!("Validation failed: {e}"))?;
    optimizer.train_conf().map_err(|e| format!("Validation failed: {e}"))?;

    log(level, LogLevel::Normal, "Configuration is valid");

    if args.detailed && level != LogLevel::Quiet {
        print_detailed_summary(&spec);
    }

    Ok(())
}
