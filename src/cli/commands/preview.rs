//! Preview command implementation

use crate::cli::logging::log;
use crate::cli::{LogLevel, PreviewArgs};
use crate::config::{build_lr_scheduler, load_config};
use crate::optim::{LRScheduler, LrScheduler};

/// Learning rate at every `every`th step in `0..steps`
///
/// Fails for schedules whose rate is read from a blob.
pub fn schedule_points(
    scheduler: &LrScheduler,
    steps: u64,
    every: u64,
) -> Result<Vec<(i64, f32)>, String> {
    if every == 0 {
        return Err("--every must be at least 1".to_string());
    }
    let mut cursor = scheduler
        .cursor()
        .ok_or("Learning rate comes from an external blob; nothing to preview")?;

    let mut points = Vec::new();
    for step in 0..steps {
        if step % every == 0 {
            points.push((cursor.current_step(), cursor.get_lr()));
        }
        cursor.step();
    }
    Ok(points)
}

pub fn run_preview(args: PreviewArgs, level: LogLevel) -> Result<(), String> {
    log(level, LogLevel::Verbose, &format!("Loading config: {}", args.config.display()));

    let spec = load_config(&args.config).map_err(|e| format!("Config error: {e}"))?;
    let scheduler = build_lr_scheduler(&spec.lr_scheduler)
        .map_err(|e| format!("Failed to build scheduler: {e}"))?;

    let points = schedule_points(&scheduler, args.steps, args.every)?;

    log(level, LogLevel::Normal, "step\tlr");
    for (step, lr) in points {
        log(level, LogLevel::Normal, &format!("{step}\t{lr:.8}"));
    }
    Ok(())
}
