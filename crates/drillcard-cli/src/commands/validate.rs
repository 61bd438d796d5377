//! The `drillcard validate` command.

use anyhow::Result;

use drillcard_core::config::load_config_from;

use crate::DrillArgs;

pub fn execute(args: &DrillArgs) -> Result<()> {
    let loaded = load_config_from(args.config.as_deref(), &args.settings(), args.no_focus)?;

    match &loaded.source {
        Some(path) => println!("Config file: {}", path.display()),
        None => println!("Config file: none, using defaults"),
    }

    let config = &loaded.config;
    println!("  Operation:   {}", config.operation());
    println!("  Max operand: {}", config.max_operand());
    match config.focus() {
        Some(focus) => println!("  Focus:       {focus}"),
        None => println!("  Focus:       none"),
    }

    for w in &loaded.warnings {
        println!("  WARNING: {w}");
    }

    if loaded.warnings.is_empty() {
        println!("Configuration valid.");
    } else {
        println!("\n{} warning(s) found.", loaded.warnings.len());
    }

    Ok(())
}
