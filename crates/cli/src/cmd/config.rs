//! Configuration management command
//!
//! Provides CLI interface to view, create and validate the debounce config.

use crate::settings;
use anyhow::{Context, Result};
use debounce_core::config::MAX_INTERVAL_MS;
use debounce_core::DebounceConfig;
use owo_colors::OwoColorize;
use std::path::Path;

/// Show the config file path and optionally create it
pub fn run_path(explicit: Option<&Path>, create: bool) -> Result<()> {
    let config_path = settings::resolve_path(explicit)?;

    if create && !config_path.exists() {
        DebounceConfig::default()
            .save(&config_path)
            .context("Failed to write default config")?;
        println!("{} Created config file at: {}", "✓".green(), config_path.display());
    } else if config_path.exists() {
        println!("{}", config_path.display());
    } else {
        println!("{}", config_path.display());
        println!("{}", "File does not exist. Use --create to create it.".yellow());
    }

    Ok(())
}

/// Show the effective configuration
pub fn run_show(explicit: Option<&Path>) -> Result<()> {
    let config = settings::load(explicit, None)?;
    let config_path = settings::resolve_path(explicit)?;

    println!("{}", "Debounce Configuration".bold());
    println!("{}: {}\n", "Location".dimmed(), config_path.display().dimmed());

    println!(
        "  {} = {} {}",
        "interval_ms".cyan(),
        config.interval_ms,
        if config.interval_ms == 0 {
            "(debouncing disabled)".dimmed().to_string()
        } else {
            format!("({}s)", config.interval_ms as f64 / 1000.0).dimmed().to_string()
        }
    );
    println!(
        "  {} = {}",
        "reject_after_shutdown".cyan(),
        config.reject_after_shutdown
    );

    println!("\n{}", "Valid Ranges:".bold());
    println!("  interval_ms: 0-{} (0 = no debouncing)", MAX_INTERVAL_MS);

    Ok(())
}

/// Show example configuration
pub fn run_example() -> Result<()> {
    println!("{}", DebounceConfig::example());
    Ok(())
}

/// Validate a config file
pub fn run_check(file: &Path) -> Result<()> {
    let config = DebounceConfig::load(file)
        .with_context(|| format!("{} is not a valid config", file.display()))?;

    println!(
        "{} {} (interval_ms = {}, reject_after_shutdown = {})",
        "✓".green(),
        file.display(),
        config.interval_ms,
        config.reject_after_shutdown
    );
    Ok(())
}
