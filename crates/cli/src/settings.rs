//! Config file resolution for CLI commands

use anyhow::{Context, Result};
use debounce_core::DebounceConfig;
use std::path::{Path, PathBuf};

/// Default config location: `<config dir>/debounce/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("debounce").join("config.toml"))
}

/// Explicit `--config` path, or the default location
pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => default_config_path().context("Could not determine config directory"),
    }
}

/// Load the effective config, applying a command-line interval override
///
/// An explicit `--config` file must exist; the default location falls back
/// to built-in defaults when missing.
pub fn load(explicit: Option<&Path>, interval_override: Option<i64>) -> Result<DebounceConfig> {
    let mut config = match explicit {
        Some(path) => DebounceConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => match default_config_path() {
            Some(path) => DebounceConfig::load_or_default(&path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => DebounceConfig::default(),
        },
    };

    if let Some(interval_ms) = interval_override {
        config.interval_ms = interval_ms;
    }

    config.validate().context("Invalid configuration value")?;
    Ok(config)
}
