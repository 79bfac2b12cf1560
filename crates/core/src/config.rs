//! Debouncer configuration
//!
//! Stored as TOML:
//! ```toml
//! interval_ms = 1000
//! reject_after_shutdown = true
//! ```

use crate::error::DebounceError;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Upper bound for `interval_ms` (one day)
pub const MAX_INTERVAL_MS: i64 = 24 * 60 * 60 * 1000;

/// Default debounce window
pub const DEFAULT_INTERVAL_MS: i64 = 1000;

/// Configuration for a [`crate::Debouncer`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DebounceConfig {
    /// Debounce window in milliseconds (0 disables debouncing)
    ///
    /// Signed so that a negative value in a config file is reported as an
    /// invalid interval instead of a parse error.
    pub interval_ms: i64,

    /// Reject calls made after `shutdown()`
    pub reject_after_shutdown: bool,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
            reject_after_shutdown: true,
        }
    }
}

impl DebounceConfig {
    /// Config with the given interval and default everything else
    pub fn with_interval_ms(interval_ms: i64) -> Self {
        Self {
            interval_ms,
            ..Self::default()
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| DebounceError::io(path, e))?;
        Self::from_toml_str(&contents)
    }

    /// Load from `path`, falling back to defaults when it does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate and write to a TOML file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| DebounceError::io(parent, e))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents).map_err(|e| DebounceError::io(path, e))?;
        Ok(())
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        validate_interval_ms(self.interval_ms).map(|_| ())
    }

    /// Validated interval as a `Duration`
    pub fn interval(&self) -> Result<Duration> {
        validate_interval_ms(self.interval_ms).map(Duration::from_millis)
    }

    /// Commented example configuration
    pub fn example() -> &'static str {
        r#"# Debounce configuration

# Debounce window in milliseconds.
# A call runs only if more than this much time has passed since the
# last call that ran. 0 disables debouncing. Range: 0-86400000
interval_ms = 1000

# Reject calls made after shutdown() instead of running them
reject_after_shutdown = true
"#
    }
}

/// Range-check a raw millisecond interval
pub(crate) fn validate_interval_ms(interval_ms: i64) -> Result<u64> {
    if interval_ms < 0 {
        return Err(DebounceError::InvalidInterval {
            interval_ms,
            reason: "must not be negative",
        });
    }
    if interval_ms > MAX_INTERVAL_MS {
        return Err(DebounceError::InvalidInterval {
            interval_ms,
            reason: "must not exceed one day",
        });
    }
    Ok(interval_ms as u64)
}
