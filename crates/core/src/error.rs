//! Error types for debouncer construction and configuration

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building a debouncer or handling its configuration.
///
/// `Debouncer::call` itself never fails; whatever the action returns is
/// handed back to the caller untouched.
#[derive(Debug, Error)]
pub enum DebounceError {
    /// The configured interval cannot be used
    #[error("invalid debounce interval {interval_ms}ms: {reason}")]
    InvalidInterval {
        interval_ms: i64,
        reason: &'static str,
    },

    /// The configuration file is not valid TOML for `DebounceConfig`
    #[error("failed to parse debounce config")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to serialize debounce config")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Reading or writing the configuration file failed
    #[error("config I/O failed for {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DebounceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
