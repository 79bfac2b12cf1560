//! Debounce Core - lock-free call-rate debouncing
//!
//! This crate provides:
//! - Time sources (wall clock and a manual clock for tests)
//! - Per-action trackers with an atomic accept/reject decision
//! - An identity-keyed debouncer that runs accepted actions in place
//! - TOML configuration with fail-fast validation

pub mod action;
pub mod clock;
pub mod config;
pub mod debouncer;
pub mod error;
pub mod tracker;

// Re-export main types for convenience
pub use action::{Action, ActionId};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::DebounceConfig;
pub use debouncer::{DebounceStats, Debouncer, Outcome};
pub use error::DebounceError;
pub use tracker::{Decision, Tracker};

/// Common result type used throughout debounce-core
pub type Result<T> = std::result::Result<T, DebounceError>;
