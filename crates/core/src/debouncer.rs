//! Identity-keyed debouncer
//!
//! Routes every call to the [`Tracker`] of its action identity, creating the
//! tracker on first sight, and runs the action in place when the tracker
//! accepts. Suppressed calls are dropped, never queued.

use crate::action::{Action, ActionId};
use crate::clock::{Clock, SystemClock};
use crate::config::{validate_interval_ms, DebounceConfig, MAX_INTERVAL_MS};
use crate::tracker::{Decision, Tracker};
use crate::Result;
use dashmap::DashMap;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Result of [`Debouncer::call`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The call opened a new window; holds whatever the action returned
    Executed(T),
    /// Dropped because a window is still open
    Suppressed {
        /// Time until the open window closes
        remaining: Duration,
    },
    /// Dropped because the debouncer was shut down
    ShutDown,
}

impl<T> Outcome<T> {
    pub fn is_executed(&self) -> bool {
        matches!(self, Outcome::Executed(_))
    }

    /// The action's return value, if it ran
    pub fn into_value(self) -> Option<T> {
        match self {
            Outcome::Executed(value) => Some(value),
            _ => None,
        }
    }
}

/// Counters snapshot for diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DebounceStats {
    /// Calls that ran their action
    pub accepted: u64,
    /// Calls dropped inside an open window
    pub suppressed: u64,
    /// Calls dropped after shutdown
    pub rejected_after_shutdown: u64,
    /// Action identities currently tracked
    pub tracked: usize,
}

/// Drop-debouncer: each action runs at most once per interval
///
/// Safe to share between threads (`Arc<Debouncer>`). The accept/reject
/// decision is a single atomic update on the action's tracker; the map of
/// trackers is sharded and creates exactly one tracker per identity even
/// when several threads see a new action at the same time.
pub struct Debouncer<C = SystemClock> {
    /// Debounce window in milliseconds (0 = accept everything)
    interval_ms: u64,
    /// Time source
    clock: C,
    /// Per-identity state, created lazily
    trackers: DashMap<ActionId, Tracker, ahash::RandomState>,
    /// Drop calls once shut down
    reject_after_shutdown: bool,
    shut_down: AtomicBool,
    accepted: AtomicU64,
    suppressed: AtomicU64,
    rejected_after_shutdown: AtomicU64,
}

impl Debouncer<SystemClock> {
    /// Create a wall-clock debouncer
    pub fn new(interval: Duration) -> Self {
        Self::with_clock(interval, SystemClock)
    }

    /// Create a wall-clock debouncer from a raw millisecond count
    ///
    /// Fails fast on negative intervals.
    pub fn from_millis(interval_ms: i64) -> Result<Self> {
        let interval_ms = validate_interval_ms(interval_ms)?;
        Ok(Self::new(Duration::from_millis(interval_ms)))
    }

    /// Create a wall-clock debouncer from a validated config
    pub fn from_config(config: &DebounceConfig) -> Result<Self> {
        Self::from_config_with_clock(config, SystemClock)
    }
}

impl<C: Clock> Debouncer<C> {
    /// Create a debouncer driven by `clock`
    ///
    /// Intervals longer than [`MAX_INTERVAL_MS`] are clamped to it, the same
    /// bound `from_millis` and config validation enforce.
    pub fn with_clock(interval: Duration, clock: C) -> Self {
        let max_ms = MAX_INTERVAL_MS as u64;
        let requested_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        if requested_ms > max_ms {
            warn!(requested_ms, max_ms, "debounce interval clamped");
        }

        Self {
            interval_ms: requested_ms.min(max_ms),
            clock,
            trackers: DashMap::with_hasher(ahash::RandomState::new()),
            reject_after_shutdown: true,
            shut_down: AtomicBool::new(false),
            accepted: AtomicU64::new(0),
            suppressed: AtomicU64::new(0),
            rejected_after_shutdown: AtomicU64::new(0),
        }
    }

    pub fn from_config_with_clock(config: &DebounceConfig, clock: C) -> Result<Self> {
        let interval = config.interval()?;
        Ok(Self::with_clock(interval, clock)
            .reject_after_shutdown(config.reject_after_shutdown))
    }

    /// Whether calls made after [`Debouncer::shutdown`] are dropped (default: true)
    pub fn reject_after_shutdown(mut self, reject: bool) -> Self {
        self.reject_after_shutdown = reject;
        self
    }

    /// Call `action` unless it already ran within the interval
    ///
    /// When accepted, the action runs synchronously on the calling thread and
    /// its return value comes back in [`Outcome::Executed`] unchanged. Panics
    /// unwind through this call; the window counts as claimed either way.
    pub fn call<F, T>(&self, action: &Action<F>) -> Outcome<T>
    where
        F: Fn() -> T,
    {
        self.call_with(action.id(), || action.run())
    }

    /// Like [`Debouncer::call`], for callers that manage identities themselves
    pub fn call_with<F, T>(&self, id: ActionId, f: F) -> Outcome<T>
    where
        F: FnOnce() -> T,
    {
        if self.reject_after_shutdown && self.is_shut_down() {
            self.rejected_after_shutdown.fetch_add(1, Ordering::Relaxed);
            debug!(%id, "debouncer shut down, dropping call");
            return Outcome::ShutDown;
        }

        match self.decide(id) {
            Decision::Accepted { .. } => {
                self.accepted.fetch_add(1, Ordering::Relaxed);
                debug!(%id, "running action");
                Outcome::Executed(f())
            }
            Decision::Rejected { remaining_ms } => {
                self.suppressed.fetch_add(1, Ordering::Relaxed);
                Outcome::Suppressed {
                    remaining: Duration::from_millis(remaining_ms),
                }
            }
        }
    }

    /// Look up or create the tracker and decide while holding its entry
    ///
    /// The clock is read under the entry guard so that `purge_expired` can
    /// never slip between the reading and the decision. The guard is released
    /// before the action runs.
    fn decide(&self, id: ActionId) -> Decision {
        if let Some(tracker) = self.trackers.get(&id) {
            return tracker.decide(self.clock.now_millis(), self.interval_ms);
        }

        let tracker = self.trackers.entry(id).or_insert_with(|| {
            debug!(%id, "tracking new action");
            Tracker::new()
        });
        tracker.decide(self.clock.now_millis(), self.interval_ms)
    }

    /// Mark the debouncer as no longer in use
    ///
    /// Idempotent and non-blocking. In-flight actions keep running and
    /// tracker state is kept.
    pub fn shutdown(&self) {
        if !self.shut_down.swap(true, Ordering::AcqRel) {
            info!(
                tracked = self.trackers.len(),
                accepted = self.accepted.load(Ordering::Relaxed),
                "debouncer shut down"
            );
        }
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::Acquire)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Number of action identities with a tracker
    pub fn tracked_actions(&self) -> usize {
        self.trackers.len()
    }

    /// Last accepted timestamp for `id`, if it is tracked
    pub fn last_accepted(&self, id: ActionId) -> Option<u64> {
        self.trackers.get(&id).and_then(|tracker| tracker.last_accepted())
    }

    pub fn stats(&self) -> DebounceStats {
        DebounceStats {
            accepted: self.accepted.load(Ordering::Relaxed),
            suppressed: self.suppressed.load(Ordering::Relaxed),
            rejected_after_shutdown: self.rejected_after_shutdown.load(Ordering::Relaxed),
            tracked: self.trackers.len(),
        }
    }

    /// Drop trackers whose window has closed, returning how many were removed
    ///
    /// A closed tracker decides exactly like a freshly created one, so
    /// purging never lets an extra call through. Use this to bound memory
    /// for long-lived debouncers that see many short-lived actions.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now_millis();
        let mut purged = 0;

        self.trackers.retain(|_, tracker| {
            let keep = !tracker.is_expired(now, self.interval_ms);
            if !keep {
                purged += 1;
            }
            keep
        });

        if purged > 0 {
            info!(purged, remaining = self.trackers.len(), "purged expired trackers");
        }
        purged
    }
}
