//! Per-action debounce state
//!
//! A `Tracker` owns a single atomic timestamp: the last time its action was
//! accepted. The only writer is [`Tracker::decide`], which claims a new
//! debounce window with a compare-and-swap loop so that concurrent callers
//! racing on the same stale value cannot both win.

use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

/// Outcome of a single debounce decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// This call opened a new window and should run
    Accepted {
        /// Last accepted timestamp before this call claimed the window
        previous: Option<u64>,
    },
    /// A window is still open
    Rejected {
        /// Milliseconds until the open window closes (diagnostic only)
        remaining_ms: u64,
    },
}

impl Decision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Decision::Accepted { .. })
    }
}

/// Last-accepted timestamp for one action identity
///
/// The atomic holds `timestamp + 1`, so its initial value [`Tracker::NEVER`]
/// (0) can never be confused with a call accepted at time 0.
#[derive(Debug, Default)]
pub struct Tracker {
    last_accepted: AtomicU64,
}

impl Tracker {
    /// Raw sentinel for "never accepted"
    pub const NEVER: u64 = 0;

    /// Create a tracker that has never accepted a call
    pub fn new() -> Self {
        Self {
            last_accepted: AtomicU64::new(Self::NEVER),
        }
    }

    fn encode(now: u64) -> u64 {
        now.saturating_add(1)
    }

    fn decode(raw: u64) -> Option<u64> {
        raw.checked_sub(1)
    }

    /// Decide whether a call arriving at `now` opens a new window
    ///
    /// Accepts the first call ever, or any call more than `interval_ms` after
    /// the last accepted one, and records `now` in the same atomic step.
    /// Otherwise the stored value is left untouched.
    ///
    /// An `interval_ms` of 0 disables debouncing: every call is accepted.
    pub fn decide(&self, now: u64, interval_ms: u64) -> Decision {
        if interval_ms == 0 {
            // fetch_max keeps the timestamp monotonic even with skewed readers
            let raw = self
                .last_accepted
                .fetch_max(Self::encode(now), Ordering::AcqRel);
            let previous = Self::decode(raw);
            trace!(now, ?previous, "debounce disabled, accepting");
            return Decision::Accepted { previous };
        }

        let claimed = self
            .last_accepted
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |raw| {
                match Self::decode(raw) {
                    None => Some(Self::encode(now)),
                    // A clock that stepped backwards yields elapsed == 0
                    Some(last) => {
                        (now.saturating_sub(last) > interval_ms).then(|| Self::encode(now))
                    }
                }
            });

        match claimed {
            Ok(raw) => {
                let previous = Self::decode(raw);
                trace!(now, ?previous, "debounce window claimed");
                Decision::Accepted { previous }
            }
            Err(raw) => {
                // Rejection implies a recorded acceptance
                let last = Self::decode(raw).unwrap_or(now);
                let elapsed = now.saturating_sub(last);
                let remaining_ms = interval_ms.saturating_sub(elapsed);
                trace!(now, last, elapsed, remaining_ms, "debounce window open");
                Decision::Rejected { remaining_ms }
            }
        }
    }

    /// Last accepted timestamp, if any call was ever accepted
    pub fn last_accepted(&self) -> Option<u64> {
        Self::decode(self.last_accepted.load(Ordering::Acquire))
    }

    /// Whether the window has closed at `now`
    ///
    /// An expired tracker decides exactly like a fresh one would, which is
    /// what makes it safe to drop.
    pub fn is_expired(&self, now: u64, interval_ms: u64) -> bool {
        match self.last_accepted() {
            Some(last) => now.saturating_sub(last) > interval_ms,
            None => true,
        }
    }
}
