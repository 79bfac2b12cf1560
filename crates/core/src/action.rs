//! Action identity
//!
//! Debounce state is keyed by *which* action is called, not by what it does.
//! Closures carry no identity of their own, so each [`Action`] is stamped with
//! a process-unique [`ActionId`] when it is created. Clones share the id; two
//! separately created actions never do, even if they wrap the same code.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Monotonic id counter
static NEXT_ACTION_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity of a debounced action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionId(u64);

impl ActionId {
    /// Allocate a fresh, never-before-used id
    pub fn next() -> Self {
        Self(NEXT_ACTION_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "action#{}", self.0)
    }
}

/// A callable unit of work with an identity
///
/// The callable takes no arguments. Its return value (for example a
/// `Result`) is passed back to whoever triggered the run.
pub struct Action<F> {
    id: ActionId,
    func: Arc<F>,
}

impl<F, T> Action<F>
where
    F: Fn() -> T,
{
    /// Wrap `func` under a new identity
    pub fn new(func: F) -> Self {
        Self {
            id: ActionId::next(),
            func: Arc::new(func),
        }
    }

    /// Run the wrapped callable, bypassing any debouncing
    pub fn run(&self) -> T {
        (self.func)()
    }
}

impl<F> Action<F> {
    pub fn id(&self) -> ActionId {
        self.id
    }
}

impl<F> Clone for Action<F> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            func: Arc::clone(&self.func),
        }
    }
}

impl<F> fmt::Debug for Action<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<_> = (0..1000).map(|_| ActionId::next()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_clone_shares_identity() {
        let action = Action::new(|| 7);
        let copy = action.clone();
        assert_eq!(action.id(), copy.id());
        assert_eq!(copy.run(), 7);
    }

    #[test]
    fn test_identical_code_distinct_identity() {
        let make = || Action::new(|| ());
        let a = make();
        let b = make();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_display() {
        let id = ActionId::next();
        assert_eq!(id.to_string(), format!("action#{}", id.as_u64()));
    }
}
