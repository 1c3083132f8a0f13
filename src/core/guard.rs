//! Guard predicates for controlling state transitions.
//!
//! Guards are pure boolean functions over a value that decide whether a
//! transition may run. The lifecycle controller attaches them to edges
//! of the dispenser state machine.

use std::fmt;
use std::marker::PhantomData;

/// Pure predicate that determines if a transition can execute.
///
/// # Example
///
/// ```rust
/// use tapmeter::core::{Dispenser, Guard};
/// use chrono::Utc;
///
/// let has_open_time = Guard::new(|d: &Dispenser| d.opened_at.is_some());
/// let dispenser = Dispenser::new(0.064, Utc::now());
///
/// assert!(!has_open_time.check(&dispenser));
/// ```
pub struct Guard<T> {
    predicate: Box<dyn Fn(&T) -> bool + Send + Sync>,
    _phantom: PhantomData<fn(&T)>,
}

impl<T> Guard<T> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic and thread-safe.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
            _phantom: PhantomData,
        }
    }

    /// Check if the guard allows a transition for this value.
    pub fn check(&self, value: &T) -> bool {
        (self.predicate)(value)
    }
}

impl<T> fmt::Debug for Guard<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}
