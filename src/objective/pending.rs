//! objective::pending — first-failure slot for fallible objectives.
//!
//! Purpose
//! -------
//! `SubmodularFunction` methods cannot return errors, yet objectives backed
//! by foreign code (the Python adapter in `utils`) can fail. Such an
//! objective records its first failure in a [`PendingError`] shared with
//! its owner, and the owner checks the slot after every optimizer call and
//! re-raises the failure.
//!
//! Invariants & assumptions
//! ------------------------
//! - Only the first recorded failure is kept; later ones are dropped.
//! - An objective whose slot is set must stop calling into foreign code:
//!   `peek` scores `NaN` (always rejected) and `update` does nothing.
//! - A poisoned lock is recovered; the slot holds plain data.
//!
//! Testing notes
//! -------------
//! - Unit tests drive a failing objective through `SieveStreaming` and a
//!   failing `clone_box` through construction, checking what the owner
//!   observes in the slot.
use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

/// Shared slot holding the first failure raised inside an objective.
///
/// Clones alias the same slot.
pub struct PendingError<E> {
    slot: Arc<Mutex<Option<E>>>,
}

impl<E> PendingError<E> {
    pub fn new() -> Self {
        Self { slot: Arc::new(Mutex::new(None)) }
    }

    fn lock(&self) -> MutexGuard<'_, Option<E>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store `err` unless a failure is already pending.
    pub fn record(&self, err: E) {
        let mut slot = self.lock();
        if slot.is_none() {
            *slot = Some(err);
        }
    }

    pub fn is_set(&self) -> bool {
        self.lock().is_some()
    }

    /// Remove and return the pending failure, if any.
    pub fn take(&self) -> Option<E> {
        self.lock().take()
    }
}

impl<E> Clone for PendingError<E> {
    fn clone(&self) -> Self {
        Self { slot: Arc::clone(&self.slot) }
    }
}

impl<E> Default for PendingError<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for PendingError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingError").field("is_set", &self.is_set()).finish()
    }
}
