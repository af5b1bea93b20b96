//! Clonable, lockable handle around a [`TabOutTracker`].
//!
//! The tracker itself is single-threaded by design: every operation runs
//! on the thread that owns buffer mutation. Hosts whose change
//! notifications arrive through callback plumbing (or, rarely, from more
//! than one thread) wrap the tracker here instead. Clones share one
//! registry behind a coarse mutex, and [`edit_listener`] produces the one
//! subscription closure a buffer needs for its whole lifetime.
//!
//! [`edit_listener`]: SharedTracker::edit_listener

use std::sync::{Arc, Mutex};

use crate::edit::EditEvent;
use crate::error::Result;
use crate::scope::tracker::{BufferId, TabOutTracker};

/// A buffer's edit subscription: call it with each change notification,
/// in causal order.
pub type EditListener = Box<dyn Fn(EditEvent) + Send + Sync + 'static>;

/// Shared handle to a [`TabOutTracker`].
#[derive(Clone, Debug, Default)]
pub struct SharedTracker {
    inner: Arc<Mutex<TabOutTracker>>,
}

impl SharedTracker {
    /// Create a handle around a fresh tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// See [`TabOutTracker::register`].
    pub fn register(
        &self,
        buffer: BufferId,
        offset: usize,
        caret_shift: usize,
        buffer_len: usize,
    ) -> Result<()> {
        self.lock().register(buffer, offset, caret_shift, buffer_len)
    }

    /// See [`TabOutTracker::has_scope_ending_at`].
    #[must_use]
    pub fn has_scope_ending_at(&self, buffer: BufferId, offset: usize) -> bool {
        self.lock().has_scope_ending_at(buffer, offset)
    }

    /// See [`TabOutTracker::remove_scope_ending_at`].
    pub fn remove_scope_ending_at(&self, buffer: BufferId, offset: usize) -> Option<usize> {
        self.lock().remove_scope_ending_at(buffer, offset)
    }

    /// See [`TabOutTracker::apply_edit`].
    pub fn apply_edit(&self, buffer: BufferId, edit: EditEvent) {
        self.lock().apply_edit(buffer, edit);
    }

    /// See [`TabOutTracker::buffer_closed`].
    pub fn buffer_closed(&self, buffer: BufferId) {
        self.lock().buffer_closed(buffer);
    }

    /// See [`TabOutTracker::scope_count`].
    #[must_use]
    pub fn scope_count(&self, buffer: BufferId) -> usize {
        self.lock().scope_count(buffer)
    }

    /// Build the change-notification subscription for one buffer.
    ///
    /// Register the returned closure once, when the buffer opens, with the
    /// host's edit-notification source. Pair it with
    /// [`buffer_closed`](Self::buffer_closed) when the buffer goes away.
    #[must_use]
    pub fn edit_listener(&self, buffer: BufferId) -> EditListener {
        let tracker = self.clone();
        Box::new(move |edit| tracker.apply_edit(buffer, edit))
    }

    /// Run `f` with exclusive access to the tracker, for operations that
    /// must be atomic with respect to other handles (e.g. query-then-remove
    /// in a key handler).
    pub fn with_tracker<R>(&self, f: impl FnOnce(&mut TabOutTracker) -> R) -> R {
        f(&mut self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, TabOutTracker> {
        self.inner.lock().expect("tab-out tracker lock")
    }
}
