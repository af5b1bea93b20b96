//! The scope registry: per-buffer stacks keyed by buffer identity.

use rustc_hash::FxHashMap;

use crate::edit::EditEvent;
use crate::error::{Error, Result};
use crate::log::{LogLevel, emit_log};
use crate::scope::stack::{Scope, ScopeStack};

/// Opaque identity of a buffer, stable across edits.
///
/// Hosts mint these however they number their documents; the tracker only
/// ever compares and hashes them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BufferId(u64);

impl BufferId {
    /// Create a buffer identity from a raw host value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw host value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for BufferId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Registry of live tab-out scopes across every open buffer.
///
/// Construct one at host startup and pass it to the collaborators that
/// need it: the pair-insertion feature calls [`register`](Self::register),
/// the tab-out key handler calls
/// [`has_scope_ending_at`](Self::has_scope_ending_at) and
/// [`remove_scope_ending_at`](Self::remove_scope_ending_at), and the
/// buffer's change-notification source feeds
/// [`apply_edit`](Self::apply_edit).
///
/// All operations are O(stack depth) and none block; the tracker assumes
/// the host serializes mutations of a given buffer (see [`SharedTracker`]
/// for hosts that need a lock).
///
/// [`SharedTracker`]: crate::scope::SharedTracker
#[derive(Debug, Default)]
pub struct TabOutTracker {
    stacks: FxHashMap<BufferId, ScopeStack>,
}

impl TabOutTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scope ending at `offset` in `buffer`.
    ///
    /// Call this immediately after inserting a delimiter pair, before any
    /// other edit: `offset` is the caret position between the delimiters,
    /// `caret_shift` the number of characters a tab-out skips (pass 1 for
    /// a single closing character), and `buffer_len` the buffer's current
    /// length, against which the exit position is validated.
    ///
    /// Registering at an offset already tracked replaces the scope there.
    pub fn register(
        &mut self,
        buffer: BufferId,
        offset: usize,
        caret_shift: usize,
        buffer_len: usize,
    ) -> Result<()> {
        if caret_shift == 0 {
            return Err(Error::InvalidCaretShift);
        }
        if offset + caret_shift > buffer_len {
            return Err(Error::ScopeOutOfBounds {
                offset,
                caret_shift,
                len: buffer_len,
            });
        }

        let replaced = self
            .stacks
            .entry(buffer)
            .or_default()
            .register(offset, caret_shift);
        if replaced {
            emit_log(
                LogLevel::Debug,
                &format!(
                    "scope re-registered at offset {offset} in buffer {}",
                    buffer.raw()
                ),
            );
        }
        Ok(())
    }

    /// Whether a live scope in `buffer` ends at `offset`.
    ///
    /// This is the tab-out key handler's acceptance test. Buffers with no
    /// registrations read as having no scopes.
    #[must_use]
    pub fn has_scope_ending_at(&self, buffer: BufferId, offset: usize) -> bool {
        self.stacks
            .get(&buffer)
            .is_some_and(|stack| stack.has_scope_ending_at(offset))
    }

    /// Remove the scope ending at `offset` in `buffer`, returning the
    /// caret shift to apply.
    ///
    /// `None` means no scope ends there and the key press should fall
    /// through to default behavior. An enclosing scope is unaffected.
    pub fn remove_scope_ending_at(&mut self, buffer: BufferId, offset: usize) -> Option<usize> {
        let stack = self.stacks.get_mut(&buffer)?;
        let shift = stack.remove_scope_ending_at(offset);
        if stack.is_empty() {
            self.stacks.remove(&buffer);
        }
        shift
    }

    /// Apply one buffer edit to `buffer`'s scopes.
    ///
    /// Edits must arrive in the order they actually happened. Events for
    /// unknown buffers and malformed events (`start > end`) are no-ops.
    pub fn apply_edit(&mut self, buffer: BufferId, edit: EditEvent) {
        let Some(stack) = self.stacks.get_mut(&buffer) else {
            return;
        };
        let dropped = stack.adapt(&edit);
        if dropped > 0 {
            emit_log(
                LogLevel::Debug,
                &format!(
                    "edit [{}, {}) invalidated {dropped} scope(s) in buffer {}",
                    edit.start,
                    edit.end,
                    buffer.raw()
                ),
            );
        }
        if stack.is_empty() {
            self.stacks.remove(&buffer);
        }
    }

    /// Apply an ordered sequence of edits to `buffer`'s scopes.
    pub fn apply_edits(&mut self, buffer: BufferId, edits: impl IntoIterator<Item = EditEvent>) {
        for edit in edits {
            self.apply_edit(buffer, edit);
        }
    }

    /// Drop all state for a closed buffer.
    ///
    /// Optional: an unclosed buffer's empty stack is harmless, but hosts
    /// that get a close notification should forward it here.
    pub fn buffer_closed(&mut self, buffer: BufferId) {
        if self.stacks.remove(&buffer).is_some() {
            emit_log(
                LogLevel::Debug,
                &format!("dropped scopes for closed buffer {}", buffer.raw()),
            );
        }
    }

    /// Number of live scopes in `buffer`.
    #[must_use]
    pub fn scope_count(&self, buffer: BufferId) -> usize {
        self.stacks.get(&buffer).map_or(0, ScopeStack::len)
    }

    /// Iterate over `buffer`'s live scopes, outermost first.
    pub fn scopes(&self, buffer: BufferId) -> impl Iterator<Item = &Scope> {
        self.stacks.get(&buffer).into_iter().flat_map(ScopeStack::iter)
    }

    /// Buffers that currently have at least one live scope.
    pub fn tracked_buffers(&self) -> impl Iterator<Item = BufferId> + '_ {
        self.stacks.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEN: usize = 1_000;

    #[test]
    fn test_register_validates_caret_shift() {
        let mut tracker = TabOutTracker::new();
        let err = tracker.register(BufferId::new(1), 4, 0, LEN);
        assert_eq!(err, Err(Error::InvalidCaretShift));
        assert_eq!(tracker.scope_count(BufferId::new(1)), 0);
    }

    #[test]
    fn test_register_validates_exit_position() {
        let mut tracker = TabOutTracker::new();
        // "foo()" has length 5; a scope at 4 with shift 1 exits at 5, OK.
        tracker.register(BufferId::new(1), 4, 1, 5).unwrap();
        // Shift 2 would exit at 6, past the end.
        let err = tracker.register(BufferId::new(1), 4, 2, 5);
        assert_eq!(
            err,
            Err(Error::ScopeOutOfBounds {
                offset: 4,
                caret_shift: 2,
                len: 5
            })
        );
    }

    #[test]
    fn test_buffers_are_independent() {
        let mut tracker = TabOutTracker::new();
        let a = BufferId::new(1);
        let b = BufferId::new(2);
        tracker.register(a, 4, 1, LEN).unwrap();
        tracker.register(b, 9, 1, LEN).unwrap();

        tracker.apply_edit(a, EditEvent::insertion(0, 5));
        assert!(tracker.has_scope_ending_at(a, 9));
        assert!(tracker.has_scope_ending_at(b, 9));

        tracker.buffer_closed(a);
        assert!(!tracker.has_scope_ending_at(a, 9));
        assert!(tracker.has_scope_ending_at(b, 9));
    }

    #[test]
    fn test_stale_buffer_is_noop() {
        let mut tracker = TabOutTracker::new();
        let ghost = BufferId::new(42);

        tracker.apply_edit(ghost, EditEvent::insertion(0, 3));
        assert!(!tracker.has_scope_ending_at(ghost, 3));
        assert_eq!(tracker.remove_scope_ending_at(ghost, 3), None);
        tracker.buffer_closed(ghost);
    }

    #[test]
    fn test_emptied_stack_is_freed() {
        let mut tracker = TabOutTracker::new();
        let buffer = BufferId::new(1);
        tracker.register(buffer, 4, 1, LEN).unwrap();

        assert_eq!(tracker.remove_scope_ending_at(buffer, 4), Some(1));
        assert_eq!(tracker.tracked_buffers().count(), 0);
    }

    #[test]
    fn test_invalidation_frees_stack() {
        let mut tracker = TabOutTracker::new();
        let buffer = BufferId::new(1);
        tracker.register(buffer, 4, 1, LEN).unwrap();

        tracker.apply_edit(buffer, EditEvent::deletion(3, 6));
        assert_eq!(tracker.tracked_buffers().count(), 0);
    }

    #[test]
    fn test_apply_edits_in_order() {
        let mut tracker = TabOutTracker::new();
        let buffer = BufferId::new(1);
        tracker.register(buffer, 4, 1, LEN).unwrap();

        tracker.apply_edits(
            buffer,
            [
                EditEvent::insertion(4, 1),
                EditEvent::insertion(5, 1),
                EditEvent::deletion(5, 6),
            ],
        );
        assert!(tracker.has_scope_ending_at(buffer, 5));
    }

    #[test]
    fn test_scopes_iterates_outermost_first() {
        let mut tracker = TabOutTracker::new();
        let buffer = BufferId::new(1);
        tracker.register(buffer, 12, 1, LEN).unwrap();
        tracker.register(buffer, 8, 2, LEN).unwrap();

        let ends: Vec<usize> = tracker.scopes(buffer).map(Scope::end).collect();
        assert_eq!(ends, vec![12, 8]);
    }
}
