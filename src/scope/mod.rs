//! Tab-out scope tracking.
//!
//! A *scope* is the range opened by an auto-inserted delimiter pair,
//! reduced to the one number that matters for tab-out: the offset just
//! before the closing delimiter, plus how far the caret must jump to land
//! past it. Scopes are owned per buffer by a [`TabOutTracker`]; nothing
//! outside the tracker ever holds one, so all collaborator access goes
//! through buffer + offset queries.
//!
//! Key types:
//!
//! - [`TabOutTracker`]: the registry: register, query, remove, and adapt
//!   scopes across every open buffer
//! - [`ScopeStack`]: one buffer's scopes, ordered outermost-first
//! - [`SharedTracker`]: clonable `Arc<Mutex<_>>` handle for hosts that
//!   deliver edit notifications through callbacks or from other threads
//!
//! # Examples
//!
//! ```
//! use tabscope::{BufferId, EditEvent, TabOutTracker};
//!
//! let mut tracker = TabOutTracker::new();
//! let buffer = BufferId::new(7);
//!
//! // Nested pairs: "(\"\")", outer scope behind ')', inner behind '"'.
//! tracker.register(buffer, 3, 1, 4).unwrap();
//! tracker.register(buffer, 2, 1, 4).unwrap();
//!
//! // Deleting the inner pair's contents boundary kills only the inner scope.
//! tracker.apply_edit(buffer, EditEvent::replacement(1, 3, 0));
//! assert!(!tracker.has_scope_ending_at(buffer, 2));
//! assert!(tracker.has_scope_ending_at(buffer, 1));
//! ```

mod adapt;
mod shared;
mod stack;
mod tracker;

pub use shared::{EditListener, SharedTracker};
pub use stack::{Scope, ScopeStack};
pub use tracker::{BufferId, TabOutTracker};
