//! `tabscope` - Tab-out scope tracking for auto-inserted delimiter pairs
//!
//! When an editor auto-inserts the closing half of a delimiter pair (`()`,
//! `""`, `[]`, ...), the caret sits between the two delimiters. This crate
//! tracks that position as a *tab-out scope*: as long as the user keeps
//! typing inside the pair, a dedicated navigation key can move the caret
//! just past the closing delimiter instead of typing over it.
//!
//! The crate owns exactly two things: a per-buffer stack of live scopes
//! ([`TabOutTracker`]) and the adaptation policy that keeps each tracked
//! offset consistent while the host mutates the buffer out from under it.
//! Text storage, the caret model, pair insertion, and key dispatch all stay
//! on the host's side of the fence; they talk to the tracker through plain
//! offsets and [`EditEvent`] values.
//!
//! # Examples
//!
//! ```
//! use tabscope::{BufferId, EditEvent, TabOutTracker};
//!
//! let mut tracker = TabOutTracker::new();
//! let buffer = BufferId::new(1);
//!
//! // Host buffer is "foo()" and the pair-insertion feature just added "()".
//! // The caret sits at offset 4, between the parentheses.
//! tracker.register(buffer, 4, 1, 5).unwrap();
//!
//! // The user types "a, b" inside the pair, one keystroke at a time.
//! // Each insertion lands at the tracked boundary and shifts it right.
//! for typed in 0..4 {
//!     tracker.apply_edit(buffer, EditEvent::insertion(4 + typed, 1));
//! }
//! assert!(tracker.has_scope_ending_at(buffer, 8));
//!
//! // Tab pressed at offset 8: remove the scope and move the caret by the
//! // returned shift, landing past the ')'.
//! assert_eq!(tracker.remove_scope_ending_at(buffer, 8), Some(1));
//! assert_eq!(tracker.remove_scope_ending_at(buffer, 8), None);
//! ```
//!
//! Hosts that deliver change notifications through callback plumbing can
//! wrap the tracker in a [`SharedTracker`] and hand one
//! [`edit_listener`](SharedTracker::edit_listener) per buffer to their
//! notification source.

// Crate-level lint configuration
#![warn(unsafe_code)]
#![allow(clippy::module_name_repetitions)] // Allow ScopeStack in scope module etc
#![allow(clippy::missing_errors_doc)] // Error conditions documented on the Error type
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer

pub mod edit;
pub mod error;
pub mod log;
pub mod scope;

// Re-export core types at crate root
pub use edit::EditEvent;
pub use error::{Error, Result};
pub use log::{LogLevel, emit_log, set_log_callback};
pub use scope::{BufferId, EditListener, Scope, ScopeStack, SharedTracker, TabOutTracker};
