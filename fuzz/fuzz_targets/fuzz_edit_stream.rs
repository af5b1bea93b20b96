//! Fuzz target for the scope tracker.
//!
//! Feeds arbitrary interleavings of registrations, edits, queries, and
//! removals across a handful of buffers. The tracker must never panic,
//! and each buffer's stack must keep its nesting order (offsets strictly
//! decreasing outermost-to-innermost) after every operation.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tabscope::{BufferId, EditEvent, TabOutTracker};

#[derive(Arbitrary, Debug)]
enum Op {
    Register {
        buffer: u8,
        offset: u16,
        caret_shift: u8,
        buffer_len: u16,
    },
    Edit {
        buffer: u8,
        start: u16,
        end: u16,
        inserted_len: u16,
    },
    Query {
        buffer: u8,
        offset: u16,
    },
    Remove {
        buffer: u8,
        offset: u16,
    },
    Close {
        buffer: u8,
    },
}

fn ordered(tracker: &TabOutTracker, buffer: BufferId) -> bool {
    let ends: Vec<usize> = tracker.scopes(buffer).map(|s| s.end()).collect();
    ends.windows(2).all(|w| w[0] > w[1])
}

fuzz_target!(|ops: Vec<Op>| {
    let mut tracker = TabOutTracker::new();

    for op in ops {
        match op {
            Op::Register {
                buffer,
                offset,
                caret_shift,
                buffer_len,
            } => {
                // Rejections are expected for arbitrary input; only the
                // successful path mutates state.
                let _ = tracker.register(
                    BufferId::new(u64::from(buffer)),
                    usize::from(offset),
                    usize::from(caret_shift),
                    usize::from(buffer_len),
                );
            }
            Op::Edit {
                buffer,
                start,
                end,
                inserted_len,
            } => {
                tracker.apply_edit(
                    BufferId::new(u64::from(buffer)),
                    EditEvent::replacement(
                        usize::from(start),
                        usize::from(end),
                        usize::from(inserted_len),
                    ),
                );
            }
            Op::Query { buffer, offset } => {
                let _ = tracker
                    .has_scope_ending_at(BufferId::new(u64::from(buffer)), usize::from(offset));
            }
            Op::Remove { buffer, offset } => {
                let _ = tracker
                    .remove_scope_ending_at(BufferId::new(u64::from(buffer)), usize::from(offset));
            }
            Op::Close { buffer } => {
                tracker.buffer_closed(BufferId::new(u64::from(buffer)));
            }
        }

        for buffer in tracker.tracked_buffers().collect::<Vec<_>>() {
            assert!(ordered(&tracker, buffer), "nesting order violated");
        }
    }
});
