//! Error types for tabscope.
//!
//! Only contract violations are errors. Query misses ("no scope ends
//! here") and edits for buffers the tracker has never seen are ordinary
//! outcomes, reported through plain return values.

use std::fmt;

/// Result type alias for tabscope operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for tabscope operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// A scope was registered with a caret shift of zero. Tab-out must
    /// always move the caret forward by at least one character.
    InvalidCaretShift,
    /// A scope was registered whose exit position would land outside the
    /// buffer: `offset + caret_shift` exceeds the buffer's current length.
    ScopeOutOfBounds {
        offset: usize,
        caret_shift: usize,
        len: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCaretShift => {
                write!(f, "caret shift must be at least 1")
            }
            Self::ScopeOutOfBounds {
                offset,
                caret_shift,
                len,
            } => {
                write!(
                    f,
                    "scope at offset {offset} with caret shift {caret_shift} exceeds buffer length {len}"
                )
            }
        }
    }
}

impl std::error::Error for Error {}
