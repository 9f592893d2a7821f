//! Errors produced by the gesture core.

use std::fmt;

/// Failure to interpret a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeError {
    /// No swipe direction could be derived from the drag.
    ///
    /// Happens only for degenerate input such as a zero-sized view. Card state
    /// machines recover by snapping the card back.
    NoDirection,
}

impl fmt::Display for SwipeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwipeError::NoDirection => f.write_str("drag has no swipe direction"),
        }
    }
}

impl std::error::Error for SwipeError {}
