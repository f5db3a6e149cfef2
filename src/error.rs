//! Error types for clock arithmetic

use thiserror::Error;

/// Contract violations raised by [`ClockValue`](crate::state::ClockValue)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClockError {
    /// A clock was created with a negative number of seconds
    #[error("invalid duration: {0} seconds (must be non-negative)")]
    InvalidDuration(i64),
    /// `subtract_seconds` was called with a value outside `0..60`
    #[error("invalid argument: cannot subtract {0} seconds (expected 0..60)")]
    InvalidArgument(i64),
}
