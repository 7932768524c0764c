//! Arena-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during arena operations.
///
/// [`Exhausted`](ArenaError::Exhausted) never reaches search callers: the
/// visited sets absorb it and report the tile as already visited.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// Every link record in the pool has been handed out.
    Exhausted {
        /// Total number of link records in the pool.
        capacity: usize,
    },
    /// An [`ArenaConfig`](crate::ArenaConfig) failed validation.
    InvalidConfig {
        /// Description of the violated invariant.
        reason: String,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhausted { capacity } => {
                write!(f, "link arena exhausted: all {capacity} records in use")
            }
            Self::InvalidConfig { reason } => write!(f, "invalid arena config: {reason}"),
        }
    }
}

impl Error for ArenaError {}
