//! Clock errors

use thiserror::Error;

/// Errors that can occur when driving the simulated clock
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClockError {
    #[error("Cannot rewind time by a negative amount: {seconds}s")]
    NegativeRewind { seconds: i64 },
}
