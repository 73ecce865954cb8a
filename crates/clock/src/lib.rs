//! MultiBank Clock - Simulated time
//!
//! The ledger never reads the OS clock. All maturity checks and daily
//! payoff ticks are driven by an injected `TimeSource`, and tests rewind
//! time through `RewindClock`.

pub mod calendar;
pub mod error;
pub mod rewind;

pub use error::ClockError;
pub use rewind::{RewindClock, TimeSource};
