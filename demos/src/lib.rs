//! Shared setup for the MultiBank demo scenarios.

use chrono::{TimeZone, Utc};
use multibank_clock::RewindClock;
use std::rc::Rc;

/// Log to stderr and build a clock starting at a fixed, printable date.
pub fn bootstrap() -> Rc<RewindClock> {
    tracing_subscriber::fmt::init();
    Rc::new(RewindClock::new(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("valid demo start date"),
    ))
}
