//! RewindClock - the simulated "now" plus rewind callbacks

use crate::error::ClockError;
use chrono::{DateTime, Duration, Utc};
use std::cell::RefCell;

/// Supplies the current simulated time.
///
/// Accounts read "now" through this trait for maturity checks; they never
/// touch the OS clock.
pub trait TimeSource {
    fn current_time(&self) -> DateTime<Utc>;
}

/// Callback invoked with the new time after each rewind step.
pub type RewindAction = Box<dyn Fn(DateTime<Utc>)>;

/// A rewindable clock owning the simulated "now".
///
/// Shared by `Rc` across banks and accounts; interior mutability because
/// the whole design is single-threaded and call-and-return.
///
/// # Example
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use multibank_clock::{RewindClock, TimeSource};
///
/// let clock = RewindClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
/// clock.advance(Duration::days(3)).unwrap();
/// assert_eq!(clock.current_time(), Utc.with_ymd_and_hms(2024, 1, 4, 0, 0, 0).unwrap());
/// ```
pub struct RewindClock {
    now: RefCell<DateTime<Utc>>,
    actions: RefCell<Vec<RewindAction>>,
}

impl RewindClock {
    /// Create a clock starting at the given instant.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: RefCell::new(start),
            actions: RefCell::new(Vec::new()),
        }
    }

    /// Register a callback fired with the new time after every rewind step.
    pub fn on_rewind(&self, action: impl Fn(DateTime<Utc>) + 'static) {
        self.actions.borrow_mut().push(Box::new(action));
    }

    /// Move time forward by `amount` and fire the rewind actions once.
    ///
    /// Fails with `NegativeRewind` for a negative amount; time never runs
    /// backwards.
    pub fn advance(&self, amount: Duration) -> Result<(), ClockError> {
        if amount < Duration::zero() {
            return Err(ClockError::NegativeRewind {
                seconds: amount.num_seconds(),
            });
        }

        let new_now = *self.now.borrow() + amount;
        *self.now.borrow_mut() = new_now;

        for action in self.actions.borrow().iter() {
            action(new_now);
        }
        Ok(())
    }

    /// Move time forward one day at a time, firing the rewind actions once
    /// per simulated day. Daily payoff accrual depends on this cadence.
    pub fn advance_days(&self, days: i64) -> Result<(), ClockError> {
        if days < 0 {
            return Err(ClockError::NegativeRewind {
                seconds: Duration::days(days).num_seconds(),
            });
        }
        for _ in 0..days {
            self.advance(Duration::days(1))?;
        }
        Ok(())
    }
}

impl TimeSource for RewindClock {
    fn current_time(&self) -> DateTime<Utc> {
        *self.now.borrow()
    }
}
