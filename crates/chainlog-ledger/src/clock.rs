use std::sync::Mutex;

use chainlog_types::Timestamp;
use chrono::TimeDelta;

/// Source of record creation times.
///
/// The ledger asks its clock once per sealed record and never again:
/// verification only ever reads the stored timestamp.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

impl<F> Clock for F
where
    F: Fn() -> Timestamp + Send + Sync,
{
    fn now(&self) -> Timestamp {
        self()
    }
}

/// Local wall-clock time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Always returns the same instant.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

/// Deterministic clock that starts at a given instant and advances by a fixed
/// step after every reading.
pub struct SteppingClock {
    next: Mutex<Timestamp>,
    step: TimeDelta,
}

impl SteppingClock {
    pub fn new(start: Timestamp, step: TimeDelta) -> Self {
        Self {
            next: Mutex::new(start),
            step,
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> Timestamp {
        let mut next = self.next.lock().expect("clock mutex poisoned");
        let current = *next;
        *next = current.saturating_add(self.step);
        current
    }
}
