use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDateTime, TimeDelta, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypeError;

/// Record creation time.
///
/// A naive local date-time with microsecond precision. The text form is
/// `YYYY-MM-DD HH:MM:SS.ffffff`, and the fractional part is omitted entirely
/// when it is zero (`YYYY-MM-DD HH:MM:SS`). That exact text is part of every
/// record's hash input, so it must not change.
///
/// Ordering is chronological.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp(NaiveDateTime);

const SECONDS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const PARSE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

impl Timestamp {
    /// The current local wall-clock time.
    pub fn now() -> Self {
        Self::from_naive(Local::now().naive_local())
    }

    /// Wrap a naive date-time, truncating anything below a microsecond.
    pub fn from_naive(dt: NaiveDateTime) -> Self {
        Self(truncate_to_micros(dt))
    }

    /// Parse the canonical text form, with or without the fractional part.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        NaiveDateTime::parse_from_str(s, PARSE_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(s, SECONDS_FORMAT))
            .map(Self::from_naive)
            .map_err(|e| TypeError::InvalidTimestamp {
                input: s.to_string(),
                reason: e.to_string(),
            })
    }

    /// Access the inner date-time.
    pub fn as_datetime(&self) -> &NaiveDateTime {
        &self.0
    }

    /// Microsecond component (0..1_000_000).
    pub fn micros(&self) -> u32 {
        (self.0.nanosecond() % 1_000_000_000) / 1_000
    }

    /// This timestamp shifted by `delta`, or unchanged if that would overflow.
    pub fn saturating_add(&self, delta: TimeDelta) -> Self {
        Self::from_naive(self.0.checked_add_signed(delta).unwrap_or(self.0))
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(dt: NaiveDateTime) -> Self {
        Self::from_naive(dt)
    }
}

impl FromStr for Timestamp {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({self})")
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(SECONDS_FORMAT))?;
        match self.micros() {
            0 => Ok(()),
            us => write!(f, ".{us:06}"),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Drop sub-microsecond precision so the text form round-trips.
fn truncate_to_micros(dt: NaiveDateTime) -> NaiveDateTime {
    let nanos = dt.nanosecond() % 1_000_000_000;
    dt.with_nanosecond(nanos - nanos % 1_000).unwrap_or(dt)
}
