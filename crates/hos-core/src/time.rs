//! Time model.
//!
//! # Design
//!
//! Every instant that enters the planner is a [`Timestamp`]: a
//! `chrono::DateTime<FixedOffset>`.  There is no naive datetime anywhere in
//! the core, so "is this zoned yet?" never has to be asked; the only place a
//! string becomes a timestamp is [`parse_timestamp`], which refuses input
//! without an explicit offset.
//!
//! Durations coming from regulations and route providers are fractional
//! hours (`f64`).  They are converted to `TimeDelta` at **millisecond**
//! resolution with [`hours`], and back with [`as_hours`].  The simulation
//! keeps its clock as an hour offset from the trip start and converts once
//! per emitted stop, so rounding never accumulates.
//!
//! Calendar dates are taken in the offset the timestamp carries.  Callers
//! that need one log timezone for a whole trip normalise with
//! [`in_offset`] first.

use chrono::{DateTime, FixedOffset, NaiveDate, TimeDelta, Timelike};

use crate::{CoreError, CoreResult};

/// An absolute, offset-qualified instant.
pub type Timestamp = DateTime<FixedOffset>;

/// Milliseconds in one hour.
pub const MS_PER_HOUR: i64 = 3_600_000;

/// Minutes in one calendar day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Longest single duration accepted anywhere: a stop, a rule limit, a route.
/// One leap year.
pub const MAX_SPAN_HOURS: f64 = 366.0 * 24.0;

// ── Hour ↔ duration ──────────────────────────────────────────────────────────

/// Fractional hours → `TimeDelta`, rounded to the nearest millisecond.
///
/// Non-finite input maps to zero.
#[inline]
pub fn hours(h: f64) -> TimeDelta {
    if !h.is_finite() {
        return TimeDelta::zero();
    }
    TimeDelta::milliseconds((h * MS_PER_HOUR as f64).round() as i64)
}

/// `TimeDelta` → fractional hours.
#[inline]
pub fn as_hours(d: TimeDelta) -> f64 {
    d.num_milliseconds() as f64 / MS_PER_HOUR as f64
}

// ── Parsing ──────────────────────────────────────────────────────────────────

/// Parse an RFC 3339 timestamp (`2024-03-04T06:00:00-05:00`).
///
/// A naive datetime (`2024-03-04T06:00:00`) is rejected: the caller must say
/// which instant it means.
pub fn parse_timestamp(s: &str) -> CoreResult<Timestamp> {
    DateTime::parse_from_rfc3339(s.trim())
        .map_err(|_| CoreError::InvalidTimestamp(s.to_owned()))
}

// ── Calendar helpers ─────────────────────────────────────────────────────────

/// The same instant expressed in `offset`.
#[inline]
pub fn in_offset(ts: Timestamp, offset: FixedOffset) -> Timestamp {
    ts.with_timezone(&offset)
}

/// Calendar date of `ts` in its own offset.
#[inline]
pub fn local_date(ts: Timestamp) -> NaiveDate {
    ts.date_naive()
}

/// Local midnight at the start of `ts`'s calendar day.
pub fn local_day_start(ts: Timestamp) -> Timestamp {
    let time = ts.time();
    let since_midnight = TimeDelta::seconds(time.num_seconds_from_midnight() as i64)
        + TimeDelta::nanoseconds(time.nanosecond() as i64);
    ts - since_midnight
}

/// The first local midnight strictly after `ts`.
#[inline]
pub fn next_local_midnight(ts: Timestamp) -> Timestamp {
    local_day_start(ts) + TimeDelta::days(1)
}

/// Whole minutes elapsed since local midnight (0‥1439).
#[inline]
pub fn minute_of_day(ts: Timestamp) -> u32 {
    ts.time().num_seconds_from_midnight() / 60
}
