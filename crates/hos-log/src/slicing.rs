//! Day slicing and grid-slot arithmetic.
//!
//! A status interval `[start, end)` is cut at every local midnight (in the
//! log's offset) into [`DaySlice`]s.  Each slice knows its calendar date,
//! its exact duration, and the 15-minute grid slots it writes.
//!
//! Slot rule: a slice writes slots `floor(start / 15 min)` up to but not
//! including `floor(end / 15 min)`, with the end of the day counting as
//! slot 96.  Consecutive slices therefore write consecutive slot ranges and
//! a slice shorter than one slot inside a single slot writes nothing; the
//! next interval covers that slot.

use std::ops::Range;

use chrono::{FixedOffset, NaiveDate, TimeDelta};

use hos_core::DutyStatus;
use hos_core::time::{self, Timestamp};

/// Width of one grid slot in minutes.
pub const SLOT_MINUTES: u32 = 15;

/// Grid slots per calendar day.
pub const SLOTS_PER_DAY: usize = (time::MINUTES_PER_DAY / SLOT_MINUTES) as usize;

/// The part of a status interval that falls on one calendar date.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DaySlice {
    pub date:   NaiveDate,
    pub start:  Timestamp,
    pub end:    Timestamp,
    pub status: DutyStatus,
    /// Slots written, `first_slot..end_slot`.
    pub first_slot: usize,
    pub end_slot:   usize,
}

impl DaySlice {
    #[inline]
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    #[inline]
    pub fn hours(&self) -> f64 {
        time::as_hours(self.duration())
    }

    #[inline]
    pub fn slots(&self) -> Range<usize> {
        self.first_slot..self.end_slot
    }
}

/// Grid slot containing `ts` (in its own offset).
#[inline]
pub fn slot_of(ts: Timestamp) -> usize {
    (time::minute_of_day(ts) / SLOT_MINUTES) as usize
}

/// Cut `[start, end)` at local midnights of `offset`.
///
/// Returns nothing for an empty or inverted interval.  Slice timestamps are
/// expressed in `offset`.
pub fn slice_interval(
    start:  Timestamp,
    end:    Timestamp,
    status: DutyStatus,
    offset: FixedOffset,
) -> Vec<DaySlice> {
    let mut out = Vec::new();
    let end = time::in_offset(end, offset);
    let mut cursor = time::in_offset(start, offset);

    while cursor < end {
        let midnight = time::next_local_midnight(cursor);
        let piece_end = end.min(midnight);
        out.push(DaySlice {
            date:       time::local_date(cursor),
            start:      cursor,
            end:        piece_end,
            status,
            first_slot: slot_of(cursor),
            end_slot:   if piece_end == midnight { SLOTS_PER_DAY } else { slot_of(piece_end) },
        });
        cursor = piece_end;
    }
    out
}
