//! `LogEntry`: one contiguous duty-status interval on one calendar day.

use chrono::{NaiveDate, TimeDelta};

use hos_core::DutyStatus;
use hos_core::time::{self, Timestamp};
use hos_plan::StopLocation;

/// A half-open interval `[start, end)` in one duty status.
///
/// The builder never lets an entry cross local midnight, so every entry
/// belongs to exactly one daily log sheet.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogEntry {
    pub start:    Timestamp,
    pub end:      Timestamp,
    pub status:   DutyStatus,
    pub location: Option<StopLocation>,
    pub notes:    String,
    pub activity: Option<String>,
}

impl LogEntry {
    #[inline]
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    #[inline]
    pub fn hours(&self) -> f64 {
        time::as_hours(self.duration())
    }

    /// Calendar date of the entry, in the offset of its timestamps.
    #[inline]
    pub fn date(&self) -> NaiveDate {
        time::local_date(self.start)
    }
}
