//! Per-day aggregates: duty totals, the 96-slot status grid, odometer.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use chrono::{NaiveDate, TimeDelta};

use hos_core::time::MS_PER_HOUR;
use hos_core::{CoreError, CoreResult, DutyStatus};

use crate::slicing::{DaySlice, SLOTS_PER_DAY};

// ── DutyTotals ────────────────────────────────────────────────────────────────

/// Time spent in each duty status, in whole milliseconds.
///
/// Integer milliseconds keep day totals exactly equal to the sum of the
/// entries they were built from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DutyTotals {
    ms: [i64; 4],
}

impl DutyTotals {
    pub fn add(&mut self, status: DutyStatus, duration: TimeDelta) {
        self.ms[status.index()] += duration.num_milliseconds();
    }

    #[inline]
    pub fn millis(&self, status: DutyStatus) -> i64 {
        self.ms[status.index()]
    }

    #[inline]
    pub fn hours(&self, status: DutyStatus) -> f64 {
        self.millis(status) as f64 / MS_PER_HOUR as f64
    }

    pub fn total_millis(&self) -> i64 {
        self.ms.iter().sum()
    }

    pub fn total_hours(&self) -> f64 {
        self.total_millis() as f64 / MS_PER_HOUR as f64
    }

    /// Rebuild from stored hour columns (rounded to the millisecond).
    pub fn from_hours(off_duty: f64, sleeper_berth: f64, driving: f64, on_duty: f64) -> Self {
        let mut totals = Self::default();
        let columns = [
            (DutyStatus::OffDuty, off_duty),
            (DutyStatus::SleeperBerth, sleeper_berth),
            (DutyStatus::Driving, driving),
            (DutyStatus::OnDutyNotDriving, on_duty),
        ];
        for (status, hours) in columns {
            totals.add(status, hos_core::time::hours(hours));
        }
        totals
    }
}

// ── StatusGrid ────────────────────────────────────────────────────────────────

/// One day of 15-minute slots.  `None` marks a slot no interval touched.
///
/// Text form: 96 characters of `O`, `S`, `D`, `N`, or `.` for an empty slot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusGrid {
    slots: Vec<Option<DutyStatus>>,
}

impl Default for StatusGrid {
    fn default() -> Self {
        Self { slots: vec![None; SLOTS_PER_DAY] }
    }
}

impl StatusGrid {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, slot: usize) -> Option<DutyStatus> {
        self.slots.get(slot).copied().flatten()
    }

    /// Write `status` into `slots`; later writes win.
    pub fn fill(&mut self, slots: Range<usize>, status: DutyStatus) {
        let end = slots.end.min(SLOTS_PER_DAY);
        for slot in &mut self.slots[slots.start.min(end)..end] {
            *slot = Some(status);
        }
    }

    pub fn slots(&self) -> &[Option<DutyStatus>] {
        &self.slots
    }

    /// Number of slots holding `status`.
    pub fn count(&self, status: DutyStatus) -> usize {
        self.slots.iter().filter(|s| **s == Some(status)).count()
    }
}

impl fmt::Display for StatusGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slot in &self.slots {
            let c = slot.map_or('.', DutyStatus::grid_char);
            fmt::Write::write_char(f, c)?;
        }
        Ok(())
    }
}

impl FromStr for StatusGrid {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let slots = s
            .trim()
            .chars()
            .map(|c| match c {
                '.' => Ok(None),
                other => DutyStatus::from_grid_char(other)
                    .map(Some)
                    .ok_or_else(|| CoreError::Parse(format!("bad grid character {other:?}"))),
            })
            .collect::<CoreResult<Vec<_>>>()?;
        if slots.len() != SLOTS_PER_DAY {
            return Err(CoreError::Parse(format!(
                "status grid has {} slots, expected {SLOTS_PER_DAY}",
                slots.len()
            )));
        }
        Ok(Self { slots })
    }
}

// ── DailyLogSheet ─────────────────────────────────────────────────────────────

/// The log for one calendar date.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DailyLogSheet {
    pub date:              NaiveDate,
    pub starting_odometer: u64,
    /// Equal to `starting_odometer` until the day is closed.
    pub ending_odometer:   u64,
    pub totals:            DutyTotals,
    pub grid:              StatusGrid,
}

impl DailyLogSheet {
    pub fn new(date: NaiveDate, starting_odometer: u64) -> Self {
        Self {
            date,
            starting_odometer,
            ending_odometer: starting_odometer,
            totals: DutyTotals::default(),
            grid: StatusGrid::new(),
        }
    }

    /// Add one same-day slice to the totals and the grid.
    pub fn record(&mut self, slice: &DaySlice) {
        debug_assert_eq!(slice.date, self.date);
        self.totals.add(slice.status, slice.duration());
        self.grid.fill(slice.slots(), slice.status);
    }

    /// Set the ending odometer from the day's driving time.
    pub fn close(&mut self, average_speed_mph: f64) {
        let miles = (self.driving_hours() * average_speed_mph).round().max(0.0);
        self.ending_odometer = self.starting_odometer + miles as u64;
    }

    pub fn driving_hours(&self) -> f64 {
        self.totals.hours(DutyStatus::Driving)
    }

    pub fn on_duty_hours(&self) -> f64 {
        self.totals.hours(DutyStatus::OnDutyNotDriving)
    }

    pub fn off_duty_hours(&self) -> f64 {
        self.totals.hours(DutyStatus::OffDuty)
    }

    pub fn sleeper_berth_hours(&self) -> f64 {
        self.totals.hours(DutyStatus::SleeperBerth)
    }

    pub fn miles(&self) -> u64 {
        self.ending_odometer.saturating_sub(self.starting_odometer)
    }
}
