//! CSV store.
//!
//! One file per owner id in the configured directory:
//! - `waypoints_<route>.csv`
//! - `log_entries_<trip>.csv`
//! - `daily_logs_<trip>.csv`
//!
//! Saving rewrites the whole file.  A missing file loads as an empty list.

use std::fs;
use std::path::{Path, PathBuf};

use csv::{Reader, WriterBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use hos_core::{RouteId, TripId};
use hos_log::{DailyLogSheet, LogEntry};
use hos_plan::DutyEvent;

use crate::row::{DailyLogRow, LogEntryRow, WaypointRow};
use crate::{OutputResult, TripStore};

/// Stores trip records as CSV files in one directory.
#[derive(Debug, Clone)]
pub struct CsvStore {
    dir: PathBuf,
}

impl CsvStore {
    /// Use `dir`, creating it if needed.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self { dir: dir.to_path_buf() })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn waypoints_path(&self, route: RouteId) -> PathBuf {
        self.dir.join(format!("waypoints_{}.csv", route.get()))
    }

    pub fn log_entries_path(&self, trip: TripId) -> PathBuf {
        self.dir.join(format!("log_entries_{}.csv", trip.get()))
    }

    pub fn daily_logs_path(&self, trip: TripId) -> PathBuf {
        self.dir.join(format!("daily_logs_{}.csv", trip.get()))
    }
}

/// Write `headers` then every row, replacing the file.
fn write_rows<R: Serialize>(path: &Path, headers: &[&str], rows: &[R]) -> OutputResult<()> {
    let mut w = WriterBuilder::new().has_headers(false).from_path(path)?;
    w.write_record(headers)?;
    for row in rows {
        w.serialize(row)?;
    }
    w.flush()?;
    debug!(path = %path.display(), rows = rows.len(), "csv written");
    Ok(())
}

fn read_rows<R: DeserializeOwned>(path: &Path) -> OutputResult<Vec<R>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let mut r = Reader::from_path(path)?;
    let mut rows = Vec::new();
    for row in r.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

impl TripStore for CsvStore {
    fn save_waypoints(&mut self, route: RouteId, waypoints: &[DutyEvent]) -> OutputResult<()> {
        let rows: Vec<_> = waypoints.iter().map(WaypointRow::from_event).collect();
        write_rows(&self.waypoints_path(route), &WaypointRow::HEADERS, &rows)
    }

    fn load_waypoints(&self, route: RouteId) -> OutputResult<Vec<DutyEvent>> {
        read_rows::<WaypointRow>(&self.waypoints_path(route))?
            .into_iter()
            .map(WaypointRow::into_event)
            .collect()
    }

    fn save_log_entries(&mut self, trip: TripId, entries: &[LogEntry]) -> OutputResult<()> {
        let rows: Vec<_> = entries
            .iter()
            .enumerate()
            .map(|(i, e)| LogEntryRow::from_entry(trip.get(), i as u32, e))
            .collect();
        write_rows(&self.log_entries_path(trip), &LogEntryRow::HEADERS, &rows)
    }

    fn load_log_entries(&self, trip: TripId) -> OutputResult<Vec<LogEntry>> {
        read_rows::<LogEntryRow>(&self.log_entries_path(trip))?
            .into_iter()
            .map(LogEntryRow::into_entry)
            .collect()
    }

    fn save_daily_logs(&mut self, trip: TripId, sheets: &[DailyLogSheet]) -> OutputResult<()> {
        let mut rows: Vec<_> = sheets.iter().map(|s| DailyLogRow::from_sheet(trip.get(), s)).collect();
        rows.sort_by(|a, b| a.date.cmp(&b.date));
        write_rows(&self.daily_logs_path(trip), &DailyLogRow::HEADERS, &rows)
    }

    fn load_daily_logs(&self, trip: TripId) -> OutputResult<Vec<DailyLogSheet>> {
        read_rows::<DailyLogRow>(&self.daily_logs_path(trip))?
            .into_iter()
            .map(DailyLogRow::into_sheet)
            .collect()
    }
}
