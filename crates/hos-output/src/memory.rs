//! In-memory store.  Used by tests and as the default store of the trip
//! service.

use std::collections::BTreeMap;

use hos_core::{RouteId, TripId};
use hos_log::{DailyLogSheet, LogEntry};
use hos_plan::DutyEvent;

use crate::{OutputResult, TripStore};

/// Keeps every record in ordered maps keyed by owner id.
#[derive(Default, Debug, Clone)]
pub struct MemoryStore {
    waypoints:  BTreeMap<RouteId, Vec<DutyEvent>>,
    entries:    BTreeMap<TripId, Vec<LogEntry>>,
    daily_logs: BTreeMap<TripId, Vec<DailyLogSheet>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TripStore for MemoryStore {
    fn save_waypoints(&mut self, route: RouteId, waypoints: &[DutyEvent]) -> OutputResult<()> {
        self.waypoints.insert(route, waypoints.to_vec());
        Ok(())
    }

    fn load_waypoints(&self, route: RouteId) -> OutputResult<Vec<DutyEvent>> {
        Ok(self.waypoints.get(&route).cloned().unwrap_or_default())
    }

    fn save_log_entries(&mut self, trip: TripId, entries: &[LogEntry]) -> OutputResult<()> {
        self.entries.insert(trip, entries.to_vec());
        Ok(())
    }

    fn load_log_entries(&self, trip: TripId) -> OutputResult<Vec<LogEntry>> {
        Ok(self.entries.get(&trip).cloned().unwrap_or_default())
    }

    fn save_daily_logs(&mut self, trip: TripId, sheets: &[DailyLogSheet]) -> OutputResult<()> {
        let mut sheets = sheets.to_vec();
        sheets.sort_by_key(|s| s.date);
        self.daily_logs.insert(trip, sheets);
        Ok(())
    }

    fn load_daily_logs(&self, trip: TripId) -> OutputResult<Vec<DailyLogSheet>> {
        Ok(self.daily_logs.get(&trip).cloned().unwrap_or_default())
    }
}
