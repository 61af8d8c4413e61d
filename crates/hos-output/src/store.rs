//! The `TripStore` trait implemented by all backends.

use hos_core::{RouteId, TripId};
use hos_log::{DailyLogSheet, LogEntry};
use hos_plan::DutyEvent;

use crate::OutputResult;

/// Persistence for the records a trip produces.
///
/// Every `save_*` replaces whatever was stored under the same id, so saving
/// twice leaves exactly the second set.  Loading an id that was never saved
/// returns an empty list.
pub trait TripStore {
    /// Replace the waypoints of `route`.
    fn save_waypoints(&mut self, route: RouteId, waypoints: &[DutyEvent]) -> OutputResult<()>;

    /// Waypoints of `route`, in the order they were saved.
    fn load_waypoints(&self, route: RouteId) -> OutputResult<Vec<DutyEvent>>;

    /// Replace the log entries of `trip`.
    fn save_log_entries(&mut self, trip: TripId, entries: &[LogEntry]) -> OutputResult<()>;

    fn load_log_entries(&self, trip: TripId) -> OutputResult<Vec<LogEntry>>;

    /// Replace the daily log sheets of `trip`.
    fn save_daily_logs(&mut self, trip: TripId, sheets: &[DailyLogSheet]) -> OutputResult<()>;

    /// Daily log sheets of `trip`, ordered by date.
    fn load_daily_logs(&self, trip: TripId) -> OutputResult<Vec<DailyLogSheet>>;
}
