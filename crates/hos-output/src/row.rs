//! Plain data row types written by store backends.
//!
//! Rows are flat (no nesting, text timestamps) so the CSV and SQLite
//! backends share one shape.  Timestamps are RFC 3339 with milliseconds and
//! keep their own offset, which decides the calendar date of a log.

use chrono::{NaiveDate, SecondsFormat};
use serde::{Deserialize, Serialize};

use hos_core::time::{self, Timestamp};
use hos_core::{CoreError, DutyStatus, GeoPoint, LocationId, RouteId, StopKind};
use hos_log::{DailyLogSheet, DutyTotals, LogEntry, StatusGrid};
use hos_plan::{DutyEvent, StopLocation};

use crate::OutputResult;

pub(crate) fn format_ts(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, false)
}

fn parse_date(s: &str) -> OutputResult<NaiveDate> {
    s.parse::<NaiveDate>()
        .map_err(|_| CoreError::Parse(format!("bad date {s:?}")).into())
}

// ── Waypoints ─────────────────────────────────────────────────────────────────

/// One waypoint of a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaypointRow {
    pub route_id:       u64,
    pub sequence:       u32,
    /// Storage tag of the stop kind (`"rest"`, `"fuel"`, ...).
    pub kind:           String,
    pub timestamp:      String,
    pub duration_hours: f64,
    pub lat:            f64,
    pub lon:            f64,
    pub location_id:    Option<u64>,
    pub name:           String,
}

impl WaypointRow {
    pub const HEADERS: [&'static str; 9] = [
        "route_id", "sequence", "kind", "timestamp", "duration_hours", "lat", "lon", "location_id", "name",
    ];

    pub fn from_event(event: &DutyEvent) -> Self {
        Self {
            route_id:       event.route.get(),
            sequence:       event.sequence,
            kind:           event.kind.as_str().to_owned(),
            timestamp:      format_ts(event.timestamp),
            duration_hours: event.duration_hours,
            lat:            event.location.point.lat,
            lon:            event.location.point.lon,
            location_id:    event.location.id.map(LocationId::get),
            name:           event.location.name.clone(),
        }
    }

    pub fn into_event(self) -> OutputResult<DutyEvent> {
        let kind: StopKind = self.kind.parse()?;
        let location = StopLocation {
            point: GeoPoint::try_new(self.lat, self.lon)?,
            id:    self.location_id.map(LocationId),
            name:  self.name,
        };
        let mut event = DutyEvent::new(
            RouteId(self.route_id),
            kind,
            time::parse_timestamp(&self.timestamp)?,
            self.duration_hours,
            location,
        );
        event.sequence = self.sequence;
        Ok(event)
    }
}

// ── Log entries ───────────────────────────────────────────────────────────────

/// One log entry of a trip.  Location columns are empty for driving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntryRow {
    pub trip_id:       u64,
    pub seq:           u32,
    pub start:         String,
    pub end:           String,
    pub status:        String,
    pub lat:           Option<f64>,
    pub lon:           Option<f64>,
    pub location_id:   Option<u64>,
    pub location_name: Option<String>,
    pub notes:         String,
    pub activity:      Option<String>,
}

impl LogEntryRow {
    pub const HEADERS: [&'static str; 11] = [
        "trip_id", "seq", "start", "end", "status", "lat", "lon", "location_id", "location_name",
        "notes", "activity",
    ];

    pub fn from_entry(trip_id: u64, seq: u32, entry: &LogEntry) -> Self {
        let loc = entry.location.as_ref();
        Self {
            trip_id,
            seq,
            start:         format_ts(entry.start),
            end:           format_ts(entry.end),
            status:        entry.status.as_str().to_owned(),
            lat:           loc.map(|l| l.point.lat),
            lon:           loc.map(|l| l.point.lon),
            location_id:   loc.and_then(|l| l.id).map(LocationId::get),
            location_name: loc.map(|l| l.name.clone()),
            notes:         entry.notes.clone(),
            activity:      entry.activity.clone(),
        }
    }

    pub fn into_entry(self) -> OutputResult<LogEntry> {
        let status: DutyStatus = self.status.parse()?;
        let location = match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(StopLocation {
                point: GeoPoint::try_new(lat, lon)?,
                id:    self.location_id.map(LocationId),
                name:  self.location_name.unwrap_or_default(),
            }),
            _ => None,
        };
        Ok(LogEntry {
            start: time::parse_timestamp(&self.start)?,
            end: time::parse_timestamp(&self.end)?,
            status,
            location,
            notes: self.notes,
            activity: self.activity,
        })
    }
}

// ── Daily logs ────────────────────────────────────────────────────────────────

/// One daily log sheet of a trip.  `grid` is the 96-character slot string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLogRow {
    pub trip_id:             u64,
    pub date:                String,
    pub starting_odometer:   u64,
    pub ending_odometer:     u64,
    pub off_duty_hours:      f64,
    pub sleeper_berth_hours: f64,
    pub driving_hours:       f64,
    pub on_duty_hours:       f64,
    pub grid:                String,
}

impl DailyLogRow {
    pub const HEADERS: [&'static str; 9] = [
        "trip_id", "date", "starting_odometer", "ending_odometer", "off_duty_hours",
        "sleeper_berth_hours", "driving_hours", "on_duty_hours", "grid",
    ];

    pub fn from_sheet(trip_id: u64, sheet: &DailyLogSheet) -> Self {
        Self {
            trip_id,
            date:                sheet.date.to_string(),
            starting_odometer:   sheet.starting_odometer,
            ending_odometer:     sheet.ending_odometer,
            off_duty_hours:      sheet.off_duty_hours(),
            sleeper_berth_hours: sheet.sleeper_berth_hours(),
            driving_hours:       sheet.driving_hours(),
            on_duty_hours:       sheet.on_duty_hours(),
            grid:                sheet.grid.to_string(),
        }
    }

    pub fn into_sheet(self) -> OutputResult<DailyLogSheet> {
        Ok(DailyLogSheet {
            date:              parse_date(&self.date)?,
            starting_odometer: self.starting_odometer,
            ending_odometer:   self.ending_odometer,
            totals:            DutyTotals::from_hours(
                self.off_duty_hours,
                self.sleeper_berth_hours,
                self.driving_hours,
                self.on_duty_hours,
            ),
            grid:              self.grid.parse::<StatusGrid>()?,
        })
    }
}
