//! SQLite store (feature `sqlite`).
//!
//! One database with three tables: `waypoints`, `log_entries` and
//! `daily_logs`.  A save deletes the owner's rows and inserts the new ones
//! inside one transaction.

use std::path::Path;

use rusqlite::{Connection, params};
use tracing::debug;

use hos_core::{RouteId, TripId};
use hos_log::{DailyLogSheet, LogEntry};
use hos_plan::DutyEvent;

use crate::row::{DailyLogRow, LogEntryRow, WaypointRow};
use crate::{OutputResult, TripStore};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS waypoints (
        route_id       INTEGER NOT NULL,
        sequence       INTEGER NOT NULL,
        kind           TEXT    NOT NULL,
        timestamp      TEXT    NOT NULL,
        duration_hours REAL    NOT NULL,
        lat            REAL    NOT NULL,
        lon            REAL    NOT NULL,
        location_id    INTEGER,
        name           TEXT    NOT NULL
    );
    CREATE INDEX IF NOT EXISTS waypoints_route ON waypoints (route_id);
    CREATE TABLE IF NOT EXISTS log_entries (
        trip_id       INTEGER NOT NULL,
        seq           INTEGER NOT NULL,
        start         TEXT    NOT NULL,
        "end"         TEXT    NOT NULL,
        status        TEXT    NOT NULL,
        lat           REAL,
        lon           REAL,
        location_id   INTEGER,
        location_name TEXT,
        notes         TEXT    NOT NULL,
        activity      TEXT,
        PRIMARY KEY (trip_id, seq)
    );
    CREATE TABLE IF NOT EXISTS daily_logs (
        trip_id             INTEGER NOT NULL,
        date                TEXT    NOT NULL,
        starting_odometer   INTEGER NOT NULL,
        ending_odometer     INTEGER NOT NULL,
        off_duty_hours      REAL    NOT NULL,
        sleeper_berth_hours REAL    NOT NULL,
        driving_hours       REAL    NOT NULL,
        on_duty_hours       REAL    NOT NULL,
        grid                TEXT    NOT NULL,
        PRIMARY KEY (trip_id, date)
    );";

/// Stores trip records in an SQLite database.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) `trips.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        Self::with_connection(Connection::open(dir.join("trips.db"))?)
    }

    /// A private in-memory database.
    pub fn in_memory() -> OutputResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> OutputResult<Self> {
        conn.execute_batch("PRAGMA synchronous = NORMAL;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }
}

impl TripStore for SqliteStore {
    fn save_waypoints(&mut self, route: RouteId, waypoints: &[DutyEvent]) -> OutputResult<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM waypoints WHERE route_id = ?1", params![route.get() as i64])?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO waypoints \
                 (route_id, sequence, kind, timestamp, duration_hours, lat, lon, location_id, name) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;
            for row in waypoints.iter().map(WaypointRow::from_event) {
                stmt.execute(params![
                    row.route_id as i64,
                    row.sequence,
                    row.kind,
                    row.timestamp,
                    row.duration_hours,
                    row.lat,
                    row.lon,
                    row.location_id.map(|id| id as i64),
                    row.name,
                ])?;
            }
        }
        tx.commit()?;
        debug!(%route, rows = waypoints.len(), "waypoints saved");
        Ok(())
    }

    fn load_waypoints(&self, route: RouteId) -> OutputResult<Vec<DutyEvent>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT route_id, sequence, kind, timestamp, duration_hours, lat, lon, location_id, name \
             FROM waypoints WHERE route_id = ?1 ORDER BY sequence, rowid",
        )?;
        let rows = stmt.query_map(params![route.get() as i64], |r| {
            Ok(WaypointRow {
                route_id:       r.get::<_, i64>(0)? as u64,
                sequence:       r.get(1)?,
                kind:           r.get(2)?,
                timestamp:      r.get(3)?,
                duration_hours: r.get(4)?,
                lat:            r.get(5)?,
                lon:            r.get(6)?,
                location_id:    r.get::<_, Option<i64>>(7)?.map(|id| id as u64),
                name:           r.get(8)?,
            })
        })?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?.into_event()?);
        }
        Ok(out)
    }

    fn save_log_entries(&mut self, trip: TripId, entries: &[LogEntry]) -> OutputResult<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM log_entries WHERE trip_id = ?1", params![trip.get() as i64])?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO log_entries \
                 (trip_id, seq, start, \"end\", status, lat, lon, location_id, location_name, notes, activity) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            )?;
            for (i, entry) in entries.iter().enumerate() {
                let row = LogEntryRow::from_entry(trip.get(), i as u32, entry);
                stmt.execute(params![
                    row.trip_id as i64,
                    row.seq,
                    row.start,
                    row.end,
                    row.status,
                    row.lat,
                    row.lon,
                    row.location_id.map(|id| id as i64),
                    row.location_name,
                    row.notes,
                    row.activity,
                ])?;
            }
        }
        tx.commit()?;
        debug!(%trip, rows = entries.len(), "log entries saved");
        Ok(())
    }

    fn load_log_entries(&self, trip: TripId) -> OutputResult<Vec<LogEntry>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT trip_id, seq, start, \"end\", status, lat, lon, location_id, location_name, notes, activity \
             FROM log_entries WHERE trip_id = ?1 ORDER BY seq",
        )?;
        let rows = stmt.query_map(params![trip.get() as i64], |r| {
            Ok(LogEntryRow {
                trip_id:       r.get::<_, i64>(0)? as u64,
                seq:           r.get(1)?,
                start:         r.get(2)?,
                end:           r.get(3)?,
                status:        r.get(4)?,
                lat:           r.get(5)?,
                lon:           r.get(6)?,
                location_id:   r.get::<_, Option<i64>>(7)?.map(|id| id as u64),
                location_name: r.get(8)?,
                notes:         r.get(9)?,
                activity:      r.get(10)?,
            })
        })?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?.into_entry()?);
        }
        Ok(out)
    }

    fn save_daily_logs(&mut self, trip: TripId, sheets: &[DailyLogSheet]) -> OutputResult<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM daily_logs WHERE trip_id = ?1", params![trip.get() as i64])?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO daily_logs \
                 (trip_id, date, starting_odometer, ending_odometer, off_duty_hours, \
                  sleeper_berth_hours, driving_hours, on_duty_hours, grid) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;
            for sheet in sheets {
                let row = DailyLogRow::from_sheet(trip.get(), sheet);
                stmt.execute(params![
                    row.trip_id as i64,
                    row.date,
                    row.starting_odometer as i64,
                    row.ending_odometer as i64,
                    row.off_duty_hours,
                    row.sleeper_berth_hours,
                    row.driving_hours,
                    row.on_duty_hours,
                    row.grid,
                ])?;
            }
        }
        tx.commit()?;
        debug!(%trip, rows = sheets.len(), "daily logs saved");
        Ok(())
    }

    fn load_daily_logs(&self, trip: TripId) -> OutputResult<Vec<DailyLogSheet>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT trip_id, date, starting_odometer, ending_odometer, off_duty_hours, \
                    sleeper_berth_hours, driving_hours, on_duty_hours, grid \
             FROM daily_logs WHERE trip_id = ?1 ORDER BY date",
        )?;
        let rows = stmt.query_map(params![trip.get() as i64], |r| {
            Ok(DailyLogRow {
                trip_id:             r.get::<_, i64>(0)? as u64,
                date:                r.get(1)?,
                starting_odometer:   r.get::<_, i64>(2)? as u64,
                ending_odometer:     r.get::<_, i64>(3)? as u64,
                off_duty_hours:      r.get(4)?,
                sleeper_berth_hours: r.get(5)?,
                driving_hours:       r.get(6)?,
                on_duty_hours:       r.get(7)?,
                grid:                r.get(8)?,
            })
        })?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?.into_sheet()?);
        }
        Ok(out)
    }
}
