//! CSV segment loader.
//!
//! # CSV format
//!
//! One row per segment.  Coordinates are in GeoJSON order (longitude first),
//! matching what mapping APIs return.
//!
//! ```csv
//! index,distance_miles,duration_hours,start_lon,start_lat,end_lon,end_lat
//! 0,120.5,2.2,-87.6298,41.8781,-86.1581,39.7684
//! 1,480.0,8.1,-86.1581,39.7684,-81.6944,41.4993
//! ```
//!
//! Rows may appear in any order; [`Route::from_segments`] sorts by `index`
//! and validates the result.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use hos_core::GeoPoint;

use crate::{Route, RouteError, RouteResult, RouteSegment};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct SegmentRecord {
    index:          u32,
    distance_miles: f64,
    duration_hours: f64,
    start_lon:      f64,
    start_lat:      f64,
    end_lon:        f64,
    end_lat:        f64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load and validate a route from a CSV file.
pub fn load_segments_csv(path: &Path) -> RouteResult<Route> {
    let file = std::fs::File::open(path).map_err(RouteError::Io)?;
    load_segments_reader(file)
}

/// Like [`load_segments_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or for route payloads
/// cached in a database blob.
pub fn load_segments_reader<R: Read>(reader: R) -> RouteResult<Route> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let segments = csv_reader
        .deserialize::<SegmentRecord>()
        .map(|result| {
            let r = result.map_err(|e| RouteError::Parse(e.to_string()))?;
            Ok(RouteSegment {
                index:          r.index,
                distance_miles: r.distance_miles,
                duration_hours: r.duration_hours,
                start:          GeoPoint::from_lon_lat([r.start_lon, r.start_lat])?,
                end:            GeoPoint::from_lon_lat([r.end_lon, r.end_lat])?,
            })
        })
        .collect::<RouteResult<Vec<_>>>()?;

    Route::from_segments(segments)
}
