//! sample_trip: plans one Chicago → Denver load and writes its duty logs.
//!
//! Runs both trip flows end to end: calculate the route (mandatory stops),
//! then generate the duty timeline and daily log sheets.  Records land in
//! CSV files under `--out`.  Pass `--segments` to plan a different route
//! and `--rules` to load a non-default rule set from JSON.

mod logger;

use std::fs::File;
use std::io::Cursor;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use hos_core::time::{self, Timestamp};
use hos_core::{GeoPoint, HosRules, RouteId, TripId, UserId};
use hos_log::BuilderConfig;
use hos_output::CsvStore;
use hos_plan::StopLocation;
use hos_route::{Route, StaticRouteProvider, load_segments_csv, load_segments_reader};
use hos_trip::{Trip, TripService};

// ── Constants ─────────────────────────────────────────────────────────────────

const TRIP_ID:  TripId  = TripId(1);
const ROUTE_ID: RouteId = RouteId(1);
const DRIVER:   UserId  = UserId(1);

// ── Route CSV ─────────────────────────────────────────────────────────────────

// Chicago yard → Joliet (pickup) → Des Moines → Omaha → Denver (dropoff).
// Coordinates are longitude first.
const ROUTE_CSV: &str = "\
index,distance_miles,duration_hours,start_lon,start_lat,end_lon,end_lat\n\
0,45.0,0.8,-87.6298,41.8781,-88.0817,41.5250\n\
1,310.0,5.2,-88.0817,41.5250,-93.6091,41.5868\n\
2,135.0,2.2,-93.6091,41.5868,-95.9345,41.2565\n\
3,540.0,8.6,-95.9345,41.2565,-104.9903,39.7392\n\
";

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "sample_trip", about = "Plan a trip and generate its HOS duty logs")]
struct Args {
    /// Trip start, RFC 3339 with an explicit offset.
    #[arg(long, default_value = "2024-03-04T06:00:00-06:00")]
    start: String,

    /// On-duty hours already used in the 70-hour cycle.
    #[arg(long, default_value_t = 0.0)]
    cycle_hours: f64,

    /// JSON file with a rule set; missing fields keep their defaults.
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Output directory for the CSV records.
    #[arg(long, default_value = "./output")]
    out: PathBuf,

    /// Segment CSV to plan instead of the built-in route.
    #[arg(long)]
    segments: Option<PathBuf>,
}

fn load_rules(path: Option<&PathBuf>) -> Result<HosRules> {
    let Some(path) = path else {
        return Ok(HosRules::default());
    };
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    serde_json::from_reader(file).with_context(|| format!("parsing {}", path.display()))
}

fn load_route(path: Option<&PathBuf>) -> Result<Route> {
    let route = match path {
        Some(path) => load_segments_csv(path)
            .with_context(|| format!("loading segments from {}", path.display()))?,
        None => load_segments_reader(Cursor::new(ROUTE_CSV))?,
    };
    Ok(route)
}

fn sample_trip(start: Timestamp, cycle_hours_used: f64, route: &Route) -> Trip {
    let pickup = route.segments().first().map_or(route.start(), |s| s.end);
    Trip {
        id:       TRIP_ID,
        route_id: ROUTE_ID,
        owner:    DRIVER,
        start,
        cycle_hours_used,
        current:  StopLocation::new(route.start(), "Chicago, IL"),
        pickup:   StopLocation::new(pickup, "Joliet, IL"),
        dropoff:  StopLocation::new(route.end(), "Denver, CO"),
    }
}

fn fmt_point(p: GeoPoint) -> String {
    format!("{:.4}, {:.4}", p.lat, p.lon)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    logger::init_logger();
    let args = Args::parse();

    let start = time::parse_timestamp(&args.start)?;
    let rules = load_rules(args.rules.as_ref())?;
    let route = load_route(args.segments.as_ref())?;
    let trip = sample_trip(start, args.cycle_hours, &route);

    println!("=== sample_trip: HOS trip planner ===");
    println!(
        "Route: {} segments, {:.0} mi, {:.1} h driving  |  Cycle used: {} h",
        route.segments().len(),
        route.total_distance_miles(),
        route.total_duration_hours(),
        trip.cycle_hours_used,
    );
    println!();

    let store = CsvStore::new(&args.out)?;
    let mut service = TripService::with_rules(
        StaticRouteProvider::new(route),
        store,
        rules,
        BuilderConfig::default(),
    )?;

    // 1. Plan the mandatory stops.
    let planned = service.calculate_route(&trip, DRIVER)?;
    println!("Waypoints:");
    for w in planned.waypoints() {
        println!(
            "  {:>2}  {:<20} {}  {:>5.2} h  ({})",
            w.sequence,
            w.location.name,
            w.timestamp.format("%a %H:%M"),
            w.duration_hours,
            fmt_point(w.location.point),
        );
    }
    println!("Estimated arrival: {}", planned.estimated_end.format("%a %Y-%m-%d %H:%M %:z"));
    println!();

    // 2. Replay into duty logs.
    let timeline = service.generate_logs(&trip, DRIVER)?;
    println!("Daily logs:");
    for sheet in &timeline.daily_logs {
        println!(
            "  {}  off {:>5.2}  sb {:>5.2}  drv {:>5.2}  on {:>5.2}  miles {:>4}",
            sheet.date,
            sheet.off_duty_hours(),
            sheet.sleeper_berth_hours(),
            sheet.driving_hours(),
            sheet.on_duty_hours(),
            sheet.miles(),
        );
        println!("  {}", sheet.grid);
    }
    if !timeline.synthetic.is_empty() {
        println!("Stops added while logging: {}", timeline.synthetic.len());
    }

    let store = service.into_store();
    println!();
    println!("Output written to {}", store.dir().display());
    Ok(())
}
