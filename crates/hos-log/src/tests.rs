//! Unit tests for hos-log.

use chrono::{FixedOffset, NaiveDate, TimeZone};

use hos_core::time::{self, Timestamp};
use hos_core::{DutyStatus, GeoPoint, RouteId, StopKind, TripId};
use hos_plan::{DutyEvent, StopLocation};

use crate::{TimelineBuilder, TripLog};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn central() -> FixedOffset {
    FixedOffset::west_opt(6 * 3600).unwrap()
}

/// 2024-03-04 + `day` days at `hour:min`, US Central standard time.
fn at(day: u32, hour: u32, min: u32) -> Timestamp {
    central().with_ymd_and_hms(2024, 3, 4 + day, hour, min, 0).unwrap()
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 4 + day).unwrap()
}

fn ev(kind: StopKind, ts: Timestamp, hours: f64) -> DutyEvent {
    let place = StopLocation::new(GeoPoint::new(41.88, -87.63), kind.label());
    DutyEvent::new(RouteId(1), kind, ts, hours, place)
}

fn trip(start: Timestamp) -> TripLog {
    TripLog {
        trip_id:          TripId(9),
        route_id:         RouteId(1),
        start,
        cycle_hours_used: 0.0,
        origin:           None,
    }
}

fn statuses(entries: &[crate::LogEntry]) -> Vec<DutyStatus> {
    entries.iter().map(|e| e.status).collect()
}

// ── Slicing ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod slicing {
    use super::*;
    use crate::{SLOTS_PER_DAY, slice_interval};

    #[test]
    fn ninety_six_slots() {
        assert_eq!(SLOTS_PER_DAY, 96);
    }

    #[test]
    fn interval_within_one_day() {
        let s = slice_interval(at(0, 6, 0), at(0, 7, 30), DutyStatus::Driving, central());
        assert_eq!(s.len(), 1);
        assert_eq!(s[0].date, date(0));
        assert_eq!(s[0].slots(), 24..30);
        assert_eq!(s[0].hours(), 1.5);
    }

    #[test]
    fn crossing_midnight_splits() {
        let s = slice_interval(at(0, 23, 0), at(1, 2, 0), DutyStatus::Driving, central());
        assert_eq!(s.len(), 2);
        assert_eq!((s[0].date, s[0].slots()), (date(0), 92..96));
        assert_eq!((s[1].date, s[1].slots()), (date(1), 0..8));
        assert_eq!(s[0].end, at(1, 0, 0));
        assert_eq!(s[1].start, at(1, 0, 0));
        assert_eq!(s[0].hours() + s[1].hours(), 3.0);
    }

    #[test]
    fn full_middle_day() {
        let s = slice_interval(at(0, 22, 0), at(2, 4, 0), DutyStatus::SleeperBerth, central());
        assert_eq!(s.len(), 3);
        assert_eq!(s[1].slots(), 0..96);
        assert_eq!(s[1].hours(), 24.0);
        assert_eq!(s[2].slots(), 0..16);
    }

    #[test]
    fn empty_and_inverted_intervals() {
        assert!(slice_interval(at(0, 6, 0), at(0, 6, 0), DutyStatus::OffDuty, central()).is_empty());
        assert!(slice_interval(at(0, 7, 0), at(0, 6, 0), DutyStatus::OffDuty, central()).is_empty());
    }

    #[test]
    fn sub_slot_interval_writes_nothing() {
        let s = slice_interval(at(0, 6, 5), at(0, 6, 10), DutyStatus::Driving, central());
        assert_eq!(s.len(), 1);
        assert!(s[0].slots().is_empty());
    }

    #[test]
    fn dates_follow_the_log_offset() {
        // 05:00Z–07:00Z is 23:00–01:00 in Central.
        let utc = FixedOffset::east_opt(0).unwrap();
        let start = utc.with_ymd_and_hms(2024, 3, 5, 5, 0, 0).unwrap();
        let end = utc.with_ymd_and_hms(2024, 3, 5, 7, 0, 0).unwrap();
        let s = slice_interval(start, end, DutyStatus::Driving, central());
        assert_eq!(s.len(), 2);
        assert_eq!(s[0].date, date(0));
        assert_eq!(s[0].start, at(0, 23, 0));
        assert_eq!(s[1].date, date(1));
    }
}

// ── Sheets ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod sheet {
    use super::*;
    use crate::{DailyLogSheet, DutyTotals, StatusGrid, slice_interval};
    use hos_core::CoreError;

    #[test]
    fn grid_text_round_trip() {
        let mut grid = StatusGrid::new();
        grid.fill(0..24, DutyStatus::SleeperBerth);
        grid.fill(24..28, DutyStatus::OnDutyNotDriving);
        grid.fill(28..60, DutyStatus::Driving);
        let text = grid.to_string();
        assert_eq!(text.len(), 96);
        assert!(text.starts_with("SSSSSSSSSSSSSSSSSSSSSSSSNNNND"));
        assert!(text.ends_with("...."));
        assert_eq!(text.parse::<StatusGrid>().unwrap(), grid);
    }

    #[test]
    fn grid_rejects_bad_text() {
        assert!(matches!("DDD".parse::<StatusGrid>(), Err(CoreError::Parse(_))));
        let bad = format!("X{}", ".".repeat(95));
        assert!(matches!(bad.parse::<StatusGrid>(), Err(CoreError::Parse(_))));
    }

    #[test]
    fn last_write_wins() {
        let mut grid = StatusGrid::new();
        grid.fill(10..20, DutyStatus::Driving);
        grid.fill(15..16, DutyStatus::OffDuty);
        assert_eq!(grid.get(14), Some(DutyStatus::Driving));
        assert_eq!(grid.get(15), Some(DutyStatus::OffDuty));
        assert_eq!(grid.count(DutyStatus::Driving), 9);
        assert_eq!(grid.get(96), None);
    }

    #[test]
    fn record_and_close() {
        let mut sheet = DailyLogSheet::new(date(0), 1200);
        for slice in slice_interval(at(0, 7, 0), at(0, 16, 0), DutyStatus::Driving, central()) {
            sheet.record(&slice);
        }
        assert_eq!(sheet.driving_hours(), 9.0);
        assert_eq!(sheet.ending_odometer, 1200);
        sheet.close(55.0);
        assert_eq!(sheet.ending_odometer, 1695);
        assert_eq!(sheet.miles(), 495);
        assert_eq!(sheet.grid.count(DutyStatus::Driving), 36);
    }

    #[test]
    fn totals_from_hour_columns() {
        let t = DutyTotals::from_hours(1.5, 10.0, 11.0, 1.5);
        assert_eq!(t.hours(DutyStatus::SleeperBerth), 10.0);
        assert_eq!(t.total_hours(), 24.0);
        assert_eq!(t.total_millis(), 24 * time::MS_PER_HOUR);
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use super::*;
    use crate::{BuilderConfig, LogError};
    use hos_core::CoreError;

    #[test]
    fn event_across_midnight_lands_on_two_days() {
        let pickup = ev(StopKind::Pickup, at(0, 23, 0), 3.0);
        let dropoff = ev(StopKind::Dropoff, at(1, 2, 0), 1.0);
        let tl = TimelineBuilder::default()
            .build_from_parts(at(0, 23, 0), &pickup, &[], &dropoff, 0.0)
            .unwrap();

        assert_eq!(tl.entries.len(), 3);
        assert_eq!((tl.entries[0].start, tl.entries[0].end), (at(0, 23, 0), at(1, 0, 0)));
        assert_eq!((tl.entries[1].start, tl.entries[1].end), (at(1, 0, 0), at(1, 2, 0)));
        assert_eq!(tl.entries[0].activity.as_deref(), Some("Loading"));

        assert_eq!(tl.daily_logs.len(), 2);
        let day1 = &tl.daily_logs[0];
        let day2 = &tl.daily_logs[1];
        assert_eq!(day1.date, date(0));
        assert_eq!(day2.date, date(1));
        for slot in 92..96 {
            assert_eq!(day1.grid.get(slot), Some(DutyStatus::OnDutyNotDriving));
        }
        assert_eq!(day1.grid.get(91), None);
        for slot in 0..8 {
            assert_eq!(day2.grid.get(slot), Some(DutyStatus::OnDutyNotDriving));
        }
        assert_eq!(day1.on_duty_hours(), 1.0);
        assert_eq!(day2.on_duty_hours(), 3.0);
    }

    #[test]
    fn missing_waypoints() {
        let b = TimelineBuilder::default();
        let only_pickup = [ev(StopKind::Pickup, at(0, 6, 0), 1.0)];
        assert!(matches!(
            b.build(&trip(at(0, 6, 0)), &only_pickup),
            Err(LogError::MissingWaypoint(StopKind::Dropoff))
        ));
        let only_dropoff = [ev(StopKind::Dropoff, at(0, 9, 0), 1.0)];
        assert!(matches!(
            b.build(&trip(at(0, 6, 0)), &only_dropoff),
            Err(LogError::MissingWaypoint(StopKind::Pickup))
        ));
    }

    #[test]
    fn waypoint_from_another_route() {
        let mut stray = ev(StopKind::FuelStop, at(0, 8, 0), 0.5);
        stray.route = RouteId(2);
        let wps = [ev(StopKind::Pickup, at(0, 6, 0), 1.0), stray, ev(StopKind::Dropoff, at(0, 9, 0), 1.0)];
        let err = TimelineBuilder::default().build(&trip(at(0, 6, 0)), &wps).unwrap_err();
        assert!(matches!(
            err,
            LogError::CrossTripWaypoint { expected: RouteId(1), found: RouteId(2), kind: StopKind::FuelStop }
        ));
    }

    #[test]
    fn duplicate_pickup() {
        let wps = [
            ev(StopKind::Pickup, at(0, 6, 0), 1.0),
            ev(StopKind::Pickup, at(0, 7, 0), 1.0),
            ev(StopKind::Dropoff, at(0, 9, 0), 1.0),
        ];
        assert!(matches!(
            TimelineBuilder::default().build(&trip(at(0, 6, 0)), &wps),
            Err(LogError::DuplicateWaypoint(StopKind::Pickup))
        ));
    }

    #[test]
    fn dropoff_before_pickup() {
        let wps = [ev(StopKind::Pickup, at(0, 9, 0), 1.0), ev(StopKind::Dropoff, at(0, 6, 0), 1.0)];
        assert!(matches!(
            TimelineBuilder::default().build(&trip(at(0, 6, 0)), &wps),
            Err(LogError::InvalidEvent(_))
        ));
    }

    #[test]
    fn negative_duration_rejected() {
        let wps = [
            ev(StopKind::Pickup, at(0, 6, 0), 1.0),
            ev(StopKind::RestBreak, at(0, 8, 0), -0.5),
            ev(StopKind::Dropoff, at(0, 9, 0), 1.0),
        ];
        assert!(matches!(
            TimelineBuilder::default().build(&trip(at(0, 6, 0)), &wps),
            Err(LogError::InvalidEvent(_))
        ));
    }

    #[test]
    fn non_finite_duration_rejected() {
        let wps = [ev(StopKind::Pickup, at(0, 6, 0), f64::NAN), ev(StopKind::Dropoff, at(0, 9, 0), 1.0)];
        assert!(matches!(
            TimelineBuilder::default().build(&trip(at(0, 6, 0)), &wps),
            Err(LogError::InvalidEvent(_))
        ));
    }

    #[test]
    fn huge_duration_is_an_error_not_a_panic() {
        let wps = [ev(StopKind::Pickup, at(0, 6, 0), 1.0), ev(StopKind::Dropoff, at(0, 9, 0), 3.0e9)];
        assert!(matches!(
            TimelineBuilder::default().build(&trip(at(0, 6, 0)), &wps),
            Err(LogError::InvalidEvent(_))
        ));
    }

    #[test]
    fn stop_longer_than_a_year_rejected() {
        let wps = [
            ev(StopKind::Pickup, at(0, 6, 0), 1.0),
            ev(StopKind::RestBreak, at(0, 8, 0), 9000.0),
            ev(StopKind::Dropoff, at(0, 9, 0), 1.0),
        ];
        assert!(matches!(
            TimelineBuilder::default().build(&trip(at(0, 6, 0)), &wps),
            Err(LogError::InvalidEvent(_))
        ));
    }

    #[test]
    fn bad_coordinate_stays_a_core_error() {
        let mut pickup = ev(StopKind::Pickup, at(0, 6, 0), 1.0);
        pickup.location.point = GeoPoint { lat: 91.0, lon: 0.0 };
        let wps = [pickup, ev(StopKind::Dropoff, at(0, 9, 0), 1.0)];
        assert!(matches!(
            TimelineBuilder::default().build(&trip(at(0, 6, 0)), &wps),
            Err(LogError::Core(CoreError::InvalidCoordinate { .. }))
        ));
    }

    #[test]
    fn bad_config_rejected() {
        let config = BuilderConfig { post_trip_tail_hours: -1.0, ..BuilderConfig::default() };
        assert!(TimelineBuilder::new(Default::default(), config).is_err());
    }

    #[test]
    fn huge_tail_rejected() {
        let config = BuilderConfig { post_trip_tail_hours: 1e12, ..BuilderConfig::default() };
        assert!(matches!(
            TimelineBuilder::new(Default::default(), config),
            Err(LogError::Core(CoreError::Config(_)))
        ));
        let config = BuilderConfig { sleeper_threshold_hours: Some(1e12), ..BuilderConfig::default() };
        assert!(TimelineBuilder::new(Default::default(), config).is_err());
    }

    #[test]
    fn long_gap_before_pickup_is_sleeper_berth() {
        let wps = [ev(StopKind::Pickup, at(1, 6, 0), 1.0), ev(StopKind::Dropoff, at(1, 9, 0), 1.0)];
        let tl = TimelineBuilder::default().build(&trip(at(0, 18, 0)), &wps).unwrap();
        assert_eq!(
            statuses(&tl.entries),
            vec![
                DutyStatus::SleeperBerth,
                DutyStatus::SleeperBerth,
                DutyStatus::OnDutyNotDriving,
                DutyStatus::Driving,
                DutyStatus::OnDutyNotDriving,
            ]
        );
        assert_eq!(tl.daily_logs[0].sleeper_berth_hours(), 6.0);
        assert_eq!(tl.daily_logs[1].sleeper_berth_hours(), 6.0);
    }

    #[test]
    fn short_gap_before_pickup_is_off_duty() {
        let wps = [ev(StopKind::Pickup, at(0, 8, 0), 1.0), ev(StopKind::Dropoff, at(0, 11, 0), 1.0)];
        let tl = TimelineBuilder::default().build(&trip(at(0, 6, 0)), &wps).unwrap();
        assert_eq!(tl.entries[0].status, DutyStatus::OffDuty);
        assert_eq!(tl.entries[0].hours(), 2.0);
        assert_eq!(tl.entries[0].notes, "Off duty before pickup");
        // The window starts at pickup: 1 + 2 + 1.
        assert_eq!(tl.final_counters.window_since_reset, 4.0);
    }

    #[test]
    fn post_trip_tail_is_off_duty() {
        let config = BuilderConfig { post_trip_tail_hours: 2.0, ..BuilderConfig::default() };
        let b = TimelineBuilder::new(Default::default(), config).unwrap();
        let wps = [ev(StopKind::Pickup, at(0, 6, 0), 1.0), ev(StopKind::Dropoff, at(0, 9, 0), 1.0)];
        let tl = b.build(&trip(at(0, 6, 0)), &wps).unwrap();
        let last = tl.entries.last().unwrap();
        assert_eq!(last.status, DutyStatus::OffDuty);
        assert_eq!((last.start, last.end), (at(0, 10, 0), at(0, 12, 0)));
        assert_eq!(tl.end(), Some(at(0, 12, 0)));
    }

    #[test]
    fn overlapping_waypoint_starts_late() {
        let wps = [
            ev(StopKind::Pickup, at(0, 6, 0), 1.0),
            ev(StopKind::FuelStop, at(0, 6, 30), 0.5),
            ev(StopKind::Dropoff, at(0, 10, 0), 1.0),
        ];
        let tl = TimelineBuilder::default().build(&trip(at(0, 6, 0)), &wps).unwrap();
        let fuel = &tl.entries[1];
        assert_eq!(fuel.status, DutyStatus::OffDuty);
        assert_eq!((fuel.start, fuel.end), (at(0, 7, 0), at(0, 7, 30)));
        assert_eq!(fuel.activity.as_deref(), Some("Fueling"));
        let drive = &tl.entries[2];
        assert_eq!((drive.start, drive.end), (at(0, 7, 30), at(0, 10, 0)));
        assert!(drive.location.is_none());
    }

    #[test]
    fn overrun_inserts_break_and_reset() {
        // Thirteen hours of driving with no planned stops.
        let wps = [ev(StopKind::Pickup, at(0, 6, 0), 1.0), ev(StopKind::Dropoff, at(0, 20, 0), 1.0)];
        let tl = TimelineBuilder::default().build(&trip(at(0, 6, 0)), &wps).unwrap();

        let inserted: Vec<_> = tl.synthetic.iter().map(|e| (e.kind, e.timestamp)).collect();
        assert_eq!(
            inserted,
            vec![
                (StopKind::MandatoryBreak, at(0, 15, 0)),
                (StopKind::OvernightReset, at(0, 18, 30)),
            ]
        );
        assert_eq!(tl.synthetic[1].location.name, "Overnight Rest 2");
        assert_eq!(
            statuses(&tl.entries),
            vec![
                DutyStatus::OnDutyNotDriving,
                DutyStatus::Driving,
                DutyStatus::OffDuty,
                DutyStatus::Driving,
                DutyStatus::SleeperBerth,
                DutyStatus::SleeperBerth,
                DutyStatus::Driving,
                DutyStatus::OnDutyNotDriving,
            ]
        );
        // Remaining driving is kept; the dropoff moves by 10.5 h.
        assert_eq!(tl.total_hours(DutyStatus::Driving), 13.0);
        let dropoff = tl.entries.last().unwrap();
        assert_eq!((dropoff.start, dropoff.end), (at(1, 6, 30), at(1, 7, 30)));
        assert!(tl.entries[2].notes.contains("short_break"));
    }

    #[test]
    fn observer_sees_everything() {
        #[derive(Default)]
        struct Counts {
            entries:   usize,
            synthetic: usize,
            days:      Vec<NaiveDate>,
            finished:  bool,
        }
        impl crate::TimelineObserver for Counts {
            fn on_entry(&mut self, _entry: &crate::LogEntry) {
                self.entries += 1;
            }
            fn on_synthetic_event(&mut self, _event: &DutyEvent, _limit: hos_plan::Limit) {
                self.synthetic += 1;
            }
            fn on_day_closed(&mut self, sheet: &crate::DailyLogSheet) {
                self.days.push(sheet.date);
            }
            fn on_finish(&mut self, _timeline: &crate::TripTimeline) {
                self.finished = true;
            }
        }

        let wps = [ev(StopKind::Pickup, at(0, 6, 0), 1.0), ev(StopKind::Dropoff, at(0, 20, 0), 1.0)];
        let mut counts = Counts::default();
        let tl = TimelineBuilder::default()
            .build_observed(&trip(at(0, 6, 0)), &wps, &mut counts)
            .unwrap();
        assert_eq!(counts.entries, tl.entries.len());
        assert_eq!(counts.synthetic, 2);
        assert_eq!(counts.days, vec![date(0), date(1)]);
        assert!(counts.finished);
    }

    #[test]
    fn odometer_carries_across_days() {
        let wps = [ev(StopKind::Pickup, at(0, 6, 0), 1.0), ev(StopKind::Dropoff, at(0, 20, 0), 1.0)];
        let tl = TimelineBuilder::default().build(&trip(at(0, 6, 0)), &wps).unwrap();
        let (d0, d1) = (&tl.daily_logs[0], &tl.daily_logs[1]);
        // Day one: 8 + 3 h driving; day two: 2 h.
        assert_eq!((d0.starting_odometer, d0.ending_odometer), (0, 605));
        assert_eq!((d1.starting_odometer, d1.ending_odometer), (605, 715));
    }
}

// ── Planner → builder ─────────────────────────────────────────────────────────

#[cfg(test)]
mod planned {
    use super::*;
    use hos_plan::Planner;
    use hos_route::{Route, RouteSegment};
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn route(shape: &[(f64, f64)]) -> Route {
        let segments = shape
            .iter()
            .enumerate()
            .map(|(i, &(distance_miles, duration_hours))| RouteSegment {
                index: i as u32,
                distance_miles,
                duration_hours,
                start: GeoPoint::new(40.0, -100.0 + i as f64),
                end:   GeoPoint::new(40.0, -99.0 + i as f64),
            })
            .collect();
        Route::from_segments(segments).unwrap()
    }

    #[test]
    fn planned_trip_replays_without_insertions() {
        // Break at 15:00, fuel at 17:30, dropoff at 19:00, reset at 20:00.
        let plan = Planner::default().plan_trip(RouteId(1), &route(&[(1100.0, 11.0)]), 0.0, at(0, 6, 0)).unwrap();
        let tl = TimelineBuilder::default().build(&trip(at(0, 6, 0)), &plan.events()).unwrap();

        assert!(tl.synthetic.is_empty());
        assert_eq!(
            statuses(&tl.entries),
            vec![
                DutyStatus::OnDutyNotDriving,
                DutyStatus::Driving,
                DutyStatus::OffDuty,
                DutyStatus::Driving,
                DutyStatus::OffDuty,
                DutyStatus::Driving,
                DutyStatus::OnDutyNotDriving,
                DutyStatus::SleeperBerth,
                DutyStatus::SleeperBerth,
            ]
        );
        assert_eq!(tl.end(), Some(at(1, 6, 0)));

        let d0 = &tl.daily_logs[0];
        assert_eq!(d0.driving_hours(), 11.0);
        assert_eq!(d0.on_duty_hours(), 2.0);
        assert_eq!(d0.off_duty_hours(), 1.0);
        assert_eq!(d0.sleeper_berth_hours(), 4.0);
        assert_eq!(d0.grid.count(DutyStatus::Driving), 44);
        assert_eq!(d0.grid.get(60), Some(DutyStatus::OffDuty));
        assert_eq!(d0.grid.get(80), Some(DutyStatus::SleeperBerth));
        assert_eq!(d0.ending_odometer, 605);
        assert_eq!(tl.daily_logs[1].sleeper_berth_hours(), 6.0);
    }

    #[test]
    fn rebuilding_is_identical() {
        let plan = Planner::default()
            .plan_trip(RouteId(1), &route(&[(900.0, 15.0), (700.0, 12.0)]), 30.0, at(0, 5, 0))
            .unwrap();
        let mut t = trip(at(0, 5, 0));
        t.cycle_hours_used = 30.0;
        let b = TimelineBuilder::default();
        assert_eq!(b.build(&t, &plan.events()).unwrap(), b.build(&t, &plan.events()).unwrap());
    }

    #[test]
    fn random_trips_keep_totals_exact() {
        let mut rng = SmallRng::seed_from_u64(42);
        let planner = Planner::default();
        let builder = TimelineBuilder::default();

        for _ in 0..100 {
            let speed: f64 = rng.gen_range(40.0..75.0);
            let n = rng.gen_range(1..=3);
            let shape: Vec<(f64, f64)> = (0..n)
                .map(|_| {
                    let miles = rng.gen_range(30.0..1200.0);
                    (miles, miles / speed)
                })
                .collect();
            let cycle = rng.gen_range(0.0..69.0);
            let start = at(0, rng.gen_range(0..24), 15 * rng.gen_range(0..4));

            let plan = planner.plan_trip(RouteId(1), &route(&shape), cycle, start).unwrap();
            let mut t = trip(start);
            t.cycle_hours_used = cycle;
            let tl = builder.build(&t, &plan.events()).unwrap();

            assert!(tl.synthetic.is_empty(), "planned stops already respect every limit");

            // Contiguous from the trip start.
            assert_eq!(tl.start(), Some(start));
            for pair in tl.entries.windows(2) {
                assert_eq!(pair[0].end, pair[1].start);
            }

            // Day totals equal same-day entries, to the millisecond.
            for sheet in &tl.daily_logs {
                let from_entries: i64 = tl
                    .entries
                    .iter()
                    .filter(|e| e.date() == sheet.date)
                    .map(|e| e.duration().num_milliseconds())
                    .sum();
                assert_eq!(sheet.totals.total_millis(), from_entries);
                assert!(sheet.totals.total_millis() <= 24 * time::MS_PER_HOUR);
            }
            let all: i64 = tl.daily_logs.iter().map(|s| s.totals.total_millis()).sum();
            let elapsed = tl.end().unwrap() - start;
            assert_eq!(all, elapsed.num_milliseconds());

            // Odometer chains and never goes backwards.
            for pair in tl.daily_logs.windows(2) {
                assert_eq!(pair[0].ending_odometer, pair[1].starting_odometer);
                assert!(pair[0].date < pair[1].date);
            }
        }
    }
}
