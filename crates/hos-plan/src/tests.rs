//! Unit tests for hos-plan.

use chrono::{FixedOffset, TimeZone};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use hos_core::time::{self, Timestamp};
use hos_core::{GeoPoint, HosRules, RouteId, StopKind};
use hos_route::{Route, RouteSegment};

use crate::{DutyEvent, Planner, StopLocation, TripPlan};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// 2024-03-04 at `hour`:00, US Central standard time.
fn at(hour: u32) -> Timestamp {
    FixedOffset::west_opt(6 * 3600)
        .unwrap()
        .with_ymd_and_hms(2024, 3, 4, hour, 0, 0)
        .unwrap()
}

/// Contiguous legs heading east along 40°N, one degree of longitude each.
/// Each entry is `(miles, hours)`.
fn legs(shape: &[(f64, f64)]) -> Vec<RouteSegment> {
    shape.iter()
        .enumerate()
        .map(|(i, &(distance_miles, duration_hours))| RouteSegment {
            index: i as u32,
            distance_miles,
            duration_hours,
            start: GeoPoint::new(40.0, -100.0 + i as f64),
            end:   GeoPoint::new(40.0, -99.0 + i as f64),
        })
        .collect()
}

fn route(shape: &[(f64, f64)]) -> Route {
    Route::from_segments(legs(shape)).unwrap()
}

fn plan(shape: &[(f64, f64)], cycle: f64, start: Timestamp) -> TripPlan {
    Planner::default().plan_trip(RouteId(1), &route(shape), cycle, start).unwrap()
}

fn kinds(events: &[DutyEvent]) -> Vec<StopKind> {
    events.iter().map(|e| e.kind).collect()
}

// ── Counters ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod counters {
    use super::*;
    use crate::{Limit, RegulatoryCounters};
    use hos_core::CycleReset;

    #[test]
    fn fresh_counters_bind_nothing() {
        let rules = HosRules::default();
        let c = RegulatoryCounters::new(0.0);
        assert_eq!(c.binding_limit(&rules, 1.0), None);
        assert_eq!(c.drivable_hours(&rules, 1.0), 8.0);
    }

    #[test]
    fn drive_consumes_every_driving_budget() {
        let rules = HosRules::default();
        let c = RegulatoryCounters::new(10.0).drive(2.0, 120.0);
        assert_eq!(c.break_remaining(&rules), 6.0);
        assert_eq!(c.driving_remaining(&rules), 9.0);
        assert_eq!(c.window_remaining(&rules), 12.0);
        assert_eq!(c.cycle_remaining(&rules), 58.0);
        assert_eq!(c.fuel_remaining_miles(&rules), 880.0);
    }

    #[test]
    fn idle_runs_only_the_window() {
        let c = RegulatoryCounters::new(5.0).idle(0.5);
        assert_eq!(c.window_since_reset, 0.5);
        assert_eq!(c.cycle_used, 5.0);
        assert_eq!(c.driving_since_break, 0.0);
    }

    #[test]
    fn break_limit_after_eight_hours() {
        let rules = HosRules::default();
        let c = RegulatoryCounters::new(0.0).work(1.0).drive(8.0, 440.0);
        assert_eq!(c.binding_limit(&rules, 1.0), Some(Limit::ShortBreak));
        let c = c.idle(0.5).after_break();
        assert_eq!(c.binding_limit(&rules, 1.0), None);
        assert_eq!(c.drivable_hours(&rules, 1.0), 3.0);
    }

    #[test]
    fn reset_limits_outrank_the_break() {
        let rules = HosRules::default();
        // 8 h driving and a window with only the dropoff hour left.
        let c = RegulatoryCounters::new(0.0).work(5.0).drive(8.0, 400.0);
        assert_eq!(c.binding_limit(&rules, 1.0), Some(Limit::DutyWindow));
        assert_eq!(c.binding_limit(&rules, 0.0), Some(Limit::ShortBreak));
    }

    #[test]
    fn fuel_is_not_an_hours_limit() {
        let rules = HosRules::default();
        let c = RegulatoryCounters::new(0.0).drive(5.0, 1000.0);
        assert_eq!(c.binding_limit(&rules, 0.0), Some(Limit::Fuel));
        assert_eq!(c.binding_hours_limit(&rules), None);
    }

    #[test]
    fn full_rest_clears_duty_period() {
        let rules = HosRules::default();
        let c = RegulatoryCounters::new(30.0).work(1.0).drive(10.0, 600.0).rest(&rules, 10.0);
        assert_eq!(c.driving_since_reset, 0.0);
        assert_eq!(c.window_since_reset, 0.0);
        assert_eq!(c.cycle_used, 0.0);
        // Fuel is a tank, not a duty counter.
        assert_eq!(c.miles_since_fuel, 600.0);
    }

    #[test]
    fn short_rest_is_idle_time() {
        let rules = HosRules::default();
        let before = RegulatoryCounters::new(0.0).drive(4.0, 200.0);
        let after = before.rest(&rules, 2.0);
        assert_eq!(after, before.idle(2.0));
    }

    #[test]
    fn restart_only_keeps_cycle_through_ten_hours() {
        let rules = HosRules {
            cycle_reset: CycleReset::RestartOnly { restart_hours: 34.0 },
            ..HosRules::default()
        };
        let c = RegulatoryCounters::new(40.0).drive(6.0, 300.0);
        assert_eq!(c.rest(&rules, 10.0).cycle_used, 46.0);
        assert_eq!(c.rest(&rules, 34.0).cycle_used, 0.0);
    }

    #[test]
    fn limits_map_to_stop_kinds() {
        assert_eq!(Limit::Cycle.stop_kind(), StopKind::OvernightReset);
        assert_eq!(Limit::DailyDriving.stop_kind(), StopKind::OvernightReset);
        assert_eq!(Limit::ShortBreak.stop_kind(), StopKind::MandatoryBreak);
        assert_eq!(Limit::Fuel.stop_kind(), StopKind::FuelStop);
    }
}

// ── EventQueue ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod queue {
    use super::*;
    use crate::EventQueue;

    fn ev(kind: StopKind, ts: Timestamp) -> DutyEvent {
        DutyEvent::new(RouteId(1), kind, ts, 0.5, StopLocation::new(GeoPoint::new(40.0, -100.0), "x"))
    }

    #[test]
    fn pops_in_time_order() {
        let mut q = EventQueue::from_events([
            ev(StopKind::Dropoff, at(18)),
            ev(StopKind::Pickup, at(6)),
            ev(StopKind::FuelStop, at(12)),
        ]);
        assert_eq!(q.len(), 3);
        assert_eq!(q.peek().map(|e| e.kind), Some(StopKind::Pickup));
        let order: Vec<_> = std::iter::from_fn(|| q.pop()).map(|e| e.kind).collect();
        assert_eq!(order, vec![StopKind::Pickup, StopKind::FuelStop, StopKind::Dropoff]);
        assert!(q.is_empty());
    }

    #[test]
    fn ties_pop_in_push_order() {
        let mut q = EventQueue::new();
        q.push(ev(StopKind::FuelStop, at(12)));
        q.push(ev(StopKind::MandatoryBreak, at(12)));
        q.push(ev(StopKind::RestBreak, at(12)));
        assert_eq!(q.pop().map(|e| e.kind), Some(StopKind::FuelStop));
        assert_eq!(q.pop().map(|e| e.kind), Some(StopKind::MandatoryBreak));
        assert_eq!(q.pop().map(|e| e.kind), Some(StopKind::RestBreak));
        assert!(q.pop().is_none());
    }

    #[test]
    fn same_instant_in_other_offset_is_a_tie() {
        let utc = at(12).with_timezone(&FixedOffset::east_opt(0).unwrap());
        let mut q = EventQueue::new();
        q.push(ev(StopKind::FuelStop, at(12)));
        q.push(ev(StopKind::MandatoryBreak, utc));
        assert_eq!(q.pop().map(|e| e.kind), Some(StopKind::FuelStop));
    }
}

// ── Planner scenarios ─────────────────────────────────────────────────────────

#[cfg(test)]
mod planner {
    use super::*;
    use crate::PlanError;
    use hos_core::{CoreError, CycleReset};
    use hos_route::RouteError;

    #[test]
    fn nine_hour_leg_gets_one_mandatory_break() {
        let p = plan(&[(600.0, 9.0)], 0.0, at(6));

        assert_eq!(kinds(&p.stops), vec![StopKind::MandatoryBreak]);
        let brk = &p.stops[0];
        // Pickup 06:00–07:00, then 8 h of driving.
        assert_eq!(brk.timestamp, at(15));
        assert_eq!(brk.duration_hours, 0.5);
        assert_eq!(brk.location.name, "Mandatory Break 1");
        assert_eq!(brk.route, RouteId(1));

        assert_eq!(p.pickup.timestamp, at(6));
        assert_eq!(p.dropoff.timestamp, at(16) + time::hours(0.5));
        assert_eq!(p.estimated_end, at(17) + time::hours(0.5));
        assert!((p.driving_hours - 9.0).abs() < 1e-9);
        assert!((p.driving_miles - 600.0).abs() < 1e-6);
    }

    #[test]
    fn break_position_is_interpolated() {
        let p = plan(&[(600.0, 9.0)], 0.0, at(6));
        let lon = p.stops[0].location.point.lon;
        // 8/9 of the way from -100 to -99.
        assert!((lon - (-100.0 + 8.0 / 9.0)).abs() < 1e-9);
        assert_eq!(p.dropoff.location.point, GeoPoint::new(40.0, -99.0));
        assert_eq!(p.pickup.location.point, GeoPoint::new(40.0, -100.0));
    }

    #[test]
    fn short_trip_needs_no_stops() {
        let p = plan(&[(180.0, 3.0), (320.0, 5.0)], 0.0, at(6));
        // Exactly 8 h of driving: the break is due but never needed.
        assert!(p.stops.is_empty());
        assert_eq!(p.dropoff.timestamp, at(15));
    }

    #[test]
    fn nearly_spent_cycle_resets_before_driving() {
        let p = plan(&[(300.0, 5.0)], 68.0, at(6));
        let first = &p.stops[0];
        assert_eq!(first.kind, StopKind::OvernightReset);
        assert_eq!(first.timestamp, at(7));
        assert_eq!(first.duration_hours, 10.0);
        assert_eq!(first.location.point, GeoPoint::new(40.0, -100.0));
        // After the reset the whole trip fits.
        assert_eq!(p.stops.len(), 1);
        assert_eq!(p.dropoff.timestamp, at(22));
    }

    #[test]
    fn empty_route_is_rejected() {
        let err = Planner::default().plan(RouteId(1), &[], 0.0, at(6)).unwrap_err();
        assert!(matches!(err, PlanError::Route(RouteError::InvalidRoute(_))));
    }

    #[test]
    fn cycle_out_of_range_is_rejected() {
        let err = Planner::default().plan(RouteId(1), &legs(&[(100.0, 2.0)]), 70.0, at(6)).unwrap_err();
        assert!(matches!(err, PlanError::Core(CoreError::InvalidCycleHours { .. })));
        let err = Planner::default().plan(RouteId(1), &legs(&[(100.0, 2.0)]), -1.0, at(6)).unwrap_err();
        assert!(matches!(err, PlanError::Core(CoreError::InvalidCycleHours { .. })));
    }

    #[test]
    fn invalid_rules_are_rejected() {
        let rules = HosRules { break_hours: 0.0, ..HosRules::default() };
        assert!(matches!(Planner::new(rules), Err(PlanError::Core(CoreError::Config(_)))));
    }

    #[test]
    fn plan_returns_only_stops() {
        let stops = Planner::default().plan(RouteId(1), &legs(&[(600.0, 9.0)]), 0.0, at(6)).unwrap();
        assert_eq!(kinds(&stops), vec![StopKind::MandatoryBreak]);
    }

    #[test]
    fn fuel_every_thousand_miles() {
        let p = plan(&[(2200.0, 40.0)], 0.0, at(6));
        assert_eq!(p.count(StopKind::FuelStop), 2);
        assert!((p.driving_miles - 2200.0).abs() < 1e-6);
        assert!(p.count(StopKind::OvernightReset) >= 3);
    }

    #[test]
    fn fuel_timing_follows_segment_speed() {
        // 800 mi at 80 mph, then 400 mi at 40 mph: the tank runs out 5 h
        // into the second leg.
        let rules = HosRules { max_driving_before_break_hours: 11.0, ..HosRules::default() };
        let p = Planner::new(rules)
            .unwrap()
            .plan_trip(RouteId(1), &route(&[(800.0, 10.0), (400.0, 10.0)]), 0.0, at(0))
            .unwrap();
        let fuel: Vec<_> = p.stops.iter().filter(|s| s.kind == StopKind::FuelStop).collect();
        assert_eq!(fuel.len(), 1);
        assert!((fuel[0].location.point.lon - (-99.0 + 0.5)).abs() < 1e-9);
    }

    #[test]
    fn dropoff_exhausting_window_adds_trailing_reset() {
        // Pickup 1 + drive 8 + break 0.5 + drive 2 + fuel 0.5 + drive 1 = 13,
        // so the dropoff closes the 14 h window.
        let p = plan(&[(1100.0, 11.0)], 0.0, at(6));
        assert_eq!(
            kinds(&p.stops),
            vec![StopKind::MandatoryBreak, StopKind::FuelStop, StopKind::OvernightReset]
        );
        let reset = &p.stops[2];
        assert_eq!(reset.timestamp, p.dropoff.end());
        assert_eq!(p.estimated_end, p.dropoff.end());
        assert_eq!(reset.location.point, p.dropoff.location.point);
        assert_eq!(reset.location.name, "Overnight Rest 3");
        assert_eq!(p.stops[1].location.name, "Fuel Stop 2");

        let events = p.events();
        assert_eq!(
            kinds(&events),
            vec![
                StopKind::Pickup,
                StopKind::MandatoryBreak,
                StopKind::FuelStop,
                StopKind::Dropoff,
                StopKind::OvernightReset,
            ]
        );
        let seqs: Vec<u32> = events.iter().map(|e| e.sequence).collect();
        assert_eq!(seqs, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn restart_only_schedules_long_restart_for_cycle() {
        let rules = HosRules {
            cycle_reset: CycleReset::RestartOnly { restart_hours: 34.0 },
            ..HosRules::default()
        };
        // Cycle 60 + pickup 1 + 8 h driving leaves only the dropoff hour.
        let p = Planner::new(rules)
            .unwrap()
            .plan_trip(RouteId(1), &route(&[(600.0, 10.0)]), 60.0, at(6))
            .unwrap();
        assert_eq!(kinds(&p.stops), vec![StopKind::OvernightReset]);
        assert_eq!(p.stops[0].timestamp, at(15));
        assert_eq!(p.stops[0].duration_hours, 34.0);
        assert_eq!(p.final_counters.cycle_used, 3.0);
    }

    #[test]
    fn planning_is_deterministic() {
        let a = plan(&[(900.0, 15.0), (700.0, 12.0)], 20.0, at(6));
        let b = plan(&[(900.0, 15.0), (700.0, 12.0)], 20.0, at(6));
        assert_eq!(a, b);
    }
}

// ── Batch ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod batch {
    use super::*;
    use crate::{PlanRequest, plan_batch};

    #[test]
    fn results_follow_request_order() {
        let planner = Planner::default();
        let requests = vec![
            PlanRequest { route_id: RouteId(1), route: route(&[(600.0, 9.0)]), cycle_hours_used: 0.0, trip_start: at(6) },
            PlanRequest { route_id: RouteId(2), route: route(&[(100.0, 2.0)]), cycle_hours_used: 75.0, trip_start: at(6) },
            PlanRequest { route_id: RouteId(3), route: route(&[(100.0, 2.0)]), cycle_hours_used: 0.0, trip_start: at(8) },
        ];
        let out = plan_batch(&planner, &requests);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].as_ref().unwrap().stops.len(), 1);
        assert!(out[1].is_err());
        let third = out[2].as_ref().unwrap();
        assert_eq!(third.pickup.route, RouteId(3));
        assert_eq!(third.pickup.timestamp, at(8));
    }
}

// ── Randomized invariants ─────────────────────────────────────────────────────

#[cfg(test)]
mod invariants {
    use super::*;

    /// Ms rounding of event timestamps accumulates across a trip.
    const TOL_H: f64 = 1e-3;

    /// Replay a plan and check every regulatory limit between stops.
    /// Time between the end of one event and the start of the next is
    /// driving at `speed` mph.  `cycle` is the on-duty time already used.
    fn check(plan: &TripPlan, rules: &HosRules, speed: f64, route_hours: f64, cycle: f64) {
        let events = plan.events();
        let mut since_break = 0.0;
        let mut since_reset = 0.0;
        let mut miles = 0.0;
        let mut period_start = events[0].timestamp;
        let mut cycle_used = cycle + events[0].duration_hours;
        let mut driven = 0.0;
        assert!(cycle_used <= rules.max_cycle_hours + TOL_H);

        for (i, pair) in events.windows(2).enumerate() {
            let (prev, next) = (&pair[0], &pair[1]);
            assert_eq!(next.sequence as usize, i + 1);

            let gap = time::as_hours(next.timestamp - prev.end());
            assert!(gap >= -TOL_H, "overlap before {} at {}", next.kind, next.timestamp);
            since_break += gap;
            since_reset += gap;
            miles += gap * speed;
            cycle_used += gap;
            driven += gap;

            assert!(since_break <= rules.max_driving_before_break_hours + TOL_H);
            assert!(since_reset <= rules.max_driving_hours + TOL_H);
            assert!(miles <= rules.fuel_interval_miles + 0.1);
            assert!(
                cycle_used <= rules.max_cycle_hours + TOL_H,
                "cycle at {} h when {} starts",
                cycle_used,
                next.kind
            );
            // Off-duty stops may run past the window; driving may not.
            if gap > TOL_H {
                let window = time::as_hours(next.timestamp - period_start);
                assert!(
                    window <= rules.max_on_duty_hours + TOL_H,
                    "drove to {} at {} h into the window",
                    next.kind,
                    window
                );
            }

            match next.kind {
                StopKind::OvernightReset => {
                    since_break = 0.0;
                    since_reset = 0.0;
                    period_start = next.end();
                    if rules.restores_cycle(next.duration_hours) {
                        cycle_used = 0.0;
                    }
                }
                StopKind::MandatoryBreak => since_break = 0.0,
                StopKind::FuelStop => miles = 0.0,
                _ => {
                    cycle_used += next.duration_hours;
                    assert!(cycle_used <= rules.max_cycle_hours + TOL_H);
                    let window = time::as_hours(next.end() - period_start);
                    assert!(window <= rules.max_on_duty_hours + TOL_H);
                }
            }
        }
        assert!((driven - route_hours).abs() < TOL_H);
    }

    #[test]
    fn random_routes_respect_every_limit() {
        let mut rng = SmallRng::seed_from_u64(0x5EED);
        let rules = HosRules::default();
        let planner = Planner::default();

        for _ in 0..200 {
            let speed: f64 = rng.gen_range(40.0..75.0);
            let n = rng.gen_range(1..=4);
            let shape: Vec<(f64, f64)> = (0..n)
                .map(|_| {
                    let miles = rng.gen_range(20.0..1500.0);
                    (miles, miles / speed)
                })
                .collect();
            let cycle = rng.gen_range(0.0..69.0);
            let r = route(&shape);

            let p = planner.plan_trip(RouteId(7), &r, cycle, at(5)).unwrap();
            check(&p, &rules, speed, r.total_duration_hours(), cycle);
        }
    }
}
