//! The rest-stop planner.
//!
//! # Algorithm
//!
//! The planner walks the route segment by segment with a simulated clock
//! (hours since trip start) and a [`RegulatoryCounters`] value.  Inside a
//! segment it repeatedly either
//!
//! - finds a limit already reached ([`RegulatoryCounters::binding_limit`])
//!   and emits the stop that relieves it at the current position, or
//! - drives the largest step no limit forbids: the minimum of time left in
//!   the segment, time until the break is due, time until the fuel
//!   threshold (at the segment's own speed), and the remaining 11 h, 14 h and
//!   70 h budgets.
//!
//! Checking for a reached limit *before* computing a step means a zero-length
//! step never happens and the position fraction never divides by zero.
//!
//! The pickup's on-duty hour is charged before any driving.  The dropoff's
//! hour is held back from the 14 h and 70 h budgets throughout, then charged
//! at the end; if that leaves either budget exhausted a trailing reset
//! follows the dropoff.

use tracing::{debug, info};

use hos_core::rules::HOURS_EPSILON;
use hos_core::time::{self, Timestamp};
use hos_core::{GeoPoint, HosRules, RouteId, StopKind};
use hos_route::{Route, RouteSegment};

use crate::{DutyEvent, Limit, PlanError, PlanResult, RegulatoryCounters, StopLocation};

/// Upper bound on stops per trip.  Only a pathological rule set gets near it.
const MAX_STOPS: usize = 10_000;

// ── TripPlan ──────────────────────────────────────────────────────────────────

/// Everything the planner decided for one trip.
#[derive(Clone, Debug, PartialEq)]
pub struct TripPlan {
    /// Loading at trip start.
    pub pickup:         DutyEvent,
    /// Breaks, fuel stops and resets in time order.  A reset after the
    /// dropoff, if any, is last.
    pub stops:          Vec<DutyEvent>,
    /// Unloading once all segments are driven.
    pub dropoff:        DutyEvent,
    /// End of the dropoff activity.
    pub estimated_end:  Timestamp,
    pub driving_hours:  f64,
    pub driving_miles:  f64,
    /// Counter state after the dropoff (and trailing reset, if any).
    pub final_counters: RegulatoryCounters,
}

impl TripPlan {
    /// Pickup, stops and dropoff in chronological order.
    pub fn events(&self) -> Vec<DutyEvent> {
        let split = self.stops.partition_point(|s| s.timestamp < self.dropoff.timestamp);
        let mut out = Vec::with_capacity(self.stops.len() + 2);
        out.push(self.pickup.clone());
        out.extend_from_slice(&self.stops[..split]);
        out.push(self.dropoff.clone());
        out.extend_from_slice(&self.stops[split..]);
        out
    }

    /// Number of stops of `kind`.
    pub fn count(&self, kind: StopKind) -> usize {
        self.stops.iter().filter(|s| s.kind == kind).count()
    }

    /// Give every event its position in [`events`][Self::events].
    fn numbered(mut self) -> Self {
        let split = self.stops.partition_point(|s| s.timestamp < self.dropoff.timestamp);
        self.pickup.sequence = 0;
        let mut seq = 1;
        for stop in &mut self.stops[..split] {
            stop.sequence = seq;
            seq += 1;
        }
        self.dropoff.sequence = seq;
        for stop in &mut self.stops[split..] {
            seq += 1;
            stop.sequence = seq;
        }
        self
    }
}

// ── Planner ───────────────────────────────────────────────────────────────────

/// Decides where mandatory stops go.  Stateless apart from its rule set.
#[derive(Clone, Debug, Default)]
pub struct Planner {
    rules: HosRules,
}

impl Planner {
    /// Planner for a validated rule set.
    pub fn new(rules: HosRules) -> PlanResult<Self> {
        rules.validate()?;
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &HosRules {
        &self.rules
    }

    /// Mandatory stops for a raw segment list.
    ///
    /// Fails with `RouteError::InvalidRoute` for empty or malformed segments.
    pub fn plan(
        &self,
        route_id:         RouteId,
        segments:         &[RouteSegment],
        cycle_hours_used: f64,
        trip_start:       Timestamp,
    ) -> PlanResult<Vec<DutyEvent>> {
        let route = Route::from_segments(segments.to_vec())?;
        Ok(self.plan_trip(route_id, &route, cycle_hours_used, trip_start)?.stops)
    }

    /// Full plan for a validated route.
    pub fn plan_trip(
        &self,
        route_id:         RouteId,
        route:            &Route,
        cycle_hours_used: f64,
        trip_start:       Timestamp,
    ) -> PlanResult<TripPlan> {
        self.rules.check_cycle_hours(cycle_hours_used)?;

        let mut run = PlanRun {
            rules:         &self.rules,
            route:         route_id,
            start:         trip_start,
            clock_hours:   0.0,
            position:      route.start(),
            counters:      RegulatoryCounters::new(cycle_hours_used),
            stops:         Vec::new(),
            driving_hours: 0.0,
            driving_miles: 0.0,
        };

        let pickup = run.pickup();
        for segment in route.segments() {
            run.drive_segment(segment)?;
        }
        let plan = run.finish(pickup, route.end())?.numbered();

        info!(
            route = %route_id,
            stops = plan.stops.len(),
            driving_hours = plan.driving_hours,
            miles = plan.driving_miles,
            end = %plan.estimated_end,
            "trip planned"
        );
        Ok(plan)
    }
}

// ── PlanRun ───────────────────────────────────────────────────────────────────

/// Mutable state of one planning call.  Never outlives `plan_trip`.
struct PlanRun<'a> {
    rules:         &'a HosRules,
    route:         RouteId,
    start:         Timestamp,
    /// Hours since `start`.
    clock_hours:   f64,
    position:      GeoPoint,
    counters:      RegulatoryCounters,
    stops:         Vec<DutyEvent>,
    driving_hours: f64,
    driving_miles: f64,
}

impl PlanRun<'_> {
    fn now(&self) -> Timestamp {
        self.start + time::hours(self.clock_hours)
    }

    fn event(&self, kind: StopKind, hours: f64, name: String) -> DutyEvent {
        DutyEvent::new(self.route, kind, self.now(), hours, StopLocation::new(self.position, name))
    }

    fn pickup(&mut self) -> DutyEvent {
        let hours = self.rules.pickup_hours;
        let event = self.event(StopKind::Pickup, hours, StopKind::Pickup.label().to_owned());
        self.counters = self.counters.work(hours);
        self.clock_hours += hours;
        event
    }

    fn drive_segment(&mut self, segment: &RouteSegment) -> PlanResult<()> {
        let Some(speed) = segment.speed_mph() else {
            // Empty leg (driver already at the next point).
            self.position = segment.end;
            return Ok(());
        };
        let reserve = self.rules.dropoff_hours;
        let mut covered = 0.0;
        self.position = segment.start;

        loop {
            let left = segment.duration_hours - covered;
            if left <= HOURS_EPSILON {
                break;
            }
            if let Some(limit) = self.counters.binding_limit(self.rules, reserve) {
                self.stop(limit)?;
                continue;
            }

            let fuel_due = self.counters.fuel_remaining_miles(self.rules) / speed;
            let step = left
                .min(self.counters.drivable_hours(self.rules, reserve))
                .min(fuel_due);

            covered += step;
            self.clock_hours += step;
            self.driving_hours += step;
            self.driving_miles += step * speed;
            self.counters = self.counters.drive(step, step * speed);
            self.position = segment.point_at(covered / segment.duration_hours);
        }

        self.position = segment.end;
        Ok(())
    }

    fn stop(&mut self, limit: Limit) -> PlanResult<()> {
        if self.stops.len() >= MAX_STOPS {
            return Err(PlanError::StopLimit(MAX_STOPS));
        }
        let kind = limit.stop_kind();
        let hours = limit.stop_hours(self.rules);
        let event = self.event(kind, hours, format!("{} {}", kind.label(), self.stops.len() + 1));
        debug!(%limit, %kind, at = %event.timestamp, position = %self.position, hours, "stop inserted");

        self.counters = match limit {
            Limit::Cycle | Limit::DutyWindow | Limit::DailyDriving => {
                self.counters.rest(self.rules, hours)
            }
            Limit::ShortBreak => self.counters.idle(hours).after_break(),
            Limit::Fuel => self.counters.idle(hours).after_fuel(),
        };
        self.clock_hours += hours;
        self.stops.push(event);
        Ok(())
    }

    fn finish(mut self, pickup: DutyEvent, end: GeoPoint) -> PlanResult<TripPlan> {
        let hours = self.rules.dropoff_hours;
        self.position = end;
        let dropoff = self.event(StopKind::Dropoff, hours, StopKind::Dropoff.label().to_owned());
        self.counters = self.counters.work(hours);
        self.clock_hours += hours;
        let estimated_end = self.now();

        let cycle_out = self.counters.cycle_remaining(self.rules) <= HOURS_EPSILON;
        let window_out = self.counters.window_remaining(self.rules) <= HOURS_EPSILON;
        if cycle_out || window_out {
            self.stop(if cycle_out { Limit::Cycle } else { Limit::DutyWindow })?;
        }

        Ok(TripPlan {
            pickup,
            stops: self.stops,
            dropoff,
            estimated_end,
            driving_hours: self.driving_hours,
            driving_miles: self.driving_miles,
            final_counters: self.counters,
        })
    }
}
