//! `TripService`: the two trip flows.
//!
//! ```text
//! calculate_route:  provider.route ─▶ Planner::plan_trip ─▶ waypoints ─▶ store
//! generate_logs:    store waypoints ─▶ TimelineBuilder::build ─▶ entries + daily logs ─▶ store
//! ```
//!
//! Each flow checks ownership first and writes nothing unless every step
//! before the save succeeded.

use tracing::info;

use hos_core::time::Timestamp;
use hos_core::{HosRules, UserId};
use hos_log::{BuilderConfig, TimelineBuilder, TripTimeline};
use hos_output::TripStore;
use hos_plan::{DutyEvent, Planner, TripPlan};
use hos_route::{Route, RouteProvider};

use crate::{Trip, TripError, TripResult};

/// Result of [`TripService::calculate_route`].
#[derive(Clone, Debug)]
pub struct PlannedTrip {
    pub route:         Route,
    pub plan:          TripPlan,
    /// End of the dropoff.
    pub estimated_end: Timestamp,
}

impl PlannedTrip {
    /// Waypoints as stored: pickup, stops and dropoff, numbered from 0.
    pub fn waypoints(&self) -> Vec<DutyEvent> {
        self.plan.events()
    }
}

/// Plans trips and generates their logs against a route provider and a
/// store.
pub struct TripService<P, S> {
    provider: P,
    store:    S,
    planner:  Planner,
    builder:  TimelineBuilder,
}

impl<P: RouteProvider, S: TripStore> TripService<P, S> {
    /// Service with the default rule set and builder options.
    pub fn new(provider: P, store: S) -> Self {
        Self {
            provider,
            store,
            planner: Planner::default(),
            builder: TimelineBuilder::default(),
        }
    }

    /// Service with a custom rule set, shared by the planner and the builder.
    pub fn with_rules(
        provider: P,
        store:    S,
        rules:    HosRules,
        config:   BuilderConfig,
    ) -> TripResult<Self> {
        Ok(Self {
            provider,
            store,
            planner: Planner::new(rules.clone())?,
            builder: TimelineBuilder::new(rules, config)?,
        })
    }

    pub fn rules(&self) -> &HosRules {
        self.planner.rules()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Fetch the route, plan the stops and replace the trip's stored
    /// waypoints.
    pub fn calculate_route(&mut self, trip: &Trip, user: UserId) -> TripResult<PlannedTrip> {
        check_owner(trip, user)?;
        trip.validate(self.planner.rules())?;

        let route = self
            .provider
            .route(trip.current.point, trip.pickup.point, trip.dropoff.point)?;
        let mut plan = self
            .planner
            .plan_trip(trip.route_id, &route, trip.cycle_hours_used, trip.start)?;
        plan.pickup.location = trip.pickup.clone();
        plan.dropoff.location = trip.dropoff.clone();

        let planned = PlannedTrip { estimated_end: plan.estimated_end, route, plan };
        let waypoints = planned.waypoints();
        self.store.save_waypoints(trip.route_id, &waypoints)?;

        info!(
            trip = %trip.id,
            route = %trip.route_id,
            miles = planned.route.total_distance_miles(),
            waypoints = waypoints.len(),
            estimated_end = %planned.estimated_end,
            "route calculated"
        );
        Ok(planned)
    }

    /// Build the duty timeline from the stored waypoints and replace the
    /// trip's log entries and daily logs.
    pub fn generate_logs(&mut self, trip: &Trip, user: UserId) -> TripResult<TripTimeline> {
        check_owner(trip, user)?;

        let waypoints = self.store.load_waypoints(trip.route_id)?;
        if waypoints.is_empty() {
            return Err(TripError::NoRouteCalculated(trip.id));
        }
        let timeline = self.builder.build(&trip.log(), &waypoints)?;

        self.store.save_log_entries(trip.id, &timeline.entries)?;
        self.store.save_daily_logs(trip.id, &timeline.daily_logs)?;

        info!(
            trip = %trip.id,
            entries = timeline.entries.len(),
            days = timeline.daily_logs.len(),
            "logs generated"
        );
        Ok(timeline)
    }
}

fn check_owner(trip: &Trip, user: UserId) -> TripResult<()> {
    if trip.owner == user {
        Ok(())
    } else {
        Err(TripError::NotOwner { trip: trip.id, user })
    }
}
