//! Planning many independent trips in one call.
//!
//! Each request is planned with its own counters; nothing is shared but the
//! rule set.  With the `parallel` feature the requests are spread over
//! Rayon's thread pool, otherwise they run in order.  Results come back in
//! request order either way.

use hos_core::{RouteId, Timestamp};
use hos_route::Route;

use crate::{PlanResult, Planner, TripPlan};

/// One trip to plan.
#[derive(Clone, Debug)]
pub struct PlanRequest {
    pub route_id:         RouteId,
    pub route:            Route,
    pub cycle_hours_used: f64,
    pub trip_start:       Timestamp,
}

/// Plan every request.  A failing request does not stop the others.
pub fn plan_batch(planner: &Planner, requests: &[PlanRequest]) -> Vec<PlanResult<TripPlan>> {
    let plan_one = |req: &PlanRequest| {
        planner.plan_trip(req.route_id, &req.route, req.cycle_hours_used, req.trip_start)
    };

    #[cfg(not(feature = "parallel"))]
    {
        requests.iter().map(plan_one).collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        requests.par_iter().map(plan_one).collect()
    }
}
