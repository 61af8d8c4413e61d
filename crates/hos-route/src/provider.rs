//! Route-provider trait and the built-in providers.
//!
//! # Pluggability
//!
//! The trip service fetches routes through the [`RouteProvider`] trait, so an
//! application can plug in a mapping API client without touching the
//! planner.  Two providers ship with the crate:
//!
//! - [`StaticRouteProvider`] always returns the same route (tests, replay of
//!   a stored route).
//! - [`StraightLineProvider`] builds a two-leg route from great-circle
//!   distances.  Good enough for demos and for planning when the mapping
//!   service is down; never a substitute for road geometry.
//!
//! Any `Fn(GeoPoint, GeoPoint, GeoPoint) -> RouteResult<Route>` is also a
//! provider.

use hos_core::GeoPoint;

use crate::{Route, RouteError, RouteResult, RouteSegment};

// ── RouteProvider trait ───────────────────────────────────────────────────────

/// Source of routes for a trip's three ordered points.
///
/// Implementations must be `Send + Sync` so one provider can serve trips
/// planned on several threads.
pub trait RouteProvider: Send + Sync {
    /// Route from `origin` through `pickup` to `dropoff`.
    ///
    /// Fails with [`RouteError::RouteUnavailable`] when upstream data cannot
    /// be obtained.  The planner never retries.
    fn route(&self, origin: GeoPoint, pickup: GeoPoint, dropoff: GeoPoint) -> RouteResult<Route>;
}

impl<F> RouteProvider for F
where
    F: Fn(GeoPoint, GeoPoint, GeoPoint) -> RouteResult<Route> + Send + Sync,
{
    fn route(&self, origin: GeoPoint, pickup: GeoPoint, dropoff: GeoPoint) -> RouteResult<Route> {
        self(origin, pickup, dropoff)
    }
}

// ── StaticRouteProvider ───────────────────────────────────────────────────────

/// Returns a clone of one pre-built route regardless of the points asked for.
#[derive(Clone, Debug)]
pub struct StaticRouteProvider {
    route: Route,
}

impl StaticRouteProvider {
    pub fn new(route: Route) -> Self {
        Self { route }
    }
}

impl RouteProvider for StaticRouteProvider {
    fn route(&self, _origin: GeoPoint, _pickup: GeoPoint, _dropoff: GeoPoint) -> RouteResult<Route> {
        Ok(self.route.clone())
    }
}

// ── StraightLineProvider ──────────────────────────────────────────────────────

/// Two-leg route along great circles, stretched by `detour_factor` to
/// approximate road distance and timed at `speed_mph`.
#[derive(Copy, Clone, Debug)]
pub struct StraightLineProvider {
    pub speed_mph:     f64,
    /// Road distance / great-circle distance.  1.2 is a common rule of thumb
    /// for interstate freight.
    pub detour_factor: f64,
}

impl Default for StraightLineProvider {
    fn default() -> Self {
        Self { speed_mph: 55.0, detour_factor: 1.2 }
    }
}

impl RouteProvider for StraightLineProvider {
    fn route(&self, origin: GeoPoint, pickup: GeoPoint, dropoff: GeoPoint) -> RouteResult<Route> {
        if !(self.speed_mph > 0.0 && self.detour_factor >= 1.0) {
            return Err(RouteError::RouteUnavailable(format!(
                "straight-line provider misconfigured: {} mph, detour {}",
                self.speed_mph, self.detour_factor
            )));
        }
        origin.validate()?;
        pickup.validate()?;
        dropoff.validate()?;

        let leg = |index: u32, start: GeoPoint, end: GeoPoint| {
            let distance_miles = start.distance_mi(end) * self.detour_factor;
            RouteSegment {
                index,
                distance_miles,
                duration_hours: distance_miles / self.speed_mph,
                start,
                end,
            }
        };
        Route::from_segments(vec![leg(0, origin, pickup), leg(1, pickup, dropoff)])
    }
}
