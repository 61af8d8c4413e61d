//! `Trip`: the request the service plans and logs.

use hos_core::time::Timestamp;
use hos_core::{CoreResult, HosRules, RouteId, TripId, UserId};
use hos_log::TripLog;
use hos_plan::StopLocation;

/// One trip: drive from `current` to `pickup`, load, drive to `dropoff`,
/// unload.
#[derive(Clone, Debug, PartialEq)]
pub struct Trip {
    pub id:               TripId,
    /// Route the trip's waypoints are stored under.
    pub route_id:         RouteId,
    pub owner:            UserId,
    pub start:            Timestamp,
    /// On-duty hours already used in the rolling cycle.
    pub cycle_hours_used: f64,
    pub current:          StopLocation,
    pub pickup:           StopLocation,
    pub dropoff:          StopLocation,
}

impl Trip {
    /// Check coordinates and the cycle budget before anything is fetched.
    pub fn validate(&self, rules: &HosRules) -> CoreResult<()> {
        rules.check_cycle_hours(self.cycle_hours_used)?;
        self.current.point.validate()?;
        self.pickup.point.validate()?;
        self.dropoff.point.validate()
    }

    pub(crate) fn log(&self) -> TripLog {
        TripLog {
            trip_id:          self.id,
            route_id:         self.route_id,
            start:            self.start,
            cycle_hours_used: self.cycle_hours_used,
            origin:           Some(self.current.clone()),
        }
    }
}
