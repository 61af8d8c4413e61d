//! `DutyEvent`: one planned stop or activity.
//!
//! Events are produced by the planner (or read back from storage, possibly
//! hand-edited) and consumed once by the log builder.  They are never
//! mutated after creation; the builder re-times overlapping events on its
//! own copy.

use chrono::TimeDelta;

use hos_core::time::{self, MAX_SPAN_HOURS, Timestamp};
use hos_core::{CoreError, CoreResult, DutyStatus, GeoPoint, LocationId, RouteId, StopKind};

// ── StopLocation ──────────────────────────────────────────────────────────────

/// Where an event happens.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StopLocation {
    pub point: GeoPoint,
    /// Identity in the persistence layer, if the place is a stored location.
    pub id:    Option<LocationId>,
    pub name:  String,
}

impl StopLocation {
    pub fn new(point: GeoPoint, name: impl Into<String>) -> Self {
        Self { point, id: None, name: name.into() }
    }

    #[must_use]
    pub fn with_id(mut self, id: LocationId) -> Self {
        self.id = Some(id);
        self
    }
}

// ── DutyEvent ─────────────────────────────────────────────────────────────────

/// A stop on a route: pickup, dropoff, break, fuel, or reset.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DutyEvent {
    /// The route that owns this event.
    pub route:          RouteId,
    /// Position in the route's waypoint list.
    pub sequence:       u32,
    pub kind:           StopKind,
    /// When the stop begins.
    pub timestamp:      Timestamp,
    pub duration_hours: f64,
    pub location:       StopLocation,
}

impl DutyEvent {
    pub fn new(
        route:          RouteId,
        kind:           StopKind,
        timestamp:      Timestamp,
        duration_hours: f64,
        location:       StopLocation,
    ) -> Self {
        Self { route, sequence: 0, kind, timestamp, duration_hours, location }
    }

    #[inline]
    pub fn status(&self) -> DutyStatus {
        self.kind.status()
    }

    /// Duration at millisecond resolution.
    #[inline]
    pub fn duration(&self) -> TimeDelta {
        time::hours(self.duration_hours)
    }

    /// When the stop ends.
    #[inline]
    pub fn end(&self) -> Timestamp {
        self.timestamp + self.duration()
    }

    /// Reject events the builder cannot replay: a duration that is negative,
    /// non-finite, longer than [`MAX_SPAN_HOURS`], or that ends past the
    /// last representable instant.
    pub fn validate(&self) -> CoreResult<()> {
        let h = self.duration_hours;
        let ends = h.is_finite()
            && (0.0..=MAX_SPAN_HOURS).contains(&h)
            && self.timestamp.checked_add_signed(self.duration()).is_some();
        if !ends {
            return Err(CoreError::Parse(format!(
                "{} at {} has duration {h} h",
                self.kind, self.timestamp
            )));
        }
        self.location.point.validate()
    }
}
