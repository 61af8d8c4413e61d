//! Route representation and validation.
//!
//! # Shape
//!
//! A route is an ordered list of [`RouteSegment`]s.  Each segment carries its
//! own distance and duration, so speed may differ per segment; inside a
//! segment the vehicle is assumed to move at constant speed along a straight
//! line between `start` and `end`.  Positions inside a segment are therefore
//! a linear blend of the endpoints by distance fraction.
//!
//! # Validation
//!
//! [`Route::from_segments`] and [`Route::new`] are the only constructors.
//! They reject:
//!
//! - an empty segment list;
//! - non-finite or negative distances and durations, or a route longer
//!   than [`MAX_SPAN_HOURS`];
//! - a segment (or the whole route) with distance but no duration, or the
//!   reverse;
//! - out-of-range coordinates (`CoreError::InvalidCoordinate`);
//! - duplicate segment indices, or consecutive segments whose endpoints are
//!   more than [`CONTIGUITY_TOLERANCE_MI`] apart;
//! - supplied totals that disagree with the segment sums by more than
//!   [`TOTAL_TOLERANCE`].

use hos_core::GeoPoint;
use hos_core::time::MAX_SPAN_HOURS;

use crate::{RouteError, RouteResult};

/// Maximum gap between `segments[i].end` and `segments[i + 1].start`.
pub const CONTIGUITY_TOLERANCE_MI: f64 = 1.0;

/// Relative tolerance between supplied totals and segment sums.
pub const TOTAL_TOLERANCE: f64 = 0.01;

// ── RouteSegment ──────────────────────────────────────────────────────────────

/// One leg of a route.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteSegment {
    /// Position of this segment in the route (ascending, unique).
    pub index:          u32,
    pub distance_miles: f64,
    pub duration_hours: f64,
    pub start:          GeoPoint,
    pub end:            GeoPoint,
}

impl RouteSegment {
    /// `true` if the segment covers neither distance nor time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.distance_miles == 0.0 && self.duration_hours == 0.0
    }

    /// Average speed over the segment, `None` for an empty segment.
    pub fn speed_mph(&self) -> Option<f64> {
        (self.duration_hours > 0.0).then(|| self.distance_miles / self.duration_hours)
    }

    /// Position after covering `fraction` of the segment's distance.
    #[inline]
    pub fn point_at(&self, fraction: f64) -> GeoPoint {
        self.start.lerp(self.end, fraction)
    }

    fn validate(&self) -> RouteResult<()> {
        let finite = self.distance_miles.is_finite() && self.duration_hours.is_finite();
        if !finite || self.distance_miles < 0.0 || self.duration_hours < 0.0 {
            return Err(RouteError::InvalidRoute(format!(
                "segment {} has distance {} mi and duration {} h",
                self.index, self.distance_miles, self.duration_hours
            )));
        }
        if (self.distance_miles > 0.0) != (self.duration_hours > 0.0) {
            return Err(RouteError::InvalidRoute(format!(
                "segment {} covers {} mi in {} h",
                self.index, self.distance_miles, self.duration_hours
            )));
        }
        self.start.validate()?;
        self.end.validate()?;
        Ok(())
    }
}

// ── Route ─────────────────────────────────────────────────────────────────────

/// A validated, immutable route.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Route {
    total_distance_miles: f64,
    total_duration_hours: f64,
    segments:             Vec<RouteSegment>,
}

impl Route {
    /// Build a route from segments, deriving the totals.
    ///
    /// Segments are sorted by `index` first, so callers may pass them in any
    /// order.
    pub fn from_segments(mut segments: Vec<RouteSegment>) -> RouteResult<Self> {
        if segments.is_empty() {
            return Err(RouteError::InvalidRoute("route has no segments".into()));
        }
        segments.sort_by_key(|s| s.index);

        for s in &segments {
            s.validate()?;
        }
        for pair in segments.windows(2) {
            if pair[0].index == pair[1].index {
                return Err(RouteError::InvalidRoute(format!(
                    "duplicate segment index {}",
                    pair[0].index
                )));
            }
            let gap = pair[0].end.distance_mi(pair[1].start);
            if gap > CONTIGUITY_TOLERANCE_MI {
                return Err(RouteError::InvalidRoute(format!(
                    "segments {} and {} are {gap:.2} mi apart",
                    pair[0].index, pair[1].index
                )));
            }
        }

        let total_distance_miles: f64 = segments.iter().map(|s| s.distance_miles).sum();
        let total_duration_hours: f64 = segments.iter().map(|s| s.duration_hours).sum();
        let hours_ok = total_duration_hours > 0.0 && total_duration_hours <= MAX_SPAN_HOURS;
        if total_distance_miles <= 0.0 || !hours_ok {
            return Err(RouteError::InvalidRoute(format!(
                "route covers {total_distance_miles} mi in {total_duration_hours} h"
            )));
        }

        Ok(Self { total_distance_miles, total_duration_hours, segments })
    }

    /// Build a route from provider-supplied totals plus segments, checking
    /// that the totals agree with the segment sums.
    pub fn new(
        total_distance_miles: f64,
        total_duration_hours: f64,
        segments: Vec<RouteSegment>,
    ) -> RouteResult<Self> {
        let route = Self::from_segments(segments)?;
        check_total("distance", total_distance_miles, route.total_distance_miles)?;
        check_total("duration", total_duration_hours, route.total_duration_hours)?;
        Ok(route)
    }

    pub fn segments(&self) -> &[RouteSegment] {
        &self.segments
    }

    pub fn total_distance_miles(&self) -> f64 {
        self.total_distance_miles
    }

    pub fn total_duration_hours(&self) -> f64 {
        self.total_duration_hours
    }

    /// Where the route begins.
    pub fn start(&self) -> GeoPoint {
        self.segments[0].start
    }

    /// Where the route ends.
    pub fn end(&self) -> GeoPoint {
        self.segments[self.segments.len() - 1].end
    }
}

fn check_total(what: &str, supplied: f64, summed: f64) -> RouteResult<()> {
    let ok = supplied.is_finite()
        && (supplied - summed).abs() <= summed.abs() * TOTAL_TOLERANCE + 1e-9;
    if ok {
        Ok(())
    } else {
        Err(RouteError::InvalidRoute(format!(
            "total {what} {supplied} does not match segment sum {summed}"
        )))
    }
}
