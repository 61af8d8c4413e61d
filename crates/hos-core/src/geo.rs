//! Geographic coordinate type and interpolation.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  Route providers hand out
//! coordinates as `[lon, lat]` pairs (GeoJSON order); use
//! [`GeoPoint::from_lon_lat`] at that boundary so the field order inside the
//! planner is never ambiguous.

use crate::{CoreError, CoreResult};

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    /// Build a point without range checks.  Prefer [`GeoPoint::try_new`] for
    /// data that crosses a trust boundary.
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Build a point, rejecting latitude outside ±90 or longitude outside ±180.
    pub fn try_new(lat: f64, lon: f64) -> CoreResult<Self> {
        let p = Self { lat, lon };
        p.validate()?;
        Ok(p)
    }

    /// Build from a GeoJSON-ordered `[lon, lat]` pair.
    pub fn from_lon_lat(pair: [f64; 2]) -> CoreResult<Self> {
        Self::try_new(pair[1], pair[0])
    }

    /// `[lon, lat]` in GeoJSON order.
    #[inline]
    pub fn lon_lat(self) -> [f64; 2] {
        [self.lon, self.lat]
    }

    pub fn validate(self) -> CoreResult<()> {
        let ok = self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon);
        if ok {
            Ok(())
        } else {
            Err(CoreError::InvalidCoordinate { lat: self.lat, lon: self.lon })
        }
    }

    /// Linear interpolation towards `other`; `t` is clamped to `[0, 1]`.
    ///
    /// Plain lat/lon blending, not a great-circle path.  Segments handed out
    /// by route providers are short enough that the difference is far below
    /// the precision of a stop location.
    pub fn lerp(self, other: GeoPoint, t: f64) -> GeoPoint {
        let t = t.clamp(0.0, 1.0);
        GeoPoint {
            lat: self.lat + (other.lat - self.lat) * t,
            lon: self.lon + (other.lon - self.lon) * t,
        }
    }

    /// Haversine great-circle distance in statute miles.
    pub fn distance_mi(self, other: GeoPoint) -> f64 {
        const R: f64 = 3_958.8; // mean Earth radius, miles

        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        R * c
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}
