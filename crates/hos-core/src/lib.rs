//! `hos-core`: foundational types for the HOS trip planner.
//!
//! This crate is a dependency of every other `hos-*` crate.  It has no
//! `hos-*` dependencies and minimal external ones (`chrono` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                |
//! |-----------------|---------------------------------------------------------|
//! | [`ids`]         | `TripId`, `RouteId`, `LocationId`, `UserId`             |
//! | [`geo`]         | `GeoPoint`, interpolation, haversine distance           |
//! | [`time`]        | `Timestamp`, hour ↔ duration conversion, day helpers    |
//! | [`duty`]        | `DutyStatus`, `StopKind`                                |
//! | [`rules`]       | `HosRules`, `CycleReset`                                |
//! | [`error`]       | `CoreError`, `CoreResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod duty;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rules;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use duty::{DutyStatus, StopKind};
pub use error::{CoreError, CoreResult};
pub use geo::GeoPoint;
pub use ids::{LocationId, RouteId, TripId, UserId};
pub use rules::{CycleReset, HosRules};
pub use time::Timestamp;
