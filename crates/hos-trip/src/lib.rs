//! `hos-trip`: the trip service.
//!
//! Ties the other crates together for one trip:
//!
//! | Step              | Crate        |
//! |-------------------|--------------|
//! | fetch route       | `hos-route` (`RouteProvider`) |
//! | plan stops        | `hos-plan`   |
//! | build duty logs   | `hos-log`    |
//! | persist           | `hos-output` (`TripStore`) |
//!
//! Errors from every layer surface as [`TripError`]; match on
//! [`TripError::kind`] for the caller-facing category.

pub mod error;
pub mod service;
pub mod trip;


pub use error::{ErrorKind, TripError, TripResult};
pub use service::{PlannedTrip, TripService};
pub use trip::Trip;
