//! `hos-plan`: regulatory counters, duty events, and the rest-stop planner.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`counters`] | `RegulatoryCounters`, `Limit`                              |
//! | [`event`]    | `DutyEvent`, `StopLocation`                                |
//! | [`queue`]    | `EventQueue` (`BTreeMap<(Timestamp, seq), DutyEvent>`)     |
//! | [`planner`]  | `Planner`, `TripPlan`                                      |
//! | [`batch`]    | `PlanRequest`, `plan_batch` (Rayon with `parallel`)        |
//! | [`error`]    | `PlanError`, `PlanResult<T>`                               |
//!
//! # Planning model (summary)
//!
//! ```text
//! clock = trip_start; charge pickup (on duty)
//! for segment in route:
//!   while segment not finished:
//!     limit hit?      → emit stop (reset / break / fuel), relieve counters
//!     otherwise       → drive min(segment left, break due, fuel due,
//!                                 11 h left, 14 h left − dropoff, 70 h left − dropoff)
//! charge dropoff; budget exhausted → trailing reset
//! ```
//!
//! The planner is a pure function of its inputs: no I/O, no shared state.
//! Each call owns its counters, so independent trips may be planned
//! concurrently.

pub mod batch;
pub mod counters;
pub mod error;
pub mod event;
pub mod planner;
pub mod queue;

#[cfg(test)]
mod tests;

pub use batch::{PlanRequest, plan_batch};
pub use counters::{Limit, RegulatoryCounters};
pub use error::{PlanError, PlanResult};
pub use event::{DutyEvent, StopLocation};
pub use planner::{Planner, TripPlan};
pub use queue::EventQueue;
