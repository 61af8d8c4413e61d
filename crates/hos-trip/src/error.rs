//! Trip-service error type and the caller-facing error taxonomy.

use thiserror::Error;

use hos_core::{CoreError, TripId, UserId};
use hos_log::LogError;
use hos_output::OutputError;
use hos_plan::PlanError;
use hos_route::RouteError;

/// Errors produced by [`TripService`][crate::TripService].
///
/// Every lower-layer error is wrapped unchanged; [`TripError::kind`] folds
/// them into the closed [`ErrorKind`] set callers branch on.
#[derive(Debug, Error)]
pub enum TripError {
    #[error("{user} does not own {trip}")]
    NotOwner { trip: TripId, user: UserId },

    #[error("{0} has no calculated route; calculate the route first")]
    NoRouteCalculated(TripId),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Route(#[from] RouteError),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    Log(#[from] LogError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

pub type TripResult<T> = Result<T, TripError>;

/// What went wrong, independent of which layer noticed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Empty or malformed route data.
    InvalidRoute,
    /// Latitude or longitude out of range.
    InvalidCoordinate,
    /// No pickup or dropoff to build a timeline from.
    MissingWaypoint,
    /// A waypoint belongs to another trip's route.
    CrossTripWaypoint,
    /// The route provider could not produce a route.
    RouteUnavailable,
    /// Any other rejected input: timestamps, cycle hours, rule sets,
    /// ownership.
    InvalidInput,
    /// The store failed or returned unreadable records.
    Storage,
}

impl TripError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TripError::NotOwner { .. }      => ErrorKind::InvalidInput,
            TripError::NoRouteCalculated(_) => ErrorKind::MissingWaypoint,
            TripError::Core(e)              => core_kind(e),
            TripError::Route(e)             => route_kind(e),
            TripError::Plan(e) => match e {
                PlanError::Route(e)     => route_kind(e),
                PlanError::Core(e)      => core_kind(e),
                PlanError::StopLimit(_) => ErrorKind::InvalidInput,
            },
            TripError::Log(e) => match e {
                LogError::MissingWaypoint(_)        => ErrorKind::MissingWaypoint,
                LogError::CrossTripWaypoint { .. }  => ErrorKind::CrossTripWaypoint,
                LogError::DuplicateWaypoint(_)
                | LogError::InvalidEvent(_)         => ErrorKind::InvalidInput,
                LogError::Core(e)                   => core_kind(e),
            },
            TripError::Output(_) => ErrorKind::Storage,
        }
    }
}

fn core_kind(e: &CoreError) -> ErrorKind {
    match e {
        CoreError::InvalidCoordinate { .. } => ErrorKind::InvalidCoordinate,
        _ => ErrorKind::InvalidInput,
    }
}

fn route_kind(e: &RouteError) -> ErrorKind {
    match e {
        RouteError::InvalidRoute(_) | RouteError::Parse(_) => ErrorKind::InvalidRoute,
        RouteError::RouteUnavailable(_) | RouteError::Io(_) => ErrorKind::RouteUnavailable,
        RouteError::Core(e) => core_kind(e),
    }
}
