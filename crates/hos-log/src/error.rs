use hos_core::{CoreError, RouteId, StopKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogError {
    #[error("trip has no {0} waypoint")]
    MissingWaypoint(StopKind),

    #[error("trip has more than one {0} waypoint")]
    DuplicateWaypoint(StopKind),

    #[error("{kind} waypoint belongs to {found}, trip route is {expected}")]
    CrossTripWaypoint {
        expected: RouteId,
        found:    RouteId,
        kind:     StopKind,
    },

    #[error("invalid waypoint: {0}")]
    InvalidEvent(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type LogResult<T> = Result<T, LogError>;
