//! Route-subsystem error type.

use thiserror::Error;

use hos_core::CoreError;

/// Errors produced by `hos-route`.
#[derive(Debug, Error)]
pub enum RouteError {
    /// Empty or malformed segment data.
    #[error("invalid route: {0}")]
    InvalidRoute(String),

    /// The upstream provider could not produce a route.  Surfaced, never
    /// retried.
    #[error("route unavailable: {0}")]
    RouteUnavailable(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("segment parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type RouteResult<T> = Result<T, RouteError>;
