//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! `#[from]` variant, so validation failures raised here surface unchanged
//! at the outer layers.

use thiserror::Error;

/// The error type for `hos-core` validation and parsing.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("coordinate out of range: lat {lat}, lon {lon}")]
    InvalidCoordinate { lat: f64, lon: f64 },

    #[error("timestamp {0:?} is not an absolute instant with an explicit UTC offset")]
    InvalidTimestamp(String),

    #[error("cycle hours used must be in [0, {max}), got {got}")]
    InvalidCycleHours { got: f64, max: f64 },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `hos-core`.
pub type CoreResult<T> = Result<T, CoreError>;
