//! `hos-route`: route segments, validation, and the route-provider seam.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`route`]    | `RouteSegment`, `Route` (validated, immutable)              |
//! | [`provider`] | `RouteProvider` trait, `StaticRouteProvider`, `StraightLineProvider` |
//! | [`loader`]   | `load_segments_csv`, `load_segments_reader`                 |
//! | [`error`]    | `RouteError`, `RouteResult<T>`                              |
//!
//! A `Route` can only be obtained through validation, so the planner never
//! sees an empty segment list, a negative duration, or an out-of-range
//! coordinate.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod loader;
pub mod provider;
pub mod route;


pub use error::{RouteError, RouteResult};
pub use loader::{load_segments_csv, load_segments_reader};
pub use provider::{RouteProvider, StaticRouteProvider, StraightLineProvider};
pub use route::{Route, RouteSegment};
