//! `hos-log`: the duty timeline builder.
//!
//! Replays a trip's waypoints into the two record-of-duty-status outputs:
//! a flat list of [`LogEntry`] intervals and one [`DailyLogSheet`] per
//! calendar date, each with four duty totals and a 96-slot status grid.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`slicing`]  | `slice_interval`, `DaySlice`, slot constants                |
//! | [`entry`]    | `LogEntry`                                                  |
//! | [`sheet`]    | `DailyLogSheet`, `DutyTotals`, `StatusGrid`                 |
//! | [`timeline`] | `TimelineBuilder`, `BuilderConfig`, `TripLog`, `TripTimeline` |
//! | [`observer`] | `TimelineObserver`, `NoopObserver`                          |
//! | [`error`]    | `LogError`, `LogResult<T>`                                  |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use hos_log::{TimelineBuilder, TripLog};
//!
//! let trip = TripLog { trip_id, route_id, start, cycle_hours_used: 12.0, origin: None };
//! let timeline = TimelineBuilder::default().build(&trip, &plan.events())?;
//! for sheet in &timeline.daily_logs {
//!     println!("{} {} {:.2} h driving", sheet.date, sheet.grid, sheet.driving_hours());
//! }
//! ```

pub mod entry;
pub mod error;
pub mod observer;
pub mod sheet;
pub mod slicing;
pub mod timeline;

#[cfg(test)]
mod tests;

pub use entry::LogEntry;
pub use error::{LogError, LogResult};
pub use observer::{NoopObserver, TimelineObserver};
pub use sheet::{DailyLogSheet, DutyTotals, StatusGrid};
pub use slicing::{DaySlice, SLOT_MINUTES, SLOTS_PER_DAY, slice_interval};
pub use timeline::{BuilderConfig, TimelineBuilder, TripLog, TripTimeline};
