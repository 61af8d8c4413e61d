//! Timeline observer trait for progress reporting and data collection.

use hos_plan::{DutyEvent, Limit};

use crate::{DailyLogSheet, LogEntry, TripTimeline};

/// Callbacks invoked by
/// [`TimelineBuilder::build_observed`][crate::TimelineBuilder::build_observed]
/// while a trip is replayed.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: count defensive stops
///
/// ```rust,ignore
/// struct Inserted(usize);
///
/// impl TimelineObserver for Inserted {
///     fn on_synthetic_event(&mut self, _event: &DutyEvent, _limit: Limit) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait TimelineObserver {
    /// Called for every log entry, in time order, as it is produced.
    fn on_entry(&mut self, _entry: &LogEntry) {}

    /// Called when the builder inserts a stop the waypoints lacked because
    /// driving would have overrun `limit`.
    fn on_synthetic_event(&mut self, _event: &DutyEvent, _limit: Limit) {}

    /// Called once per calendar date after its odometer is closed out.
    fn on_day_closed(&mut self, _sheet: &DailyLogSheet) {}

    /// Called once with the finished timeline.
    fn on_finish(&mut self, _timeline: &TripTimeline) {}
}

/// A [`TimelineObserver`] that does nothing.
pub struct NoopObserver;

impl TimelineObserver for NoopObserver {}
