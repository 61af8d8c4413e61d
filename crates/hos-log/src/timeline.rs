//! The duty timeline builder.
//!
//! # Replay
//!
//! Waypoints are merged into an [`EventQueue`] and replayed in time order
//! against a cursor that starts at the trip start.  Time between the
//! cursor and the next event is logged according to where the trip is:
//!
//! | Phase            | Gap logged as                                      |
//! |------------------|----------------------------------------------------|
//! | before pickup    | off duty, or sleeper berth if ≥ the threshold      |
//! | pickup → dropoff | driving, checked against the 8/11/14/70 h limits   |
//! | after dropoff    | off duty                                           |
//!
//! Each event is then logged in its own status for its duration.  If a
//! driving gap would overrun a limit, the builder logs driving up to the
//! limit, inserts the stop that relieves it, and shifts every later event by
//! that stop's duration so the remaining driving time is kept.  An event
//! that starts before the cursor (overlapping hand-edited waypoints) is
//! started at the cursor instead.
//!
//! Every interval goes through [`slice_interval`], so entries never cross
//! local midnight and each one lands on exactly one [`DailyLogSheet`].

use chrono::{FixedOffset, NaiveDate, TimeDelta};
use tracing::{debug, info, warn};

use hos_core::rules::HOURS_EPSILON;
use hos_core::time::{self, MAX_SPAN_HOURS, Timestamp};
use hos_core::{CoreError, CoreResult, DutyStatus, HosRules, RouteId, StopKind, TripId};
use hos_plan::{DutyEvent, EventQueue, Limit, RegulatoryCounters, StopLocation};

use crate::slicing::slice_interval;
use crate::{DailyLogSheet, LogEntry, LogError, LogResult, NoopObserver, TimelineObserver};

/// Driving overrun tolerated before a stop is inserted.  Absorbs the
/// millisecond rounding of planned timestamps.
const OVERRUN_TOLERANCE_HOURS: f64 = 1.0 / 3600.0;

// ── BuilderConfig ─────────────────────────────────────────────────────────────

/// Builder options beyond the regulatory rules.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BuilderConfig {
    /// Off-duty time logged after the dropoff ends.
    pub post_trip_tail_hours:    f64,
    /// A gap before pickup at least this long is logged as sleeper berth.
    /// `None` means the rule set's `reset_hours`.
    pub sleeper_threshold_hours: Option<f64>,
}

impl BuilderConfig {
    pub fn validate(&self) -> CoreResult<()> {
        let tail = self.post_trip_tail_hours;
        if !(tail.is_finite() && (0.0..=MAX_SPAN_HOURS).contains(&tail)) {
            return Err(CoreError::Config(format!(
                "post_trip_tail_hours must be in [0, {MAX_SPAN_HOURS}], got {}",
                self.post_trip_tail_hours
            )));
        }
        if let Some(h) = self.sleeper_threshold_hours {
            if !(h.is_finite() && h > 0.0 && h <= MAX_SPAN_HOURS) {
                return Err(CoreError::Config(format!(
                    "sleeper_threshold_hours must be in (0, {MAX_SPAN_HOURS}], got {h}"
                )));
            }
        }
        Ok(())
    }
}

// ── TripLog / TripTimeline ────────────────────────────────────────────────────

/// The trip-level inputs of a build.
#[derive(Clone, Debug, PartialEq)]
pub struct TripLog {
    pub trip_id:          TripId,
    /// Every waypoint must belong to this route.
    pub route_id:         RouteId,
    /// When logging starts.  Dates are rendered in this timestamp's offset.
    pub start:            Timestamp,
    pub cycle_hours_used: f64,
    /// Where the driver is before pickup, if known.
    pub origin:           Option<StopLocation>,
}

/// Result of a build: the flat entry list plus one sheet per date.
#[derive(Clone, Debug, PartialEq)]
pub struct TripTimeline {
    pub entries:        Vec<LogEntry>,
    /// Ordered by date, one per calendar date the entries touch.
    pub daily_logs:     Vec<DailyLogSheet>,
    /// Stops the builder had to add, in time order.
    pub synthetic:      Vec<DutyEvent>,
    pub final_counters: RegulatoryCounters,
}

impl TripTimeline {
    pub fn start(&self) -> Option<Timestamp> {
        self.entries.first().map(|e| e.start)
    }

    /// End of the logging window.
    pub fn end(&self) -> Option<Timestamp> {
        self.entries.last().map(|e| e.end)
    }

    pub fn sheet(&self, date: NaiveDate) -> Option<&DailyLogSheet> {
        self.daily_logs.iter().find(|s| s.date == date)
    }

    /// Hours in `status` over the whole trip.
    pub fn total_hours(&self, status: DutyStatus) -> f64 {
        self.daily_logs.iter().map(|s| s.totals.hours(status)).sum()
    }

    pub fn into_parts(self) -> (Vec<LogEntry>, Vec<DailyLogSheet>) {
        (self.entries, self.daily_logs)
    }
}

// ── TimelineBuilder ───────────────────────────────────────────────────────────

/// Turns a trip's waypoints into log entries and daily log sheets.
///
/// Pure and deterministic: the same trip and waypoints always produce the
/// same timeline.
#[derive(Clone, Debug, Default)]
pub struct TimelineBuilder {
    rules:  HosRules,
    config: BuilderConfig,
}

impl TimelineBuilder {
    pub fn new(rules: HosRules, config: BuilderConfig) -> LogResult<Self> {
        rules.validate()?;
        config.validate()?;
        Ok(Self { rules, config })
    }

    pub fn rules(&self) -> &HosRules {
        &self.rules
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Build from a route's stored waypoints: exactly one pickup, exactly
    /// one dropoff, any number of stops.
    pub fn build(&self, trip: &TripLog, waypoints: &[DutyEvent]) -> LogResult<TripTimeline> {
        self.build_observed(trip, waypoints, &mut NoopObserver)
    }

    /// [`build`][Self::build] with observer callbacks.
    pub fn build_observed<O: TimelineObserver>(
        &self,
        trip:      &TripLog,
        waypoints: &[DutyEvent],
        observer:  &mut O,
    ) -> LogResult<TripTimeline> {
        let roles = Roles::sort(trip.route_id, waypoints.iter())?;
        let timeline = self.replay(trip, &roles, observer)?;
        info!(
            trip = %trip.trip_id,
            route = %trip.route_id,
            entries = timeline.entries.len(),
            days = timeline.daily_logs.len(),
            inserted = timeline.synthetic.len(),
            "timeline built"
        );
        Ok(timeline)
    }

    /// Build from the pickup, the stops between, and the dropoff.
    ///
    /// The pickup's route is the trip's route.
    pub fn build_from_parts(
        &self,
        trip_start:       Timestamp,
        pickup:           &DutyEvent,
        intermediates:    &[DutyEvent],
        dropoff:          &DutyEvent,
        cycle_hours_used: f64,
    ) -> LogResult<TripTimeline> {
        let events = std::iter::once(pickup).chain(intermediates).chain(std::iter::once(dropoff));
        let roles = Roles::sort(pickup.route, events)?;
        let trip = TripLog {
            trip_id: TripId(0),
            route_id: pickup.route,
            start: trip_start,
            cycle_hours_used,
            origin: None,
        };
        self.replay(&trip, &roles, &mut NoopObserver)
    }

    fn replay<O: TimelineObserver>(
        &self,
        trip:     &TripLog,
        roles:    &Roles<'_>,
        observer: &mut O,
    ) -> LogResult<TripTimeline> {
        self.rules.check_cycle_hours(trip.cycle_hours_used)?;

        let replay = Replay {
            rules:             &self.rules,
            tail:              time::hours(self.config.post_trip_tail_hours),
            sleeper_threshold: self.config.sleeper_threshold_hours.unwrap_or(self.rules.reset_hours),
            route:             trip.route_id,
            offset:            *trip.start.offset(),
            cursor:            trip.start,
            shift:             TimeDelta::zero(),
            phase:             Phase::BeforePickup,
            counters:          RegulatoryCounters::new(trip.cycle_hours_used),
            location:          trip.origin.clone().unwrap_or_else(|| roles.pickup.location.clone()),
            dropoff_end:       None,
            entries:           Vec::new(),
            days:              Vec::new(),
            synthetic:         Vec::new(),
            observer,
        };

        let queue = EventQueue::from_events(roles.all().cloned());
        replay.run(queue)
    }
}

// ── Waypoint roles ────────────────────────────────────────────────────────────

struct Roles<'a> {
    pickup:  &'a DutyEvent,
    stops:   Vec<&'a DutyEvent>,
    dropoff: &'a DutyEvent,
}

impl<'a> Roles<'a> {
    /// Check ownership and validity, and pick out pickup and dropoff.
    fn sort(route: RouteId, events: impl Iterator<Item = &'a DutyEvent>) -> LogResult<Self> {
        let mut pickup = None;
        let mut dropoff = None;
        let mut stops = Vec::new();

        for event in events {
            if event.route != route {
                return Err(LogError::CrossTripWaypoint {
                    expected: route,
                    found:    event.route,
                    kind:     event.kind,
                });
            }
            event.validate().map_err(|e| match e {
                CoreError::InvalidCoordinate { .. } => LogError::Core(e),
                e => LogError::InvalidEvent(e.to_string()),
            })?;
            let slot = match event.kind {
                StopKind::Pickup => &mut pickup,
                StopKind::Dropoff => &mut dropoff,
                _ => {
                    stops.push(event);
                    continue;
                }
            };
            if slot.replace(event).is_some() {
                return Err(LogError::DuplicateWaypoint(event.kind));
            }
        }

        let pickup = pickup.ok_or(LogError::MissingWaypoint(StopKind::Pickup))?;
        let dropoff = dropoff.ok_or(LogError::MissingWaypoint(StopKind::Dropoff))?;
        if dropoff.timestamp < pickup.timestamp {
            return Err(LogError::InvalidEvent(format!(
                "dropoff at {} precedes pickup at {}",
                dropoff.timestamp, pickup.timestamp
            )));
        }
        Ok(Self { pickup, stops, dropoff })
    }

    fn all(&self) -> impl Iterator<Item = &'a DutyEvent> + '_ {
        std::iter::once(self.pickup)
            .chain(self.stops.iter().copied())
            .chain(std::iter::once(self.dropoff))
    }
}

// ── Replay ────────────────────────────────────────────────────────────────────

/// `ts + by`, or `InvalidEvent` past the last representable instant.
fn later(ts: Timestamp, by: TimeDelta) -> LogResult<Timestamp> {
    ts.checked_add_signed(by).ok_or_else(|| {
        LogError::InvalidEvent(format!("{ts} + {} h is out of range", time::as_hours(by)))
    })
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Phase {
    BeforePickup,
    OnTrip,
    AfterDropoff,
}

/// State of one build.  Entries are only ever appended at the cursor, which
/// keeps them contiguous.
struct Replay<'a, O: TimelineObserver> {
    rules:             &'a HosRules,
    tail:              TimeDelta,
    sleeper_threshold: f64,
    route:             RouteId,
    offset:            FixedOffset,
    cursor:            Timestamp,
    /// Total duration of inserted stops; added to every later event.
    shift:             TimeDelta,
    phase:             Phase,
    counters:          RegulatoryCounters,
    /// Last known position (origin, then each event's location).
    location:          StopLocation,
    dropoff_end:       Option<Timestamp>,
    entries:           Vec<LogEntry>,
    days:              Vec<DailyLogSheet>,
    synthetic:         Vec<DutyEvent>,
    observer:          &'a mut O,
}

impl<O: TimelineObserver> Replay<'_, O> {
    fn run(mut self, mut queue: EventQueue) -> LogResult<TripTimeline> {
        while let Some(event) = queue.pop() {
            let due = later(event.timestamp, self.shift)?;
            if due < self.cursor {
                warn!(
                    kind = %event.kind,
                    scheduled = %due,
                    cursor = %self.cursor,
                    "waypoint overlaps the previous activity; starting it late"
                );
            } else if due > self.cursor && !self.fill_gap(due)? {
                // A stop went in first; the event is now due later.
                queue.push(event);
                continue;
            }
            self.apply(&event, event.kind.note())?;
        }

        if let Some(end) = self.dropoff_end {
            let tail_end = later(end, self.tail)?;
            if tail_end > self.cursor {
                self.rest_until(tail_end, DutyStatus::OffDuty, "Off duty after trip");
            }
        }

        if let Some(last) = self.days.last_mut() {
            last.close(self.rules.average_speed_mph);
            self.observer.on_day_closed(last);
        }

        let timeline = TripTimeline {
            entries:        self.entries,
            daily_logs:     self.days,
            synthetic:      self.synthetic,
            final_counters: self.counters,
        };
        self.observer.on_finish(&timeline);
        Ok(timeline)
    }

    /// Log the time from the cursor to `due`.  Returns `false` when a stop
    /// was inserted instead and the pending event must be retried.
    fn fill_gap(&mut self, due: Timestamp) -> LogResult<bool> {
        let gap = time::as_hours(due - self.cursor);
        match self.phase {
            Phase::BeforePickup => {
                if gap + HOURS_EPSILON >= self.sleeper_threshold {
                    self.rest_until(due, DutyStatus::SleeperBerth, "Sleeper berth before pickup");
                } else {
                    // Not yet on duty: the window has not started.
                    self.emit(due, DutyStatus::OffDuty, "Off duty before pickup", None);
                }
                Ok(true)
            }
            Phase::AfterDropoff => {
                self.rest_until(due, DutyStatus::OffDuty, "Off duty");
                Ok(true)
            }
            Phase::OnTrip => {
                let allowed = self.counters.drivable_hours(self.rules, 0.0);
                if gap <= allowed + OVERRUN_TOLERANCE_HOURS {
                    self.drive_until(due);
                    return Ok(true);
                }
                if allowed > 0.0 {
                    // Ends before `due`, so it cannot overflow.
                    self.drive_until(self.cursor + time::hours(allowed));
                }
                self.insert_stop()?;
                Ok(false)
            }
        }
    }

    fn drive_until(&mut self, until: Timestamp) {
        let hours = time::as_hours(until - self.cursor);
        self.counters = self.counters.drive(hours, hours * self.rules.average_speed_mph);
        self.emit(until, DutyStatus::Driving, "Driving", None);
    }

    fn rest_until(&mut self, until: Timestamp, status: DutyStatus, notes: &str) {
        let hours = time::as_hours(until - self.cursor);
        self.counters = self.counters.rest(self.rules, hours);
        self.emit(until, status, notes, None);
    }

    /// Add the stop for whichever hours limit driving just reached.
    fn insert_stop(&mut self) -> LogResult<()> {
        // Rounding can leave every budget a hair above zero.
        let limit = self.counters.binding_hours_limit(self.rules).unwrap_or(Limit::DailyDriving);
        let kind = limit.stop_kind();
        let hours = limit.stop_hours(self.rules);
        let location = StopLocation {
            name: format!("{} {}", kind.label(), self.synthetic.len() + 1),
            ..self.location.clone()
        };
        let event = DutyEvent::new(self.route, kind, self.cursor, hours, location);
        warn!(%limit, %kind, at = %self.cursor, hours, "waypoints overrun a limit; inserting stop");

        self.observer.on_synthetic_event(&event, limit);
        let notes = format!("{} (inserted at {limit} limit)", kind.note());
        self.apply(&event, &notes)?;
        self.shift += event.duration();
        self.synthetic.push(event);
        Ok(())
    }

    /// Log `event` starting at the cursor.
    fn apply(&mut self, event: &DutyEvent, notes: &str) -> LogResult<()> {
        let hours = event.duration_hours;
        let start = self.cursor;
        let end = later(start, event.duration())?;
        self.location = event.location.clone();
        self.emit(end, event.status(), notes, event.kind.activity());

        self.counters = match event.kind {
            StopKind::Pickup | StopKind::Dropoff => self.counters.work(hours),
            StopKind::RestBreak | StopKind::MandatoryBreak => self.counters.idle(hours).after_break(),
            StopKind::FuelStop => self.counters.idle(hours).after_fuel(),
            StopKind::OvernightReset => self.counters.rest(self.rules, hours),
        };
        match event.kind {
            StopKind::Pickup => self.phase = Phase::OnTrip,
            StopKind::Dropoff => {
                self.phase = Phase::AfterDropoff;
                self.dropoff_end = Some(self.cursor);
            }
            _ => {}
        }
        debug!(kind = %event.kind, %start, hours, "waypoint logged");
        Ok(())
    }

    /// Append `[cursor, end)` in `status`, split at midnight, and advance.
    fn emit(&mut self, end: Timestamp, status: DutyStatus, notes: &str, activity: Option<&str>) {
        let location = (status != DutyStatus::Driving).then(|| self.location.clone());
        for slice in slice_interval(self.cursor, end, status, self.offset) {
            self.day(slice.date).record(&slice);
            let entry = LogEntry {
                start:    slice.start,
                end:      slice.end,
                status,
                location: location.clone(),
                notes:    notes.to_owned(),
                activity: activity.map(str::to_owned),
            };
            self.observer.on_entry(&entry);
            self.entries.push(entry);
        }
        if end > self.cursor {
            self.cursor = time::in_offset(end, self.offset);
        }
    }

    /// The sheet for `date`, closing the previous day when the date changes.
    fn day(&mut self, date: NaiveDate) -> &mut DailyLogSheet {
        if self.days.last().map(|d| d.date) != Some(date) {
            let odometer = match self.days.last_mut() {
                Some(prev) => {
                    prev.close(self.rules.average_speed_mph);
                    self.observer.on_day_closed(prev);
                    prev.ending_odometer
                }
                None => 0,
            };
            self.days.push(DailyLogSheet::new(date, odometer));
        }
        let last = self.days.len() - 1;
        &mut self.days[last]
    }
}
