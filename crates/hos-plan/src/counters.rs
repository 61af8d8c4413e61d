//! `RegulatoryCounters`: the ephemeral HOS state of one simulation.
//!
//! # Model
//!
//! Five running totals, each consumed by time (or miles) and relieved by one
//! kind of stop:
//!
//! | Counter               | Consumed by                    | Relieved by         |
//! |-----------------------|--------------------------------|---------------------|
//! | `driving_since_break` | driving                        | short break, reset  |
//! | `driving_since_reset` | driving                        | reset               |
//! | `window_since_reset`  | all elapsed time since a reset | reset               |
//! | `cycle_used`          | driving, on-duty work          | reset (per policy)  |
//! | `miles_since_fuel`    | driving distance               | fuel stop           |
//!
//! The struct is a plain `Copy` value.  Every transition returns a new
//! value, so the planner and the log builder thread it through their loops
//! explicitly and a test can inspect any intermediate state.

use hos_core::HosRules;
use hos_core::StopKind;
use hos_core::rules::HOURS_EPSILON;

/// Slack on mileage comparisons.
const MILES_EPSILON: f64 = 1e-6;

// ── Limit ─────────────────────────────────────────────────────────────────────

/// The limit that forced a stop.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Limit {
    /// 70-hour cycle budget.
    Cycle,
    /// 14-hour on-duty window.
    DutyWindow,
    /// 11-hour driving cap.
    DailyDriving,
    /// 8 hours of driving since the last break.
    ShortBreak,
    /// 1000 miles since the last fuel stop.
    Fuel,
}

impl Limit {
    /// The kind of stop that relieves this limit.
    pub fn stop_kind(self) -> StopKind {
        match self {
            Limit::Cycle | Limit::DutyWindow | Limit::DailyDriving => StopKind::OvernightReset,
            Limit::ShortBreak => StopKind::MandatoryBreak,
            Limit::Fuel => StopKind::FuelStop,
        }
    }

    /// Duration of that stop under `rules`.
    pub fn stop_hours(self, rules: &HosRules) -> f64 {
        match self {
            Limit::Cycle => rules.reset_duration_hours(true),
            Limit::DutyWindow | Limit::DailyDriving => rules.reset_duration_hours(false),
            Limit::ShortBreak => rules.break_hours,
            Limit::Fuel => rules.fuel_stop_hours,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Limit::Cycle        => "cycle",
            Limit::DutyWindow   => "duty_window",
            Limit::DailyDriving => "daily_driving",
            Limit::ShortBreak   => "short_break",
            Limit::Fuel         => "fuel",
        }
    }
}

impl std::fmt::Display for Limit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── RegulatoryCounters ────────────────────────────────────────────────────────

/// Hours (and miles) used against each HOS limit.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct RegulatoryCounters {
    pub driving_since_break: f64,
    pub driving_since_reset: f64,
    pub window_since_reset:  f64,
    pub cycle_used:          f64,
    pub miles_since_fuel:    f64,
}

impl RegulatoryCounters {
    /// Fresh duty period with `cycle_hours_used` already spent this cycle.
    pub fn new(cycle_hours_used: f64) -> Self {
        Self { cycle_used: cycle_hours_used, ..Self::default() }
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Drive for `hours`, covering `miles`.
    #[must_use]
    pub fn drive(self, hours: f64, miles: f64) -> Self {
        Self {
            driving_since_break: self.driving_since_break + hours,
            driving_since_reset: self.driving_since_reset + hours,
            window_since_reset:  self.window_since_reset + hours,
            cycle_used:          self.cycle_used + hours,
            miles_since_fuel:    self.miles_since_fuel + miles,
        }
    }

    /// On duty, not driving (loading, unloading).
    #[must_use]
    pub fn work(self, hours: f64) -> Self {
        Self {
            window_since_reset: self.window_since_reset + hours,
            cycle_used:         self.cycle_used + hours,
            ..self
        }
    }

    /// Off duty inside a duty period.  The 14-hour window keeps running.
    #[must_use]
    pub fn idle(self, hours: f64) -> Self {
        Self { window_since_reset: self.window_since_reset + hours, ..self }
    }

    #[must_use]
    pub fn after_break(self) -> Self {
        Self { driving_since_break: 0.0, ..self }
    }

    #[must_use]
    pub fn after_fuel(self) -> Self {
        Self { miles_since_fuel: 0.0, ..self }
    }

    /// Sleeper-berth or off-duty rest of `hours`.
    ///
    /// A rest of at least `reset_hours` starts a new duty period; whether it
    /// also clears the cycle follows `rules.cycle_reset`.  A shorter rest only
    /// runs the window clock.
    #[must_use]
    pub fn rest(self, rules: &HosRules, hours: f64) -> Self {
        if !rules.is_full_reset(hours) {
            return self.idle(hours);
        }
        Self {
            driving_since_break: 0.0,
            driving_since_reset: 0.0,
            window_since_reset:  0.0,
            cycle_used:          if rules.restores_cycle(hours) { 0.0 } else { self.cycle_used },
            miles_since_fuel:    self.miles_since_fuel,
        }
    }

    // ── Remaining budgets ─────────────────────────────────────────────────

    pub fn break_remaining(&self, rules: &HosRules) -> f64 {
        rules.max_driving_before_break_hours - self.driving_since_break
    }

    pub fn driving_remaining(&self, rules: &HosRules) -> f64 {
        rules.max_driving_hours - self.driving_since_reset
    }

    pub fn window_remaining(&self, rules: &HosRules) -> f64 {
        rules.max_on_duty_hours - self.window_since_reset
    }

    pub fn cycle_remaining(&self, rules: &HosRules) -> f64 {
        rules.max_cycle_hours - self.cycle_used
    }

    pub fn fuel_remaining_miles(&self, rules: &HosRules) -> f64 {
        rules.fuel_interval_miles - self.miles_since_fuel
    }

    /// Hours of driving allowed right now, ignoring fuel.
    ///
    /// `reserve_hours` is held back from the window and cycle budgets for
    /// on-duty work still to come (the dropoff).
    pub fn drivable_hours(&self, rules: &HosRules, reserve_hours: f64) -> f64 {
        self.break_remaining(rules)
            .min(self.driving_remaining(rules))
            .min(self.window_remaining(rules) - reserve_hours)
            .min(self.cycle_remaining(rules) - reserve_hours)
            .max(0.0)
    }

    /// The limit that forbids any further driving, if one does.
    ///
    /// Checked in priority order: the three budgets relieved by a reset
    /// first (a reset also relieves the break), then the short break, then
    /// fuel.
    pub fn binding_limit(&self, rules: &HosRules, reserve_hours: f64) -> Option<Limit> {
        if self.cycle_remaining(rules) - reserve_hours <= HOURS_EPSILON {
            Some(Limit::Cycle)
        } else if self.window_remaining(rules) - reserve_hours <= HOURS_EPSILON {
            Some(Limit::DutyWindow)
        } else if self.driving_remaining(rules) <= HOURS_EPSILON {
            Some(Limit::DailyDriving)
        } else if self.break_remaining(rules) <= HOURS_EPSILON {
            Some(Limit::ShortBreak)
        } else if self.fuel_remaining_miles(rules) <= MILES_EPSILON {
            Some(Limit::Fuel)
        } else {
            None
        }
    }

    /// Like [`binding_limit`][Self::binding_limit] without fuel, which the
    /// log builder cannot observe.
    pub fn binding_hours_limit(&self, rules: &HosRules) -> Option<Limit> {
        match self.binding_limit(rules, 0.0) {
            Some(Limit::Fuel) | None => None,
            hit => hit,
        }
    }
}
