//! Regulatory configuration.
//!
//! `HosRules::default()` is the US property-carrying rule set (70 h / 8 day
//! cycle).  Every limit is a plain field so an application can load a
//! different set from JSON (feature `serde`) and hand it to the planner and
//! the log builder; both read limits only through this struct.

use crate::time::MAX_SPAN_HOURS;
use crate::{CoreError, CoreResult};

/// Tolerance for comparing fractional hours that went through a
/// millisecond round trip.
pub const HOURS_EPSILON: f64 = 1e-6;

// ── CycleReset ───────────────────────────────────────────────────────────────

/// Whether a 10-hour reset also restores the multi-day cycle budget.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CycleReset {
    /// Every full reset restores all four counters, the cycle included.
    #[default]
    EveryReset,
    /// A 10-hour reset restores only the 8/11/14-hour counters.  When the
    /// cycle budget itself runs out, the planner schedules a restart of
    /// `restart_hours` which restores everything.
    RestartOnly { restart_hours: f64 },
}

// ── HosRules ─────────────────────────────────────────────────────────────────

/// Hours-of-Service limits and trip constants.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HosRules {
    /// Driving allowed since the last short break.
    pub max_driving_before_break_hours: f64,
    /// Driving allowed per duty period.
    pub max_driving_hours: f64,
    /// Length of the on-duty window per duty period (elapsed time).
    pub max_on_duty_hours: f64,
    /// Multi-day cycle budget.
    pub max_cycle_hours: f64,
    /// Off-duty time that starts a new duty period.
    pub reset_hours: f64,
    pub break_hours: f64,
    pub fuel_interval_miles: f64,
    pub fuel_stop_hours: f64,
    /// Used for odometer estimates.
    pub average_speed_mph: f64,
    pub pickup_hours: f64,
    pub dropoff_hours: f64,
    pub cycle_reset: CycleReset,
}

impl Default for HosRules {
    fn default() -> Self {
        Self {
            max_driving_before_break_hours: 8.0,
            max_driving_hours:              11.0,
            max_on_duty_hours:              14.0,
            max_cycle_hours:                70.0,
            reset_hours:                    10.0,
            break_hours:                    0.5,
            fuel_interval_miles:            1000.0,
            fuel_stop_hours:                0.5,
            average_speed_mph:              55.0,
            pickup_hours:                   1.0,
            dropoff_hours:                  1.0,
            cycle_reset:                    CycleReset::EveryReset,
        }
    }
}

impl HosRules {
    /// Reject limits that would make the simulation loop forever or divide
    /// by zero.
    pub fn validate(&self) -> CoreResult<()> {
        let positive = [
            ("max_driving_before_break_hours", self.max_driving_before_break_hours),
            ("max_driving_hours", self.max_driving_hours),
            ("max_on_duty_hours", self.max_on_duty_hours),
            ("max_cycle_hours", self.max_cycle_hours),
            ("reset_hours", self.reset_hours),
            ("break_hours", self.break_hours),
            ("fuel_interval_miles", self.fuel_interval_miles),
            ("fuel_stop_hours", self.fuel_stop_hours),
            ("average_speed_mph", self.average_speed_mph),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(CoreError::Config(format!("{name} must be positive, got {value}")));
            }
        }
        for (name, value) in [("pickup_hours", self.pickup_hours), ("dropoff_hours", self.dropoff_hours)] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(CoreError::Config(format!("{name} must be non-negative, got {value}")));
            }
        }
        let spans = [
            ("max_driving_before_break_hours", self.max_driving_before_break_hours),
            ("max_driving_hours", self.max_driving_hours),
            ("max_on_duty_hours", self.max_on_duty_hours),
            ("max_cycle_hours", self.max_cycle_hours),
            ("reset_hours", self.reset_hours),
            ("break_hours", self.break_hours),
            ("fuel_stop_hours", self.fuel_stop_hours),
            ("pickup_hours", self.pickup_hours),
            ("dropoff_hours", self.dropoff_hours),
        ];
        for (name, value) in spans {
            if value > MAX_SPAN_HOURS {
                return Err(CoreError::Config(format!(
                    "{name} must be at most {MAX_SPAN_HOURS} h, got {value}"
                )));
            }
        }
        // The two fixed activities plus some driving must fit in one window.
        if self.pickup_hours + self.dropoff_hours >= self.max_on_duty_hours
            || self.dropoff_hours >= self.max_cycle_hours
        {
            return Err(CoreError::Config(
                "pickup/dropoff time leaves no room to drive in a duty window".into(),
            ));
        }
        if let CycleReset::RestartOnly { restart_hours } = self.cycle_reset {
            if !(restart_hours.is_finite()
                && restart_hours >= self.reset_hours
                && restart_hours <= MAX_SPAN_HOURS)
            {
                return Err(CoreError::Config(format!(
                    "restart_hours must be in [reset_hours ({}), {MAX_SPAN_HOURS}], got {restart_hours}",
                    self.reset_hours
                )));
            }
        }
        Ok(())
    }

    /// Check a caller-supplied "cycle hours already used" value.
    pub fn check_cycle_hours(&self, used: f64) -> CoreResult<()> {
        if used.is_finite() && (0.0..self.max_cycle_hours).contains(&used) {
            Ok(())
        } else {
            Err(CoreError::InvalidCycleHours { got: used, max: self.max_cycle_hours })
        }
    }

    /// Duration of the reset the planner schedules when the given budget ran
    /// out.  `cycle_bound` is `true` when the cycle budget is the one
    /// exhausted.
    pub fn reset_duration_hours(&self, cycle_bound: bool) -> f64 {
        match self.cycle_reset {
            CycleReset::RestartOnly { restart_hours } if cycle_bound => restart_hours,
            _ => self.reset_hours,
        }
    }

    /// Does an off-duty period of `hours` start a new duty period?
    pub fn is_full_reset(&self, hours: f64) -> bool {
        hours + HOURS_EPSILON >= self.reset_hours
    }

    /// Does an off-duty period of `hours` restore the cycle budget?
    pub fn restores_cycle(&self, hours: f64) -> bool {
        match self.cycle_reset {
            CycleReset::EveryReset => hours + HOURS_EPSILON >= self.reset_hours,
            CycleReset::RestartOnly { restart_hours } => hours + HOURS_EPSILON >= restart_hours,
        }
    }
}
