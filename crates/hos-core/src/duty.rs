//! Duty statuses and stop kinds shared by the planner, the log builder, and
//! the storage backends.
//!
//! Both are closed enums: every transition in the planner and builder is an
//! exhaustive `match`, and the storage layer round-trips them through the
//! fixed wire tags returned by `as_str`.

use crate::{CoreError, CoreResult};

// ── DutyStatus ───────────────────────────────────────────────────────────────

/// One of the four ELD duty statuses.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DutyStatus {
    OffDuty,
    SleeperBerth,
    Driving,
    OnDutyNotDriving,
}

impl DutyStatus {
    /// All statuses in the row order of a paper log sheet.
    pub const ALL: [DutyStatus; 4] = [
        DutyStatus::OffDuty,
        DutyStatus::SleeperBerth,
        DutyStatus::Driving,
        DutyStatus::OnDutyNotDriving,
    ];

    /// Row index on the log sheet (0‥3).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            DutyStatus::OffDuty          => 0,
            DutyStatus::SleeperBerth     => 1,
            DutyStatus::Driving          => 2,
            DutyStatus::OnDutyNotDriving => 3,
        }
    }

    /// Storage tag.
    pub fn as_str(self) -> &'static str {
        match self {
            DutyStatus::OffDuty          => "off_duty",
            DutyStatus::SleeperBerth     => "sleeper_berth",
            DutyStatus::Driving          => "driving",
            DutyStatus::OnDutyNotDriving => "on_duty_not_driving",
        }
    }

    /// Single-character code used in the compact status-grid encoding.
    pub fn grid_char(self) -> char {
        match self {
            DutyStatus::OffDuty          => 'O',
            DutyStatus::SleeperBerth     => 'S',
            DutyStatus::Driving          => 'D',
            DutyStatus::OnDutyNotDriving => 'N',
        }
    }

    pub fn from_grid_char(c: char) -> Option<DutyStatus> {
        match c {
            'O' => Some(DutyStatus::OffDuty),
            'S' => Some(DutyStatus::SleeperBerth),
            'D' => Some(DutyStatus::Driving),
            'N' => Some(DutyStatus::OnDutyNotDriving),
            _ => None,
        }
    }
}

impl std::str::FromStr for DutyStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        DutyStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == s.trim())
            .ok_or_else(|| CoreError::Parse(format!("unknown duty status {s:?}")))
    }
}

impl std::fmt::Display for DutyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── StopKind ─────────────────────────────────────────────────────────────────

/// What happens at a planned stop.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StopKind {
    Pickup,
    Dropoff,
    /// A short break recorded by hand or carried over from older plans.
    RestBreak,
    FuelStop,
    /// A full reset (10 h, or a cycle restart).
    OvernightReset,
    /// The 30-minute break the planner inserts after 8 h of driving.
    MandatoryBreak,
}

impl StopKind {
    pub const ALL: [StopKind; 6] = [
        StopKind::Pickup,
        StopKind::Dropoff,
        StopKind::RestBreak,
        StopKind::FuelStop,
        StopKind::OvernightReset,
        StopKind::MandatoryBreak,
    ];

    /// The duty status a driver is in for the duration of this stop.
    pub fn status(self) -> DutyStatus {
        match self {
            StopKind::Pickup | StopKind::Dropoff => DutyStatus::OnDutyNotDriving,
            StopKind::RestBreak | StopKind::FuelStop | StopKind::MandatoryBreak => {
                DutyStatus::OffDuty
            }
            StopKind::OvernightReset => DutyStatus::SleeperBerth,
        }
    }

    /// Storage tag.
    pub fn as_str(self) -> &'static str {
        match self {
            StopKind::Pickup         => "pickup",
            StopKind::Dropoff        => "dropoff",
            StopKind::RestBreak      => "rest",
            StopKind::FuelStop       => "fuel",
            StopKind::OvernightReset => "overnight",
            StopKind::MandatoryBreak => "mandatory_break",
        }
    }

    /// Prefix of the generated stop name ("Rest Break 2").
    pub fn label(self) -> &'static str {
        match self {
            StopKind::Pickup         => "Pickup",
            StopKind::Dropoff        => "Dropoff",
            StopKind::RestBreak      => "Rest Break",
            StopKind::FuelStop       => "Fuel Stop",
            StopKind::OvernightReset => "Overnight Rest",
            StopKind::MandatoryBreak => "Mandatory Break",
        }
    }

    /// Activity column of the log entry, if the stop has one.
    pub fn activity(self) -> Option<&'static str> {
        match self {
            StopKind::Pickup   => Some("Loading"),
            StopKind::Dropoff  => Some("Unloading"),
            StopKind::FuelStop => Some("Fueling"),
            StopKind::RestBreak | StopKind::OvernightReset | StopKind::MandatoryBreak => None,
        }
    }

    /// Notes column of the log entry.
    pub fn note(self) -> &'static str {
        match self {
            StopKind::Pickup         => "Loading at pickup location",
            StopKind::Dropoff        => "Unloading at delivery location",
            StopKind::RestBreak      => "Rest break",
            StopKind::FuelStop       => "Fuel stop",
            StopKind::OvernightReset => "10-hour reset",
            StopKind::MandatoryBreak => "Mandatory 30-minute break",
        }
    }
}

impl std::str::FromStr for StopKind {
    type Err = CoreError;

    /// Accepts the storage tags plus the long names (`rest_break`,
    /// `fuel_stop`, `overnight_reset`).
    fn from_str(s: &str) -> CoreResult<Self> {
        match s.trim() {
            "pickup"                      => Ok(StopKind::Pickup),
            "dropoff"                     => Ok(StopKind::Dropoff),
            "rest" | "rest_break"         => Ok(StopKind::RestBreak),
            "fuel" | "fuel_stop"          => Ok(StopKind::FuelStop),
            "overnight" | "overnight_reset" => Ok(StopKind::OvernightReset),
            "mandatory_break"             => Ok(StopKind::MandatoryBreak),
            other => Err(CoreError::Parse(format!("unknown stop kind {other:?}"))),
        }
    }
}

impl std::fmt::Display for StopKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
