//! Shift model and related types.
//!
//! This module defines the Shift and ShiftTolerance structs describing the
//! working hours an employee is expected to clock in and out of.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Minutes in a calendar day.
pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// How far punches may drift from the shift boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftTolerance {
    /// A label for the tolerance (e.g. "15 minutes").
    pub name: String,
    /// The allowed drift in minutes on either side of a boundary.
    pub minutes: u32,
    /// Whether drift within the tolerance has been justified.
    #[serde(default)]
    pub is_justified: bool,
}

fn default_mandatory_clocks() -> usize {
    2
}

/// Represents a work shift with canonical entry and exit times.
///
/// A shift whose `end_time` is earlier than its `start_time` crosses
/// midnight: its exit falls on the calendar day after its entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique identifier for the shift.
    pub id: String,
    /// Human-readable name of the shift.
    pub name: String,
    /// The canonical entry time.
    pub start_time: NaiveTime,
    /// The canonical exit time.
    pub end_time: NaiveTime,
    /// Number of punches required per work day.
    #[serde(default = "default_mandatory_clocks")]
    pub mandatory_clocks: usize,
    /// Allowed drift around the shift boundaries.
    #[serde(default)]
    pub tolerance: Option<ShiftTolerance>,
    /// Informational flag for night shifts.
    #[serde(default)]
    pub is_night_shift: bool,
}

impl Shift {
    /// Checks the shift definition for inconsistent data.
    pub fn validate(&self) -> EngineResult<()> {
        if self.mandatory_clocks == 0 {
            return Err(EngineError::InvalidShift {
                shift_id: self.id.clone(),
                message: "mandatory_clocks must be at least 1".to_string(),
            });
        }
        if self.start_time == self.end_time {
            return Err(EngineError::InvalidShift {
                shift_id: self.id.clone(),
                message: "start_time and end_time are identical".to_string(),
            });
        }
        Ok(())
    }

    /// Returns true if the shift ends on the calendar day after it starts.
    ///
    /// # Examples
    ///
    /// ```
    /// use timesheet_audit::models::Shift;
    /// use chrono::NaiveTime;
    ///
    /// let night = Shift {
    ///     id: "night".to_string(),
    ///     name: "Night".to_string(),
    ///     start_time: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
    ///     end_time: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
    ///     mandatory_clocks: 2,
    ///     tolerance: None,
    ///     is_night_shift: true,
    /// };
    /// assert!(night.crosses_midnight());
    /// ```
    pub fn crosses_midnight(&self) -> bool {
        self.end_time < self.start_time
    }

    /// Returns the tolerance in minutes, zero when none is configured.
    pub fn tolerance_minutes(&self) -> i64 {
        self.tolerance
            .as_ref()
            .map(|t| i64::from(t.minutes))
            .unwrap_or(0)
    }

    /// Returns the scheduled entry and exit for the work day starting on `date`.
    ///
    /// The exit rolls into the next calendar day for shifts crossing midnight.
    pub fn window_on(&self, date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
        let start = date.and_time(self.start_time);
        let end_date = if self.crosses_midnight() {
            date.succ_opt().unwrap_or(date)
        } else {
            date
        };
        (start, end_date.and_time(self.end_time))
    }

    /// Maps a time of day onto the shift's own minute axis.
    ///
    /// For day shifts this is minutes since midnight. For shifts crossing
    /// midnight, times in the after-midnight part of the shift continue past
    /// 1440 so that 23:50 and 00:10 stay 20 minutes apart. The split point is
    /// the middle of the off-duty gap between `end_time` and `start_time`.
    ///
    /// # Examples
    ///
    /// ```
    /// use timesheet_audit::models::Shift;
    /// use chrono::NaiveTime;
    ///
    /// let night = Shift {
    ///     id: "night".to_string(),
    ///     name: "Night".to_string(),
    ///     start_time: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
    ///     end_time: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
    ///     mandatory_clocks: 2,
    ///     tolerance: None,
    ///     is_night_shift: true,
    /// };
    /// assert_eq!(night.shift_minutes(NaiveTime::from_hms_opt(23, 50, 0).unwrap()), 1430);
    /// assert_eq!(night.shift_minutes(NaiveTime::from_hms_opt(0, 10, 0).unwrap()), 1450);
    /// ```
    pub fn shift_minutes(&self, time: NaiveTime) -> i64 {
        let minutes = minutes_since_midnight(time);
        if !self.crosses_midnight() {
            return minutes;
        }

        let end = minutes_since_midnight(self.end_time);
        let start = minutes_since_midnight(self.start_time);
        let split = end + (start - end) / 2;
        if minutes < split {
            minutes + MINUTES_PER_DAY
        } else {
            minutes
        }
    }
}

/// Returns the whole minutes elapsed since midnight.
pub fn minutes_since_midnight(time: NaiveTime) -> i64 {
    i64::from(time.num_seconds_from_midnight() / 60)
}
