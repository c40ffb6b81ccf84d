//! Mandatory clock validation.
//!
//! A work day is valid when the employee recorded at least as many punches
//! as the shift requires. Only the count matters; punch times are not
//! inspected here.

use serde::{Deserialize, Serialize};

use crate::models::{ClockKind, Punch, Shift};

/// The outcome of checking one work day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayValidation {
    /// Whether the required punches are present.
    pub is_valid: bool,
    /// How many recorded punches the day holds.
    pub recorded_clocks: usize,
    /// Punch kinds the estimator should try to fill.
    ///
    /// Empty for valid days, and also for invalid days whose gaps cannot be
    /// attributed to an entry or an exit.
    pub missing_kinds: Vec<ClockKind>,
}

/// Checks a work day against the shift's mandatory clock count.
///
/// Synthesized punches do not count towards the required total.
///
/// When the day is short:
/// - no punch at all misses an entry and an exit (only the entry when the
///   shift requires a single punch);
/// - a single punch misses the exit, or the entry when the punch is
///   explicitly marked as an exit;
/// - two or more punches leave nothing to estimate.
///
/// # Examples
///
/// ```
/// use timesheet_audit::audit::validate_day;
/// use timesheet_audit::models::{ClockKind, Punch, Shift};
/// use chrono::{NaiveDateTime, NaiveTime};
///
/// let shift = Shift {
///     id: "morning".to_string(),
///     name: "Morning".to_string(),
///     start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
///     end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
///     mandatory_clocks: 2,
///     tolerance: None,
///     is_night_shift: false,
/// };
///
/// let at = NaiveDateTime::parse_from_str("2026-01-15 08:05:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let validation = validate_day(&shift, &[Punch::recorded("emp_001", None, at)]);
///
/// assert!(!validation.is_valid);
/// assert_eq!(validation.missing_kinds, vec![ClockKind::Exit]);
/// ```
pub fn validate_day(shift: &Shift, daily_punches: &[Punch]) -> DayValidation {
    let recorded_clocks = daily_punches.iter().filter(|p| p.is_recorded()).count();

    if recorded_clocks >= shift.mandatory_clocks {
        return DayValidation {
            is_valid: true,
            recorded_clocks,
            missing_kinds: Vec::new(),
        };
    }

    let missing_kinds = match recorded_clocks {
        0 => [ClockKind::Entry, ClockKind::Exit]
            .into_iter()
            .take(shift.mandatory_clocks)
            .collect(),
        1 => {
            let lone_kind = daily_punches
                .iter()
                .find(|p| p.is_recorded())
                .and_then(|p| p.clock_kind);
            match lone_kind {
                Some(ClockKind::Exit) => vec![ClockKind::Entry],
                _ => vec![ClockKind::Exit],
            }
        }
        _ => Vec::new(),
    };

    DayValidation {
        is_valid: false,
        recorded_clocks,
        missing_kinds,
    }
}
