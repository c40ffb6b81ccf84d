//! Punch grouping and clock kind inference.
//!
//! Raw punches arrive unordered. This module groups them into work days and
//! decides which punch of a day is an entry and which is an exit.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{ClockKind, Punch};

/// Groups punches by `record_date`, each day sorted by timestamp.
///
/// The sort is stable, so punches sharing a timestamp keep their input
/// order. No validation is performed.
///
/// # Examples
///
/// ```
/// use timesheet_audit::audit::normalize_and_group;
/// use timesheet_audit::models::Punch;
/// use chrono::NaiveDateTime;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let punches = vec![
///     Punch::recorded("emp_001", None, at("2026-01-16 08:00:00")),
///     Punch::recorded("emp_001", None, at("2026-01-15 17:00:00")),
///     Punch::recorded("emp_001", None, at("2026-01-15 08:00:00")),
/// ];
///
/// let days = normalize_and_group(punches);
/// assert_eq!(days.len(), 2);
///
/// let first: Vec<_> = days.values().next().unwrap().iter().map(|p| p.timestamp).collect();
/// assert_eq!(first, vec![at("2026-01-15 08:00:00"), at("2026-01-15 17:00:00")]);
/// ```
pub fn normalize_and_group(
    punches: impl IntoIterator<Item = Punch>,
) -> BTreeMap<NaiveDate, Vec<Punch>> {
    let mut days: BTreeMap<NaiveDate, Vec<Punch>> = BTreeMap::new();
    for punch in punches {
        days.entry(punch.record_date).or_default().push(punch);
    }
    for day in days.values_mut() {
        day.sort_by_key(|p| p.timestamp);
    }
    days
}

/// Infers entry/exit kinds for one employee's chronologically sorted day.
///
/// An explicit `clock_kind` is kept. Otherwise the last punch of a day with
/// at least two punches is an exit, and the remaining punches alternate
/// entry, exit, entry... by position. A lone punch is an entry.
///
/// The returned kinds are parallel to `day_punches`.
pub fn infer_clock_kinds(day_punches: &[Punch]) -> Vec<ClockKind> {
    let last = day_punches.len().saturating_sub(1);
    day_punches
        .iter()
        .enumerate()
        .map(|(position, punch)| {
            if let Some(kind) = punch.clock_kind {
                kind
            } else if day_punches.len() >= 2 && position == last {
                ClockKind::Exit
            } else if position % 2 == 0 {
                ClockKind::Entry
            } else {
                ClockKind::Exit
            }
        })
        .collect()
}
