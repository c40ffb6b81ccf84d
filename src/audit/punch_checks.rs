//! Optional checks on recorded punches.
//!
//! These findings are informational: they add inconsistencies to the audit
//! result but never change whether a day is valid.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::models::{Punch, Shift};

/// Returns timestamps recorded more than once in a day, in order.
///
/// Each repeated timestamp is reported once.
pub fn find_duplicate_punches(day_punches: &[Punch]) -> Vec<NaiveDateTime> {
    let mut timestamps: Vec<NaiveDateTime> = day_punches
        .iter()
        .filter(|p| p.is_recorded())
        .map(|p| p.timestamp)
        .collect();
    timestamps.sort();

    let mut duplicates: Vec<NaiveDateTime> = timestamps
        .windows(2)
        .filter(|pair| pair[0] == pair[1])
        .map(|pair| pair[0])
        .collect();
    duplicates.dedup();
    duplicates
}

/// Returns recorded punches lying outside the shift window of `date`.
///
/// The window runs from the scheduled entry to the scheduled exit, widened
/// on both sides by the shift tolerance.
pub fn find_out_of_shift_punches<'a>(
    shift: &Shift,
    date: NaiveDate,
    day_punches: &'a [Punch],
) -> Vec<&'a Punch> {
    let (start, end) = shift.window_on(date);
    let tolerance = Duration::minutes(shift.tolerance_minutes());
    let (earliest, latest) = (start - tolerance, end + tolerance);

    day_punches
        .iter()
        .filter(|p| p.is_recorded())
        .filter(|p| p.timestamp < earliest || p.timestamp > latest)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShiftTolerance;
    use chrono::NaiveTime;

    fn make_datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn punch(at: &str) -> Punch {
        Punch::recorded("emp_001", None, make_datetime(at))
    }

    fn create_shift(start: (u32, u32), end: (u32, u32), tolerance: u32) -> Shift {
        Shift {
            id: "shift".to_string(),
            name: "Shift".to_string(),
            start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
            mandatory_clocks: 2,
            tolerance: Some(ShiftTolerance {
                name: format!("{} minutes", tolerance),
                minutes: tolerance,
                is_justified: false,
            }),
            is_night_shift: false,
        }
    }

    #[test]
    fn test_duplicates_are_reported_once() {
        let day = vec![
            punch("2026-01-15 08:00:00"),
            punch("2026-01-15 08:00:00"),
            punch("2026-01-15 08:00:00"),
            punch("2026-01-15 17:00:00"),
        ];

        assert_eq!(
            find_duplicate_punches(&day),
            vec![make_datetime("2026-01-15 08:00:00")]
        );
    }

    #[test]
    fn test_distinct_punches_have_no_duplicates() {
        let day = vec![punch("2026-01-15 08:00:00"), punch("2026-01-15 17:00:00")];
        assert!(find_duplicate_punches(&day).is_empty());
    }

    #[test]
    fn test_punches_within_tolerance_are_in_shift() {
        let shift = create_shift((8, 0), (17, 0), 15);
        let day = vec![punch("2026-01-15 07:45:00"), punch("2026-01-15 17:15:00")];

        let date = make_datetime("2026-01-15 00:00:00").date();
        assert!(find_out_of_shift_punches(&shift, date, &day).is_empty());
    }

    #[test]
    fn test_punches_beyond_tolerance_are_flagged() {
        let shift = create_shift((8, 0), (17, 0), 15);
        let day = vec![punch("2026-01-15 07:40:00"), punch("2026-01-15 17:00:00")];

        let date = make_datetime("2026-01-15 00:00:00").date();
        let flagged = find_out_of_shift_punches(&shift, date, &day);
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].timestamp, make_datetime("2026-01-15 07:40:00"));
    }

    #[test]
    fn test_night_shift_window_covers_next_morning() {
        let shift = create_shift((22, 0), (6, 0), 0);
        let mut exit = punch("2026-01-16 06:00:00");
        exit.record_date = make_datetime("2026-01-15 00:00:00").date();
        let day = vec![punch("2026-01-15 22:00:00"), exit];

        let date = make_datetime("2026-01-15 00:00:00").date();
        assert!(find_out_of_shift_punches(&shift, date, &day).is_empty());
    }
}
