//! Weighted average estimation.
//!
//! Each reference punch of the missing kind contributes its time of day,
//! weighted by how close its source is to the audited day. The mean is
//! floored to whole minutes and anchored to the audited date.

use chrono::{Duration, NaiveTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::models::{ClockKind, ReferenceSource, Shift};

use super::estimation::Estimate;
use super::reference_search::ReferenceData;

/// Weight of the employee's own punches on the audited day.
pub const SAME_DAY_WEIGHT: Decimal = Decimal::from_parts(4, 0, 0, false, 0);

/// Weight of the employee's punches on the day before.
pub const PREVIOUS_DAY_WEIGHT: Decimal = Decimal::from_parts(3, 0, 0, false, 0);

/// Weight of the employee's punches on the day after.
pub const NEXT_DAY_WEIGHT: Decimal = Decimal::from_parts(25, 0, 0, false, 1);

/// Weight of colleagues' punches on the same shift and day.
pub const OTHER_EMPLOYEES_WEIGHT: Decimal = Decimal::from_parts(1, 0, 0, false, 0);

/// Matching references needed for full confidence.
pub const FULL_CONFIDENCE_REFERENCES: usize = 4;

/// Returns the weight of a reference source.
pub fn source_weight(source: ReferenceSource) -> Decimal {
    match source {
        ReferenceSource::SameDay => SAME_DAY_WEIGHT,
        ReferenceSource::PreviousDay => PREVIOUS_DAY_WEIGHT,
        ReferenceSource::NextDay => NEXT_DAY_WEIGHT,
        ReferenceSource::OtherEmployees => OTHER_EMPLOYEES_WEIGHT,
    }
}

/// Returns `min(1, matching / 4)`.
pub fn weighted_confidence(matching_references: usize) -> Decimal {
    let ratio = Decimal::from(matching_references) / Decimal::from(FULL_CONFIDENCE_REFERENCES);
    ratio.min(Decimal::ONE)
}

/// Estimates a missing punch as the weighted mean of matching references.
///
/// Only references whose inferred kind equals `missing_kind` are used. For
/// shifts crossing midnight, times are placed on the shift's own minute axis
/// (see [`Shift::shift_minutes`]) before averaging, so the result may fall on
/// the day after the audited date.
///
/// # Examples
///
/// ```
/// use timesheet_audit::audit::{Reference, ReferenceData, estimate_weighted_average};
/// use timesheet_audit::models::{ClockKind, Punch, ReferenceSource, Shift};
/// use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
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
/// let mut data = ReferenceData::new(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
/// data.previous_day.push(Reference {
///     punch: Punch::recorded("emp_001", None, at("2026-01-14 17:10:00")),
///     clock_kind: ClockKind::Exit,
/// });
/// data.other_employees.push(Reference {
///     punch: Punch::recorded("emp_002", None, at("2026-01-15 17:00:00")),
///     clock_kind: ClockKind::Exit,
/// });
///
/// let estimate = estimate_weighted_average(&data, &shift, ClockKind::Exit);
///
/// // (3 x 17:10 + 1 x 17:00) / 4 = 17:07:30, floored to 17:07
/// assert_eq!(estimate.timestamp, Some(at("2026-01-15 17:07:00")));
/// assert_eq!(estimate.confidence, Decimal::new(5, 1));
/// assert_eq!(
///     estimate.sources,
///     vec![ReferenceSource::PreviousDay, ReferenceSource::OtherEmployees]
/// );
/// ```
pub fn estimate_weighted_average(
    references: &ReferenceData,
    shift: &Shift,
    missing_kind: ClockKind,
) -> Estimate {
    let mut weighted_minutes = Decimal::ZERO;
    let mut total_weight = Decimal::ZERO;
    let mut matching = 0usize;
    let mut sources = Vec::new();

    for (source, refs) in references.sources() {
        let weight = source_weight(source);
        let mut used = false;
        for reference in refs.iter().filter(|r| r.clock_kind == missing_kind) {
            let minutes = shift.shift_minutes(reference.punch.timestamp.time());
            weighted_minutes += weight * Decimal::from(minutes);
            total_weight += weight;
            matching += 1;
            used = true;
        }
        if used {
            sources.push(source);
        }
    }

    if matching == 0 || total_weight.is_zero() {
        return Estimate::none(format!("No {} reference punches available", missing_kind));
    }

    let Some(mean_minutes) = (weighted_minutes / total_weight).floor().to_i64() else {
        return Estimate::none("Weighted mean is out of range");
    };

    let midnight = references.target_date.and_time(NaiveTime::MIN);
    let timestamp = midnight + Duration::minutes(mean_minutes);
    let confidence = weighted_confidence(matching);

    Estimate {
        timestamp: Some(timestamp),
        confidence,
        reasoning: format!(
            "Weighted average of {} {} reference(s) from {}",
            matching,
            missing_kind,
            sources
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ),
        sources,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Reference;
    use crate::models::Punch;
    use chrono::{NaiveDate, NaiveDateTime};
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn make_time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    fn create_shift(start: &str, end: &str) -> Shift {
        Shift {
            id: "shift".to_string(),
            name: "Shift".to_string(),
            start_time: make_time(start),
            end_time: make_time(end),
            mandatory_clocks: 2,
            tolerance: None,
            is_night_shift: false,
        }
    }

    fn reference(at: &str, clock_kind: ClockKind) -> Reference {
        Reference {
            punch: Punch::recorded("emp", None, make_datetime(at)),
            clock_kind,
        }
    }

    #[test]
    fn test_weights() {
        assert_eq!(source_weight(ReferenceSource::SameDay), dec("4"));
        assert_eq!(source_weight(ReferenceSource::PreviousDay), dec("3"));
        assert_eq!(source_weight(ReferenceSource::NextDay), dec("2.5"));
        assert_eq!(source_weight(ReferenceSource::OtherEmployees), dec("1"));
    }

    #[test]
    fn test_no_references_gives_no_estimate() {
        let data = ReferenceData::new(make_date("2026-01-15"));
        let estimate = estimate_weighted_average(&data, &create_shift("08:00", "17:00"), ClockKind::Exit);

        assert!(estimate.timestamp.is_none());
        assert_eq!(estimate.confidence, Decimal::ZERO);
        assert!(estimate.sources.is_empty());
    }

    #[test]
    fn test_only_matching_kind_is_used() {
        let mut data = ReferenceData::new(make_date("2026-01-15"));
        data.same_day.push(reference("2026-01-15 08:05:00", ClockKind::Entry));

        let estimate = estimate_weighted_average(&data, &create_shift("08:00", "17:00"), ClockKind::Exit);
        assert!(estimate.timestamp.is_none());

        let estimate = estimate_weighted_average(&data, &create_shift("08:00", "17:00"), ClockKind::Entry);
        assert_eq!(estimate.timestamp, Some(make_datetime("2026-01-15 08:05:00")));
        assert_eq!(estimate.sources, vec![ReferenceSource::SameDay]);
    }

    #[test]
    fn test_surrounding_exits_scenario() {
        let mut data = ReferenceData::new(make_date("2026-01-15"));
        data.same_day.push(reference("2026-01-15 08:05:00", ClockKind::Entry));
        data.previous_day.push(reference("2026-01-14 08:00:00", ClockKind::Entry));
        data.previous_day.push(reference("2026-01-14 17:05:00", ClockKind::Exit));
        data.next_day.push(reference("2026-01-16 08:00:00", ClockKind::Entry));
        data.next_day.push(reference("2026-01-16 17:10:00", ClockKind::Exit));
        data.other_employees.push(reference("2026-01-15 08:00:00", ClockKind::Entry));
        data.other_employees.push(reference("2026-01-15 17:00:00", ClockKind::Exit));

        let estimate = estimate_weighted_average(&data, &create_shift("08:00", "17:00"), ClockKind::Exit);

        // (3 x 1025 + 2.5 x 1030 + 1 x 1020) / 6.5 = 1026.15 minutes
        assert_eq!(estimate.timestamp, Some(make_datetime("2026-01-15 17:06:00")));
        assert_eq!(estimate.confidence, dec("0.75"));
        assert_eq!(
            estimate.sources,
            vec![
                ReferenceSource::PreviousDay,
                ReferenceSource::NextDay,
                ReferenceSource::OtherEmployees
            ]
        );
    }

    #[test]
    fn test_estimate_is_anchored_to_audited_date() {
        let mut data = ReferenceData::new(make_date("2026-01-15"));
        data.previous_day.push(reference("2026-01-14 17:00:00", ClockKind::Exit));

        let estimate = estimate_weighted_average(&data, &create_shift("08:00", "17:00"), ClockKind::Exit);
        assert_eq!(estimate.timestamp, Some(make_datetime("2026-01-15 17:00:00")));
    }

    #[test]
    fn test_night_shift_average_across_midnight() {
        let shift = create_shift("22:00", "06:00");
        let mut data = ReferenceData::new(make_date("2026-01-15"));
        data.previous_day.push(reference("2026-01-15 05:50:00", ClockKind::Exit));
        data.next_day.push(reference("2026-01-17 06:10:00", ClockKind::Exit));

        let estimate = estimate_weighted_average(&data, &shift, ClockKind::Exit);

        // (3 x 1790 + 2.5 x 1810) / 5.5 = 1799.09, floored to 29:59
        assert_eq!(estimate.timestamp, Some(make_datetime("2026-01-16 05:59:00")));
    }

    #[test]
    fn test_night_shift_entries_around_midnight_stay_close() {
        let shift = create_shift("22:00", "06:00");
        let mut data = ReferenceData::new(make_date("2026-01-15"));
        data.previous_day.push(reference("2026-01-14 23:50:00", ClockKind::Entry));
        data.next_day.push(reference("2026-01-17 00:10:00", ClockKind::Entry));

        let estimate = estimate_weighted_average(&data, &shift, ClockKind::Entry);

        // (3 x 1430 + 2.5 x 1450) / 5.5 = 1439.09, floored to 23:59
        assert_eq!(estimate.timestamp, Some(make_datetime("2026-01-15 23:59:00")));
    }

    #[test]
    fn test_confidence_saturates() {
        assert_eq!(weighted_confidence(0), Decimal::ZERO);
        assert_eq!(weighted_confidence(1), dec("0.25"));
        assert_eq!(weighted_confidence(2), dec("0.5"));
        assert_eq!(weighted_confidence(4), Decimal::ONE);
        assert_eq!(weighted_confidence(9), Decimal::ONE);
    }

    proptest! {
        #[test]
        fn prop_confidence_is_monotone_and_bounded(n in 0usize..64) {
            let current = weighted_confidence(n);
            let next = weighted_confidence(n + 1);

            prop_assert!(current >= Decimal::ZERO);
            prop_assert!(current <= Decimal::ONE);
            prop_assert!(next >= current);
            if n >= FULL_CONFIDENCE_REFERENCES {
                prop_assert_eq!(current, Decimal::ONE);
            }
        }

        #[test]
        fn prop_day_shift_estimate_lies_between_references(
            minutes in proptest::collection::vec(0u32..1440, 1..8)
        ) {
            let shift = create_shift("08:00", "17:00");
            let mut data = ReferenceData::new(make_date("2026-01-15"));
            for m in &minutes {
                let time = NaiveTime::from_num_seconds_from_midnight_opt(m * 60, 0).unwrap();
                data.other_employees.push(Reference {
                    punch: Punch::recorded("emp", None, make_date("2026-01-15").and_time(time)),
                    clock_kind: ClockKind::Exit,
                });
            }

            let estimate = estimate_weighted_average(&data, &shift, ClockKind::Exit);
            let timestamp = estimate.timestamp.unwrap();
            let lo = *minutes.iter().min().unwrap() as i64;
            let hi = *minutes.iter().max().unwrap() as i64;
            let got = crate::models::minutes_since_midnight(timestamp.time());

            prop_assert_eq!(timestamp.date(), make_date("2026-01-15"));
            prop_assert!(got >= lo && got <= hi);
            prop_assert_eq!(estimate.confidence, weighted_confidence(minutes.len()));
        }
    }
}
