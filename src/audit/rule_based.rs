//! Rule-based estimation.
//!
//! When the employee punched at least once on the audited day, the missing
//! punch is assumed to sit on the canonical shift boundary.

use chrono::NaiveTime;
use rust_decimal::Decimal;

use crate::models::{ClockKind, ReferenceSource, Shift};

use super::estimation::Estimate;
use super::reference_search::ReferenceData;

/// Fixed confidence of a rule-based estimate (0.6).
pub const RULE_BASED_CONFIDENCE: Decimal = Decimal::from_parts(6, 0, 0, false, 1);

/// Places the missing punch on the shift's start or end time.
///
/// Requires at least one same-day reference of any kind. An entry lands on
/// `start_time` of the audited date; an exit lands on `end_time`, on the
/// following date for shifts crossing midnight.
pub fn estimate_rule_based(
    references: &ReferenceData,
    shift: &Shift,
    missing_kind: ClockKind,
) -> Estimate {
    if references.same_day.is_empty() {
        return Estimate::none("No same-day reference punch to anchor the shift rule");
    }

    let (scheduled_entry, scheduled_exit) = shift.window_on(references.target_date);
    let (timestamp, boundary) = match missing_kind {
        ClockKind::Entry => (scheduled_entry, shift.start_time),
        ClockKind::Exit => (scheduled_exit, shift.end_time),
    };

    Estimate {
        timestamp: Some(timestamp),
        confidence: RULE_BASED_CONFIDENCE,
        sources: vec![ReferenceSource::SameDay],
        reasoning: format!(
            "Shift '{}' {} time {}",
            shift.id,
            missing_kind,
            format_time(boundary)
        ),
    }
}

fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}
