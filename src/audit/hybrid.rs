//! Hybrid estimation: weighted average first, shift rule as fallback.

use chrono::Duration;
use tracing::debug;

use crate::models::{ClockKind, Shift};

use super::estimation::Estimate;
use super::reference_search::ReferenceData;
use super::rule_based::estimate_rule_based;
use super::weighted_average::estimate_weighted_average;

/// Estimates with the weighted average, falling back to the shift rule.
///
/// A weighted estimate is returned unchanged. It is compared with the shift
/// window widened by the tolerance, and an estimate outside that window is
/// only logged.
pub fn estimate_hybrid(
    references: &ReferenceData,
    shift: &Shift,
    missing_kind: ClockKind,
) -> Estimate {
    let weighted = estimate_weighted_average(references, shift, missing_kind);

    let Some(timestamp) = weighted.timestamp else {
        return estimate_rule_based(references, shift, missing_kind);
    };

    let (start, end) = shift.window_on(references.target_date);
    let tolerance = Duration::minutes(shift.tolerance_minutes());
    if timestamp < start - tolerance || timestamp > end + tolerance {
        debug!(
            shift_id = %shift.id,
            clock_kind = %missing_kind,
            estimated = %timestamp,
            window_start = %start,
            window_end = %end,
            "Weighted estimate falls outside the shift window"
        );
    }

    weighted
}
