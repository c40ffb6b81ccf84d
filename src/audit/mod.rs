//! Audit and estimation pipeline for the Timesheet Audit Engine.
//!
//! This module contains punch grouping, mandatory clock validation,
//! reference search, the estimation strategies and the processor that ties
//! them together into one audit run.

mod estimation;
mod hybrid;
mod mandatory_clocks;
mod normalizer;
mod processor;
mod punch_checks;
mod reference_search;
mod reference_validator;
mod rule_based;
mod weighted_average;

pub use estimation::{DEFAULT_CONFIDENCE_THRESHOLD, Estimate, EstimationCalculator};
pub use hybrid::estimate_hybrid;
pub use mandatory_clocks::{DayValidation, validate_day};
pub use normalizer::{infer_clock_kinds, normalize_and_group};
pub use processor::TimesheetAuditProcessor;
pub use punch_checks::{find_duplicate_punches, find_out_of_shift_punches};
pub use reference_search::{Reference, ReferenceData, ReferenceSearcher};
pub use reference_validator::ReferenceValidator;
pub use rule_based::{RULE_BASED_CONFIDENCE, estimate_rule_based};
pub use weighted_average::{
    FULL_CONFIDENCE_REFERENCES, NEXT_DAY_WEIGHT, OTHER_EMPLOYEES_WEIGHT, PREVIOUS_DAY_WEIGHT,
    SAME_DAY_WEIGHT, estimate_weighted_average, source_weight, weighted_confidence,
};
