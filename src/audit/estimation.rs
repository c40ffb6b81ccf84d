//! Estimation results and the confidence-gated calculator.
//!
//! The [`EstimationStrategy`] setting selects one of the estimators in
//! [`weighted_average`](super::estimate_weighted_average),
//! [`rule_based`](super::estimate_rule_based) and
//! [`hybrid`](super::estimate_hybrid). The [`EstimationCalculator`] pairs a
//! strategy with the confidence floor below which an estimate is discarded.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{AuditSettings, EstimationStrategy};
use crate::models::{ClockKind, ReferenceSource, Shift};

use super::hybrid::estimate_hybrid;
use super::reference_search::ReferenceData;
use super::rule_based::estimate_rule_based;
use super::weighted_average::estimate_weighted_average;

/// Default confidence floor for accepting an estimate (0.5).
pub const DEFAULT_CONFIDENCE_THRESHOLD: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// The outcome of estimating one missing punch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Estimate {
    /// The estimated punch time, or `None` when no estimate was possible.
    pub timestamp: Option<NaiveDateTime>,
    /// Trust in the estimate, from 0 to 1.
    pub confidence: Decimal,
    /// Sources that contributed to the estimate, in priority order.
    pub sources: Vec<ReferenceSource>,
    /// Human-readable explanation of how the estimate was reached.
    pub reasoning: String,
}

impl Estimate {
    /// Creates an empty estimate with zero confidence.
    pub fn none(reasoning: impl Into<String>) -> Self {
        Self {
            timestamp: None,
            confidence: Decimal::ZERO,
            sources: Vec::new(),
            reasoning: reasoning.into(),
        }
    }

    /// Returns true if the estimate carries a time.
    pub fn is_some(&self) -> bool {
        self.timestamp.is_some()
    }
}

impl EstimationStrategy {
    /// Estimates the `missing_kind` punch of `references.target_date`.
    pub fn estimate(
        &self,
        references: &ReferenceData,
        shift: &Shift,
        missing_kind: ClockKind,
    ) -> Estimate {
        match self {
            EstimationStrategy::WeightedAverage => {
                estimate_weighted_average(references, shift, missing_kind)
            }
            EstimationStrategy::RuleBased => estimate_rule_based(references, shift, missing_kind),
            EstimationStrategy::Hybrid => estimate_hybrid(references, shift, missing_kind),
        }
    }
}

/// Runs the chosen strategy and judges its confidence.
///
/// # Example
///
/// ```
/// use timesheet_audit::audit::EstimationCalculator;
/// use timesheet_audit::config::EstimationStrategy;
/// use rust_decimal::Decimal;
///
/// let calculator = EstimationCalculator::default();
/// assert_eq!(calculator.strategy(), EstimationStrategy::Hybrid);
/// assert!(calculator.meets_confidence_threshold(Decimal::new(5, 1)));
/// assert!(!calculator.meets_confidence_threshold(Decimal::new(25, 2)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EstimationCalculator {
    strategy: EstimationStrategy,
    minimum_confidence: Decimal,
}

impl Default for EstimationCalculator {
    fn default() -> Self {
        Self::new(EstimationStrategy::Hybrid, DEFAULT_CONFIDENCE_THRESHOLD)
    }
}

impl EstimationCalculator {
    /// Creates a calculator with a strategy and confidence floor.
    pub fn new(strategy: EstimationStrategy, minimum_confidence: Decimal) -> Self {
        Self {
            strategy,
            minimum_confidence,
        }
    }

    /// Creates a calculator from audit settings.
    pub fn from_settings(settings: &AuditSettings) -> Self {
        Self::new(
            settings.estimation_strategy,
            settings.minimum_confidence_threshold,
        )
    }

    /// Returns the configured strategy.
    pub fn strategy(&self) -> EstimationStrategy {
        self.strategy
    }

    /// Returns the confidence floor.
    pub fn minimum_confidence(&self) -> Decimal {
        self.minimum_confidence
    }

    /// Returns true if `confidence` reaches the floor.
    pub fn meets_confidence_threshold(&self, confidence: Decimal) -> bool {
        confidence >= self.minimum_confidence
    }

    /// Estimates a missing punch with the configured strategy.
    pub fn calculate(
        &self,
        references: &ReferenceData,
        shift: &Shift,
        missing_kind: ClockKind,
    ) -> Estimate {
        self.strategy.estimate(references, shift, missing_kind)
    }

    /// Returns true if `estimate` carries a time and enough confidence.
    pub fn accepts(&self, estimate: &Estimate) -> bool {
        estimate.is_some() && self.meets_confidence_threshold(estimate.confidence)
    }
}
