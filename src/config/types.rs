//! Configuration types for audit runs.
//!
//! This module contains the strongly-typed settings structures that are
//! deserialized from YAML files or HTTP request bodies.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::AuditPeriod;

/// The estimation strategy used to fill missing punches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimationStrategy {
    /// Weighted mean of matching reference punches.
    WeightedAverage,
    /// Canonical shift boundaries, when the employee punched that day.
    RuleBased,
    /// Weighted average, falling back to rule-based.
    #[default]
    Hybrid,
}

fn default_confidence_threshold() -> Decimal {
    // 0.5
    Decimal::from_parts(5, 0, 0, false, 1)
}

fn default_validation_rate() -> Decimal {
    Decimal::from(95)
}

fn default_minimum_references() -> usize {
    1
}

/// Tunable settings of the audit pipeline.
///
/// Every field has a default, so an empty document deserializes to
/// [`AuditSettings::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSettings {
    /// Estimates below this confidence become unclassified punches.
    #[serde(default = "default_confidence_threshold")]
    pub minimum_confidence_threshold: Decimal,
    /// Validation rate, in percent, an employee needs to be approved.
    #[serde(default = "default_validation_rate")]
    pub minimum_validation_rate: Decimal,
    /// How missing punches are estimated.
    #[serde(default)]
    pub estimation_strategy: EstimationStrategy,
    /// Reference punches needed before estimation is attempted.
    #[serde(default = "default_minimum_references")]
    pub minimum_references: usize,
    /// Flag recorded punches outside the shift window and its tolerance.
    #[serde(default)]
    pub check_shift_boundaries: bool,
    /// Flag recorded punches sharing a timestamp.
    #[serde(default)]
    pub flag_duplicate_punches: bool,
    /// Recompute estimates for gaps already filled by an earlier run.
    #[serde(default)]
    pub reestimate_synthesized: bool,
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            minimum_confidence_threshold: default_confidence_threshold(),
            minimum_validation_rate: default_validation_rate(),
            estimation_strategy: EstimationStrategy::default(),
            minimum_references: default_minimum_references(),
            check_shift_boundaries: false,
            flag_duplicate_punches: false,
            reestimate_synthesized: false,
        }
    }
}

impl AuditSettings {
    /// Checks every setting against its allowed range.
    ///
    /// # Examples
    ///
    /// ```
    /// use timesheet_audit::config::AuditSettings;
    /// use rust_decimal::Decimal;
    ///
    /// let mut settings = AuditSettings::default();
    /// assert!(settings.validate().is_ok());
    ///
    /// settings.minimum_confidence_threshold = Decimal::new(15, 1);
    /// assert!(settings.validate().is_err());
    /// ```
    pub fn validate(&self) -> EngineResult<()> {
        let threshold = self.minimum_confidence_threshold;
        if threshold < Decimal::ZERO || threshold > Decimal::ONE {
            return Err(EngineError::InvalidSetting {
                field: "minimum_confidence_threshold".to_string(),
                message: format!("must be between 0 and 1, got {}", threshold),
            });
        }

        let rate = self.minimum_validation_rate;
        if rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED {
            return Err(EngineError::InvalidSetting {
                field: "minimum_validation_rate".to_string(),
                message: format!("must be between 0 and 100, got {}", rate),
            });
        }

        Ok(())
    }
}

/// A complete, validated audit run configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// The days to audit.
    pub period: AuditPeriod,
    /// Pipeline settings.
    #[serde(default)]
    pub settings: AuditSettings,
}

impl AuditConfig {
    /// Creates a configuration, validating the period and the settings.
    pub fn new(period: AuditPeriod, settings: AuditSettings) -> EngineResult<Self> {
        let config = Self { period, settings };
        config.validate()?;
        Ok(config)
    }

    /// Validates the period and the settings.
    pub fn validate(&self) -> EngineResult<()> {
        self.period.validate()?;
        self.settings.validate()
    }
}
