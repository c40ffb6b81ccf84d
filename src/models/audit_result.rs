//! Audit result models for the Timesheet Audit Engine.
//!
//! This module contains the [`AuditResult`] type produced once per employee
//! and period, its [`Inconsistency`] entries, and the run-level
//! [`AuditSummary`].

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AuditPeriod;

/// The kind of finding recorded against an audited day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InconsistencyType {
    /// Fewer punches than the shift requires.
    IncompleteClocks,
    /// A missing punch could not be estimated.
    MissingClocks,
    /// Punch times do not form a sensible interval.
    InvalidTimeInterval,
    /// The same punch time was recorded more than once.
    DuplicateClocks,
    /// A punch lies outside the shift window and its tolerance.
    OutOfShiftTime,
}

impl fmt::Display for InconsistencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InconsistencyType::IncompleteClocks => "Incomplete clocks",
            InconsistencyType::MissingClocks => "Missing clocks",
            InconsistencyType::InvalidTimeInterval => "Invalid time interval",
            InconsistencyType::DuplicateClocks => "Duplicate clocks",
            InconsistencyType::OutOfShiftTime => "Out of shift time",
        };
        write!(f, "{}", label)
    }
}

/// A single audit finding tied to a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inconsistency {
    /// The audited day the finding belongs to.
    pub date: NaiveDate,
    /// The kind of finding.
    #[serde(rename = "type")]
    pub inconsistency_type: InconsistencyType,
    /// Human-readable details.
    pub details: String,
}

/// The outcome of auditing one employee over one period.
///
/// For every employee whose shift resolved,
/// `valid_days + invalid_days == total_days_audited`.
///
/// # Example
///
/// ```
/// use timesheet_audit::models::{AuditPeriod, AuditResult, InconsistencyType};
/// use chrono::NaiveDate;
///
/// let period = AuditPeriod::new(
///     NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 1, 16).unwrap(),
/// )
/// .unwrap();
///
/// let mut result = AuditResult::new("emp_001", &period);
/// result.add_inconsistency(
///     period.start_date,
///     InconsistencyType::IncompleteClocks,
///     "Missing mandatory clocks: exit",
/// );
/// assert_eq!(result.inconsistencies.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditResult {
    /// The audited employee.
    pub employee_id: String,
    /// When the audit was performed.
    pub audited_at: DateTime<Utc>,
    /// First audited day (inclusive).
    pub period_start: NaiveDate,
    /// Last audited day (inclusive).
    pub period_end: NaiveDate,
    /// Days processed.
    pub total_days_audited: u32,
    /// Days with all mandatory punches present.
    pub valid_days: u32,
    /// Days missing mandatory punches.
    pub invalid_days: u32,
    /// Punches synthesized with enough confidence.
    pub estimated_clocks: u32,
    /// Punches that could not be estimated.
    pub not_classified_clocks: u32,
    /// Findings in the order they were recorded.
    pub inconsistencies: Vec<Inconsistency>,
    /// Notes about the audit as a whole.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
}

impl AuditResult {
    /// Creates an empty result for an employee and period.
    pub fn new(employee_id: impl Into<String>, period: &AuditPeriod) -> Self {
        Self {
            employee_id: employee_id.into(),
            audited_at: Utc::now(),
            period_start: period.start_date,
            period_end: period.end_date,
            total_days_audited: 0,
            valid_days: 0,
            invalid_days: 0,
            estimated_clocks: 0,
            not_classified_clocks: 0,
            inconsistencies: Vec::new(),
            observations: None,
        }
    }

    /// Appends a finding.
    pub fn add_inconsistency(
        &mut self,
        date: NaiveDate,
        inconsistency_type: InconsistencyType,
        details: impl Into<String>,
    ) {
        self.inconsistencies.push(Inconsistency {
            date,
            inconsistency_type,
            details: details.into(),
        });
    }

    /// Iterates the findings of one type.
    pub fn inconsistencies_of(
        &self,
        inconsistency_type: InconsistencyType,
    ) -> impl Iterator<Item = &Inconsistency> {
        self.inconsistencies
            .iter()
            .filter(move |i| i.inconsistency_type == inconsistency_type)
    }

    /// Returns the share of valid days as a percentage, rounded to 2 places.
    ///
    /// Returns zero when no day was audited.
    pub fn validation_rate(&self) -> Decimal {
        percentage(self.valid_days, self.total_days_audited)
    }

    /// Returns true if the validation rate reaches `min_rate` percent.
    pub fn is_approved(&self, min_rate: Decimal) -> bool {
        self.validation_rate() >= min_rate
    }
}

/// Aggregated totals over all results of an audit run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSummary {
    /// Number of employee results.
    pub employees_audited: u32,
    /// Days processed across all employees.
    pub total_days_audited: u32,
    /// Valid days across all employees.
    pub valid_days: u32,
    /// Invalid days across all employees.
    pub invalid_days: u32,
    /// Estimated punches across all employees.
    pub estimated_clocks: u32,
    /// Unclassified punches across all employees.
    pub not_classified_clocks: u32,
    /// Overall share of valid days as a percentage.
    pub validation_rate: Decimal,
    /// Employees whose validation rate reached the approval threshold.
    pub approved_employees: u32,
}

impl AuditSummary {
    /// Builds the summary for a run, approving employees at `min_rate` percent.
    pub fn from_results(results: &[AuditResult], min_rate: Decimal) -> Self {
        let total_days_audited = results.iter().map(|r| r.total_days_audited).sum();
        let valid_days = results.iter().map(|r| r.valid_days).sum();

        Self {
            employees_audited: results.len() as u32,
            total_days_audited,
            valid_days,
            invalid_days: results.iter().map(|r| r.invalid_days).sum(),
            estimated_clocks: results.iter().map(|r| r.estimated_clocks).sum(),
            not_classified_clocks: results.iter().map(|r| r.not_classified_clocks).sum(),
            validation_rate: percentage(valid_days, total_days_audited),
            approved_employees: results.iter().filter(|r| r.is_approved(min_rate)).count()
                as u32,
        }
    }
}

fn percentage(part: u32, whole: u32) -> Decimal {
    if whole == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(part) * Decimal::ONE_HUNDRED / Decimal::from(whole)).round_dp(2)
}
