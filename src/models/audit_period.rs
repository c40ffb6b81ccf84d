//! Audit period model.
//!
//! This module contains the [`AuditPeriod`] type defining the inclusive date
//! range an audit run covers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// An inclusive range of calendar days to audit.
///
/// # Example
///
/// ```
/// use timesheet_audit::models::AuditPeriod;
/// use chrono::NaiveDate;
///
/// let period = AuditPeriod::new(
///     NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 1, 22).unwrap(),
/// )
/// .unwrap();
///
/// assert_eq!(period.day_count(), 8);
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 1, 22).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditPeriod {
    /// The first audited day (inclusive).
    pub start_date: NaiveDate,
    /// The last audited day (inclusive).
    pub end_date: NaiveDate,
}

impl AuditPeriod {
    /// Creates a period, rejecting a start date after the end date.
    ///
    /// A single-day period (`start == end`) is allowed.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> EngineResult<Self> {
        let period = Self {
            start_date,
            end_date,
        };
        period.validate()?;
        Ok(period)
    }

    /// Checks that the period does not start after it ends.
    pub fn validate(&self) -> EngineResult<()> {
        if self.start_date > self.end_date {
            return Err(EngineError::InvalidPeriod {
                start: self.start_date,
                end: self.end_date,
            });
        }
        Ok(())
    }

    /// Checks if a given date falls within this period (inclusive).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Iterates the days of the period in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end_date = self.end_date;
        self.start_date
            .iter_days()
            .take_while(move |day| *day <= end_date)
    }

    /// Returns the number of days in the period.
    pub fn day_count(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}
