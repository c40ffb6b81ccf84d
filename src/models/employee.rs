//! Employee model.
//!
//! This module defines the Employee struct for representing workers whose
//! punches are audited.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

fn default_active() -> bool {
    true
}

/// Represents an employee subject to timesheet auditing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// The employee's display name.
    pub name: String,
    /// Identifier in an external system (e.g. a national ID or payroll number).
    pub external_id: String,
    /// The shift the employee is rostered on.
    pub shift_id: String,
    /// Only active employees enter an audit run.
    #[serde(default = "default_active")]
    pub active: bool,
    /// The date the employee was hired.
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
}
