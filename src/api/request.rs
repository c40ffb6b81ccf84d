//! Request types for the Timesheet Audit Engine API.
//!
//! This module defines the JSON request structures for the `/audit` endpoint.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::config::AuditSettings;
use crate::models::{AuditPeriod, ClockKind, Employee, Punch, Shift, ShiftTolerance};

fn default_true() -> bool {
    true
}

fn default_mandatory_clocks() -> usize {
    2
}

/// Request body for the `/audit` endpoint.
///
/// Carries the audit period, optional settings overriding the server
/// defaults, and the master data and raw punches to audit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRequest {
    /// The days to audit.
    pub period: AuditPeriodRequest,
    /// Settings for this run; the server defaults apply when absent.
    #[serde(default)]
    pub settings: Option<AuditSettings>,
    /// The employees to audit.
    pub employees: Vec<EmployeeRequest>,
    /// The shifts the employees are rostered on.
    pub shifts: Vec<ShiftRequest>,
    /// Raw clock punches.
    #[serde(default)]
    pub punches: Vec<PunchRequest>,
}

/// Audit period in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditPeriodRequest {
    /// The first audited day (inclusive).
    pub start_date: NaiveDate,
    /// The last audited day (inclusive).
    pub end_date: NaiveDate,
}

/// Employee information in an audit request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// Unique identifier for the employee.
    pub id: String,
    /// The employee's display name.
    #[serde(default)]
    pub name: String,
    /// Identifier in an external system.
    #[serde(default)]
    pub external_id: String,
    /// The shift the employee is rostered on.
    pub shift_id: String,
    /// Only active employees are audited.
    #[serde(default = "default_true")]
    pub active: bool,
    /// The date the employee was hired.
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
}

/// Shift information in an audit request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftRequest {
    /// Unique identifier for the shift.
    pub id: String,
    /// Human-readable name of the shift.
    #[serde(default)]
    pub name: String,
    /// The canonical entry time.
    pub start_time: NaiveTime,
    /// The canonical exit time.
    pub end_time: NaiveTime,
    /// Number of punches required per work day.
    #[serde(default = "default_mandatory_clocks")]
    pub mandatory_clocks: usize,
    /// Allowed drift around the shift boundaries.
    #[serde(default)]
    pub tolerance: Option<ShiftTolerance>,
    /// Informational flag for night shifts.
    #[serde(default)]
    pub is_night_shift: bool,
}

/// A raw clock punch in an audit request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PunchRequest {
    /// The employee who punched.
    pub employee_id: String,
    /// When the punch happened.
    pub timestamp: NaiveDateTime,
    /// The work day the punch belongs to; defaults to the timestamp's date.
    #[serde(default)]
    pub record_date: Option<NaiveDate>,
    /// The shift punched against; defaults to the employee's shift.
    #[serde(default)]
    pub shift_id: Option<String>,
    /// Entry or exit, when the clock device reports it.
    #[serde(default)]
    pub clock_kind: Option<ClockKind>,
}

impl From<AuditPeriodRequest> for AuditPeriod {
    fn from(req: AuditPeriodRequest) -> Self {
        AuditPeriod {
            start_date: req.start_date,
            end_date: req.end_date,
        }
    }
}

impl From<EmployeeRequest> for Employee {
    fn from(req: EmployeeRequest) -> Self {
        Employee {
            id: req.id,
            name: req.name,
            external_id: req.external_id,
            shift_id: req.shift_id,
            active: req.active,
            hire_date: req.hire_date,
        }
    }
}

impl From<ShiftRequest> for Shift {
    fn from(req: ShiftRequest) -> Self {
        Shift {
            id: req.id,
            name: req.name,
            start_time: req.start_time,
            end_time: req.end_time,
            mandatory_clocks: req.mandatory_clocks,
            tolerance: req.tolerance,
            is_night_shift: req.is_night_shift,
        }
    }
}

impl From<PunchRequest> for Punch {
    fn from(req: PunchRequest) -> Self {
        let mut punch = Punch::recorded(req.employee_id, req.shift_id, req.timestamp);
        if let Some(record_date) = req.record_date {
            punch.record_date = record_date;
        }
        punch.clock_kind = req.clock_kind;
        punch
    }
}
