//! Core data models for the Timesheet Audit Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod audit_period;
mod audit_result;
mod employee;
mod punch;
mod shift;

pub use audit_period::AuditPeriod;
pub use audit_result::{AuditResult, AuditSummary, Inconsistency, InconsistencyType};
pub use employee::Employee;
pub use punch::{Classification, ClockKind, Punch, ReferenceSource};
pub use shift::{MINUTES_PER_DAY, Shift, ShiftTolerance, minutes_since_midnight};
