//! HTTP API module for the Timesheet Audit Engine.
//!
//! This module provides the REST endpoint that audits a batch of employees,
//! shifts and raw punches held in request-scoped in-memory stores.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AuditPeriodRequest, AuditRequest, EmployeeRequest, PunchRequest, ShiftRequest};
pub use response::{ApiError, AuditResponse};
pub use state::AppState;
