//! HTTP request handlers for the Timesheet Audit Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::audit::TimesheetAuditProcessor;
use crate::config::{AuditConfig, AuditSettings};
use crate::error::EngineResult;
use crate::models::{AuditSummary, Employee, Punch, Shift};
use crate::store::{InMemoryEmployeeStore, InMemoryPunchStore, InMemoryShiftStore};

use super::request::AuditRequest;
use super::response::{ApiError, ApiErrorResponse, AuditResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/audit", post(audit_handler))
        .with_state(state)
}

/// Handler for POST /audit endpoint.
///
/// Audits the submitted punches and returns per-employee results.
async fn audit_handler(
    State(state): State<AppState>,
    payload: Result<Json<AuditRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing audit request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let start_time = Instant::now();
    match perform_audit(request, state.default_settings()) {
        Ok(response) => {
            info!(
                correlation_id = %correlation_id,
                audit_id = %response.audit_id,
                employees = response.summary.employees_audited,
                estimated = response.summary.estimated_clocks,
                not_classified = response.summary.not_classified_clocks,
                duration_us = start_time.elapsed().as_micros(),
                "Audit completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(response),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Audit failed"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}

/// Loads the request into fresh in-memory stores and runs the audit.
fn perform_audit(request: AuditRequest, defaults: &AuditSettings) -> EngineResult<AuditResponse> {
    let settings = request.settings.unwrap_or_else(|| defaults.clone());
    let config = AuditConfig::new(request.period.into(), settings)?;

    let employees: Vec<Employee> = request.employees.into_iter().map(Into::into).collect();
    let shifts: Vec<Shift> = request.shifts.into_iter().map(Into::into).collect();

    // Punches without a shift are attributed to their employee's roster.
    let rostered: HashMap<&str, &str> = employees
        .iter()
        .map(|e| (e.id.as_str(), e.shift_id.as_str()))
        .collect();
    let punches: Vec<Punch> = request
        .punches
        .into_iter()
        .map(|req| {
            let mut punch: Punch = req.into();
            if punch.shift_id.is_none() {
                punch.shift_id = rostered
                    .get(punch.employee_id.as_str())
                    .map(|s| s.to_string());
            }
            punch
        })
        .collect();

    let punch_store = InMemoryPunchStore::with_punches(punches)?;
    let processor = TimesheetAuditProcessor::new(
        Arc::new(InMemoryEmployeeStore::with_employees(employees)?),
        Arc::new(punch_store.clone()),
        Arc::new(InMemoryShiftStore::with_shifts(shifts)?),
        config.settings.clone(),
    )?;

    let results = processor.run(&config)?;
    let synthesized_punches: Vec<Punch> = punch_store
        .all()?
        .into_iter()
        .filter(Punch::is_synthesized)
        .collect();

    Ok(AuditResponse {
        audit_id: Uuid::new_v4(),
        audited_at: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        period: config.period,
        summary: AuditSummary::from_results(&results, config.settings.minimum_validation_rate),
        results,
        synthesized_punches,
    })
}
