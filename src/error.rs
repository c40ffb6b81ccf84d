//! Error types for the Timesheet Audit Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur before or during an audit run.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Timesheet Audit Engine.
///
/// Insufficient evidence and low confidence are not errors: they surface as
/// `NotClassified` punches in the audit result. Errors are limited to bad
/// configuration, bad master data and store failures.
///
/// # Example
///
/// ```
/// use timesheet_audit::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/audit.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/audit.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The audit period starts after it ends.
    #[error("Invalid audit period: start {start} is after end {end}")]
    InvalidPeriod {
        /// The requested start date.
        start: NaiveDate,
        /// The requested end date.
        end: NaiveDate,
    },

    /// An audit setting is outside its allowed range.
    #[error("Invalid setting '{field}': {message}")]
    InvalidSetting {
        /// The setting that was rejected.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// A shift definition was invalid or contained inconsistent data.
    #[error("Invalid shift '{shift_id}': {message}")]
    InvalidShift {
        /// The ID of the invalid shift.
        shift_id: String,
        /// A description of what made the shift invalid.
        message: String,
    },

    /// A punch to update does not exist in the store.
    #[error("Punch record not found: {id}")]
    RecordNotFound {
        /// The id that was looked up.
        id: String,
    },

    /// The backing store failed.
    #[error("Store error: {message}")]
    StoreError {
        /// A description of the store failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
