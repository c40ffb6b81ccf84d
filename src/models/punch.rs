//! Punch model and related types.
//!
//! A punch is a single timestamped clock event. Raw punches arrive from an
//! ingestion path with [`Classification::Normal`]; the audit pipeline
//! synthesizes [`Classification::Estimated`] and
//! [`Classification::NotClassified`] punches for gaps it finds.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The provenance tag of a punch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    /// Recorded by a clock device or ingestion path.
    Normal,
    /// Synthesized from reference evidence with enough confidence.
    Estimated,
    /// Synthesized placeholder for a punch that could not be estimated.
    NotClassified,
    /// Placeholder for a punch known to be absent.
    Missing,
}

/// Whether a punch opens or closes a work day.
///
/// # Example
///
/// ```
/// use timesheet_audit::models::ClockKind;
///
/// assert_eq!(ClockKind::Entry.to_string(), "entry");
/// assert_eq!(ClockKind::Exit.to_string(), "exit");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockKind {
    /// The first punch of a work day.
    Entry,
    /// The last punch of a work day.
    Exit,
}

impl fmt::Display for ClockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockKind::Entry => write!(f, "entry"),
            ClockKind::Exit => write!(f, "exit"),
        }
    }
}

/// An evidence source consulted when estimating a missing punch.
///
/// Variants are declared in search priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceSource {
    /// Same employee, same calendar date.
    SameDay,
    /// Same employee, the day before.
    PreviousDay,
    /// Same employee, the day after.
    NextDay,
    /// Other employees on the same shift, same calendar date.
    OtherEmployees,
}

impl ReferenceSource {
    /// All sources in priority order.
    pub const ALL: [ReferenceSource; 4] = [
        ReferenceSource::SameDay,
        ReferenceSource::PreviousDay,
        ReferenceSource::NextDay,
        ReferenceSource::OtherEmployees,
    ];
}

impl fmt::Display for ReferenceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceSource::SameDay => write!(f, "same_day"),
            ReferenceSource::PreviousDay => write!(f, "previous_day"),
            ReferenceSource::NextDay => write!(f, "next_day"),
            ReferenceSource::OtherEmployees => write!(f, "other_employees"),
        }
    }
}

fn default_classification() -> Classification {
    Classification::Normal
}

fn default_confidence() -> Decimal {
    Decimal::ONE
}

fn default_true() -> bool {
    true
}

/// A single clock punch.
///
/// Punches are keyed by `id` in every store; the id is assigned by the store
/// on save when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Punch {
    /// Store-assigned identifier.
    #[serde(default)]
    pub id: Option<Uuid>,
    /// The employee who punched.
    pub employee_id: String,
    /// When the punch happened.
    pub timestamp: NaiveDateTime,
    /// The work day the punch belongs to.
    ///
    /// For shifts crossing midnight this is the day the shift started, so it
    /// can differ from `timestamp.date()`.
    pub record_date: NaiveDate,
    /// The shift the punch was recorded against.
    #[serde(default)]
    pub shift_id: Option<String>,
    /// Entry or exit, when known.
    #[serde(default)]
    pub clock_kind: Option<ClockKind>,
    /// Provenance of the punch.
    #[serde(default = "default_classification")]
    pub classification: Classification,
    /// Trust in the punch time, from 0 to 1.
    #[serde(default = "default_confidence")]
    pub confidence_score: Decimal,
    /// Evidence sources an estimate was built from.
    #[serde(default)]
    pub reference_sources: Vec<ReferenceSource>,
    /// Whether the punch is considered valid.
    #[serde(default = "default_true")]
    pub is_valid: bool,
    /// Free-text notes.
    #[serde(default)]
    pub observations: String,
}

impl Punch {
    /// Creates a raw punch as a clock device would record it.
    ///
    /// The record date is the calendar date of the timestamp.
    ///
    /// # Examples
    ///
    /// ```
    /// use timesheet_audit::models::{Classification, Punch};
    /// use chrono::NaiveDateTime;
    ///
    /// let at = NaiveDateTime::parse_from_str("2026-01-15 08:05:00", "%Y-%m-%d %H:%M:%S").unwrap();
    /// let punch = Punch::recorded("emp_001", Some("morning".to_string()), at);
    /// assert_eq!(punch.classification, Classification::Normal);
    /// assert_eq!(punch.record_date, at.date());
    /// assert!(punch.id.is_none());
    /// ```
    pub fn recorded(
        employee_id: impl Into<String>,
        shift_id: Option<String>,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            id: None,
            employee_id: employee_id.into(),
            timestamp,
            record_date: timestamp.date(),
            shift_id,
            clock_kind: None,
            classification: Classification::Normal,
            confidence_score: Decimal::ONE,
            reference_sources: Vec::new(),
            is_valid: true,
            observations: String::new(),
        }
    }

    /// Creates an estimated punch for a gap on `record_date`.
    pub fn estimated(
        employee_id: impl Into<String>,
        shift_id: Option<String>,
        record_date: NaiveDate,
        clock_kind: ClockKind,
        timestamp: NaiveDateTime,
        confidence_score: Decimal,
        reference_sources: Vec<ReferenceSource>,
    ) -> Self {
        let observations = format!(
            "Estimated {} clock from {} reference source(s)",
            clock_kind,
            reference_sources.len()
        );
        Self {
            id: None,
            employee_id: employee_id.into(),
            timestamp,
            record_date,
            shift_id,
            clock_kind: Some(clock_kind),
            classification: Classification::Estimated,
            confidence_score,
            reference_sources,
            is_valid: true,
            observations,
        }
    }

    /// Creates a placeholder for a gap that could not be estimated.
    ///
    /// The timestamp is midnight of `record_date` and the confidence is zero.
    pub fn not_classified(
        employee_id: impl Into<String>,
        shift_id: Option<String>,
        record_date: NaiveDate,
        clock_kind: ClockKind,
        reason: &str,
    ) -> Self {
        Self {
            id: None,
            employee_id: employee_id.into(),
            timestamp: record_date.and_time(chrono::NaiveTime::MIN),
            record_date,
            shift_id,
            clock_kind: Some(clock_kind),
            classification: Classification::NotClassified,
            confidence_score: Decimal::ZERO,
            reference_sources: Vec::new(),
            is_valid: false,
            observations: format!("{} clock not classified: {}", clock_kind, reason),
        }
    }

    /// Returns true for punches recorded by a clock device.
    ///
    /// Only recorded punches count towards mandatory clocks and serve as
    /// estimation evidence.
    pub fn is_recorded(&self) -> bool {
        self.classification == Classification::Normal
    }

    /// Returns true for punches produced by the audit pipeline.
    pub fn is_synthesized(&self) -> bool {
        matches!(
            self.classification,
            Classification::Estimated | Classification::NotClassified
        )
    }

    /// Returns true if the punch was estimated.
    pub fn is_estimated(&self) -> bool {
        self.classification == Classification::Estimated
    }

    /// Returns true if the punch could not be classified.
    pub fn is_not_classified(&self) -> bool {
        self.classification == Classification::NotClassified
    }
}
