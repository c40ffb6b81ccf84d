//! The audit run orchestrator.
//!
//! [`TimesheetAuditProcessor`] walks every active employee through every day
//! of an audit period, validates mandatory clocks, fills gaps with estimated
//! or unclassified punches and accumulates one [`AuditResult`] per employee.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::config::{AuditConfig, AuditSettings};
use crate::error::EngineResult;
use crate::models::{
    AuditPeriod, AuditResult, Classification, ClockKind, Employee, InconsistencyType, Punch, Shift,
};
use crate::store::{EmployeeStore, PunchStore, ShiftStore};

use super::estimation::EstimationCalculator;
use super::mandatory_clocks::validate_day;
use super::normalizer::normalize_and_group;
use super::punch_checks::{find_duplicate_punches, find_out_of_shift_punches};
use super::reference_search::ReferenceSearcher;
use super::reference_validator::ReferenceValidator;

/// Synthesized punches already in the store, keyed by audited day and kind.
type ExistingGaps = HashMap<(NaiveDate, ClockKind), Punch>;

/// Runs audits over the configured stores.
///
/// The processor is synchronous. Days are processed in ascending order and
/// synthesized punches never count as evidence or presence, so a run's
/// output does not depend on punches it wrote itself.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use timesheet_audit::audit::TimesheetAuditProcessor;
/// use timesheet_audit::config::AuditSettings;
/// use timesheet_audit::store::{InMemoryEmployeeStore, InMemoryPunchStore, InMemoryShiftStore};
/// use chrono::NaiveDate;
///
/// let processor = TimesheetAuditProcessor::new(
///     Arc::new(InMemoryEmployeeStore::new()),
///     Arc::new(InMemoryPunchStore::new()),
///     Arc::new(InMemoryShiftStore::new()),
///     AuditSettings::default(),
/// )?;
///
/// let results = processor.process_period(
///     NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 1, 22).unwrap(),
/// )?;
/// assert!(results.is_empty());
/// # Ok::<(), timesheet_audit::error::EngineError>(())
/// ```
#[derive(Clone)]
pub struct TimesheetAuditProcessor {
    employee_store: Arc<dyn EmployeeStore>,
    punch_store: Arc<dyn PunchStore>,
    shift_store: Arc<dyn ShiftStore>,
    settings: AuditSettings,
    searcher: ReferenceSearcher,
    reference_validator: ReferenceValidator,
    calculator: EstimationCalculator,
}

impl TimesheetAuditProcessor {
    /// Creates a processor, rejecting out-of-range settings.
    pub fn new(
        employee_store: Arc<dyn EmployeeStore>,
        punch_store: Arc<dyn PunchStore>,
        shift_store: Arc<dyn ShiftStore>,
        settings: AuditSettings,
    ) -> EngineResult<Self> {
        settings.validate()?;

        Ok(Self {
            searcher: ReferenceSearcher::new(Arc::clone(&punch_store)),
            reference_validator: ReferenceValidator::new(settings.minimum_references),
            calculator: EstimationCalculator::from_settings(&settings),
            employee_store,
            punch_store,
            shift_store,
            settings,
        })
    }

    /// Returns the settings this processor runs with.
    pub fn settings(&self) -> &AuditSettings {
        &self.settings
    }

    /// Audits the period and settings held by `config`.
    pub fn run(&self, config: &AuditConfig) -> EngineResult<Vec<AuditResult>> {
        config.validate()?;

        if config.settings == self.settings {
            return self.audit(&config.period);
        }

        let processor = Self::new(
            Arc::clone(&self.employee_store),
            Arc::clone(&self.punch_store),
            Arc::clone(&self.shift_store),
            config.settings.clone(),
        )?;
        processor.audit(&config.period)
    }

    /// Audits every active employee over `[start, end]`.
    ///
    /// Returns one result per active employee, in store order.
    pub fn process_period(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<AuditResult>> {
        let period = AuditPeriod::new(start, end)?;
        self.audit(&period)
    }

    fn audit(&self, period: &AuditPeriod) -> EngineResult<Vec<AuditResult>> {
        let employees = self.employee_store.get_active_employees()?;

        info!(
            start = %period.start_date,
            end = %period.end_date,
            employees = employees.len(),
            strategy = ?self.settings.estimation_strategy,
            "Starting timesheet audit"
        );

        let mut results = Vec::with_capacity(employees.len());
        for employee in &employees {
            results.push(self.process_employee(employee, period)?);
        }

        info!(
            employees = results.len(),
            estimated = results.iter().map(|r| r.estimated_clocks).sum::<u32>(),
            not_classified = results.iter().map(|r| r.not_classified_clocks).sum::<u32>(),
            "Timesheet audit complete"
        );

        Ok(results)
    }

    /// Audits one employee over `period`.
    ///
    /// An employee whose shift cannot be found, or whose shift fails
    /// [`Shift::validate`], gets an empty result with an observation instead
    /// of an error.
    pub fn process_employee(
        &self,
        employee: &Employee,
        period: &AuditPeriod,
    ) -> EngineResult<AuditResult> {
        let mut result = AuditResult::new(employee.id.clone(), period);

        let Some(shift) = self.shift_store.get_shift_by_id(&employee.shift_id)? else {
            warn!(
                employee_id = %employee.id,
                shift_id = %employee.shift_id,
                "Shift not found, employee not audited"
            );
            result.observations = Some(format!(
                "Shift '{}' not found; no days audited",
                employee.shift_id
            ));
            return Ok(result);
        };
        if let Err(err) = shift.validate() {
            warn!(
                employee_id = %employee.id,
                shift_id = %shift.id,
                error = %err,
                "Shift unusable, employee not audited"
            );
            result.observations = Some(format!("{}; no days audited", err));
            return Ok(result);
        }

        let punches = self.punch_store.get_records_by_employee_and_period(
            &employee.id,
            period.start_date,
            period.end_date,
        )?;

        let mut existing = ExistingGaps::new();
        let mut recorded = Vec::with_capacity(punches.len());
        for punch in punches {
            match (punch.is_recorded(), punch.clock_kind) {
                (true, _) => recorded.push(punch),
                (false, Some(kind)) => {
                    existing.entry((punch.record_date, kind)).or_insert(punch);
                }
                (false, None) => {}
            }
        }

        let days = normalize_and_group(recorded);

        for date in period.days() {
            let day = days.get(&date).map(Vec::as_slice).unwrap_or(&[]);
            self.process_day(employee, &shift, date, day, &existing, &mut result)?;
        }

        info!(
            employee_id = %employee.id,
            days = result.total_days_audited,
            valid = result.valid_days,
            invalid = result.invalid_days,
            estimated = result.estimated_clocks,
            not_classified = result.not_classified_clocks,
            validation_rate = %result.validation_rate(),
            "Employee audited"
        );

        Ok(result)
    }

    fn process_day(
        &self,
        employee: &Employee,
        shift: &Shift,
        date: NaiveDate,
        day: &[Punch],
        existing: &ExistingGaps,
        result: &mut AuditResult,
    ) -> EngineResult<()> {
        result.total_days_audited += 1;
        self.check_punches(shift, date, day, result);

        let validation = validate_day(shift, day);
        if validation.is_valid {
            result.valid_days += 1;
            return Ok(());
        }

        result.invalid_days += 1;
        let mut details = format!(
            "{} of {} mandatory clocks recorded",
            validation.recorded_clocks, shift.mandatory_clocks
        );
        if !validation.missing_kinds.is_empty() {
            let kinds: Vec<String> = validation
                .missing_kinds
                .iter()
                .map(|k| k.to_string())
                .collect();
            details.push_str(&format!("; missing: {}", kinds.join(", ")));
        }
        result.add_inconsistency(date, InconsistencyType::IncompleteClocks, details);

        for &kind in &validation.missing_kinds {
            match existing.get(&(date, kind)) {
                Some(previous) if !self.settings.reestimate_synthesized => {
                    debug!(
                        employee_id = %employee.id,
                        date = %date,
                        clock_kind = %kind,
                        "Reusing punch synthesized by an earlier run"
                    );
                    record_outcome(result, date, previous);
                }
                previous => {
                    self.fill_gap(employee, shift, date, kind, previous, result)?;
                }
            }
        }

        Ok(())
    }

    fn check_punches(&self, shift: &Shift, date: NaiveDate, day: &[Punch], result: &mut AuditResult) {
        if self.settings.flag_duplicate_punches {
            for timestamp in find_duplicate_punches(day) {
                result.add_inconsistency(
                    date,
                    InconsistencyType::DuplicateClocks,
                    format!("Punch at {} recorded more than once", timestamp),
                );
            }
        }

        if self.settings.check_shift_boundaries {
            for punch in find_out_of_shift_punches(shift, date, day) {
                result.add_inconsistency(
                    date,
                    InconsistencyType::OutOfShiftTime,
                    format!(
                        "Punch at {} outside shift '{}' ({}-{}, tolerance {} min)",
                        punch.timestamp,
                        shift.id,
                        shift.start_time.format("%H:%M"),
                        shift.end_time.format("%H:%M"),
                        shift.tolerance_minutes()
                    ),
                );
            }
        }
    }

    /// Estimates one missing punch and persists the outcome.
    ///
    /// `previous` is the punch an earlier run synthesized for the same gap;
    /// when present it is overwritten instead of adding a new punch.
    fn fill_gap(
        &self,
        employee: &Employee,
        shift: &Shift,
        date: NaiveDate,
        kind: ClockKind,
        previous: Option<&Punch>,
        result: &mut AuditResult,
    ) -> EngineResult<()> {
        let shift_id = Some(shift.id.clone());
        let references = self
            .searcher
            .search_references(&employee.id, date, &shift.id)?;

        let mut punch = if !self.reference_validator.is_valid(&references) {
            Punch::not_classified(
                employee.id.clone(),
                shift_id,
                date,
                kind,
                &format!(
                    "{} reference punch(es) found, {} required",
                    references.total_count(),
                    self.reference_validator.minimum_references()
                ),
            )
        } else {
            let estimate = self.calculator.calculate(&references, shift, kind);
            debug!(
                employee_id = %employee.id,
                date = %date,
                clock_kind = %kind,
                references = references.total_count(),
                confidence = %estimate.confidence,
                reasoning = %estimate.reasoning,
                "Estimated missing clock"
            );

            match estimate.timestamp {
                Some(timestamp) if self.calculator.accepts(&estimate) => {
                    let mut punch = Punch::estimated(
                        employee.id.clone(),
                        shift_id,
                        date,
                        kind,
                        timestamp,
                        estimate.confidence,
                        estimate.sources,
                    );
                    punch.observations = format!("{} ({})", punch.observations, estimate.reasoning);
                    punch
                }
                Some(_) => Punch::not_classified(
                    employee.id.clone(),
                    shift_id,
                    date,
                    kind,
                    &format!(
                        "confidence {} below threshold {}",
                        estimate.confidence,
                        self.calculator.minimum_confidence()
                    ),
                ),
                None => Punch::not_classified(
                    employee.id.clone(),
                    shift_id,
                    date,
                    kind,
                    &estimate.reasoning,
                ),
            }
        };

        if punch.is_not_classified() {
            warn!(
                employee_id = %employee.id,
                date = %date,
                clock_kind = %kind,
                reason = %punch.observations,
                "Missing clock could not be estimated"
            );
        }

        let stored = match previous.and_then(|p| p.id) {
            Some(id) => {
                punch.id = Some(id);
                self.punch_store.update_record(punch)?
            }
            None => self.punch_store.save_record(punch)?,
        };

        record_outcome(result, date, &stored);
        Ok(())
    }
}

/// Counts a synthesized punch in the result.
fn record_outcome(result: &mut AuditResult, date: NaiveDate, punch: &Punch) {
    match punch.classification {
        Classification::Estimated => result.estimated_clocks += 1,
        Classification::NotClassified | Classification::Missing | Classification::Normal => {
            result.not_classified_clocks += 1;
            let kind = punch
                .clock_kind
                .map(|k| k.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            result.add_inconsistency(
                date,
                InconsistencyType::MissingClocks,
                format!("{} clock could not be estimated", kind),
            );
        }
    }
}
