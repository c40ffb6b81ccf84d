//! Reference punch search.
//!
//! When a punch is missing, evidence is gathered from four sources in fixed
//! priority order: the employee's own punches that day, the day before and
//! the day after, and the punches of colleagues on the same shift that day.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{ClockKind, Punch, ReferenceSource};
use crate::store::PunchStore;

use super::normalizer::infer_clock_kinds;

/// A candidate punch tagged with its inferred entry/exit kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    /// The recorded punch.
    pub punch: Punch,
    /// Entry or exit, as inferred from the punch's work day.
    pub clock_kind: ClockKind,
}

impl Reference {
    /// Tags recorded punches with their clock kinds.
    ///
    /// Synthesized punches are dropped. Kinds are inferred per employee and
    /// work day, so a mixed list from several employees is tagged correctly.
    pub fn tag_all(punches: Vec<Punch>) -> Vec<Reference> {
        let mut days: BTreeMap<(String, NaiveDate), Vec<Punch>> = BTreeMap::new();
        for punch in punches.into_iter().filter(Punch::is_recorded) {
            days.entry((punch.employee_id.clone(), punch.record_date))
                .or_default()
                .push(punch);
        }

        days.into_values()
            .flat_map(|mut day| {
                day.sort_by_key(|p| p.timestamp);
                let kinds = infer_clock_kinds(&day);
                day.into_iter()
                    .zip(kinds)
                    .map(|(punch, clock_kind)| Reference { punch, clock_kind })
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}

/// Evidence gathered for one missing punch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    /// The audited day the missing punch belongs to.
    pub target_date: NaiveDate,
    /// The employee's punches on the audited day.
    pub same_day: Vec<Reference>,
    /// The employee's punches on the day before.
    pub previous_day: Vec<Reference>,
    /// The employee's punches on the day after.
    pub next_day: Vec<Reference>,
    /// Other employees' punches on the same shift and day.
    pub other_employees: Vec<Reference>,
}

impl ReferenceData {
    /// Creates an empty evidence set for `target_date`.
    pub fn new(target_date: NaiveDate) -> Self {
        Self {
            target_date,
            same_day: Vec::new(),
            previous_day: Vec::new(),
            next_day: Vec::new(),
            other_employees: Vec::new(),
        }
    }

    /// Returns the references from one source.
    pub fn by_source(&self, source: ReferenceSource) -> &[Reference] {
        match source {
            ReferenceSource::SameDay => &self.same_day,
            ReferenceSource::PreviousDay => &self.previous_day,
            ReferenceSource::NextDay => &self.next_day,
            ReferenceSource::OtherEmployees => &self.other_employees,
        }
    }

    /// Iterates the sources in priority order with their references.
    pub fn sources(&self) -> impl Iterator<Item = (ReferenceSource, &[Reference])> {
        ReferenceSource::ALL
            .into_iter()
            .map(move |source| (source, self.by_source(source)))
    }

    /// Returns the number of references across all sources.
    pub fn total_count(&self) -> usize {
        self.sources().map(|(_, refs)| refs.len()).sum()
    }

    /// Returns true if no source produced a reference.
    pub fn is_empty(&self) -> bool {
        self.total_count() == 0
    }
}

/// Gathers [`ReferenceData`] from a punch store.
#[derive(Clone)]
pub struct ReferenceSearcher {
    punch_store: Arc<dyn PunchStore>,
}

impl ReferenceSearcher {
    /// Creates a searcher reading from `punch_store`.
    pub fn new(punch_store: Arc<dyn PunchStore>) -> Self {
        Self { punch_store }
    }

    /// Collects evidence for a punch missing on `missing_date`.
    ///
    /// Each source is queried independently, so a punch may appear in more
    /// than one list. Only recorded punches are returned.
    pub fn search_references(
        &self,
        employee_id: &str,
        missing_date: NaiveDate,
        shift_id: &str,
    ) -> EngineResult<ReferenceData> {
        let mut references = ReferenceData::new(missing_date);

        references.same_day = self.employee_day(employee_id, Some(missing_date))?;
        references.previous_day = self.employee_day(employee_id, missing_date.pred_opt())?;
        references.next_day = self.employee_day(employee_id, missing_date.succ_opt())?;

        let colleagues: Vec<Punch> = self
            .punch_store
            .get_records_by_shift_and_date(shift_id, missing_date)?
            .into_iter()
            .filter(|p| p.employee_id != employee_id)
            .collect();
        references.other_employees = Reference::tag_all(colleagues);

        Ok(references)
    }

    fn employee_day(
        &self,
        employee_id: &str,
        date: Option<NaiveDate>,
    ) -> EngineResult<Vec<Reference>> {
        let Some(date) = date else {
            return Ok(Vec::new());
        };
        let punches = self
            .punch_store
            .get_records_by_employee_and_period(employee_id, date, date)?;
        Ok(Reference::tag_all(punches))
    }
}
