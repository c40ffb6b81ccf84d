//! Storage contracts for employees, shifts and punches.
//!
//! The audit pipeline only talks to these traits. The crate ships in-memory
//! implementations in [`memory`]; other backends implement the same traits.
//! Every operation returns [`EngineResult`] and the processor propagates
//! store errors unmodified.

mod memory;

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{Employee, Punch, Shift};

pub use memory::{InMemoryEmployeeStore, InMemoryPunchStore, InMemoryShiftStore};

/// Read access to employees.
pub trait EmployeeStore: Send + Sync {
    /// Returns every active employee, in store order.
    fn get_active_employees(&self) -> EngineResult<Vec<Employee>>;

    /// Returns the employee with `id`, if any.
    fn get_employee_by_id(&self, id: &str) -> EngineResult<Option<Employee>>;
}

/// Read and write access to punches.
pub trait PunchStore: Send + Sync {
    /// Returns the employee's punches whose `record_date` lies in
    /// `[start, end]`, whatever their classification.
    fn get_records_by_employee_and_period(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<Punch>>;

    /// Returns every punch recorded against `shift_id` on `date`.
    fn get_records_by_shift_and_date(
        &self,
        shift_id: &str,
        date: NaiveDate,
    ) -> EngineResult<Vec<Punch>>;

    /// Persists a new punch, assigning an id when absent, and returns the
    /// stored punch.
    fn save_record(&self, punch: Punch) -> EngineResult<Punch>;

    /// Replaces the stored punch with the same id.
    ///
    /// Fails with `RecordNotFound` when the id is absent or unknown.
    fn update_record(&self, punch: Punch) -> EngineResult<Punch>;
}

/// Read access to shifts.
pub trait ShiftStore: Send + Sync {
    /// Returns the shift with `id`, if any.
    fn get_shift_by_id(&self, id: &str) -> EngineResult<Option<Shift>>;

    /// Returns every shift, in store order.
    fn get_all_shifts(&self) -> EngineResult<Vec<Shift>>;
}
