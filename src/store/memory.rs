//! In-memory store implementations.
//!
//! Each store keeps its records in insertion order behind an
//! `Arc<RwLock<..>>`: concurrent reads are allowed and writes serialize.
//! Clones share the same storage.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, Punch, Shift};

use super::{EmployeeStore, PunchStore, ShiftStore};

fn read<T>(lock: &RwLock<T>) -> EngineResult<RwLockReadGuard<'_, T>> {
    lock.read().map_err(|e| EngineError::StoreError {
        message: format!("lock poisoned: {}", e),
    })
}

fn write<T>(lock: &RwLock<T>) -> EngineResult<RwLockWriteGuard<'_, T>> {
    lock.write().map_err(|e| EngineError::StoreError {
        message: format!("lock poisoned: {}", e),
    })
}

/// Employees held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEmployeeStore {
    employees: Arc<RwLock<Vec<Employee>>>,
}

impl InMemoryEmployeeStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `employees`, later duplicates replacing
    /// earlier ones.
    pub fn with_employees(employees: impl IntoIterator<Item = Employee>) -> EngineResult<Self> {
        let store = Self::new();
        for employee in employees {
            store.insert(employee)?;
        }
        Ok(store)
    }

    /// Adds an employee, replacing any employee with the same id in place.
    pub fn insert(&self, employee: Employee) -> EngineResult<()> {
        let mut employees = write(&self.employees)?;
        match employees.iter_mut().find(|e| e.id == employee.id) {
            Some(existing) => *existing = employee,
            None => employees.push(employee),
        }
        Ok(())
    }
}

impl EmployeeStore for InMemoryEmployeeStore {
    fn get_active_employees(&self) -> EngineResult<Vec<Employee>> {
        let employees = read(&self.employees)?;
        Ok(employees.iter().filter(|e| e.active).cloned().collect())
    }

    fn get_employee_by_id(&self, id: &str) -> EngineResult<Option<Employee>> {
        let employees = read(&self.employees)?;
        Ok(employees.iter().find(|e| e.id == id).cloned())
    }
}

/// Shifts held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryShiftStore {
    shifts: Arc<RwLock<Vec<Shift>>>,
}

impl InMemoryShiftStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `shifts`, validating each one.
    pub fn with_shifts(shifts: impl IntoIterator<Item = Shift>) -> EngineResult<Self> {
        let store = Self::new();
        for shift in shifts {
            store.insert(shift)?;
        }
        Ok(store)
    }

    /// Adds a shift, replacing any shift with the same id in place.
    ///
    /// Rejects shifts that fail [`Shift::validate`].
    pub fn insert(&self, shift: Shift) -> EngineResult<()> {
        shift.validate()?;
        let mut shifts = write(&self.shifts)?;
        match shifts.iter_mut().find(|s| s.id == shift.id) {
            Some(existing) => *existing = shift,
            None => shifts.push(shift),
        }
        Ok(())
    }
}

impl ShiftStore for InMemoryShiftStore {
    fn get_shift_by_id(&self, id: &str) -> EngineResult<Option<Shift>> {
        let shifts = read(&self.shifts)?;
        Ok(shifts.iter().find(|s| s.id == id).cloned())
    }

    fn get_all_shifts(&self) -> EngineResult<Vec<Shift>> {
        Ok(read(&self.shifts)?.clone())
    }
}

/// Punches held in memory.
///
/// # Example
///
/// ```
/// use timesheet_audit::models::Punch;
/// use timesheet_audit::store::{InMemoryPunchStore, PunchStore};
/// use chrono::NaiveDateTime;
///
/// let store = InMemoryPunchStore::new();
/// let at = NaiveDateTime::parse_from_str("2026-01-15 08:05:00", "%Y-%m-%d %H:%M:%S").unwrap();
///
/// let saved = store.save_record(Punch::recorded("emp_001", None, at)).unwrap();
/// assert!(saved.id.is_some());
/// assert_eq!(store.len().unwrap(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryPunchStore {
    punches: Arc<RwLock<Vec<Punch>>>,
}

impl InMemoryPunchStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `punches`, assigning ids where absent.
    pub fn with_punches(punches: impl IntoIterator<Item = Punch>) -> EngineResult<Self> {
        let store = Self::new();
        for punch in punches {
            store.save_record(punch)?;
        }
        Ok(store)
    }

    /// Returns the number of stored punches.
    pub fn len(&self) -> EngineResult<usize> {
        Ok(read(&self.punches)?.len())
    }

    /// Returns true if no punch is stored.
    pub fn is_empty(&self) -> EngineResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Returns every stored punch in insertion order.
    pub fn all(&self) -> EngineResult<Vec<Punch>> {
        Ok(read(&self.punches)?.clone())
    }
}

impl PunchStore for InMemoryPunchStore {
    fn get_records_by_employee_and_period(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<Punch>> {
        let punches = read(&self.punches)?;
        Ok(punches
            .iter()
            .filter(|p| p.employee_id == employee_id)
            .filter(|p| p.record_date >= start && p.record_date <= end)
            .cloned()
            .collect())
    }

    fn get_records_by_shift_and_date(
        &self,
        shift_id: &str,
        date: NaiveDate,
    ) -> EngineResult<Vec<Punch>> {
        let punches = read(&self.punches)?;
        Ok(punches
            .iter()
            .filter(|p| p.shift_id.as_deref() == Some(shift_id))
            .filter(|p| p.record_date == date)
            .cloned()
            .collect())
    }

    fn save_record(&self, mut punch: Punch) -> EngineResult<Punch> {
        if punch.id.is_none() {
            punch.id = Some(Uuid::new_v4());
        }
        write(&self.punches)?.push(punch.clone());
        Ok(punch)
    }

    fn update_record(&self, punch: Punch) -> EngineResult<Punch> {
        let id = punch.id.ok_or_else(|| EngineError::RecordNotFound {
            id: "<none>".to_string(),
        })?;

        let mut punches = write(&self.punches)?;
        let existing = punches
            .iter_mut()
            .find(|p| p.id == Some(id))
            .ok_or_else(|| EngineError::RecordNotFound { id: id.to_string() })?;
        *existing = punch.clone();
        Ok(punch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDateTime, NaiveTime};

    fn make_datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn create_employee(id: &str, active: bool) -> Employee {
        Employee {
            id: id.to_string(),
            name: format!("Employee {}", id),
            external_id: format!("ext_{}", id),
            shift_id: "morning".to_string(),
            active,
            hire_date: None,
        }
    }

    fn create_shift(id: &str) -> Shift {
        Shift {
            id: id.to_string(),
            name: "Morning".to_string(),
            start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            mandatory_clocks: 2,
            tolerance: None,
            is_night_shift: false,
        }
    }

    fn punch(employee_id: &str, at: &str) -> Punch {
        Punch::recorded(employee_id, Some("morning".to_string()), make_datetime(at))
    }

    #[test]
    fn test_active_employees_in_insertion_order() {
        let store = InMemoryEmployeeStore::with_employees(vec![
            create_employee("emp_002", true),
            create_employee("emp_001", true),
            create_employee("emp_003", false),
        ])
        .unwrap();

        let ids: Vec<String> = store
            .get_active_employees()
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["emp_002", "emp_001"]);
    }

    #[test]
    fn test_get_employee_by_id() {
        let store = InMemoryEmployeeStore::with_employees(vec![create_employee("emp_001", false)])
            .unwrap();

        assert!(store.get_employee_by_id("emp_001").unwrap().is_some());
        assert!(store.get_employee_by_id("emp_999").unwrap().is_none());
    }

    #[test]
    fn test_insert_employee_replaces_same_id() {
        let store = InMemoryEmployeeStore::new();
        store.insert(create_employee("emp_001", true)).unwrap();
        store.insert(create_employee("emp_001", false)).unwrap();

        assert!(store.get_active_employees().unwrap().is_empty());
        assert!(store.get_employee_by_id("emp_001").unwrap().is_some());
    }

    #[test]
    fn test_shift_store_rejects_invalid_shift() {
        let mut shift = create_shift("broken");
        shift.mandatory_clocks = 0;

        let result = InMemoryShiftStore::with_shifts(vec![shift]);
        assert!(matches!(result, Err(EngineError::InvalidShift { .. })));
    }

    #[test]
    fn test_shift_lookup() {
        let store =
            InMemoryShiftStore::with_shifts(vec![create_shift("morning"), create_shift("late")])
                .unwrap();

        assert_eq!(store.get_all_shifts().unwrap().len(), 2);
        assert_eq!(
            store.get_shift_by_id("late").unwrap().map(|s| s.id),
            Some("late".to_string())
        );
        assert!(store.get_shift_by_id("night").unwrap().is_none());
    }

    #[test]
    fn test_save_record_assigns_id_when_absent() {
        let store = InMemoryPunchStore::new();
        let saved = store.save_record(punch("emp_001", "2026-01-15 08:00:00")).unwrap();
        assert!(saved.id.is_some());

        let id = Uuid::new_v4();
        let mut with_id = punch("emp_001", "2026-01-15 17:00:00");
        with_id.id = Some(id);
        let saved = store.save_record(with_id).unwrap();
        assert_eq!(saved.id, Some(id));
    }

    #[test]
    fn test_records_by_employee_and_period_is_inclusive() {
        let store = InMemoryPunchStore::with_punches(vec![
            punch("emp_001", "2026-01-14 08:00:00"),
            punch("emp_001", "2026-01-15 08:00:00"),
            punch("emp_001", "2026-01-16 17:00:00"),
            punch("emp_001", "2026-01-17 08:00:00"),
            punch("emp_002", "2026-01-15 08:00:00"),
        ])
        .unwrap();

        let records = store
            .get_records_by_employee_and_period(
                "emp_001",
                make_date("2026-01-15"),
                make_date("2026-01-16"),
            )
            .unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|p| p.employee_id == "emp_001"));
    }

    #[test]
    fn test_records_by_shift_and_date() {
        let mut other_shift = punch("emp_003", "2026-01-15 08:00:00");
        other_shift.shift_id = Some("late".to_string());

        let store = InMemoryPunchStore::with_punches(vec![
            punch("emp_001", "2026-01-15 08:00:00"),
            punch("emp_002", "2026-01-15 08:10:00"),
            punch("emp_002", "2026-01-16 08:10:00"),
            other_shift,
        ])
        .unwrap();

        let records = store
            .get_records_by_shift_and_date("morning", make_date("2026-01-15"))
            .unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_update_record_replaces_in_place() {
        let store = InMemoryPunchStore::new();
        let mut saved = store.save_record(punch("emp_001", "2026-01-15 08:00:00")).unwrap();
        saved.observations = "corrected".to_string();

        store.update_record(saved.clone()).unwrap();

        let all = store.all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].observations, "corrected");
    }

    #[test]
    fn test_update_unknown_record_fails() {
        let store = InMemoryPunchStore::new();
        let mut unknown = punch("emp_001", "2026-01-15 08:00:00");

        assert!(matches!(
            store.update_record(unknown.clone()),
            Err(EngineError::RecordNotFound { .. })
        ));

        unknown.id = Some(Uuid::new_v4());
        assert!(matches!(
            store.update_record(unknown),
            Err(EngineError::RecordNotFound { .. })
        ));
    }

    #[test]
    fn test_clone_shares_storage() {
        let store = InMemoryPunchStore::new();
        let clone = store.clone();
        clone.save_record(punch("emp_001", "2026-01-15 08:00:00")).unwrap();

        assert_eq!(store.len().unwrap(), 1);
        assert!(!store.is_empty().unwrap());
    }
}
