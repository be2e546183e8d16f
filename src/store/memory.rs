//! In-memory store used by tests and single-process embedders.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, RwLock};

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{
    Assignment, AttendanceEvent, DailySummary, Employee, LeaveBalance, Shift,
};

use super::{
    AssignmentStore, BalanceStore, EmployeeDirectory, EventStore, ShiftStore, SummaryStore,
};

/// Event rows plus the uniqueness index, guarded by one lock so the
/// duplicate probe and the insert are a single atomic unit.
#[derive(Default)]
struct EventTable {
    rows: Vec<AttendanceEvent>,
    keys: HashSet<(Uuid, Uuid, DateTime<Utc>)>,
}

/// An in-process implementation of every storage port.
///
/// Reference data (shifts, assignments, employees) is seeded up front;
/// events, summaries, and balances are written by the engine. All
/// methods are safe under concurrent callers.
#[derive(Default)]
pub struct MemoryStore {
    shifts: RwLock<HashMap<Uuid, Shift>>,
    assignments: RwLock<HashMap<Uuid, Vec<Assignment>>>,
    employees: RwLock<HashMap<Uuid, Employee>>,
    events: Mutex<EventTable>,
    summaries: Mutex<HashMap<(Uuid, NaiveDate), DailySummary>>,
    balances: Mutex<HashMap<(Uuid, i32), LeaveBalance>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a shift definition.
    pub fn add_shift(&self, shift: Shift) {
        self.shifts.write().unwrap().insert(shift.id, shift);
    }

    /// Seeds an assignment.
    pub fn add_assignment(&self, assignment: Assignment) {
        self.assignments
            .write()
            .unwrap()
            .entry(assignment.employee_id)
            .or_default()
            .push(assignment);
    }

    /// Seeds an employee record.
    pub fn add_employee(&self, employee: Employee) {
        self.employees.write().unwrap().insert(employee.id, employee);
    }

    /// Returns the number of stored events.
    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().rows.len()
    }
}

impl ShiftStore for MemoryStore {
    fn get_shift(&self, id: Uuid) -> EngineResult<Option<Shift>> {
        Ok(self.shifts.read().unwrap().get(&id).cloned())
    }
}

impl AssignmentStore for MemoryStore {
    fn assignments_for(&self, employee_id: Uuid) -> EngineResult<Vec<Assignment>> {
        Ok(self
            .assignments
            .read()
            .unwrap()
            .get(&employee_id)
            .cloned()
            .unwrap_or_default())
    }
}

impl EventStore for MemoryStore {
    fn insert_unique(&self, event: AttendanceEvent) -> EngineResult<bool> {
        let mut table = self.events.lock().unwrap();
        let key = (event.employee_id, event.device_id, event.timestamp);
        if !table.keys.insert(key) {
            return Ok(false);
        }
        table.rows.push(event);
        Ok(true)
    }

    fn events_in_window(
        &self,
        employee_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> EngineResult<Vec<AttendanceEvent>> {
        let table = self.events.lock().unwrap();
        let mut events: Vec<AttendanceEvent> = table
            .rows
            .iter()
            .filter(|e| e.employee_id == employee_id && e.timestamp >= start && e.timestamp < end)
            .cloned()
            .collect();
        events.sort_by_key(|e| e.timestamp);
        Ok(events)
    }

    fn employees_with_events(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> EngineResult<Vec<Uuid>> {
        let table = self.events.lock().unwrap();
        let mut ids: Vec<Uuid> = table
            .rows
            .iter()
            .filter(|e| e.timestamp >= start && e.timestamp < end)
            .map(|e| e.employee_id)
            .collect();
        ids.sort();
        ids.dedup();
        Ok(ids)
    }
}

impl SummaryStore for MemoryStore {
    fn upsert(&self, summary: DailySummary) -> EngineResult<()> {
        self.summaries
            .lock()
            .unwrap()
            .insert((summary.employee_id, summary.date), summary);
        Ok(())
    }

    fn get_summary(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> EngineResult<Option<DailySummary>> {
        Ok(self
            .summaries
            .lock()
            .unwrap()
            .get(&(employee_id, date))
            .cloned())
    }
}

impl BalanceStore for MemoryStore {
    fn get_balance(&self, employee_id: Uuid, year: i32) -> EngineResult<Option<LeaveBalance>> {
        Ok(self
            .balances
            .lock()
            .unwrap()
            .get(&(employee_id, year))
            .cloned())
    }

    fn update(
        &self,
        employee_id: Uuid,
        year: i32,
        init: &dyn Fn() -> LeaveBalance,
        op: &mut dyn FnMut(&mut LeaveBalance) -> EngineResult<()>,
    ) -> EngineResult<LeaveBalance> {
        // The table lock is held for the whole read-modify-write, which
        // serializes concurrent updates for the same key.
        let mut balances = self.balances.lock().unwrap();
        let current = balances
            .entry((employee_id, year))
            .or_insert_with(init);

        // Mutate a copy so a failed op leaves the stored row untouched.
        let mut working = current.clone();
        op(&mut working)?;
        *current = working.clone();
        Ok(working)
    }
}

impl EmployeeDirectory for MemoryStore {
    fn get_employee(&self, id: Uuid) -> EngineResult<Option<Employee>> {
        Ok(self.employees.read().unwrap().get(&id).cloned())
    }

    fn find_by_code(&self, code: &str) -> EngineResult<Option<Employee>> {
        Ok(self
            .employees
            .read()
            .unwrap()
            .values()
            .find(|e| e.employee_code == code)
            .cloned())
    }
}
