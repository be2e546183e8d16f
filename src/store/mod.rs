//! Storage capability traits.
//!
//! The engine owns no persistence; it operates through these ports,
//! implemented by the embedding application over its database of
//! choice. [`MemoryStore`] implements all of them over process-local
//! locks for tests and single-process embedders.
//!
//! Atomicity contracts the engine relies on:
//!
//! - [`EventStore::insert_unique`] is compare-and-insert on the
//!   (employee, device, timestamp) tuple; near-simultaneous identical
//!   inserts must collapse to one stored row.
//! - [`BalanceStore::update`] serializes read-modify-write per
//!   (employee, year); a failed closure must leave the stored row
//!   untouched.
//! - [`SummaryStore::upsert`] is create-or-replace keyed by
//!   (employee, date).

mod memory;

pub use memory::MemoryStore;

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{
    Assignment, AttendanceEvent, DailySummary, Employee, LeaveBalance, Shift,
};

/// Pure shift lookup.
pub trait ShiftStore: Send + Sync {
    /// Fetches a shift definition by id.
    fn get_shift(&self, id: Uuid) -> EngineResult<Option<Shift>>;
}

/// Assignment lookup for one employee.
pub trait AssignmentStore: Send + Sync {
    /// Returns every assignment on record for `employee_id`, in no
    /// particular order.
    fn assignments_for(&self, employee_id: Uuid) -> EngineResult<Vec<Assignment>>;
}

/// Append-mostly event storage.
pub trait EventStore: Send + Sync {
    /// Stores `event` unless an event with the same
    /// (employee, device, timestamp) tuple already exists.
    ///
    /// Returns `true` when the event was stored and `false` when the
    /// tuple was already present. The probe and insert are one atomic
    /// unit.
    fn insert_unique(&self, event: AttendanceEvent) -> EngineResult<bool>;

    /// Returns the events for `employee_id` with
    /// `start <= timestamp < end`, ordered by timestamp ascending.
    fn events_in_window(
        &self,
        employee_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> EngineResult<Vec<AttendanceEvent>>;

    /// Returns the distinct employees with at least one event in
    /// `start <= timestamp < end`.
    fn employees_with_events(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> EngineResult<Vec<Uuid>>;
}

/// Keyed, replace-on-write summary storage.
pub trait SummaryStore: Send + Sync {
    /// Creates or replaces the summary keyed by (employee, date).
    fn upsert(&self, summary: DailySummary) -> EngineResult<()>;

    /// Fetches the summary for (employee, date).
    fn get_summary(&self, employee_id: Uuid, date: NaiveDate)
    -> EngineResult<Option<DailySummary>>;
}

/// Read-modify-write leave balance storage.
pub trait BalanceStore: Send + Sync {
    /// Fetches the balance row for (employee, year) without creating
    /// it.
    fn get_balance(&self, employee_id: Uuid, year: i32) -> EngineResult<Option<LeaveBalance>>;

    /// Applies `op` to the balance for (employee, year), creating the
    /// row from `init` first when absent.
    ///
    /// The whole call is serialized per key: no concurrent `update` for
    /// the same (employee, year) observes an intermediate state. When
    /// `op` returns an error the stored row is left exactly as it was.
    fn update(
        &self,
        employee_id: Uuid,
        year: i32,
        init: &dyn Fn() -> LeaveBalance,
        op: &mut dyn FnMut(&mut LeaveBalance) -> EngineResult<()>,
    ) -> EngineResult<LeaveBalance>;
}

/// Employee existence and external-code lookup.
pub trait EmployeeDirectory: Send + Sync {
    /// Fetches an employee by id.
    fn get_employee(&self, id: Uuid) -> EngineResult<Option<Employee>>;

    /// Fetches an employee by the external code devices report.
    fn find_by_code(&self, code: &str) -> EngineResult<Option<Employee>>;
}
