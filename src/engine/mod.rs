//! The attendance computation and reconciliation engine.
//!
//! [`AttendanceEngine`] ties the storage ports, the injectable clock,
//! and the operating policy together and exposes the engine's
//! operations: interactive check-in/check-out, device batch sync, daily
//! aggregation, and the leave ledger. The underlying computations
//! (assignment resolution, event classification) are pure functions in
//! the submodules and usable on their own.

mod aggregate;
mod classifier;
mod ingest;
mod ledger;
mod resolver;

pub use classifier::classify;
pub use ingest::SyncReport;
pub use resolver::select_assignment;

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use uuid::Uuid;

use crate::clock::Clock;
use crate::config::EnginePolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, Shift, localize_wall_clock};
use crate::store::{
    AssignmentStore, BalanceStore, EmployeeDirectory, EventStore, ShiftStore, SummaryStore,
};

/// The full set of storage capabilities the engine operates through.
///
/// Blanket-implemented for any type providing all six ports, so an
/// embedder can hand the engine one store object (like
/// [`crate::store::MemoryStore`]) or a composite of its own.
pub trait EngineStore:
    ShiftStore + AssignmentStore + EventStore + SummaryStore + BalanceStore + EmployeeDirectory
{
}

impl<T> EngineStore for T where
    T: ShiftStore + AssignmentStore + EventStore + SummaryStore + BalanceStore + EmployeeDirectory
{
}

/// The attendance engine facade.
///
/// Cheap to share: the store sits behind an `Arc` and every operation
/// takes `&self`, so one engine value serves concurrent callers.
pub struct AttendanceEngine<S, C> {
    store: Arc<S>,
    clock: C,
    policy: EnginePolicy,
}

impl<S: EngineStore, C: Clock> AttendanceEngine<S, C> {
    /// Creates an engine over `store` with the given clock and policy.
    pub fn new(store: Arc<S>, clock: C, policy: EnginePolicy) -> Self {
        Self {
            store,
            clock,
            policy,
        }
    }

    /// Returns the operating policy.
    pub fn policy(&self) -> &EnginePolicy {
        &self.policy
    }

    /// Returns the shift effective for `employee_id` on `date`, or
    /// `None` when no assignment window covers the date.
    ///
    /// Overlapping windows resolve deterministically; see
    /// [`select_assignment`]. A dangling shift reference on the winning
    /// assignment is an error, not an empty result.
    pub fn resolve_shift(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> EngineResult<Option<Shift>> {
        let assignments = self.store.assignments_for(employee_id)?;
        let Some(assignment) = select_assignment(&assignments, date) else {
            return Ok(None);
        };
        match self.store.get_shift(assignment.shift_id)? {
            Some(shift) => Ok(Some(shift)),
            None => Err(EngineError::ShiftNotFound {
                shift_id: assignment.shift_id,
            }),
        }
    }

    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Looks up an employee, surfacing absence as an error.
    pub(crate) fn require_employee(&self, employee_id: Uuid) -> EngineResult<Employee> {
        self.store
            .get_employee(employee_id)?
            .ok_or(EngineError::EmployeeNotFound { employee_id })
    }

    /// Returns the employee's operating timezone, falling back to the
    /// policy default.
    pub(crate) fn zone_of(&self, employee: &Employee) -> Tz {
        employee.timezone_or(self.policy.default_timezone)
    }

    /// Returns the UTC half-open window `[start, end)` covering the
    /// local calendar `date` in `tz`.
    pub(crate) fn day_window(&self, date: NaiveDate, tz: Tz) -> (DateTime<Utc>, DateTime<Utc>) {
        let midnight = NaiveTime::MIN;
        let start = localize_wall_clock(date.and_time(midnight), &tz);
        let next = date.succ_opt().unwrap_or(date);
        let end = localize_wall_clock(next.and_time(midnight), &tz);
        (start, end)
    }
}
