//! Leave-balance ledger and the leave request workflow.
//!
//! Debit and credit are read-modify-write operations serialized per
//! (employee, year) by the balance store, so concurrent approvals for
//! the same employee can never drive a balance negative.

use tracing::info;
use uuid::Uuid;

use crate::clock::Clock;
use crate::error::{EngineError, EngineResult};
use crate::models::{LeaveBalance, LeaveRequest, LeaveStatus, LeaveType, TypeBalance};

use super::{AttendanceEngine, EngineStore};

impl<S: EngineStore, C: Clock> AttendanceEngine<S, C> {
    /// Debits `days` of `leave_type` from the (employee, year) balance.
    ///
    /// The balance row is lazily created with policy defaults on first
    /// access. Non-counted leave types (unpaid, maternity, ...) pass
    /// through without touching any counter.
    ///
    /// # Errors
    ///
    /// [`EngineError::InsufficientBalance`] when fewer than `days`
    /// remain for the type; the stored balance is left untouched.
    pub fn debit_leave(
        &self,
        employee_id: Uuid,
        year: i32,
        leave_type: LeaveType,
        days: i64,
    ) -> EngineResult<LeaveBalance> {
        let now = self.now();
        let init = self.balance_init(employee_id, year);

        let balance = self.store().update(employee_id, year, &init, &mut |balance| {
            let Some(counters) = counters_mut(balance, leave_type) else {
                return Ok(());
            };
            if counters.remaining < days {
                return Err(EngineError::InsufficientBalance {
                    employee_id,
                    leave_type: leave_type.to_string(),
                    requested: days,
                    remaining: counters.remaining,
                });
            }
            counters.used += days;
            counters.remaining -= days;
            balance.updated_at = now;
            Ok(())
        })?;

        info!(
            employee_id = %employee_id,
            year,
            leave_type = %leave_type,
            days,
            "Debited leave balance"
        );
        Ok(balance)
    }

    /// Credits `days` of `leave_type` back to the (employee, year)
    /// balance, reversing an earlier debit when an approved leave is
    /// cancelled.
    ///
    /// Remaining days are clamped at the type's cap (annual total plus
    /// carried-forward days for annual leave), so over-crediting can
    /// never mint extra balance.
    pub fn credit_leave(
        &self,
        employee_id: Uuid,
        year: i32,
        leave_type: LeaveType,
        days: i64,
    ) -> EngineResult<LeaveBalance> {
        let now = self.now();
        let init = self.balance_init(employee_id, year);

        let balance = self.store().update(employee_id, year, &init, &mut |balance| {
            let cap = balance.cap(leave_type);
            let Some(counters) = counters_mut(balance, leave_type) else {
                return Ok(());
            };
            counters.used = (counters.used - days).max(0);
            counters.remaining = (counters.remaining + days).min(cap);
            balance.updated_at = now;
            Ok(())
        })?;

        info!(
            employee_id = %employee_id,
            year,
            leave_type = %leave_type,
            days,
            "Credited leave balance"
        );
        Ok(balance)
    }

    /// Applies a leave request workflow transition, invoking the ledger
    /// where the workflow demands it.
    ///
    /// Valid transitions: pending → approved (exactly one debit,
    /// stamps approver and approval instant), pending → rejected (no
    /// ledger call, records `reason`), approved → cancelled (exactly
    /// one credit). Any other transition fails with
    /// [`EngineError::InvalidTransition`] and no state change.
    pub fn transition(
        &self,
        request: &LeaveRequest,
        target: LeaveStatus,
        actor: Option<Uuid>,
        reason: Option<&str>,
    ) -> EngineResult<LeaveRequest> {
        use chrono::Datelike;

        let year = request.start_date.year();
        let mut updated = request.clone();

        match (request.status, target) {
            (LeaveStatus::Pending, LeaveStatus::Approved) => {
                self.debit_leave(request.employee_id, year, request.leave_type, request.total_days)?;
                updated.status = LeaveStatus::Approved;
                updated.approved_by = actor;
                updated.approved_at = Some(self.now());
            }
            (LeaveStatus::Pending, LeaveStatus::Rejected) => {
                updated.status = LeaveStatus::Rejected;
                updated.rejection_reason = reason.unwrap_or_default().to_string();
            }
            (LeaveStatus::Approved, LeaveStatus::Cancelled) => {
                self.credit_leave(
                    request.employee_id,
                    year,
                    request.leave_type,
                    request.total_days,
                )?;
                updated.status = LeaveStatus::Cancelled;
            }
            (from, to) => {
                return Err(EngineError::InvalidTransition {
                    from: from.to_string(),
                    to: to.to_string(),
                });
            }
        }

        info!(
            request_id = %request.id,
            employee_id = %request.employee_id,
            from = %request.status,
            to = %target,
            "Leave request transition"
        );
        Ok(updated)
    }

    /// Returns the lazy initializer producing a fresh balance row from
    /// policy defaults.
    fn balance_init(&self, employee_id: Uuid, year: i32) -> impl Fn() -> LeaveBalance {
        let leave = self.policy().leave;
        let created_at = self.now();
        move || LeaveBalance {
            employee_id,
            year,
            annual: TypeBalance::granted(leave.annual_days),
            sick: TypeBalance::granted(leave.sick_days),
            carried_forward: leave.carried_forward,
            updated_at: created_at,
        }
    }
}

fn counters_mut(balance: &mut LeaveBalance, leave_type: LeaveType) -> Option<&mut TypeBalance> {
    match leave_type {
        LeaveType::Annual => Some(&mut balance.annual),
        LeaveType::Sick => Some(&mut balance.sick),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::config::{EnginePolicy, LeavePolicy};
    use crate::store::{BalanceStore, MemoryStore};
    use chrono::{NaiveDate, TimeZone, Utc};
    use std::sync::Arc;

    fn engine() -> (Arc<MemoryStore>, AttendanceEngine<MemoryStore, FixedClock>) {
        let store = Arc::new(MemoryStore::new());
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap());
        let engine = AttendanceEngine::new(store.clone(), clock, EnginePolicy::default());
        (store, engine)
    }

    fn request(employee_id: Uuid, status: LeaveStatus, days: i64) -> LeaveRequest {
        LeaveRequest {
            id: Uuid::new_v4(),
            employee_id,
            leave_type: LeaveType::Annual,
            start_date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 4, 5).unwrap(),
            total_days: days,
            reason: "family visit".to_string(),
            status,
            approved_by: None,
            approved_at: None,
            rejection_reason: String::new(),
        }
    }

    #[test]
    fn test_debit_lazily_creates_with_policy_defaults() {
        let (store, engine) = engine();
        let employee = Uuid::new_v4();

        let balance = engine
            .debit_leave(employee, 2024, LeaveType::Annual, 5)
            .unwrap();
        assert_eq!(balance.annual.total, 20);
        assert_eq!(balance.annual.used, 5);
        assert_eq!(balance.annual.remaining, 15);
        assert_eq!(balance.sick.remaining, 12);
        assert!(store.get_balance(employee, 2024).unwrap().is_some());
    }

    #[test]
    fn test_overdraw_fails_without_mutation() {
        let (store, engine) = engine();
        let employee = Uuid::new_v4();

        engine
            .debit_leave(employee, 2024, LeaveType::Annual, 18)
            .unwrap();
        let err = engine
            .debit_leave(employee, 2024, LeaveType::Annual, 5)
            .unwrap_err();
        assert!(matches!(err, EngineError::InsufficientBalance { .. }));

        let stored = store.get_balance(employee, 2024).unwrap().unwrap();
        assert_eq!(stored.annual.remaining, 2);
        assert_eq!(stored.annual.used, 18);
    }

    #[test]
    fn test_credit_reverses_debit() {
        let (_, engine) = engine();
        let employee = Uuid::new_v4();

        engine
            .debit_leave(employee, 2024, LeaveType::Sick, 4)
            .unwrap();
        let balance = engine
            .credit_leave(employee, 2024, LeaveType::Sick, 4)
            .unwrap();
        assert_eq!(balance.sick.used, 0);
        assert_eq!(balance.sick.remaining, 12);
    }

    #[test]
    fn test_credit_clamps_at_cap() {
        let (_, engine) = engine();
        let employee = Uuid::new_v4();

        let balance = engine
            .credit_leave(employee, 2024, LeaveType::Annual, 99)
            .unwrap();
        assert_eq!(balance.annual.remaining, 20);
        assert_eq!(balance.annual.used, 0);
    }

    #[test]
    fn test_carried_forward_extends_annual_credit_cap() {
        let store = Arc::new(MemoryStore::new());
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap());
        let policy = EnginePolicy {
            leave: LeavePolicy {
                annual_days: 20,
                sick_days: 12,
                carried_forward: 3,
            },
            ..EnginePolicy::default()
        };
        let engine = AttendanceEngine::new(store, clock, policy);
        let employee = Uuid::new_v4();

        let balance = engine
            .credit_leave(employee, 2024, LeaveType::Annual, 99)
            .unwrap();
        assert_eq!(balance.annual.remaining, 23);
    }

    #[test]
    fn test_uncounted_type_passes_through() {
        let (_, engine) = engine();
        let employee = Uuid::new_v4();

        let balance = engine
            .debit_leave(employee, 2024, LeaveType::Unpaid, 30)
            .unwrap();
        assert_eq!(balance.annual.remaining, 20);
        assert_eq!(balance.sick.remaining, 12);
    }

    #[test]
    fn test_approve_debits_and_stamps() {
        let (store, engine) = engine();
        let employee = Uuid::new_v4();
        let approver = Uuid::new_v4();
        let pending = request(employee, LeaveStatus::Pending, 5);

        let approved = engine
            .transition(&pending, LeaveStatus::Approved, Some(approver), None)
            .unwrap();
        assert_eq!(approved.status, LeaveStatus::Approved);
        assert_eq!(approved.approved_by, Some(approver));
        assert!(approved.approved_at.is_some());

        let balance = store.get_balance(employee, 2024).unwrap().unwrap();
        assert_eq!(balance.annual.remaining, 15);
    }

    #[test]
    fn test_reject_makes_no_ledger_call() {
        let (store, engine) = engine();
        let employee = Uuid::new_v4();
        let pending = request(employee, LeaveStatus::Pending, 5);

        let rejected = engine
            .transition(&pending, LeaveStatus::Rejected, None, Some("roster full"))
            .unwrap();
        assert_eq!(rejected.status, LeaveStatus::Rejected);
        assert_eq!(rejected.rejection_reason, "roster full");
        assert!(store.get_balance(employee, 2024).unwrap().is_none());
    }

    #[test]
    fn test_cancel_credits_back() {
        let (store, engine) = engine();
        let employee = Uuid::new_v4();
        let pending = request(employee, LeaveStatus::Pending, 5);

        let approved = engine
            .transition(&pending, LeaveStatus::Approved, Some(Uuid::new_v4()), None)
            .unwrap();
        let cancelled = engine
            .transition(&approved, LeaveStatus::Cancelled, None, None)
            .unwrap();
        assert_eq!(cancelled.status, LeaveStatus::Cancelled);

        let balance = store.get_balance(employee, 2024).unwrap().unwrap();
        assert_eq!(balance.annual.remaining, 20);
        assert_eq!(balance.annual.used, 0);
    }

    #[test]
    fn test_invalid_transitions_rejected() {
        let (store, engine) = engine();
        let employee = Uuid::new_v4();

        let cases = [
            (LeaveStatus::Rejected, LeaveStatus::Approved),
            (LeaveStatus::Cancelled, LeaveStatus::Approved),
            (LeaveStatus::Approved, LeaveStatus::Rejected),
            (LeaveStatus::Pending, LeaveStatus::Cancelled),
        ];
        for (from, to) in cases {
            let req = request(employee, from, 5);
            let err = engine.transition(&req, to, None, None).unwrap_err();
            assert!(matches!(err, EngineError::InvalidTransition { .. }));
        }
        // No transition above may have touched the ledger.
        assert!(store.get_balance(employee, 2024).unwrap().is_none());
    }

    #[test]
    fn test_approve_insufficient_balance_leaves_request_untouched() {
        let (_, engine) = engine();
        let employee = Uuid::new_v4();
        let pending = request(employee, LeaveStatus::Pending, 25);

        let err = engine
            .transition(&pending, LeaveStatus::Approved, Some(Uuid::new_v4()), None)
            .unwrap_err();
        assert!(matches!(err, EngineError::InsufficientBalance { .. }));
    }
}
