//! Leave ledger models and the leave request workflow states.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The categories of leave the ledger accounts for.
///
/// Only annual and sick leave draw on counted balances; the remaining
/// categories are unlimited from the ledger's point of view and pass
/// through approval without a debit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    /// Annual leave, debited against the yearly balance.
    Annual,
    /// Sick leave, debited against the yearly balance.
    Sick,
    /// Maternity leave; not balance-counted.
    Maternity,
    /// Paternity leave; not balance-counted.
    Paternity,
    /// Bereavement leave; not balance-counted.
    Bereavement,
    /// Unpaid leave; not balance-counted.
    Unpaid,
    /// Study leave; not balance-counted.
    Study,
}

impl LeaveType {
    /// Returns true if this leave type draws on a counted balance.
    pub fn is_counted(self) -> bool {
        matches!(self, LeaveType::Annual | LeaveType::Sick)
    }
}

impl std::fmt::Display for LeaveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            LeaveType::Annual => "annual",
            LeaveType::Sick => "sick",
            LeaveType::Maternity => "maternity",
            LeaveType::Paternity => "paternity",
            LeaveType::Bereavement => "bereavement",
            LeaveType::Unpaid => "unpaid",
            LeaveType::Study => "study",
        };
        write!(f, "{}", label)
    }
}

/// The {total, used, remaining} counters for one leave type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeBalance {
    /// Days granted for the year.
    pub total: i64,
    /// Days consumed by approved requests.
    pub used: i64,
    /// Days still available.
    pub remaining: i64,
}

impl TypeBalance {
    /// Creates a fresh balance with `total` days granted and none used.
    pub fn granted(total: i64) -> Self {
        Self {
            total,
            used: 0,
            remaining: total,
        }
    }
}

/// Per-employee per-year leave balances.
///
/// One row per (employee, year), lazily created with policy defaults on
/// first access. Mutated only by the leave ledger's debit/credit, which
/// the balance store serializes per key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveBalance {
    /// The employee the balances belong to.
    pub employee_id: Uuid,
    /// The calendar year the balances cover.
    pub year: i32,
    /// Annual leave counters.
    pub annual: TypeBalance,
    /// Sick leave counters.
    pub sick: TypeBalance,
    /// Days carried forward from the previous year; extends the annual
    /// cap.
    pub carried_forward: i64,
    /// Last ledger mutation instant.
    pub updated_at: DateTime<Utc>,
}

impl LeaveBalance {
    /// Returns the credit cap for `leave_type`.
    ///
    /// Remaining days never exceed this after a credit; carried-forward
    /// days extend only the annual cap.
    pub fn cap(&self, leave_type: LeaveType) -> i64 {
        match leave_type {
            LeaveType::Annual => self.annual.total + self.carried_forward,
            LeaveType::Sick => self.sick.total,
            _ => 0,
        }
    }

    /// Returns the counters for `leave_type`, or `None` for
    /// non-counted types.
    pub fn counters(&self, leave_type: LeaveType) -> Option<TypeBalance> {
        match leave_type {
            LeaveType::Annual => Some(self.annual),
            LeaveType::Sick => Some(self.sick),
            _ => None,
        }
    }
}

/// The workflow states of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Submitted, awaiting a decision.
    Pending,
    /// Approved; exactly one ledger debit has been applied.
    Approved,
    /// Rejected; no ledger call was made.
    Rejected,
    /// Cancelled after approval; exactly one ledger credit reversed the
    /// debit.
    Cancelled,
}

impl std::fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            LeaveStatus::Pending => "pending",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Rejected => "rejected",
            LeaveStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", label)
    }
}

/// A leave request moving through the approval workflow.
///
/// The request entity itself is owned by an external collaborator; the
/// engine sees it only at transition time, when the ledger may be
/// invoked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Unique identifier for the request.
    pub id: Uuid,
    /// The requesting employee.
    pub employee_id: Uuid,
    /// The kind of leave requested.
    pub leave_type: LeaveType,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave.
    pub end_date: NaiveDate,
    /// Working days requested; debited on approval.
    pub total_days: i64,
    /// Free-form justification.
    pub reason: String,
    /// Current workflow state.
    pub status: LeaveStatus,
    /// The approver, set on approval.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<Uuid>,
    /// When the request was approved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    /// Why the request was rejected, set on rejection.
    #[serde(default)]
    pub rejection_reason: String,
}
