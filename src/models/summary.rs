//! Daily attendance summary model.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Overall attendance status for one employee-day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    /// A check-in/check-out pair exists.
    Present,
    /// No attendance captured; set by roster comparison.
    Absent,
    /// Worked a partial day.
    HalfDay,
    /// A declared holiday.
    Holiday,
}

impl std::fmt::Display for DayStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayStatus::Present => write!(f, "present"),
            DayStatus::Absent => write!(f, "absent"),
            DayStatus::HalfDay => write!(f, "half_day"),
            DayStatus::Holiday => write!(f, "holiday"),
        }
    }
}

/// The reduction of one employee-day of raw events into totals.
///
/// There is exactly one summary per (employee, date); the aggregator
/// creates or replaces it and no other component writes it. Hour totals
/// are decimal hours, minute totals whole minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    /// The employee summarized.
    pub employee_id: Uuid,
    /// The calendar date summarized, in the employee's zone.
    pub date: NaiveDate,
    /// Earliest check-in that day.
    pub first_check_in: DateTime<Utc>,
    /// Latest check-out that day.
    pub last_check_out: DateTime<Utc>,
    /// Hours between first check-in and last check-out, floored at zero.
    pub total_hours: Decimal,
    /// Total hours minus overtime hours.
    pub regular_hours: Decimal,
    /// Hours worked past the shift end, zero without a resolved shift.
    pub overtime_hours: Decimal,
    /// Minutes late, populated only when the check-in was classified
    /// late.
    pub late_minutes: i64,
    /// Minutes left early, populated only when the check-out was
    /// classified early-exit.
    pub early_exit_minutes: i64,
    /// Overall status for the day.
    pub status: DayStatus,
}
