//! Assignment resolution.
//!
//! Picks the single shift effective for an employee on a calendar date
//! from the set of assignment windows on record.

use chrono::NaiveDate;

use crate::models::Assignment;

/// Selects the assignment effective on `date`, or `None` when no
/// window covers it.
///
/// Overlapping windows are tolerated rather than rejected: the
/// tie-break prefers the latest `from_date` and, when still tied, the
/// most recently created assignment, so resolution is deterministic
/// regardless of input order. Read-only and side-effect-free.
///
/// # Examples
///
/// ```
/// use attendance_engine::engine::select_assignment;
/// use attendance_engine::models::Assignment;
/// use chrono::{NaiveDate, Utc};
/// use uuid::Uuid;
///
/// let employee = Uuid::new_v4();
/// let open_ended = Assignment {
///     id: Uuid::new_v4(),
///     employee_id: employee,
///     shift_id: Uuid::new_v4(),
///     from_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     to_date: None,
///     assigned_by: Uuid::new_v4(),
///     created_at: Utc::now(),
/// };
///
/// let assignments = vec![open_ended.clone()];
/// let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// assert_eq!(select_assignment(&assignments, date), Some(&open_ended));
///
/// let before = NaiveDate::from_ymd_opt(2023, 12, 1).unwrap();
/// assert_eq!(select_assignment(&assignments, before), None);
/// ```
pub fn select_assignment(assignments: &[Assignment], date: NaiveDate) -> Option<&Assignment> {
    assignments
        .iter()
        .filter(|a| a.covers(date))
        .max_by_key(|a| (a.from_date, a.created_at))
}
