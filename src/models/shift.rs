//! Shift and assignment models.
//!
//! This module defines the Shift struct (a named daily work window) and
//! the Assignment struct linking an employee to a shift for a bounded
//! date range.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a named daily work window with a grace period and
/// overtime policy.
///
/// Start and end are wall-clock times; they only become instants once
/// anchored to a calendar date in a concrete timezone. An end time
/// numerically earlier than the start time means the shift wraps past
/// midnight and ends on the following day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique identifier for the shift.
    pub id: Uuid,
    /// Human-readable shift name, unique within a department.
    pub name: String,
    /// The department that owns this shift.
    pub department_id: Uuid,
    /// Wall-clock start time.
    pub start_time: NaiveTime,
    /// Wall-clock end time; earlier than `start_time` when the shift
    /// wraps past midnight.
    pub end_time: NaiveTime,
    /// Minutes after `start_time` during which a check-in still counts
    /// as on-time.
    pub grace_period_minutes: i64,
    /// Whether hours past the shift end accrue as overtime.
    pub overtime_allowed: bool,
    /// Unpaid break minutes within the shift.
    pub break_duration_minutes: i64,
}

impl Shift {
    /// Returns the grace period as a duration.
    pub fn grace_period(&self) -> Duration {
        Duration::minutes(self.grace_period_minutes)
    }

    /// Returns true if the shift ends on the day after it starts.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::Shift;
    /// use chrono::NaiveTime;
    /// use uuid::Uuid;
    ///
    /// let night = Shift {
    ///     id: Uuid::new_v4(),
    ///     name: "Night".to_string(),
    ///     department_id: Uuid::new_v4(),
    ///     start_time: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
    ///     end_time: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
    ///     grace_period_minutes: 15,
    ///     overtime_allowed: true,
    ///     break_duration_minutes: 60,
    /// };
    /// assert!(night.wraps_midnight());
    /// ```
    pub fn wraps_midnight(&self) -> bool {
        self.end_time < self.start_time
    }

    /// Returns the absolute instant at which the shift starts on `date`
    /// in timezone `tz`.
    pub fn start_instant<Tz: TimeZone>(&self, date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
        localize_wall_clock(date.and_time(self.start_time), tz)
    }

    /// Returns the absolute instant at which the shift ends for the
    /// shift anchored on `date` in timezone `tz`.
    ///
    /// For a shift that wraps midnight the end boundary falls on the
    /// day after `date`.
    pub fn end_instant<Tz: TimeZone>(&self, date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
        let end_date = if self.wraps_midnight() {
            date.succ_opt().unwrap_or(date)
        } else {
            date
        };
        localize_wall_clock(end_date.and_time(self.end_time), tz)
    }
}

/// Anchors a wall-clock datetime to timezone `tz` and converts to UTC.
///
/// Local times skipped or duplicated by a DST transition resolve to the
/// earliest valid instant; a skipped time falls forward one hour.
pub(crate) fn localize_wall_clock<Tz: TimeZone>(naive: NaiveDateTime, tz: &Tz) -> DateTime<Utc> {
    match tz.from_local_datetime(&naive).earliest() {
        Some(instant) => instant.with_timezone(&Utc),
        None => {
            // Inside a DST gap; the wall-clock boundary never occurs,
            // so take the first instant after the gap closes.
            let shifted = naive + Duration::hours(1);
            tz.from_local_datetime(&shifted)
                .earliest()
                .map(|instant| instant.with_timezone(&Utc))
                .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
        }
    }
}

/// A time-bounded link between an employee and a shift.
///
/// Windows for one employee should not overlap, but the engine tolerates
/// overlap at read time via a deterministic tie-break (latest
/// `from_date`, then latest `created_at`) rather than rejecting writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Unique identifier for the assignment.
    pub id: Uuid,
    /// The employee the shift is assigned to.
    pub employee_id: Uuid,
    /// The shift being assigned.
    pub shift_id: Uuid,
    /// First day the assignment is effective.
    pub from_date: NaiveDate,
    /// Last day the assignment is effective; `None` means open-ended.
    pub to_date: Option<NaiveDate>,
    /// The user who made the assignment.
    pub assigned_by: Uuid,
    /// When the assignment row was created; second tie-break key.
    pub created_at: DateTime<Utc>,
}

impl Assignment {
    /// Returns true if the assignment window covers `date`.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::Assignment;
    /// use chrono::{NaiveDate, Utc};
    /// use uuid::Uuid;
    ///
    /// let assignment = Assignment {
    ///     id: Uuid::new_v4(),
    ///     employee_id: Uuid::new_v4(),
    ///     shift_id: Uuid::new_v4(),
    ///     from_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    ///     to_date: None,
    ///     assigned_by: Uuid::new_v4(),
    ///     created_at: Utc::now(),
    /// };
    /// assert!(assignment.covers(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
    /// assert!(!assignment.covers(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()));
    /// ```
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.from_date <= date && self.to_date.is_none_or(|to| to >= date)
    }
}
