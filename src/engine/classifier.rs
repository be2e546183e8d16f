//! Event classification against shift boundaries.
//!
//! Pure time arithmetic: given an event instant, the shift effective
//! that day (if any), and the employee's operating timezone, assign one
//! of the closed [`EventStatus`] variants. Wall-clock shift boundaries
//! are localized to the event's timezone before any subtraction;
//! comparing a naive boundary against an instant is never done.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::config::ClassifierPolicy;
use crate::models::{EventKind, EventStatus, Shift};

/// Classifies an event against the shift effective on `date`.
///
/// Check-ins are on-time up to and including `start + grace`; anything
/// later is late. Check-outs are early-exit when more than the policy's
/// early-exit window before shift end, overtime when after shift end,
/// and on-time in between (boundaries inclusive on the on-time side).
///
/// With no shift resolved for the day the status is
/// [`EventStatus::OnTime`]: unscheduled attendance is not penalized.
///
/// # Examples
///
/// ```
/// use attendance_engine::config::ClassifierPolicy;
/// use attendance_engine::engine::classify;
/// use attendance_engine::models::{EventKind, EventStatus, Shift};
/// use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
/// use uuid::Uuid;
///
/// let shift = Shift {
///     id: Uuid::new_v4(),
///     name: "General".to_string(),
///     department_id: Uuid::new_v4(),
///     start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
///     grace_period_minutes: 15,
///     overtime_allowed: true,
///     break_duration_minutes: 60,
/// };
/// let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let policy = ClassifierPolicy::default();
///
/// let at_0910 = Utc.with_ymd_and_hms(2024, 3, 1, 9, 10, 0).unwrap();
/// let status = classify(EventKind::CheckIn, at_0910, Some(&shift), date, &Utc, &policy);
/// assert_eq!(status, EventStatus::OnTime);
///
/// let at_0920 = Utc.with_ymd_and_hms(2024, 3, 1, 9, 20, 0).unwrap();
/// let status = classify(EventKind::CheckIn, at_0920, Some(&shift), date, &Utc, &policy);
/// assert_eq!(status, EventStatus::Late);
/// ```
pub fn classify<Tz: TimeZone>(
    kind: EventKind,
    timestamp: DateTime<Utc>,
    shift: Option<&Shift>,
    date: NaiveDate,
    tz: &Tz,
    policy: &ClassifierPolicy,
) -> EventStatus {
    let Some(shift) = shift else {
        // Unscheduled attendance is not penalized.
        return EventStatus::OnTime;
    };

    match kind {
        EventKind::CheckIn => {
            let grace_end = shift.start_instant(date, tz) + shift.grace_period();
            if timestamp > grace_end {
                EventStatus::Late
            } else {
                EventStatus::OnTime
            }
        }
        EventKind::CheckOut => {
            let shift_end = shift.end_instant(date, tz);
            if timestamp < shift_end - policy.early_exit_window() {
                EventStatus::EarlyExit
            } else if timestamp > shift_end {
                EventStatus::Overtime
            } else {
                EventStatus::OnTime
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use uuid::Uuid;

    fn shift(start: (u32, u32), end: (u32, u32), grace: i64) -> Shift {
        Shift {
            id: Uuid::new_v4(),
            name: "General".to_string(),
            department_id: Uuid::new_v4(),
            start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
            grace_period_minutes: grace,
            overtime_allowed: true,
            break_duration_minutes: 60,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(d: NaiveDate, h: u32, min: u32) -> DateTime<Utc> {
        Utc.from_utc_datetime(&d.and_hms_opt(h, min, 0).unwrap())
    }

    const POLICY: ClassifierPolicy = ClassifierPolicy {
        early_exit_window_minutes: 30,
    };

    #[test]
    fn test_check_in_within_grace_is_on_time() {
        let s = shift((9, 0), (17, 0), 15);
        let d = date(2024, 3, 1);
        let status = classify(EventKind::CheckIn, at(d, 9, 10), Some(&s), d, &Utc, &POLICY);
        assert_eq!(status, EventStatus::OnTime);
    }

    #[test]
    fn test_check_in_exactly_at_grace_end_is_on_time() {
        // Boundary inclusive at start + grace.
        let s = shift((9, 0), (17, 0), 15);
        let d = date(2024, 3, 1);
        let status = classify(EventKind::CheckIn, at(d, 9, 15), Some(&s), d, &Utc, &POLICY);
        assert_eq!(status, EventStatus::OnTime);
    }

    #[test]
    fn test_check_in_after_grace_is_late() {
        let s = shift((9, 0), (17, 0), 15);
        let d = date(2024, 3, 1);
        let status = classify(EventKind::CheckIn, at(d, 9, 20), Some(&s), d, &Utc, &POLICY);
        assert_eq!(status, EventStatus::Late);
    }

    #[test]
    fn test_check_out_within_window_is_on_time() {
        let s = shift((9, 0), (17, 0), 15);
        let d = date(2024, 3, 1);
        let status = classify(EventKind::CheckOut, at(d, 16, 45), Some(&s), d, &Utc, &POLICY);
        assert_eq!(status, EventStatus::OnTime);
    }

    #[test]
    fn test_check_out_more_than_window_early_is_early_exit() {
        let s = shift((9, 0), (17, 0), 15);
        let d = date(2024, 3, 1);
        let status = classify(EventKind::CheckOut, at(d, 16, 15), Some(&s), d, &Utc, &POLICY);
        assert_eq!(status, EventStatus::EarlyExit);
    }

    #[test]
    fn test_check_out_after_end_is_overtime() {
        let s = shift((9, 0), (17, 0), 15);
        let d = date(2024, 3, 1);
        let status = classify(EventKind::CheckOut, at(d, 17, 30), Some(&s), d, &Utc, &POLICY);
        assert_eq!(status, EventStatus::Overtime);
    }

    #[test]
    fn test_check_out_exactly_at_end_is_on_time() {
        let s = shift((9, 0), (17, 0), 15);
        let d = date(2024, 3, 1);
        let status = classify(EventKind::CheckOut, at(d, 17, 0), Some(&s), d, &Utc, &POLICY);
        assert_eq!(status, EventStatus::OnTime);
    }

    #[test]
    fn test_no_shift_is_on_time_for_both_kinds() {
        let d = date(2024, 3, 1);
        let ts = at(d, 3, 33);
        assert_eq!(
            classify(EventKind::CheckIn, ts, None, d, &Utc, &POLICY),
            EventStatus::OnTime
        );
        assert_eq!(
            classify(EventKind::CheckOut, ts, None, d, &Utc, &POLICY),
            EventStatus::OnTime
        );
    }

    #[test]
    fn test_wrapping_shift_early_morning_check_out_not_early_exit() {
        // 22:00-06:00 shift anchored on 2024-03-01 ends 06:00 on the 2nd.
        let s = shift((22, 0), (6, 0), 15);
        let d = date(2024, 3, 1);

        let out_0530 = at(date(2024, 3, 2), 5, 30);
        assert_eq!(
            classify(EventKind::CheckOut, out_0530, Some(&s), d, &Utc, &POLICY),
            EventStatus::OnTime
        );

        let out_0630 = at(date(2024, 3, 2), 6, 30);
        assert_eq!(
            classify(EventKind::CheckOut, out_0630, Some(&s), d, &Utc, &POLICY),
            EventStatus::Overtime
        );

        let out_0500 = at(date(2024, 3, 2), 5, 0);
        assert_eq!(
            classify(EventKind::CheckOut, out_0500, Some(&s), d, &Utc, &POLICY),
            EventStatus::EarlyExit
        );
    }

    #[test]
    fn test_classification_in_non_utc_zone() {
        // 09:00 Dhaka time is 03:00 UTC.
        let tz = chrono_tz::Asia::Dhaka;
        let s = shift((9, 0), (17, 0), 15);
        let d = date(2024, 3, 1);

        let on_time = Utc.with_ymd_and_hms(2024, 3, 1, 3, 10, 0).unwrap();
        assert_eq!(
            classify(EventKind::CheckIn, on_time, Some(&s), d, &tz, &POLICY),
            EventStatus::OnTime
        );

        let late = Utc.with_ymd_and_hms(2024, 3, 1, 3, 20, 0).unwrap();
        assert_eq!(
            classify(EventKind::CheckIn, late, Some(&s), d, &tz, &POLICY),
            EventStatus::Late
        );
    }
}
