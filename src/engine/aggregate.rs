//! Daily aggregation of raw events into summary records.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::clock::Clock;
use crate::error::EngineResult;
use crate::models::{DailySummary, DayStatus, EventKind, EventStatus};

use super::{AttendanceEngine, EngineStore};

const SECONDS_PER_HOUR: i64 = 3600;

impl<S: EngineStore, C: Clock> AttendanceEngine<S, C> {
    /// Reduces one employee-day of events into a [`DailySummary`] and
    /// upserts it keyed by (employee, date).
    ///
    /// Takes the earliest check-in and latest check-out of the local
    /// calendar `date`; both are required, otherwise no summary is
    /// produced and `Ok(None)` is returned (absence is determined by a
    /// separate roster comparison, not here). Re-running on unchanged
    /// events overwrites the summary with identical output.
    pub fn aggregate(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> EngineResult<Option<DailySummary>> {
        let employee = self.require_employee(employee_id)?;
        let tz = self.zone_of(&employee);

        let (start, end) = self.day_window(date, tz);
        let events = self.store().events_in_window(employee_id, start, end)?;

        let check_in = events.iter().find(|e| e.kind == EventKind::CheckIn);
        let check_out = events.iter().rfind(|e| e.kind == EventKind::CheckOut);
        let (Some(check_in), Some(check_out)) = (check_in, check_out) else {
            return Ok(None);
        };

        let worked = check_out.timestamp - check_in.timestamp;
        let total_hours = hours(worked.num_seconds());

        let shift = self.resolve_shift(employee_id, date)?;
        let mut overtime_hours = Decimal::ZERO;
        let mut late_minutes = 0;
        let mut early_exit_minutes = 0;

        if let Some(shift) = &shift {
            let shift_end = shift.end_instant(date, &tz);
            if check_out.timestamp > shift_end {
                overtime_hours = hours((check_out.timestamp - shift_end).num_seconds());
            }

            if check_in.status == EventStatus::Late {
                let shift_start = shift.start_instant(date, &tz);
                late_minutes = (check_in.timestamp - shift_start).num_minutes().max(0);
            }
            if check_out.status == EventStatus::EarlyExit {
                early_exit_minutes = (shift_end - check_out.timestamp).num_minutes().max(0);
            }
        }

        let summary = DailySummary {
            employee_id,
            date,
            first_check_in: check_in.timestamp,
            last_check_out: check_out.timestamp,
            total_hours,
            regular_hours: total_hours - overtime_hours,
            overtime_hours,
            late_minutes,
            early_exit_minutes,
            status: DayStatus::Present,
        };
        self.store().upsert(summary.clone())?;
        Ok(Some(summary))
    }

    /// Runs [`aggregate`](Self::aggregate) for every employee with at
    /// least one event on `date`, returning the number of summaries
    /// written.
    ///
    /// The candidate window is taken in the policy's default timezone;
    /// each employee's own zone still governs their aggregation.
    /// Per-employee failures are logged and skipped, never fatal to the
    /// run.
    pub fn aggregate_day(&self, date: NaiveDate) -> EngineResult<usize> {
        let (start, end) = self.day_window(date, self.policy().default_timezone);
        let employees = self.store().employees_with_events(start, end)?;

        let mut written = 0;
        for employee_id in &employees {
            match self.aggregate(*employee_id, date) {
                Ok(Some(_)) => written += 1,
                Ok(None) => {}
                Err(err) => {
                    warn!(
                        employee_id = %employee_id,
                        date = %date,
                        error = %err,
                        "Daily aggregation failed"
                    );
                }
            }
        }

        info!(
            date = %date,
            candidates = employees.len(),
            written,
            "Daily aggregation complete"
        );
        Ok(written)
    }
}

/// Converts a second count to decimal hours, floored at zero.
fn hours(seconds: i64) -> Decimal {
    Decimal::from(seconds.max(0)) / Decimal::from(SECONDS_PER_HOUR)
}
