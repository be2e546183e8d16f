//! Event ingestion.
//!
//! Two entry points with one shared contract: at most one stored event
//! per (employee, device, timestamp) tuple. The interactive path
//! additionally enforces a same-day single check-in/check-out pair; the
//! batch path deliberately does not, because devices report every raw
//! punch and replayed batches must be absorbed idempotently.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::clock::Clock;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceEvent, EventKind, EventStatus, RawPunch, localize_wall_clock,
};

use super::classifier::classify;
use super::{AttendanceEngine, EngineStore};

/// Outcome counters for one device's batch sync.
///
/// Per-record failures are accumulated in `errors`; they never abort
/// the batch.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SyncReport {
    /// Punches stored as new events.
    pub ingested: usize,
    /// Punches already present (replayed batches).
    pub skipped: usize,
    /// Punches whose employee code matched nobody.
    pub unmatched: usize,
    /// Descriptions of per-record failures.
    pub errors: Vec<String>,
}

enum PunchOutcome {
    Ingested,
    Skipped,
    Unmatched,
}

impl<S: EngineStore, C: Clock> AttendanceEngine<S, C> {
    /// Records an interactive check-in for `employee_id` at the current
    /// clock instant.
    ///
    /// # Errors
    ///
    /// [`EngineError::DuplicateEvent`] when a check-in already exists
    /// for the employee on the current calendar date (in the
    /// employee's zone); [`EngineError::EmployeeNotFound`] for an
    /// unknown employee.
    pub fn record_check_in(
        &self,
        employee_id: Uuid,
        device_id: Uuid,
        location: Option<Value>,
    ) -> EngineResult<AttendanceEvent> {
        let employee = self.require_employee(employee_id)?;
        let tz = self.zone_of(&employee);
        let now = self.now();
        let date = now.with_timezone(&tz).date_naive();

        let (start, end) = self.day_window(date, tz);
        let todays = self.store().events_in_window(employee_id, start, end)?;
        if todays.iter().any(|e| e.kind == EventKind::CheckIn) {
            return Err(EngineError::DuplicateEvent {
                employee_id,
                date,
                kind: EventKind::CheckIn.to_string(),
            });
        }

        let shift = self.resolve_shift(employee_id, date)?;
        let status = classify(
            EventKind::CheckIn,
            now,
            shift.as_ref(),
            date,
            &tz,
            &self.policy().classifier,
        );

        let event = build_event(
            employee_id,
            device_id,
            now,
            EventKind::CheckIn,
            status,
            location.unwrap_or(Value::Null),
            1.0,
        );
        if !self.store().insert_unique(event.clone())? {
            return Err(EngineError::DuplicateEvent {
                employee_id,
                date,
                kind: EventKind::CheckIn.to_string(),
            });
        }

        info!(
            employee_id = %employee_id,
            device_id = %device_id,
            status = %status,
            "Recorded check-in"
        );
        Ok(event)
    }

    /// Records an interactive check-out for `employee_id` at the
    /// current clock instant and recomputes the day's summary.
    ///
    /// # Errors
    ///
    /// [`EngineError::NoPriorCheckIn`] when no check-in exists yet for
    /// the current date; [`EngineError::DuplicateEvent`] when a
    /// check-out already exists that date.
    pub fn record_check_out(
        &self,
        employee_id: Uuid,
        device_id: Uuid,
        location: Option<Value>,
    ) -> EngineResult<AttendanceEvent> {
        let employee = self.require_employee(employee_id)?;
        let tz = self.zone_of(&employee);
        let now = self.now();
        let date = now.with_timezone(&tz).date_naive();

        let (start, end) = self.day_window(date, tz);
        let todays = self.store().events_in_window(employee_id, start, end)?;
        if !todays.iter().any(|e| e.kind == EventKind::CheckIn) {
            return Err(EngineError::NoPriorCheckIn { employee_id, date });
        }
        if todays.iter().any(|e| e.kind == EventKind::CheckOut) {
            return Err(EngineError::DuplicateEvent {
                employee_id,
                date,
                kind: EventKind::CheckOut.to_string(),
            });
        }

        let shift = self.resolve_shift(employee_id, date)?;
        let status = classify(
            EventKind::CheckOut,
            now,
            shift.as_ref(),
            date,
            &tz,
            &self.policy().classifier,
        );

        let event = build_event(
            employee_id,
            device_id,
            now,
            EventKind::CheckOut,
            status,
            location.unwrap_or(Value::Null),
            1.0,
        );
        if !self.store().insert_unique(event.clone())? {
            return Err(EngineError::DuplicateEvent {
                employee_id,
                date,
                kind: EventKind::CheckOut.to_string(),
            });
        }

        info!(
            employee_id = %employee_id,
            device_id = %device_id,
            status = %status,
            "Recorded check-out"
        );

        // The pair is now complete; bring the day's summary up to date.
        self.aggregate(employee_id, date)?;
        Ok(event)
    }

    /// Ingests an ordered batch of raw punches from one device.
    ///
    /// Idempotent under replay: punches whose (employee, device,
    /// timestamp) tuple is already stored are counted as `skipped`, and
    /// resubmitting an identical batch ingests nothing new. Unmatched
    /// employee codes are counted, per-record failures are accumulated,
    /// and neither aborts the batch.
    pub fn sync_batch(&self, device_id: Uuid, punches: &[RawPunch]) -> EngineResult<SyncReport> {
        let mut report = SyncReport::default();

        for punch in punches {
            match self.ingest_punch(device_id, punch) {
                Ok(PunchOutcome::Ingested) => report.ingested += 1,
                Ok(PunchOutcome::Skipped) => report.skipped += 1,
                Ok(PunchOutcome::Unmatched) => report.unmatched += 1,
                Err(err) => {
                    warn!(
                        device_id = %device_id,
                        employee_code = %punch.employee_code,
                        error = %err,
                        "Punch ingestion failed"
                    );
                    report
                        .errors
                        .push(format!("{}: {}", punch.employee_code, err));
                }
            }
        }

        info!(
            device_id = %device_id,
            ingested = report.ingested,
            skipped = report.skipped,
            unmatched = report.unmatched,
            errors = report.errors.len(),
            "Device batch sync complete"
        );
        Ok(report)
    }

    /// Syncs several devices independently.
    ///
    /// A wholesale failure on one device is recorded in that device's
    /// report and does not block the others.
    pub fn sync_devices(&self, batches: &[(Uuid, Vec<RawPunch>)]) -> Vec<(Uuid, SyncReport)> {
        batches
            .iter()
            .map(|(device_id, punches)| {
                let report = match self.sync_batch(*device_id, punches) {
                    Ok(report) => report,
                    Err(err) => {
                        warn!(device_id = %device_id, error = %err, "Device sync failed");
                        SyncReport {
                            errors: vec![
                                EngineError::UpstreamUnavailable {
                                    message: err.to_string(),
                                }
                                .to_string(),
                            ],
                            ..SyncReport::default()
                        }
                    }
                };
                (*device_id, report)
            })
            .collect()
    }

    fn ingest_punch(&self, device_id: Uuid, punch: &RawPunch) -> EngineResult<PunchOutcome> {
        let Some(employee) = self.store().find_by_code(&punch.employee_code)? else {
            return Ok(PunchOutcome::Unmatched);
        };

        let tz = self.zone_of(&employee);
        let timestamp = localize_wall_clock(punch.timestamp, &tz);
        let date = timestamp.with_timezone(&tz).date_naive();
        let kind = punch.direction.kind();

        let shift = self.resolve_shift(employee.id, date)?;
        let status = classify(
            kind,
            timestamp,
            shift.as_ref(),
            date,
            &tz,
            &self.policy().classifier,
        );

        let event = build_event(
            employee.id,
            device_id,
            timestamp,
            kind,
            status,
            Value::Null,
            punch.verification_score.unwrap_or(1.0),
        );
        if self.store().insert_unique(event)? {
            Ok(PunchOutcome::Ingested)
        } else {
            Ok(PunchOutcome::Skipped)
        }
    }
}

fn build_event(
    employee_id: Uuid,
    device_id: Uuid,
    timestamp: DateTime<Utc>,
    kind: EventKind,
    status: EventStatus,
    location: Value,
    verification_score: f64,
) -> AttendanceEvent {
    AttendanceEvent {
        id: Uuid::new_v4(),
        employee_id,
        device_id,
        timestamp,
        kind,
        status,
        biometric_verified: true,
        verification_score,
        location,
        synced: true,
        sync_error: None,
    }
}
