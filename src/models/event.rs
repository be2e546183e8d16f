//! Attendance event model and batch punch types.
//!
//! Events are immutable once created; only the sync-status fields may
//! change during reconciliation. The ingestor is the sole creator of
//! events.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The direction of an attendance event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// The employee arrived.
    CheckIn,
    /// The employee left.
    CheckOut,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::CheckIn => write!(f, "check-in"),
            EventKind::CheckOut => write!(f, "check-out"),
        }
    }
}

/// Classification of an event against the shift effective that day.
///
/// A closed set so the classifier's output is exhaustively checked by
/// the compiler rather than carried as free-form strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    /// Within the shift boundary (including the grace period for
    /// check-ins), or no shift was scheduled.
    OnTime,
    /// Check-in after the grace period ended.
    Late,
    /// Check-out more than the early-exit window before shift end.
    EarlyExit,
    /// Check-out after shift end.
    Overtime,
    /// No matching event was ever captured; set by roster comparison,
    /// never by the classifier.
    Missed,
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventStatus::OnTime => write!(f, "on_time"),
            EventStatus::Late => write!(f, "late"),
            EventStatus::EarlyExit => write!(f, "early_exit"),
            EventStatus::Overtime => write!(f, "overtime"),
            EventStatus::Missed => write!(f, "missed"),
        }
    }
}

/// A stored check-in or check-out event.
///
/// At most one event exists per (employee, device, timestamp) tuple;
/// the ingestor enforces this through the event store's
/// compare-and-insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceEvent {
    /// Unique identifier for the event.
    pub id: Uuid,
    /// The employee the event belongs to.
    pub employee_id: Uuid,
    /// The capture device that produced the event.
    pub device_id: Uuid,
    /// The capture instant, UTC.
    pub timestamp: DateTime<Utc>,
    /// Check-in or check-out.
    pub kind: EventKind,
    /// Classification against the shift effective that day.
    pub status: EventStatus,
    /// Whether the capture device verified the biometric template.
    pub biometric_verified: bool,
    /// The device-reported match score.
    pub verification_score: f64,
    /// Free-form location payload supplied by the caller or device.
    #[serde(default)]
    pub location: serde_json::Value,
    /// Whether the event has been reconciled with its source device.
    pub synced: bool,
    /// Error text from the last failed reconciliation attempt, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync_error: Option<String>,
}

/// Punch direction code reported by a capture device.
///
/// Device conventions vary; the common scheme maps codes 0 and 4 to
/// check-in and codes 1 and 5 to check-out. Unknown codes are treated
/// as check-ins, matching device vendor guidance for default punches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PunchDirection(
    /// The raw device punch code.
    pub u8,
);

impl PunchDirection {
    /// Decodes the device punch code into an event kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::{EventKind, PunchDirection};
    ///
    /// assert_eq!(PunchDirection(0).kind(), EventKind::CheckIn);
    /// assert_eq!(PunchDirection(1).kind(), EventKind::CheckOut);
    /// assert_eq!(PunchDirection(4).kind(), EventKind::CheckIn);
    /// assert_eq!(PunchDirection(5).kind(), EventKind::CheckOut);
    /// ```
    pub fn kind(self) -> EventKind {
        match self.0 {
            1 | 5 => EventKind::CheckOut,
            _ => EventKind::CheckIn,
        }
    }
}

/// A raw punch delivered by a capture device during batch sync.
///
/// Timestamps arrive as naive wall-clock values in the device's local
/// zone; the ingestor normalizes them to UTC before storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPunch {
    /// The external employee code the device knows the person by.
    pub employee_code: String,
    /// Wall-clock capture time in the device's local zone.
    pub timestamp: NaiveDateTime,
    /// Device punch direction code.
    pub direction: PunchDirection,
    /// Device-reported verification score, when available.
    #[serde(default)]
    pub verification_score: Option<f64>,
}
