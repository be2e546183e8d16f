//! Error types for the attendance engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during attendance processing.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

/// The main error type for the attendance engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application. Read paths
/// with a defined empty-result semantics (assignment resolution, balance
/// lookup) return `Ok(None)` instead of an error.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
/// use uuid::Uuid;
///
/// let id = Uuid::nil();
/// let error = EngineError::ShiftNotFound { shift_id: id };
/// assert_eq!(
///     error.to_string(),
///     format!("Shift not found: {}", id),
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A shift referenced by an assignment does not exist.
    #[error("Shift not found: {shift_id}")]
    ShiftNotFound {
        /// The shift id that was not found.
        shift_id: Uuid,
    },

    /// An employee id does not exist in the directory.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The employee id that was not found.
        employee_id: Uuid,
    },

    /// An event violates the same-day or same-tuple uniqueness invariant.
    #[error("Duplicate {kind} for employee {employee_id} on {date}")]
    DuplicateEvent {
        /// The employee the duplicate was recorded for.
        employee_id: Uuid,
        /// The calendar date of the duplicate.
        date: NaiveDate,
        /// A short label for the duplicated event kind.
        kind: String,
    },

    /// A check-out was attempted before any check-in that day.
    #[error("No prior check-in for employee {employee_id} on {date}")]
    NoPriorCheckIn {
        /// The employee attempting to check out.
        employee_id: Uuid,
        /// The date with no check-in.
        date: NaiveDate,
    },

    /// A leave debit exceeds the remaining balance for the requested type.
    #[error(
        "Insufficient {leave_type} leave balance for employee {employee_id}: requested {requested}, remaining {remaining}"
    )]
    InsufficientBalance {
        /// The employee whose balance was checked.
        employee_id: Uuid,
        /// The leave type requested.
        leave_type: String,
        /// The number of days requested.
        requested: i64,
        /// The number of days remaining.
        remaining: i64,
    },

    /// A leave request state transition that the workflow does not allow.
    #[error("Invalid leave request transition: {from} -> {to}")]
    InvalidTransition {
        /// The current request state.
        from: String,
        /// The requested target state.
        to: String,
    },

    /// A device or external lookup failed during batch sync.
    ///
    /// Isolated per record/device during sync; accumulated, never fatal
    /// to the batch.
    #[error("Upstream unavailable: {message}")]
    UpstreamUnavailable {
        /// A description of the upstream failure.
        message: String,
    },

    /// Policy file was not found at the specified path.
    #[error("Policy file not found: {path}")]
    PolicyNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Policy file could not be parsed.
    #[error("Failed to parse policy file '{path}': {message}")]
    PolicyParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A timezone name was not a valid IANA identifier.
    #[error("Invalid timezone: {name}")]
    InvalidTimezone {
        /// The rejected timezone name.
        name: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
