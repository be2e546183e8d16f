//! Core data models for the attendance engine.
//!
//! This module contains all the domain models used throughout the engine.

mod employee;
mod event;
mod leave;
mod shift;
mod summary;

pub(crate) use shift::localize_wall_clock;

pub use employee::Employee;
pub use event::{AttendanceEvent, EventKind, EventStatus, PunchDirection, RawPunch};
pub use leave::{LeaveBalance, LeaveRequest, LeaveStatus, LeaveType, TypeBalance};
pub use shift::{Assignment, Shift};
pub use summary::{DailySummary, DayStatus};
