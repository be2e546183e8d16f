//! Attendance computation and reconciliation engine.
//!
//! This crate tracks employee attendance against assigned work shifts
//! and reconciles it with a leave-balance ledger: shift resolution per
//! employee per day, classification of check-in/check-out events
//! against shift boundaries, idempotent ingestion of events from
//! biometric capture devices, daily aggregation into summary records,
//! and atomic leave debit/credit during approval workflows.
//!
//! Persistence, identity management, and the HTTP surface live outside
//! the crate; the engine reaches them through the capability traits in
//! [`store`].

#![warn(missing_docs)]

pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod store;

pub use engine::{AttendanceEngine, EngineStore, SyncReport};
pub use error::{EngineError, EngineResult};
