//! Engine policy configuration.
//!
//! Operating policy (leave grant defaults, the early-exit window, the
//! process-wide default timezone) is loaded from a YAML file by
//! [`PolicyLoader`]; every knob has an in-code default so the engine
//! also runs without a file.

mod loader;
mod types;

pub use loader::PolicyLoader;
pub use types::{ClassifierPolicy, EnginePolicy, LeavePolicy};
