//! Policy configuration types.

use chrono::Duration;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Default annual leave grant in days.
pub const DEFAULT_ANNUAL_DAYS: i64 = 20;

/// Default sick leave grant in days.
pub const DEFAULT_SICK_DAYS: i64 = 12;

/// Default early-exit window in minutes before shift end.
pub const DEFAULT_EARLY_EXIT_WINDOW_MINUTES: i64 = 30;

/// Leave grant defaults used when a balance row is lazily created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeavePolicy {
    /// Annual leave days granted per year.
    #[serde(default = "default_annual_days")]
    pub annual_days: i64,
    /// Sick leave days granted per year.
    #[serde(default = "default_sick_days")]
    pub sick_days: i64,
    /// Days carried forward into a freshly created balance.
    #[serde(default)]
    pub carried_forward: i64,
}

fn default_annual_days() -> i64 {
    DEFAULT_ANNUAL_DAYS
}

fn default_sick_days() -> i64 {
    DEFAULT_SICK_DAYS
}

impl Default for LeavePolicy {
    fn default() -> Self {
        Self {
            annual_days: DEFAULT_ANNUAL_DAYS,
            sick_days: DEFAULT_SICK_DAYS,
            carried_forward: 0,
        }
    }
}

/// Classification thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierPolicy {
    /// Minutes before shift end inside which a check-out is still
    /// on-time; earlier check-outs classify as early-exit.
    #[serde(default = "default_early_exit_window")]
    pub early_exit_window_minutes: i64,
}

fn default_early_exit_window() -> i64 {
    DEFAULT_EARLY_EXIT_WINDOW_MINUTES
}

impl Default for ClassifierPolicy {
    fn default() -> Self {
        Self {
            early_exit_window_minutes: DEFAULT_EARLY_EXIT_WINDOW_MINUTES,
        }
    }
}

impl ClassifierPolicy {
    /// Returns the early-exit window as a duration.
    pub fn early_exit_window(&self) -> Duration {
        Duration::minutes(self.early_exit_window_minutes)
    }
}

/// The full engine operating policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnginePolicy {
    /// Leave grant defaults.
    #[serde(default)]
    pub leave: LeavePolicy,
    /// Classification thresholds.
    #[serde(default)]
    pub classifier: ClassifierPolicy,
    /// Timezone applied when an employee record carries none.
    #[serde(default = "default_timezone")]
    pub default_timezone: Tz,
}

fn default_timezone() -> Tz {
    chrono_tz::UTC
}

impl Default for EnginePolicy {
    fn default() -> Self {
        Self {
            leave: LeavePolicy::default(),
            classifier: ClassifierPolicy::default(),
            default_timezone: chrono_tz::UTC,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leave_policy_defaults() {
        let policy = LeavePolicy::default();
        assert_eq!(policy.annual_days, 20);
        assert_eq!(policy.sick_days, 12);
        assert_eq!(policy.carried_forward, 0);
    }

    #[test]
    fn test_classifier_policy_default_window() {
        let policy = ClassifierPolicy::default();
        assert_eq!(policy.early_exit_window(), Duration::minutes(30));
    }

    #[test]
    fn test_engine_policy_deserializes_with_all_defaults() {
        let policy: EnginePolicy = serde_yaml::from_str("{}").unwrap();
        assert_eq!(policy, EnginePolicy::default());
        assert_eq!(policy.default_timezone, chrono_tz::UTC);
    }

    #[test]
    fn test_engine_policy_partial_override() {
        let yaml = "leave:\n  annual_days: 25\ndefault_timezone: Asia/Dhaka\n";
        let policy: EnginePolicy = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(policy.leave.annual_days, 25);
        assert_eq!(policy.leave.sick_days, 12);
        assert_eq!(policy.default_timezone, chrono_tz::Asia::Dhaka);
    }
}
