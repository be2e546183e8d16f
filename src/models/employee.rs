//! Employee directory shape consumed at the engine boundary.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The slice of the employee record the engine needs.
///
/// Identity management is an external collaborator; the engine only
/// consumes existence, the external device code, and the employee's
/// operating timezone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: Uuid,
    /// The external code capture devices know the employee by.
    pub employee_code: String,
    /// The employee's IANA operating timezone; falls back to the
    /// engine's configured default when absent.
    pub timezone: Option<Tz>,
    /// Whether the employee is active.
    pub active: bool,
}

impl Employee {
    /// Returns the employee's timezone, or `fallback` when none is set.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::Employee;
    /// use chrono_tz::Tz;
    /// use uuid::Uuid;
    ///
    /// let employee = Employee {
    ///     id: Uuid::new_v4(),
    ///     employee_code: "EMP-001".to_string(),
    ///     timezone: None,
    ///     active: true,
    /// };
    /// assert_eq!(employee.timezone_or(chrono_tz::UTC), chrono_tz::UTC);
    /// ```
    pub fn timezone_or(&self, fallback: Tz) -> Tz {
        self.timezone.unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timezone_or_prefers_own_zone() {
        let employee = Employee {
            id: Uuid::new_v4(),
            employee_code: "EMP-001".to_string(),
            timezone: Some(chrono_tz::Asia::Dhaka),
            active: true,
        };
        assert_eq!(employee.timezone_or(chrono_tz::UTC), chrono_tz::Asia::Dhaka);
    }
}
