//! Policy loading functionality.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::EnginePolicy;

/// Loads the engine operating policy from a YAML file.
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::PolicyLoader;
///
/// let policy = PolicyLoader::load("./policy.yaml").unwrap();
/// assert!(policy.leave.annual_days > 0);
/// ```
pub struct PolicyLoader;

impl PolicyLoader {
    /// Reads and parses the policy file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PolicyNotFound`] when the file does not
    /// exist and [`EngineError::PolicyParseError`] when it is not valid
    /// YAML for [`EnginePolicy`].
    pub fn load(path: impl AsRef<Path>) -> EngineResult<EnginePolicy> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(EngineError::PolicyNotFound {
                path: path.display().to_string(),
            });
        }

        let contents = fs::read_to_string(path).map_err(|err| EngineError::PolicyParseError {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;

        serde_yaml::from_str(&contents).map_err(|err| EngineError::PolicyParseError {
            path: path.display().to_string(),
            message: err.to_string(),
        })
    }

    /// Loads the policy file at `path` when it exists, otherwise the
    /// in-code defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> EngineResult<EnginePolicy> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(EnginePolicy::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn test_load_missing_file_is_policy_not_found() {
        let err = PolicyLoader::load("/definitely/missing/policy.yaml").unwrap_err();
        assert!(matches!(err, EngineError::PolicyNotFound { .. }));
    }

    #[test]
    fn test_load_or_default_missing_file_yields_defaults() {
        let policy = PolicyLoader::load_or_default("/definitely/missing/policy.yaml").unwrap();
        assert_eq!(policy, EnginePolicy::default());
    }

    #[test]
    fn test_load_parses_overrides() {
        let dir = std::env::temp_dir().join("attendance-engine-policy-test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("policy.yaml");
        fs::write(&path, "classifier:\n  early_exit_window_minutes: 45\n").unwrap();

        let policy = PolicyLoader::load(&path).unwrap();
        assert_eq!(policy.classifier.early_exit_window_minutes, 45);
        assert_eq!(policy.leave.annual_days, 20);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_bad_yaml_is_parse_error() {
        let dir = std::env::temp_dir().join("attendance-engine-policy-test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.yaml");
        fs::write(&path, "leave: [not, a, map]\n").unwrap();

        let err = PolicyLoader::load(&path).unwrap_err();
        assert!(matches!(err, EngineError::PolicyParseError { .. }));

        fs::remove_file(&path).ok();
    }
}
