//! Editor configuration.

use crate::geometry::SizeLimits;
use crate::history::{DEFAULT_DEBOUNCE_MS, DEFAULT_HISTORY_CAPACITY};
use crate::shapes::DEFAULT_SHAPE_SIZE;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid size limits: need 0 < min <= max, got min {min} max {max}")]
    InvalidLimits { min: f64, max: f64 },
}

/// Tunables for the shape store and its history.
///
/// Missing fields in a config file fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Maximum number of undo snapshots.
    pub history_capacity: usize,
    /// Quiet period for debounced history saves, in milliseconds.
    pub debounce_ms: u64,
    pub size_limits: SizeLimits,
    /// Width and height of newly added shapes.
    pub default_size: f64,
    /// Offset applied on both axes to duplicated shapes.
    pub duplicate_offset: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            size_limits: SizeLimits::default(),
            default_size: DEFAULT_SHAPE_SIZE,
            duplicate_offset: 20.0,
        }
    }
}

impl EditorConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let SizeLimits { min, max } = self.size_limits;
        if min.is_nan() || min <= 0.0 || !max.is_finite() || min > max {
            return Err(ConfigError::InvalidLimits { min, max });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.history_capacity, 50);
        assert_eq!(config.debounce(), Duration::from_millis(300));
        assert_eq!(config.size_limits.min, 20.0);
        assert_eq!(config.size_limits.max, 500.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EditorConfig::from_json(r#"{ "historyCapacity": 10 }"#).unwrap();
        assert_eq!(config.history_capacity, 10);
        assert_eq!(config.debounce_ms, 300);
        assert_eq!(config.default_size, 100.0);
    }

    #[test]
    fn test_rejects_inverted_limits() {
        let err = EditorConfig::from_json(r#"{ "sizeLimits": { "min": 50, "max": 10 } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLimits { .. }));
    }

    #[test]
    fn test_rejects_degenerate_limits() {
        for json in [
            r#"{ "sizeLimits": { "min": 0, "max": 10 } }"#,
            r#"{ "sizeLimits": { "min": -5, "max": 10 } }"#,
        ] {
            assert!(matches!(
                EditorConfig::from_json(json),
                Err(ConfigError::InvalidLimits { .. })
            ));
        }

        let mut config = EditorConfig::default();
        config.size_limits.max = f64::INFINITY;
        assert!(config.validate().is_err());
        config.size_limits.max = f64::NAN;
        assert!(config.validate().is_err());
        assert!(EditorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "debounceMs": 50, "duplicateOffset": 5 }}"#).unwrap();
        let config = EditorConfig::load(file.path()).unwrap();
        assert_eq!(config.debounce(), Duration::from_millis(50));
        assert_eq!(config.duplicate_offset, 5.0);
    }

    #[test]
    fn test_load_missing_file() {
        let err = EditorConfig::load("/nonexistent/shapeforge.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
