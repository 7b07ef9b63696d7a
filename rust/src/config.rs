//! Configuration for the ranking engine.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use thiserror::Error;

/// Default minimum rest between two assignments of the same worker.
pub const DEFAULT_MINIMUM_REST_HOURS: f64 = 8.0;

/// Errors from [`RankingConfig::validate`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("minimum_rest_hours must be a finite, non-negative number (got {0})")]
    InvalidRestHours(f64),
}

/// Tunables for conflict classification and logging.
#[pyclass]
#[derive(Clone, Debug)]
pub struct RankingConfig {
    /// Gaps strictly shorter than this between two assignments are violations.
    #[pyo3(get, set)]
    pub minimum_rest_hours: f64,
    /// Verbosity level: 0=silent, 1=summary, 2=checks, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            minimum_rest_hours: DEFAULT_MINIMUM_REST_HOURS,
            verbosity: 0,
        }
    }
}

impl RankingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.minimum_rest_hours.is_finite() || self.minimum_rest_hours < 0.0 {
            return Err(ConfigError::InvalidRestHours(self.minimum_rest_hours));
        }
        Ok(())
    }
}

#[pymethods]
impl RankingConfig {
    #[new]
    #[pyo3(signature = (minimum_rest_hours=None, verbosity=None))]
    fn new(minimum_rest_hours: Option<f64>, verbosity: Option<u8>) -> PyResult<Self> {
        let defaults = Self::default();
        let config = Self {
            minimum_rest_hours: minimum_rest_hours.unwrap_or(defaults.minimum_rest_hours),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        };
        config
            .validate()
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(config)
    }

    fn __repr__(&self) -> String {
        format!(
            "RankingConfig(minimum_rest_hours={}, verbosity={})",
            self.minimum_rest_hours, self.verbosity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rest_is_eight_hours() {
        let config = RankingConfig::default();
        assert_eq!(config.minimum_rest_hours, 8.0);
        assert_eq!(config.verbosity, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_and_nan() {
        let mut config = RankingConfig {
            minimum_rest_hours: -1.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidRestHours(-1.0)));

        config.minimum_rest_hours = f64::NAN;
        assert!(config.validate().is_err());

        config.minimum_rest_hours = 0.0;
        assert!(config.validate().is_ok());
    }
}
