//! Evaluation configuration.

use crate::boundary::DEFAULT_BOUND_TH;
use crate::error::{Result, SegEvalError};
use serde::{Deserialize, Serialize};

/// Settings for dataset evaluation.
///
/// Every field has a default, so an empty JSON object is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// Boundary tolerances to evaluate. Values `>= 1` are pixel radii; values
    /// below 1 are fractions of the image diagonal.
    pub boundary_thresholds: Vec<f64>,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            boundary_thresholds: vec![DEFAULT_BOUND_TH],
        }
    }
}

impl EvalConfig {
    /// Check that the configuration can be evaluated.
    ///
    /// # Errors
    ///
    /// Returns `InvalidThreshold` if no tolerance is configured or if any
    /// tolerance is negative or not finite.
    pub fn validate(&self) -> Result<()> {
        if self.boundary_thresholds.is_empty() {
            return Err(SegEvalError::InvalidThreshold(
                "at least one boundary threshold is required".to_string(),
            ));
        }

        for &th in &self.boundary_thresholds {
            if !th.is_finite() || th < 0.0 {
                return Err(SegEvalError::InvalidThreshold(format!(
                    "boundary threshold must be a non-negative number, got {th}"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = EvalConfig::default();
        assert_eq!(config.boundary_thresholds, vec![2.0]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let config: EvalConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EvalConfig::default());
    }

    #[test]
    fn test_rejects_bad_thresholds() {
        let empty = EvalConfig {
            boundary_thresholds: vec![],
        };
        assert!(matches!(empty.validate(), Err(SegEvalError::InvalidThreshold(_))));

        let negative = EvalConfig {
            boundary_thresholds: vec![2.0, -0.5],
        };
        assert!(negative.validate().is_err());

        let nan = EvalConfig {
            boundary_thresholds: vec![f64::NAN],
        };
        assert!(nan.validate().is_err());
    }
}
