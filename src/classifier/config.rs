//! Training configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{KopisError, Result};
use crate::feature::DEFAULT_CRITICAL_VALUE;

/// Configuration for Naive Bayes training.
///
/// # Examples
///
/// ```
/// use kopis::classifier::NaiveBayesConfig;
///
/// let config: NaiveBayesConfig = serde_json::from_str("{}").unwrap();
/// assert_eq!(config.chisquare_critical_value, 10.83);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NaiveBayesConfig {
    /// Minimum chi-square score a feature needs (in at least one category) to
    /// be kept in the vocabulary. 10.83 corresponds to p = 0.001 with one
    /// degree of freedom.
    pub chisquare_critical_value: f64,
}

impl Default for NaiveBayesConfig {
    fn default() -> Self {
        Self {
            chisquare_critical_value: DEFAULT_CRITICAL_VALUE,
        }
    }
}

impl NaiveBayesConfig {
    /// Set the chi-square critical value.
    pub fn with_critical_value(mut self, critical_value: f64) -> Self {
        self.chisquare_critical_value = critical_value;
        self
    }

    /// Check that the configuration can be used for training.
    pub fn validate(&self) -> Result<()> {
        if self.chisquare_critical_value.is_nan() {
            return Err(KopisError::invalid_config(
                "chisquare_critical_value must be a number",
            ));
        }
        Ok(())
    }

    /// Load a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: NaiveBayesConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}
