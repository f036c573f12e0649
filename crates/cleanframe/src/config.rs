//! Configuration types for the cleaning pipeline.
//!
//! This module provides configuration options using the builder pattern
//! for flexible and ergonomic pipeline setup.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default absolute Pearson correlation above which a column is redundant.
pub const DEFAULT_CORRELATION_THRESHOLD: f64 = 0.85;

/// Default Tukey fence multiplier for the IQR outlier rule.
pub const DEFAULT_IQR_MULTIPLIER: f64 = 1.5;

/// An optional cleaning operation a caller can select.
///
/// Missing-value imputation is not listed here: it always runs first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleaningStep {
    /// Drop exact duplicate rows, keeping the first occurrence.
    Duplicates,
    /// Drop rows outside the IQR fences of any numeric column.
    Outliers,
    /// Drop columns holding at most one distinct value.
    Constants,
    /// Trim and strip punctuation from text columns.
    Text,
    /// Drop numeric columns highly correlated with an earlier column.
    Correlation,
}

impl CleaningStep {
    /// Order used when the caller selects steps explicitly.
    pub const SELECTED_ORDER: [CleaningStep; 5] = [
        CleaningStep::Duplicates,
        CleaningStep::Outliers,
        CleaningStep::Constants,
        CleaningStep::Text,
        CleaningStep::Correlation,
    ];

    /// Order used in auto-clean mode. Constants run before outliers here,
    /// unlike [`CleaningStep::SELECTED_ORDER`].
    pub const AUTO_ORDER: [CleaningStep; 5] = [
        CleaningStep::Duplicates,
        CleaningStep::Constants,
        CleaningStep::Outliers,
        CleaningStep::Text,
        CleaningStep::Correlation,
    ];

    /// Machine-friendly name, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Duplicates => "duplicates",
            Self::Outliers => "outliers",
            Self::Constants => "constants",
            Self::Text => "text",
            Self::Correlation => "correlation",
        }
    }
}

impl fmt::Display for CleaningStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CleaningStep {
    type Err = ConfigValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "duplicates" => Ok(Self::Duplicates),
            "outliers" => Ok(Self::Outliers),
            "constants" => Ok(Self::Constants),
            "text" => Ok(Self::Text),
            "correlation" => Ok(Self::Correlation),
            other => Err(ConfigValidationError::UnknownStep(other.to_string())),
        }
    }
}

/// Configuration for the cleaning pipeline.
///
/// Use [`CleaningConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use cleanframe::config::{CleaningConfig, CleaningStep};
///
/// let config = CleaningConfig::builder()
///     .protected_column("price")
///     .step(CleaningStep::Outliers)
///     .correlation_threshold(0.9)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningConfig {
    /// Absolute correlation above which a later column is dropped (0.0 - 1.0).
    /// Default: 0.85
    pub correlation_threshold: f64,

    /// Multiplier applied to the IQR when computing the outlier fences.
    /// Default: 1.5
    pub iqr_multiplier: f64,

    /// Column that correlation pruning must never drop.
    /// Ignored when the dataset has no such column.
    /// Default: None
    pub protected_column: Option<String>,

    /// Optional steps selected by the caller. Empty selects auto-clean mode.
    /// Default: empty
    #[serde(default)]
    pub steps: Vec<CleaningStep>,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            correlation_threshold: DEFAULT_CORRELATION_THRESHOLD,
            iqr_multiplier: DEFAULT_IQR_MULTIPLIER,
            protected_column: None,
            steps: Vec::new(),
        }
    }
}

impl CleaningConfig {
    /// Create a new configuration builder.
    pub fn builder() -> CleaningConfigBuilder {
        CleaningConfigBuilder::default()
    }

    /// True when no optional step was selected.
    pub fn is_auto_clean(&self) -> bool {
        self.steps.is_empty()
    }

    /// Steps to run after imputation, in execution order, each at most once.
    pub fn execution_plan(&self) -> Vec<CleaningStep> {
        if self.is_auto_clean() {
            CleaningStep::AUTO_ORDER.to_vec()
        } else {
            CleaningStep::SELECTED_ORDER
                .into_iter()
                .filter(|step| self.steps.contains(step))
                .collect()
        }
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !(0.0..=1.0).contains(&self.correlation_threshold) {
            return Err(ConfigValidationError::InvalidThreshold {
                field: "correlation_threshold".to_string(),
                value: self.correlation_threshold,
            });
        }

        if !self.iqr_multiplier.is_finite() || self.iqr_multiplier < 0.0 {
            return Err(ConfigValidationError::InvalidMultiplier(self.iqr_multiplier));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid threshold for '{field}': {value} (must be between 0.0 and 1.0)")]
    InvalidThreshold { field: String, value: f64 },

    #[error("Invalid IQR multiplier: {0} (must be a finite, non-negative number)")]
    InvalidMultiplier(f64),

    #[error("Unknown cleaning step: '{0}'")]
    UnknownStep(String),
}

/// Builder for [`CleaningConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct CleaningConfigBuilder {
    correlation_threshold: Option<f64>,
    iqr_multiplier: Option<f64>,
    protected_column: Option<String>,
    steps: Vec<CleaningStep>,
}

impl CleaningConfigBuilder {
    /// Set the correlation threshold used for feature pruning.
    ///
    /// # Arguments
    /// * `threshold` - Value between 0.0 and 1.0 (e.g., 0.85)
    pub fn correlation_threshold(mut self, threshold: f64) -> Self {
        self.correlation_threshold = Some(threshold);
        self
    }

    /// Set the IQR fence multiplier.
    pub fn iqr_multiplier(mut self, multiplier: f64) -> Self {
        self.iqr_multiplier = Some(multiplier);
        self
    }

    /// Protect a column from correlation pruning.
    pub fn protected_column(mut self, column: impl Into<String>) -> Self {
        self.protected_column = Some(column.into());
        self
    }

    /// Select one optional step. Selecting the same step twice has no effect.
    pub fn step(mut self, step: CleaningStep) -> Self {
        if !self.steps.contains(&step) {
            self.steps.push(step);
        }
        self
    }

    /// Select several optional steps.
    pub fn steps(self, steps: impl IntoIterator<Item = CleaningStep>) -> Self {
        steps.into_iter().fold(self, |builder, step| builder.step(step))
    }

    /// Build the configuration.
    ///
    /// Returns a validated `CleaningConfig` or an error if validation fails.
    pub fn build(self) -> Result<CleaningConfig, ConfigValidationError> {
        let config = CleaningConfig {
            correlation_threshold: self
                .correlation_threshold
                .unwrap_or(DEFAULT_CORRELATION_THRESHOLD),
            iqr_multiplier: self.iqr_multiplier.unwrap_or(DEFAULT_IQR_MULTIPLIER),
            protected_column: self.protected_column,
            steps: self.steps,
        };

        config.validate()?;
        Ok(config)
    }
}
