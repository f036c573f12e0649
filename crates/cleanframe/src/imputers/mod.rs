//! Imputation module for filling missing values.
//!
//! Provides mean imputation for numeric columns and mode imputation for
//! everything else.

mod statistical;

pub use statistical::{ImputationReport, ImputedColumn, StatisticalImputer};
