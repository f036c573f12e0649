//! Statistical imputation methods.
//!
//! Numeric columns are filled with their mean, every other column with its
//! mode (ties broken by the lexicographically first value).

use crate::error::Result;
use crate::utils::{is_numeric_dtype, numeric_values, text_mode};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// How a single column was filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImputedColumn {
    pub column: String,
    /// "mean" or "mode".
    pub method: String,
    /// Fill value rendered as text.
    pub value: String,
    /// Number of cells that were missing and are now filled.
    pub filled: usize,
}

/// Per-column outcome of one imputation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImputationReport {
    pub imputed: Vec<ImputedColumn>,
    /// Columns with no observed value to derive a statistic from. Their
    /// missing cells are left as they are.
    pub unresolved: Vec<String>,
}

impl ImputationReport {
    pub fn cells_filled(&self) -> usize {
        self.imputed.iter().map(|c| c.filled).sum()
    }
}

/// Statistical imputation methods for filling missing values.
pub struct StatisticalImputer;

impl StatisticalImputer {
    /// Fill every missing cell of every column that has at least one.
    ///
    /// Columns without missing cells are untouched.
    pub fn impute_all(df: &mut DataFrame) -> Result<ImputationReport> {
        let mut report = ImputationReport::default();
        let column_names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        for col_name in &column_names {
            let series = df.column(col_name)?.as_materialized_series().clone();
            let missing = series.null_count();
            if missing == 0 {
                continue;
            }

            let outcome = if is_numeric_dtype(series.dtype()) {
                Self::apply_numeric_mean(df, &series)?
            } else {
                Self::apply_mode(df, &series)?
            };

            match outcome {
                Some((method, value)) => {
                    debug!(
                        "Filled {} missing value(s) in '{}' with {}: {}",
                        missing, col_name, method, value
                    );
                    report.imputed.push(ImputedColumn {
                        column: col_name.clone(),
                        method: method.to_string(),
                        value,
                        filled: missing,
                    });
                }
                None => {
                    warn!(
                        "Column '{}' has no observed values; leaving {} missing cell(s) unresolved",
                        col_name, missing
                    );
                    report.unresolved.push(col_name.clone());
                }
            }
        }

        Ok(report)
    }

    /// Replace nulls with the column mean. The column becomes `Float64`.
    ///
    /// Float NaN cells are left out of the mean and are not filled.
    fn apply_numeric_mean(
        df: &mut DataFrame,
        series: &Series,
    ) -> Result<Option<(&'static str, String)>> {
        let values = numeric_values(series)?;
        let Some(mean_val) = nan_skipping_mean(&values) else {
            return Ok(None);
        };

        let filled: Vec<f64> = values
            .into_iter()
            .map(|v| v.unwrap_or(mean_val))
            .collect();

        let name = series.name().to_string();
        df.replace(&name, Series::new(series.name().clone(), filled))?;
        Ok(Some(("mean", format!("{:.4}", mean_val))))
    }

    /// Replace nulls with the most frequent value, keeping the column dtype.
    fn apply_mode(df: &mut DataFrame, series: &Series) -> Result<Option<(&'static str, String)>> {
        let Some((mode_val, mode_idx)) = text_mode(series)? else {
            return Ok(None);
        };

        // Gather from the first occurrence of the mode so the original dtype
        // survives (booleans stay booleans, categoricals stay categoricals).
        let mask = series.is_null();
        let indices: Vec<IdxSize> = mask
            .into_iter()
            .enumerate()
            .map(|(i, is_null)| {
                if is_null.unwrap_or(false) {
                    mode_idx as IdxSize
                } else {
                    i as IdxSize
                }
            })
            .collect();

        let filled = series.take_slice(&indices)?;
        let name = series.name().to_string();
        df.replace(&name, filled)?;
        Ok(Some(("mode", mode_val)))
    }
}

fn nan_skipping_mean(values: &[Option<f64>]) -> Option<f64> {
    let (sum, count) = values
        .iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}
