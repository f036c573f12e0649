//! Correlated feature pruning.
//!
//! Builds the absolute Pearson correlation matrix over numeric columns and
//! drops every column that is too strongly correlated with an earlier one.

use crate::error::Result;
use crate::utils::{DtypeCategory, column_names_by_category, numeric_values, pearson_pairwise};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Absolute correlations between numeric columns.
///
/// `values[i][j]` is `None` where the correlation is undefined (a constant
/// column, or fewer than two complete pairs). Undefined never counts as
/// correlated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// Compute the matrix for all numeric columns, in column order.
    pub fn from_numeric_columns(df: &DataFrame) -> Result<Self> {
        let columns = column_names_by_category(df, DtypeCategory::Numeric);

        let mut series_values: Vec<Vec<Option<f64>>> = Vec::with_capacity(columns.len());
        for name in &columns {
            series_values.push(numeric_values(df.column(name)?.as_materialized_series())?);
        }

        let size = columns.len();
        let mut values = vec![vec![None; size]; size];
        for i in 0..size {
            values[i][i] = Some(1.0);
            for j in (i + 1)..size {
                let r = pearson_pairwise(&series_values[i], &series_values[j]).map(f64::abs);
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        Ok(Self { columns, values })
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Absolute correlation between two named columns, if defined.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        self.values[i][j]
    }

    /// Columns whose correlation with some earlier column exceeds `threshold`.
    ///
    /// Only the strict upper triangle is read, so each pair is judged once
    /// and the later column of the pair is the one flagged. All flags are
    /// decided before anything is dropped.
    pub fn redundant_columns(&self, threshold: f64, protected: Option<&str>) -> Vec<String> {
        (0..self.len())
            .filter(|&j| {
                (0..j).any(|i| self.values[i][j].is_some_and(|r| r > threshold))
                    && protected != Some(self.columns[j].as_str())
            })
            .map(|j| self.columns[j].clone())
            .collect()
    }
}

/// Outcome of a pruning pass.
#[derive(Debug, Clone, PartialEq)]
pub enum PruneOutcome {
    /// Fewer than two numeric columns; nothing was compared.
    NotEnoughColumns,
    /// Columns dropped (possibly none).
    Removed(Vec<String>),
}

/// Drops redundant numeric features.
pub struct CorrelationPruner;

impl CorrelationPruner {
    /// Drop numeric columns correlated above `threshold` with an earlier
    /// numeric column, never dropping `protected`.
    pub fn prune(
        df: &mut DataFrame,
        threshold: f64,
        protected: Option<&str>,
    ) -> Result<PruneOutcome> {
        let matrix = CorrelationMatrix::from_numeric_columns(df)?;
        if matrix.len() < 2 {
            debug!("Only {} numeric column(s); skipping correlation", matrix.len());
            return Ok(PruneOutcome::NotEnoughColumns);
        }

        let to_drop = matrix.redundant_columns(threshold, protected);
        if !to_drop.is_empty() {
            let cols_ref: Vec<PlSmallStr> = to_drop.iter().map(|s| s.as_str().into()).collect();
            *df = df.drop_many(cols_ref);
            debug!("Dropped correlated columns: {:?}", to_drop);
        }

        Ok(PruneOutcome::Removed(to_drop))
    }
}
