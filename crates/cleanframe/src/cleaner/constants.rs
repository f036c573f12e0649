//! Constant column detection and removal.

use crate::error::Result;
use polars::prelude::*;
use tracing::debug;

/// Removes columns that carry no information.
pub struct ConstantColumnRemover;

impl ConstantColumnRemover {
    /// Number of distinct values in a Series, counting "missing" as one
    /// more value when any cell is null.
    pub fn distinct_with_missing(series: &Series) -> Result<usize> {
        let has_missing = usize::from(series.null_count() > 0);
        let non_null = series.drop_nulls();
        let distinct = if non_null.is_empty() {
            0
        } else {
            non_null.n_unique()?
        };
        Ok(distinct + has_missing)
    }

    /// Names of columns with at most one distinct value, in column order.
    pub fn find_constant_columns(df: &DataFrame) -> Result<Vec<String>> {
        let mut constant_cols = Vec::new();
        for col in df.get_columns() {
            if Self::distinct_with_missing(col.as_materialized_series())? <= 1 {
                constant_cols.push(col.name().to_string());
            }
        }
        Ok(constant_cols)
    }

    /// Drop all constant columns in one pass and return their names.
    pub fn remove_constant_columns(df: &mut DataFrame) -> Result<Vec<String>> {
        let constant_cols = Self::find_constant_columns(df)?;

        if !constant_cols.is_empty() {
            let cols_ref: Vec<PlSmallStr> = constant_cols
                .iter()
                .map(|s| s.as_str().into())
                .collect();
            *df = df.drop_many(cols_ref);
            debug!("Removed constant columns: {:?}", constant_cols);
        }

        Ok(constant_cols)
    }
}
