//! Outlier handling module.
//!
//! Removes rows whose numeric values fall outside Tukey fences built from the
//! interquartile range.

use crate::error::Result;
use crate::utils::{DtypeCategory, column_names_by_category, numeric_values, quantile_linear, sort_f64};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fences computed for one column and the rows they removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnBounds {
    pub column: String,
    pub q1: f64,
    pub q3: f64,
    pub lower: f64,
    pub upper: f64,
    pub rows_removed: usize,
}

impl ColumnBounds {
    /// Whether a value lies inside the closed interval `[lower, upper]`.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// Result of one outlier pass over all numeric columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutlierReport {
    pub bounds: Vec<ColumnBounds>,
}

impl OutlierReport {
    pub fn total_removed(&self) -> usize {
        self.bounds.iter().map(|b| b.rows_removed).sum()
    }
}

/// Handles outlier detection and treatment.
pub struct OutlierHandler;

impl OutlierHandler {
    /// Compute `[Q1 - k*IQR, Q3 + k*IQR]` for a Series.
    ///
    /// Quartiles use linear interpolation. Nulls and NaNs are ignored;
    /// returns `None` when nothing is left.
    pub fn iqr_bounds(series: &Series, multiplier: f64) -> Result<Option<ColumnBounds>> {
        let mut observed: Vec<f64> = numeric_values(series)?
            .into_iter()
            .flatten()
            .filter(|v| !v.is_nan())
            .collect();
        sort_f64(&mut observed);

        let (Some(q1), Some(q3)) = (
            quantile_linear(&observed, 0.25),
            quantile_linear(&observed, 0.75),
        ) else {
            return Ok(None);
        };
        let iqr = q3 - q1;

        Ok(Some(ColumnBounds {
            column: series.name().to_string(),
            q1,
            q3,
            lower: q1 - multiplier * iqr,
            upper: q3 + multiplier * iqr,
            rows_removed: 0,
        }))
    }

    /// Remove outlier rows column by column.
    ///
    /// Columns are visited in order and each column's fences are computed on
    /// the rows that survived the previous columns. A missing or NaN cell is
    /// never outside the fences, and NaN does not shift the quartiles.
    pub fn remove_outliers(df: &mut DataFrame, multiplier: f64) -> Result<OutlierReport> {
        let mut report = OutlierReport::default();
        let numeric_columns = column_names_by_category(df, DtypeCategory::Numeric);

        for col_name in &numeric_columns {
            let series = df.column(col_name)?.as_materialized_series().clone();
            let Some(mut bounds) = Self::iqr_bounds(&series, multiplier)? else {
                debug!("Skipping '{}': no observed values", col_name);
                continue;
            };

            let mask_values: Vec<bool> = numeric_values(&series)?
                .into_iter()
                .map(|opt_val| match opt_val {
                    Some(val) if !val.is_nan() => bounds.contains(val),
                    _ => true,
                })
                .collect();

            let before_rows = df.height();
            let mask = BooleanChunked::from_slice("mask".into(), &mask_values);
            *df = df.filter(&mask)?;
            bounds.rows_removed = before_rows - df.height();

            debug!(
                "'{}': bounds [{:.4}, {:.4}], removed {} row(s)",
                col_name, bounds.lower, bounds.upper, bounds.rows_removed
            );
            report.bounds.push(bounds);
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_outliers_basic() {
        // Q1 = 3.25, Q3 = 7.75, IQR = 4.5, bounds = [-3.5, 14.5]
        let mut df = df![
            "value" => [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 100.0],
        ]
        .unwrap();

        let report = OutlierHandler::remove_outliers(&mut df, 1.5).unwrap();

        assert_eq!(df.height(), 9);
        assert_eq!(report.total_removed(), 1);
        let bounds = &report.bounds[0];
        assert!((bounds.q1 - 3.25).abs() < 1e-12);
        assert!((bounds.q3 - 7.75).abs() < 1e-12);
        assert!((bounds.upper - 14.5).abs() < 1e-12);

        let col = df.column("value").unwrap().f64().unwrap();
        assert_eq!(col.max(), Some(9.0));
    }

    #[test]
    fn test_remove_outliers_no_outliers() {
        let mut df = df![
            "value" => [1.0, 2.0, 3.0, 4.0, 5.0],
        ]
        .unwrap();

        let report = OutlierHandler::remove_outliers(&mut df, 1.5).unwrap();

        assert_eq!(df.height(), 5);
        assert_eq!(report.total_removed(), 0);
    }

    #[test]
    fn test_remove_outliers_iqr_zero() {
        // All same values: IQR = 0, bounds = [5, 5]
        let mut df = df![
            "value" => [5.0, 5.0, 5.0, 5.0, 5.0],
        ]
        .unwrap();

        OutlierHandler::remove_outliers(&mut df, 1.5).unwrap();

        assert_eq!(df.height(), 5);
    }

    #[test]
    fn test_remove_outliers_preserves_nulls() {
        let mut df = df![
            "value" => [Some(1.0), Some(2.0), None, Some(4.0), Some(5.0)],
        ]
        .unwrap();

        OutlierHandler::remove_outliers(&mut df, 1.5).unwrap();

        assert_eq!(df.height(), 5);
        assert_eq!(df.column("value").unwrap().null_count(), 1);
    }

    #[test]
    fn test_nan_rows_are_kept_and_ignored_by_fences() {
        // Without the NaN the fences are [-3.5, 14.5], so only 100.0 goes.
        let mut df = df![
            "value" => [1.0, 2.0, 3.0, 4.0, 5.0, f64::NAN, 6.0, 7.0, 8.0, 9.0, 100.0],
        ]
        .unwrap();

        let report = OutlierHandler::remove_outliers(&mut df, 1.5).unwrap();

        assert_eq!(report.total_removed(), 1);
        assert_eq!(report.bounds[0].q1, 3.25);
        assert_eq!(report.bounds[0].q3, 7.75);
        assert_eq!(df.height(), 10);
        let values = df.column("value").unwrap().f64().unwrap();
        assert!(values.get(5).unwrap().is_nan());
    }

    #[test]
    fn test_bounds_cascade_across_columns() {
        // Column "a" removes the last row first. On the nine rows left, "b"
        // has Q1 = Q3 = 1, so both 2.0 and 5.0 fall outside. Fences computed
        // on all ten rows would be [-0.125, 2.875] and keep the 2.0.
        let mut df = df![
            "a" => [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 1000.0],
            "b" => [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 5.0, 50.0],
        ]
        .unwrap();

        let report = OutlierHandler::remove_outliers(&mut df, 1.5).unwrap();

        assert_eq!(report.bounds.len(), 2);
        assert_eq!(report.bounds[0].rows_removed, 1);
        let b = &report.bounds[1];
        assert_eq!(b.q1, 1.0);
        assert_eq!(b.q3, 1.0);
        assert_eq!(b.rows_removed, 2);
        assert_eq!(df.height(), 7);
        assert_eq!(report.total_removed(), 3);

        let pristine = df![
            "b" => [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 5.0, 50.0],
        ]
        .unwrap();
        let independent = OutlierHandler::iqr_bounds(
            pristine.column("b").unwrap().as_materialized_series(),
            1.5,
        )
        .unwrap()
        .unwrap();
        assert!(independent.contains(2.0));
    }

    #[test]
    fn test_integer_columns_are_handled() {
        let mut df = df![
            "n" => [10i64, 11, 12, 13, 14, 15, 16, 17, 18, -500],
            "label" => ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"],
        ]
        .unwrap();

        OutlierHandler::remove_outliers(&mut df, 1.5).unwrap();

        assert_eq!(df.height(), 9);
        assert_eq!(df.column("n").unwrap().dtype(), &DataType::Int64);
    }

    #[test]
    fn test_all_null_column_is_skipped() {
        let mut df = df![
            "empty" => [Option::<f64>::None, None],
        ]
        .unwrap();

        let report = OutlierHandler::remove_outliers(&mut df, 1.5).unwrap();

        assert!(report.bounds.is_empty());
        assert_eq!(df.height(), 2);
    }

    #[test]
    fn test_remove_outliers_empty_dataframe() {
        let mut df = DataFrame::empty();
        let report = OutlierHandler::remove_outliers(&mut df, 1.5).unwrap();
        assert_eq!(report.total_removed(), 0);
        assert_eq!(df.height(), 0);
    }
}
