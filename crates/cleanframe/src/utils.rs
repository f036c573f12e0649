//! Shared utilities for the cleaning pipeline.
//!
//! This module contains dtype classification and the small statistical
//! kernels (quantiles, correlation, mode) used by several operations.

use polars::prelude::*;
use std::cmp::Ordering;
use std::collections::HashMap;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Category of a data type for cleaning purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DtypeCategory {
    /// Integer or floating point numbers
    Numeric,
    /// String/text type
    Text,
    /// Anything else (booleans, dates, nested types)
    Other,
}

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Check if a DataType holds free text.
#[inline]
pub fn is_text_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::String | DataType::Categorical(_, _))
}

/// Get the category of a DataType.
pub fn get_dtype_category(dtype: &DataType) -> DtypeCategory {
    if is_numeric_dtype(dtype) {
        DtypeCategory::Numeric
    } else if is_text_dtype(dtype) {
        DtypeCategory::Text
    } else {
        DtypeCategory::Other
    }
}

/// Names of all columns whose dtype falls in `category`, in column order.
pub fn column_names_by_category(df: &DataFrame, category: DtypeCategory) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|col| get_dtype_category(col.dtype()) == category)
        .map(|col| col.name().to_string())
        .collect()
}

// =============================================================================
// Series Statistics Utilities
// =============================================================================

/// Read a numeric Series as `f64` values, keeping nulls.
pub fn numeric_values(series: &Series) -> PolarsResult<Vec<Option<f64>>> {
    let float_series = series.cast(&DataType::Float64)?;
    let f64_chunked = float_series.f64()?;
    Ok(f64_chunked.into_iter().collect())
}

/// Quantile of already sorted values using linear interpolation between
/// the two nearest order statistics.
///
/// `q` is a fraction in `[0, 1]`. Returns `None` for an empty slice.
pub fn quantile_linear(sorted: &[f64], q: f64) -> Option<f64> {
    match sorted.len() {
        0 => None,
        1 => Some(sorted[0]),
        len => {
            let rank = q.clamp(0.0, 1.0) * (len - 1) as f64;
            let lower = rank.floor() as usize;
            let upper = rank.ceil() as usize;
            let frac = rank - lower as f64;
            Some(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
        }
    }
}

/// Pearson correlation over the rows where both values are present.
///
/// Returns `None` when fewer than two complete pairs exist or either side
/// has zero variance, so callers never compare against NaN.
pub fn pearson_pairwise(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter_map(|(a, b)| match (a, b) {
            (Some(a), Some(b)) if a.is_finite() && b.is_finite() => Some((*a, *b)),
            _ => None,
        })
        .collect();

    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    let r = cov / (var_x.sqrt() * var_y.sqrt());
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

/// Most frequent non-null value of a Series, compared by text representation.
///
/// Ties go to the lexicographically smallest value. Returns the value and the
/// row index of its first occurrence, or `None` if every cell is null.
pub fn text_mode(series: &Series) -> PolarsResult<Option<(String, usize)>> {
    let as_text = series.cast(&DataType::String)?;
    let str_chunked = as_text.str()?;

    let mut value_counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (idx, opt_val) in str_chunked.into_iter().enumerate() {
        if let Some(val) = opt_val {
            value_counts.entry(val).or_insert((0, idx)).0 += 1;
        }
    }

    Ok(value_counts
        .into_iter()
        .max_by(|(a_val, (a_count, _)), (b_val, (b_count, _))| {
            a_count.cmp(b_count).then_with(|| b_val.cmp(a_val))
        })
        .map(|(val, (_, first_idx))| (val.to_string(), first_idx)))
}

/// Sort values ascending, treating incomparable pairs as equal.
pub fn sort_f64(values: &mut [f64]) {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_numeric_dtype() {
        assert!(is_numeric_dtype(&DataType::Int64));
        assert!(is_numeric_dtype(&DataType::Float32));
        assert!(!is_numeric_dtype(&DataType::String));
        assert!(!is_numeric_dtype(&DataType::Boolean));
    }

    #[test]
    fn test_dtype_category() {
        assert_eq!(get_dtype_category(&DataType::UInt8), DtypeCategory::Numeric);
        assert_eq!(get_dtype_category(&DataType::String), DtypeCategory::Text);
        assert_eq!(get_dtype_category(&DataType::Boolean), DtypeCategory::Other);
        assert_eq!(get_dtype_category(&DataType::Date), DtypeCategory::Other);
    }

    #[test]
    fn test_column_names_by_category() {
        let df = df![
            "a" => [1, 2],
            "name" => ["x", "y"],
            "b" => [1.5, 2.5],
            "flag" => [true, false],
        ]
        .unwrap();

        assert_eq!(
            column_names_by_category(&df, DtypeCategory::Numeric),
            vec!["a".to_string(), "b".to_string()]
        );
        assert_eq!(
            column_names_by_category(&df, DtypeCategory::Text),
            vec!["name".to_string()]
        );
    }

    #[test]
    fn test_quantile_linear_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        // rank 0.75 between 1 and 2
        assert_eq!(quantile_linear(&sorted, 0.25), Some(1.75));
        assert_eq!(quantile_linear(&sorted, 0.75), Some(3.25));
        assert_eq!(quantile_linear(&sorted, 0.5), Some(2.5));
    }

    #[test]
    fn test_quantile_linear_edges() {
        assert_eq!(quantile_linear(&[], 0.5), None);
        assert_eq!(quantile_linear(&[7.0], 0.25), Some(7.0));
        assert_eq!(quantile_linear(&[1.0, 9.0], 0.0), Some(1.0));
        assert_eq!(quantile_linear(&[1.0, 9.0], 1.0), Some(9.0));
    }

    #[test]
    fn test_pearson_perfect_correlation() {
        let x = [Some(1.0), Some(2.0), Some(3.0), Some(4.0)];
        let y = [Some(2.0), Some(4.0), Some(6.0), Some(8.0)];
        let r = pearson_pairwise(&x, &y).unwrap();
        assert!((r - 1.0).abs() < 1e-12);

        let z = [Some(8.0), Some(6.0), Some(4.0), Some(2.0)];
        let r = pearson_pairwise(&x, &z).unwrap();
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_skips_incomplete_pairs() {
        let x = [Some(1.0), None, Some(3.0), Some(4.0)];
        let y = [Some(1.0), Some(100.0), Some(3.0), Some(4.0)];
        let r = pearson_pairwise(&x, &y).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_degenerate_inputs() {
        let x = [Some(1.0), Some(2.0), Some(3.0)];
        let constant = [Some(5.0), Some(5.0), Some(5.0)];
        assert_eq!(pearson_pairwise(&x, &constant), None);

        let one_pair = [Some(1.0), None, None];
        assert_eq!(pearson_pairwise(&x, &one_pair), None);
    }

    #[test]
    fn test_text_mode_prefers_lexicographic_first_on_tie() {
        let series = Series::new("s".into(), &[Some("pear"), Some("apple"), None, Some("pear"), Some("apple")]);
        assert_eq!(text_mode(&series).unwrap(), Some(("apple".to_string(), 1)));
    }

    #[test]
    fn test_text_mode_most_frequent() {
        let series = Series::new("s".into(), &["b", "a", "b", "c", "b"]);
        assert_eq!(text_mode(&series).unwrap(), Some(("b".to_string(), 0)));
    }

    #[test]
    fn test_text_mode_all_null() {
        let series = Series::new("s".into(), &[Option::<&str>::None, None]);
        assert_eq!(text_mode(&series).unwrap(), None);
    }

    #[test]
    fn test_numeric_values_keeps_nulls() {
        let series = Series::new("n".into(), &[Some(1i64), None, Some(3)]);
        assert_eq!(
            numeric_values(&series).unwrap(),
            vec![Some(1.0), None, Some(3.0)]
        );
    }
}
