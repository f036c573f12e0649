//! Before/after statistics for a cleaning run.

use crate::cleaner::DuplicateRemover;
use crate::error::Result;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Shape and quality counters for one dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetStats {
    pub rows: usize,
    pub columns: usize,
    /// Total missing cells across all columns.
    pub missing: usize,
    /// Rows that repeat an earlier row.
    pub duplicates: usize,
}

impl DatasetStats {
    pub fn collect(df: &DataFrame) -> Result<Self> {
        let missing = df.get_columns().iter().map(|col| col.null_count()).sum();
        Ok(Self {
            rows: df.height(),
            columns: df.width(),
            missing,
            duplicates: DuplicateRemover::count_duplicates(df)?,
        })
    }
}

/// Impact of a cleaning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningSummary {
    pub before: DatasetStats,
    pub after: DatasetStats,
    pub rows_removed: usize,
    pub columns_removed: usize,
    /// Share of input rows removed, in percent, rounded to two decimals.
    pub data_reduction_percent: f64,
    /// Total execution time in milliseconds.
    pub duration_ms: u64,
}

impl CleaningSummary {
    pub fn new(before: DatasetStats, after: DatasetStats, duration_ms: u64) -> Self {
        let rows_removed = before.rows.saturating_sub(after.rows);
        let columns_removed = before.columns.saturating_sub(after.columns);
        Self {
            before,
            after,
            rows_removed,
            columns_removed,
            data_reduction_percent: reduction_percent(rows_removed, before.rows),
            duration_ms,
        }
    }

    /// Missing cells resolved by the run.
    pub fn missing_resolved(&self) -> usize {
        self.before.missing.saturating_sub(self.after.missing)
    }
}

fn reduction_percent(removed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let percent = removed as f64 / total as f64 * 100.0;
    (percent * 100.0).round() / 100.0
}
