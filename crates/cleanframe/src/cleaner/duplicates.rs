//! Exact duplicate row removal.

use crate::error::Result;
use polars::prelude::*;
use tracing::debug;

/// Removes rows that repeat an earlier row across all columns.
pub struct DuplicateRemover;

impl DuplicateRemover {
    /// Drop every row equal to an earlier one, keeping the first occurrence.
    ///
    /// Surviving rows keep their relative order. Values compare the way
    /// polars compares them: missing cells equal each other, and `0.0`
    /// equals `-0.0`. Returns the number of rows removed.
    pub fn remove_duplicates(df: &mut DataFrame) -> Result<usize> {
        if df.height() == 0 || df.width() == 0 {
            return Ok(0);
        }

        let deduplicated = df.unique_stable(None, UniqueKeepStrategy::First, None)?;
        let removed = df.height() - deduplicated.height();

        if removed > 0 {
            *df = deduplicated;
            debug!("Removed {} duplicate rows", removed);
        } else {
            debug!("No duplicate rows found");
        }

        Ok(removed)
    }

    /// Count duplicate rows without modifying the frame.
    pub fn count_duplicates(df: &DataFrame) -> Result<usize> {
        if df.height() == 0 || df.width() == 0 {
            return Ok(0);
        }
        let unique_height = df
            .unique_stable(None, UniqueKeepStrategy::First, None)?
            .height();
        Ok(df.height() - unique_height)
    }
}
