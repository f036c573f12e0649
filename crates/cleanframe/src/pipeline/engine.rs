//! The cleaning pipeline: an owned working copy of a dataset plus the log of
//! everything done to it.
//!
//! Every operation mutates the working frame in place and appends exactly one
//! [`ActionRecord`], including when it had nothing to do. Operations are
//! destructive and cumulative, so the order in which a caller invokes them
//! changes the result.

use crate::cleaner::{ConstantColumnRemover, DuplicateRemover, TextNormalizer};
use crate::config::{DEFAULT_CORRELATION_THRESHOLD, DEFAULT_IQR_MULTIPLIER};
use crate::error::{CleaningError, Result, ResultExt};
use crate::imputers::StatisticalImputer;
use crate::pipeline::correlation::{CorrelationPruner, PruneOutcome};
use crate::pipeline::outliers::OutlierHandler;
use crate::types::{ActionLog, ActionRecord};
use polars::prelude::*;
use tracing::{debug, info};

/// Owns the working dataset and its action log.
///
/// ```rust,ignore
/// let mut pipeline = CleaningPipeline::new(df)?;
/// pipeline.designate_protected_column("price");
/// pipeline.impute_missing()?;
/// pipeline.handle_outliers()?;
/// pipeline.remove_correlated_features(0.85)?;
/// let (cleaned, log) = pipeline.finish();
/// ```
#[derive(Debug, Clone)]
pub struct CleaningPipeline {
    data: DataFrame,
    log: ActionLog,
    protected_column: Option<String>,
    iqr_multiplier: f64,
}

impl CleaningPipeline {
    /// Take a snapshot of `df` as the working copy.
    ///
    /// The caller's frame is never modified: polars columns are shared
    /// copy-on-write and every operation replaces columns rather than
    /// writing into them.
    ///
    /// # Errors
    ///
    /// Returns [`CleaningError::EmptyDataset`] if `df` has no columns.
    pub fn new(df: DataFrame) -> Result<Self> {
        if df.width() == 0 {
            return Err(CleaningError::EmptyDataset);
        }

        debug!("Cleaning pipeline created for {:?} dataset", df.shape());
        Ok(Self {
            data: df,
            log: ActionLog::new(),
            protected_column: None,
            iqr_multiplier: DEFAULT_IQR_MULTIPLIER,
        })
    }

    /// Use a different Tukey fence multiplier for [`Self::handle_outliers`].
    pub fn with_iqr_multiplier(mut self, multiplier: f64) -> Self {
        self.iqr_multiplier = multiplier;
        self
    }

    /// Protect a column from correlation pruning.
    ///
    /// A name that is not a current column is silently ignored: it may be a
    /// typo, or a column the caller expected to exist. This is intentional
    /// and does not append a log record. Returns whether the name was taken.
    pub fn designate_protected_column(&mut self, name: &str) -> bool {
        if self.data.column(name).is_ok() {
            self.protected_column = Some(name.to_string());
            debug!("Protected column set to '{}'", name);
            true
        } else {
            debug!("Ignoring protected column '{}': not in dataset", name);
            false
        }
    }

    pub fn protected_column(&self) -> Option<&str> {
        self.protected_column.as_deref()
    }

    /// Current working dataset.
    pub fn dataset(&self) -> &DataFrame {
        &self.data
    }

    /// Records appended so far.
    pub fn log(&self) -> &ActionLog {
        &self.log
    }

    /// Fill missing cells: numeric columns with their mean, all other
    /// columns with their mode.
    ///
    /// Columns without any observed value are left as they are.
    pub fn impute_missing(&mut self) -> Result<()> {
        let report = StatisticalImputer::impute_all(&mut self.data).context("Imputing missing values")?;
        info!(
            "Imputed {} cell(s) across {} column(s)",
            report.cells_filled(),
            report.imputed.len()
        );
        self.log.push(ActionRecord::missing_values());
        Ok(())
    }

    /// Drop rows that repeat an earlier row, keeping the first.
    pub fn remove_duplicate_rows(&mut self) -> Result<()> {
        let removed = DuplicateRemover::remove_duplicates(&mut self.data)
            .context("Removing duplicate rows")?;
        info!("Removed {} duplicate row(s)", removed);
        self.log.push(ActionRecord::duplicates(removed));
        Ok(())
    }

    /// Drop rows outside the IQR fences, one numeric column after another.
    ///
    /// Each column's fences are computed on the rows that survived the
    /// columns before it.
    pub fn handle_outliers(&mut self) -> Result<()> {
        let report = OutlierHandler::remove_outliers(&mut self.data, self.iqr_multiplier)
            .context("Handling outliers")?;
        let removed = report.total_removed();
        info!("Removed {} outlier row(s)", removed);
        self.log.push(ActionRecord::outliers(removed));
        Ok(())
    }

    /// Drop numeric columns whose absolute correlation with an earlier
    /// numeric column exceeds `threshold`. The protected column stays.
    pub fn remove_correlated_features(&mut self, threshold: f64) -> Result<()> {
        // Re-resolve against the current columns; an earlier operation may
        // have dropped the protected column.
        let protected = self
            .protected_column
            .as_deref()
            .filter(|name| self.data.column(name).is_ok())
            .map(str::to_string);

        let outcome = CorrelationPruner::prune(&mut self.data, threshold, protected.as_deref())
            .context("Removing correlated features")?;

        let record = match outcome {
            PruneOutcome::NotEnoughColumns => {
                info!("Not enough numeric columns for correlation analysis");
                ActionRecord::correlation_skipped()
            }
            PruneOutcome::Removed(columns) => {
                info!("Removed {} correlated column(s)", columns.len());
                ActionRecord::correlated_removed(&columns)
            }
        };
        self.log.push(record);
        Ok(())
    }

    /// [`Self::remove_correlated_features`] with the default threshold.
    pub fn remove_correlated_features_default(&mut self) -> Result<()> {
        self.remove_correlated_features(DEFAULT_CORRELATION_THRESHOLD)
    }

    /// Drop columns with at most one distinct value (missing counts as one).
    pub fn remove_constant_columns(&mut self) -> Result<()> {
        let removed = ConstantColumnRemover::remove_constant_columns(&mut self.data)
            .context("Removing constant columns")?;
        info!("Removed {} constant column(s)", removed.len());
        self.log.push(ActionRecord::constants_removed(&removed));
        Ok(())
    }

    /// Trim text cells and delete punctuation and symbols.
    pub fn normalize_text_columns(&mut self) -> Result<()> {
        let touched = TextNormalizer::normalize_text_columns(&mut self.data)
            .context("Normalizing text columns")?;
        info!("Normalized {} text column(s)", touched.len());
        self.log.push(ActionRecord::text_cleaned());
        Ok(())
    }

    /// Append a record produced outside the built-in operations.
    pub(crate) fn record(&mut self, record: ActionRecord) {
        self.log.push(record);
    }

    /// Freeze the pipeline and hand back the working dataset and log.
    pub fn finish(self) -> (DataFrame, ActionLog) {
        (self.data, self.log)
    }
}
