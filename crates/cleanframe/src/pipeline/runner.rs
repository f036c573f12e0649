//! Orchestration of a complete cleaning run.
//!
//! Missing values are always imputed first. With no optional step selected
//! the runner goes into auto-clean mode and executes every step in a fixed
//! order; otherwise only the selected steps run, in their own fixed order.

use crate::config::{CleaningConfig, CleaningStep, ConfigValidationError};
use crate::error::Result;
use crate::pipeline::engine::CleaningPipeline;
use crate::pipeline::progress::{
    CleaningStage, ClosureProgressReporter, ProgressReporter, ProgressUpdate,
};
use crate::reporting::{CleaningSummary, DatasetStats, RuleExplainer};
use crate::types::{ActionLog, ActionRecord};
use polars::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

/// Everything a cleaning run produces.
#[derive(Debug, Clone)]
pub struct CleaningResult {
    /// The cleaned dataset.
    pub data: DataFrame,
    /// Records of every operation, in execution order.
    pub log: ActionLog,
    /// One explanation per log record, in the same order.
    pub explanations: Vec<String>,
    pub summary: CleaningSummary,
}

/// Runs the cleaning policy described by a [`CleaningConfig`].
///
/// # Example
///
/// ```rust,ignore
/// use cleanframe::{Cleaner, CleaningConfig, CleaningStep};
///
/// // Auto-clean
/// let result = Cleaner::builder().build()?.clean(df)?;
///
/// // Only duplicates and outliers, keeping "price"
/// let config = CleaningConfig::builder()
///     .step(CleaningStep::Duplicates)
///     .step(CleaningStep::Outliers)
///     .protected_column("price")
///     .build()?;
/// let result = Cleaner::builder().config(config).build()?.clean(df)?;
/// ```
pub struct Cleaner {
    config: CleaningConfig,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

static_assertions::assert_impl_all!(Cleaner: Send);

impl Cleaner {
    /// Create a new cleaner builder.
    pub fn builder() -> CleanerBuilder {
        CleanerBuilder::default()
    }

    pub fn config(&self) -> &CleaningConfig {
        &self.config
    }

    /// Clean a dataset.
    ///
    /// The input frame is consumed; polars shares column buffers, so a
    /// caller that keeps a clone of `df` still sees the original data.
    ///
    /// # Errors
    ///
    /// Returns [`CleaningError::EmptyDataset`](crate::CleaningError::EmptyDataset)
    /// when `df` has no columns, or a polars error if an operation fails.
    pub fn clean(&self, df: DataFrame) -> Result<CleaningResult> {
        match self.clean_internal(df) {
            Ok(result) => {
                self.report_progress(ProgressUpdate::complete("Cleaning completed successfully"));
                Ok(result)
            }
            Err(e) => {
                self.report_progress(ProgressUpdate::failed(e.to_string()));
                error!("Cleaning error: {}", e);
                Err(e)
            }
        }
    }

    /// Report progress if a reporter is configured.
    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }

    fn clean_internal(&self, df: DataFrame) -> Result<CleaningResult> {
        let start_time = Instant::now();

        info!("Starting cleaning run...");
        self.report_progress(ProgressUpdate::new(
            CleaningStage::Initializing,
            0.0,
            "Starting cleaning run...",
        ));

        let before = DatasetStats::collect(&df)?;
        let mut pipeline =
            CleaningPipeline::new(df)?.with_iqr_multiplier(self.config.iqr_multiplier);

        if let Some(target) = &self.config.protected_column
            && !pipeline.designate_protected_column(target)
        {
            warn!("Protected column '{}' not found; ignoring", target);
        }

        let plan = self.config.execution_plan();
        let total = plan.len() + 1;
        info!(
            "Mode: {}, steps: {:?}",
            if self.config.is_auto_clean() { "auto-clean" } else { "selected" },
            plan
        );

        self.report_progress(ProgressUpdate::with_steps(
            CleaningStage::Imputation,
            0,
            total,
            CleaningStage::Imputation.display_name(),
        ));
        pipeline.impute_missing()?;

        for (index, step) in plan.iter().enumerate() {
            let stage = CleaningStage::from(*step);
            self.report_progress(ProgressUpdate::with_steps(
                stage,
                index + 1,
                total,
                stage.display_name(),
            ));
            self.run_step(&mut pipeline, *step)?;
        }

        if self.config.is_auto_clean() {
            pipeline.record(ActionRecord::auto_clean());
        }

        let (data, log) = pipeline.finish();
        let after = DatasetStats::collect(&data)?;
        let explanations = RuleExplainer::explain_all(&log);
        let summary = CleaningSummary::new(before, after, start_time.elapsed().as_millis() as u64);

        info!(
            "Cleaning finished: {:?} -> {:?}, {} action(s)",
            (before.rows, before.columns),
            (after.rows, after.columns),
            log.len()
        );

        Ok(CleaningResult {
            data,
            log,
            explanations,
            summary,
        })
    }

    fn run_step(&self, pipeline: &mut CleaningPipeline, step: CleaningStep) -> Result<()> {
        match step {
            CleaningStep::Duplicates => pipeline.remove_duplicate_rows(),
            CleaningStep::Outliers => pipeline.handle_outliers(),
            CleaningStep::Constants => pipeline.remove_constant_columns(),
            CleaningStep::Text => pipeline.normalize_text_columns(),
            CleaningStep::Correlation => {
                pipeline.remove_correlated_features(self.config.correlation_threshold)
            }
        }
    }
}

/// Builder for creating a [`Cleaner`] instance.
#[derive(Default)]
pub struct CleanerBuilder {
    config: Option<CleaningConfig>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

static_assertions::assert_impl_all!(CleanerBuilder: Send);

impl CleanerBuilder {
    /// Set the cleaning configuration.
    pub fn config(mut self, config: CleaningConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a custom progress reporter.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a progress callback closure.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Build the cleaner.
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> std::result::Result<Cleaner, ConfigValidationError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        Ok(Cleaner {
            config,
            progress_reporter: self.progress_reporter,
        })
    }
}
