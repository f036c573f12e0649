//! Progress reporting for the cleaning runner.
//!
//! The runner emits one update before each step it executes and one terminal
//! update (complete or failed). The number of steps depends on the
//! configuration, so overall progress is the fraction of planned steps
//! already finished.
//!
//! # Example
//!
//! ```rust,ignore
//! let result = Cleaner::builder()
//!     .on_progress(|update| {
//!         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
//!     })
//!     .build()?
//!     .clean(df)?;
//! ```

use crate::config::CleaningStep;
use serde::{Deserialize, Serialize};

/// Stages of a cleaning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleaningStage {
    /// Validating the input and setting up the pipeline
    Initializing,
    /// Filling missing values
    Imputation,
    /// Removing duplicate rows
    Duplicates,
    /// Removing outlier rows
    Outliers,
    /// Removing constant columns
    Constants,
    /// Normalizing text columns
    TextCleaning,
    /// Pruning correlated columns
    Correlation,
    /// Run completed successfully
    Complete,
    /// Run failed with an error
    Failed,
}

impl CleaningStage {
    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Initializing => "Initializing",
            Self::Imputation => "Imputing Values",
            Self::Duplicates => "Removing Duplicates",
            Self::Outliers => "Handling Outliers",
            Self::Constants => "Removing Constant Columns",
            Self::TextCleaning => "Cleaning Text",
            Self::Correlation => "Pruning Correlated Columns",
            Self::Complete => "Complete",
            Self::Failed => "Failed",
        }
    }

    /// Whether the run is over at this stage.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Failed)
    }
}

impl From<CleaningStep> for CleaningStage {
    fn from(step: CleaningStep) -> Self {
        match step {
            CleaningStep::Duplicates => Self::Duplicates,
            CleaningStep::Outliers => Self::Outliers,
            CleaningStep::Constants => Self::Constants,
            CleaningStep::Text => Self::TextCleaning,
            CleaningStep::Correlation => Self::Correlation,
        }
    }
}

/// A single progress notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Current stage
    pub stage: CleaningStage,

    /// Overall progress (0.0 - 1.0)
    pub progress: f32,

    /// Human-readable message describing current activity
    pub message: String,

    /// Steps finished so far
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps_done: Option<usize>,

    /// Steps planned for this run, imputation included
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps_total: Option<usize>,
}

impl ProgressUpdate {
    /// Creates an update without step counts.
    pub fn new(stage: CleaningStage, progress: f32, message: impl Into<String>) -> Self {
        Self {
            stage,
            progress: progress.clamp(0.0, 1.0),
            message: message.into(),
            steps_done: None,
            steps_total: None,
        }
    }

    /// Creates an update for a step about to run.
    pub fn with_steps(
        stage: CleaningStage,
        done: usize,
        total: usize,
        message: impl Into<String>,
    ) -> Self {
        let progress = if total > 0 {
            done as f32 / total as f32
        } else {
            0.0
        };
        Self {
            steps_done: Some(done),
            steps_total: Some(total),
            ..Self::new(stage, progress, message)
        }
    }

    /// Creates a completion update.
    pub fn complete(message: impl Into<String>) -> Self {
        Self::new(CleaningStage::Complete, 1.0, message)
    }

    /// Creates a failure update.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::new(CleaningStage::Failed, 0.0, message)
    }
}

/// Receives progress updates from the runner.
///
/// Implementations must be `Send + Sync` so a run can happen on a worker
/// thread while updates are consumed elsewhere.
pub trait ProgressReporter: Send + Sync {
    /// Called once per executed step and once when the run ends.
    fn report(&self, update: ProgressUpdate);
}

/// [`ProgressReporter`] backed by a closure.
pub struct ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    callback: F,
}

impl<F> ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    /// Creates a new closure-based progress reporter.
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ProgressReporter for ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    fn report(&self, update: ProgressUpdate) {
        (self.callback)(update);
    }
}

static_assertions::assert_impl_all!(ProgressUpdate: Send, Sync);
