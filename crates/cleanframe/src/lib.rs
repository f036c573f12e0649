//! Tabular Data Cleaning Library
//!
//! A configurable cleaning pipeline for tabular datasets, built on Polars,
//! that records every action it takes.
//!
//! # Overview
//!
//! - **Imputation**: numeric columns get their mean, other columns their mode
//! - **Row cleanup**: exact duplicate removal and IQR outlier removal
//! - **Column cleanup**: constant columns and highly correlated numeric columns
//! - **Text normalization**: trimming and punctuation removal
//! - **Action log**: one record per operation, with a plain-language explanation
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use cleanframe::{Cleaner, CleaningConfig, read_dataset};
//!
//! let df = read_dataset("data.csv")?;
//!
//! // Auto-clean: every step, in a fixed order
//! let result = Cleaner::builder()
//!     .on_progress(|update| {
//!         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
//!     })
//!     .build()?
//!     .clean(df)?;
//!
//! for (action, why) in result.log.iter().zip(&result.explanations) {
//!     println!("{action}: {why}");
//! }
//! ```
//!
//! # Step-by-step
//!
//! [`CleaningPipeline`] exposes each operation for callers that want their
//! own order:
//!
//! ```rust,ignore
//! use cleanframe::CleaningPipeline;
//!
//! let mut pipeline = CleaningPipeline::new(df)?;
//! pipeline.designate_protected_column("price");
//! pipeline.impute_missing()?;
//! pipeline.remove_correlated_features(0.9)?;
//! let (cleaned, log) = pipeline.finish();
//! ```

pub mod cleaner;
pub mod config;
pub mod error;
pub mod imputers;
pub mod io;
pub mod pipeline;
pub mod reporting;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use config::{CleaningConfig, CleaningConfigBuilder, CleaningStep, ConfigValidationError};
pub use error::{CleaningError, Result, ResultExt};
pub use io::{ExportFormat, read_dataset, write_dataset};
pub use pipeline::{
    Cleaner, CleanerBuilder, CleaningPipeline, CleaningResult, CleaningStage,
    ClosureProgressReporter, ProgressReporter, ProgressUpdate,
};
pub use reporting::{CleaningReport, CleaningSummary, DatasetStats, RuleExplainer};
pub use types::{ActionKind, ActionLog, ActionRecord};
