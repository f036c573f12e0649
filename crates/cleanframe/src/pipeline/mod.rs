//! Pipeline module.
//!
//! This module provides the cleaning pipeline, the row/column pruning
//! algorithms that need whole-frame statistics, and the runner that applies
//! the cleaning policy.

pub mod correlation;
mod engine;
pub mod outliers;
pub mod progress;
mod runner;

pub use correlation::{CorrelationMatrix, CorrelationPruner, PruneOutcome};
pub use engine::CleaningPipeline;
pub use outliers::{ColumnBounds, OutlierHandler, OutlierReport};
pub use progress::{ClosureProgressReporter, CleaningStage, ProgressReporter, ProgressUpdate};
pub use runner::{Cleaner, CleanerBuilder, CleaningResult};
