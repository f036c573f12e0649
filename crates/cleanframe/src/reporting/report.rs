use crate::error::Result;
use crate::pipeline::CleaningResult;
use crate::reporting::CleaningSummary;
use crate::types::{ActionKind, ActionLog};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Machine-readable record of one cleaning run.
///
/// Used for both JSON output (`--json`) and file writing (`--emit-report`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Path to the input file
    pub input_file: String,
    /// Path to the output file (if written)
    pub output_file: Option<String>,
    /// Whether the run was in auto-clean mode
    pub auto_clean: bool,
    pub summary: CleaningSummary,
    /// Actions in execution order, each with its kind and message
    pub actions: ActionLog,
    /// One explanation per action
    pub explanations: Vec<String>,
}

impl CleaningReport {
    pub fn new(input_file: &str, output_file: Option<&str>, result: &CleaningResult) -> Self {
        Self {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: input_file.to_string(),
            output_file: output_file.map(String::from),
            auto_clean: result.log.kinds().contains(&ActionKind::AutoClean),
            summary: result.summary.clone(),
            actions: result.log.clone(),
            explanations: result.explanations.clone(),
        }
    }

    /// Write the report as pretty-printed JSON.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut file = File::create(path)?;
        file.write_all(serde_json::to_string_pretty(self)?.as_bytes())?;
        info!("Report saved: {}", path.display());
        Ok(())
    }
}
