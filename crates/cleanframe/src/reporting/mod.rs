//! Report generation module.
//!
//! Turns a finished run into something a person can read: before/after
//! statistics, one explanation per action, and a JSON report suitable for
//! stdout (`--json`) or a file (`--emit-report`).
//!
//! # Example
//!
//! ```rust,ignore
//! use cleanframe::reporting::CleaningReport;
//!
//! let report = CleaningReport::new("data/raw.csv", Some("data/raw_cleaned.csv"), &result);
//! println!("{}", serde_json::to_string_pretty(&report)?);
//! report.write_to_file("data/raw_report.json")?;
//! ```

mod explainer;
mod report;
mod summary;

pub use explainer::RuleExplainer;
pub use report::CleaningReport;
pub use summary::{CleaningSummary, DatasetStats};
