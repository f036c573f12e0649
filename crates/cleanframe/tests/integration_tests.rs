//! Integration tests for the cleaning pipeline.
//!
//! These tests verify end-to-end behavior using small CSV datasets.

use cleanframe::{
    ActionKind, Cleaner, CleaningConfig, CleaningError, CleaningPipeline, CleaningReport,
    CleaningStage, CleaningStep, ExportFormat, read_dataset, write_dataset,
};
use polars::prelude::*;
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_csv(filename: &str) -> DataFrame {
    read_dataset(fixtures_path().join(filename)).expect("Failed to read CSV fixture")
}

fn texts(df: &DataFrame, column: &str) -> Vec<Option<String>> {
    df.column(column)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.map(String::from))
        .collect()
}

fn floats(df: &DataFrame, column: &str) -> Vec<Option<f64>> {
    df.column(column)
        .unwrap()
        .cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .collect()
}

// ============================================================================
// Auto-clean
// ============================================================================

#[test]
fn test_auto_clean_end_to_end() {
    let df = load_csv("customers.csv");
    assert_eq!(df.shape(), (10, 4));

    let result = Cleaner::builder().build().unwrap().clean(df).unwrap();

    assert_eq!(
        result.log.messages(),
        vec![
            "Missing values were handled using statistical methods.",
            "Duplicate rows removed: 0",
            "Removed 1 constant column(s): [\"flag\"]",
            "Outliers handled using IQR method. Rows removed: 1",
            "Cleaned text columns by trimming spaces and removing special characters.",
            "No highly correlated columns found.",
            "Auto-clean mode applied: All essential cleaning steps executed.",
        ]
    );

    let data = &result.data;
    assert_eq!(data.shape(), (9, 3));
    assert!(data.column("flag").is_err());

    // Mean of the eight observed ages is 33.75.
    let ages = floats(data, "age");
    assert_eq!(ages[2], Some(33.75));
    assert_eq!(ages[6], Some(33.75));
    assert_eq!(data.column("age").unwrap().null_count(), 0);

    let incomes = floats(data, "income");
    assert!(incomes.iter().all(|v| v.unwrap() < 100_000.0));

    let cities = texts(data, "city");
    assert_eq!(cities[0].as_deref(), Some("New York"));
    assert_eq!(cities[6].as_deref(), Some("Madrid"));
    assert!(!cities.iter().flatten().any(|c| c.contains('.') || c.contains('?')));
    assert!(!cities.iter().flatten().any(|c| c == "Lima"));
}

#[test]
fn test_auto_clean_summary_and_explanations() {
    let result = Cleaner::builder()
        .build()
        .unwrap()
        .clean(load_csv("customers.csv"))
        .unwrap();

    let summary = &result.summary;
    assert_eq!(summary.before.rows, 10);
    assert_eq!(summary.before.missing, 2);
    assert_eq!(summary.after.missing, 0);
    assert_eq!(summary.rows_removed, 1);
    assert_eq!(summary.columns_removed, 1);
    assert_eq!(summary.data_reduction_percent, 10.0);

    assert_eq!(result.explanations.len(), 7);
    assert!(result.explanations[0].contains("missing values"));
    assert!(result.explanations[3].contains("IQR method"));
    assert!(result.explanations[5].contains("correlated"));
}

#[test]
fn test_auto_clean_runs_constants_before_outliers() {
    // "c" only becomes constant once the outlier row is gone. In auto-clean
    // mode constants are checked first, so it survives.
    let df = df![
        "v" => [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 500.0],
        "c" => [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0],
    ]
    .unwrap();

    let result = Cleaner::builder().build().unwrap().clean(df).unwrap();

    assert_eq!(result.data.height(), 9);
    assert!(result.data.column("c").is_ok());
}

// ============================================================================
// Selected steps
// ============================================================================

#[test]
fn test_selected_mode_runs_outliers_before_constants() {
    let df = df![
        "v" => [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 500.0],
        "c" => [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0],
    ]
    .unwrap();

    let config = CleaningConfig::builder()
        .step(CleaningStep::Constants)
        .step(CleaningStep::Outliers)
        .build()
        .unwrap();
    let result = Cleaner::builder().config(config).build().unwrap().clean(df).unwrap();

    assert_eq!(
        result.log.kinds(),
        vec![ActionKind::MissingValues, ActionKind::Outliers, ActionKind::Constants]
    );
    assert_eq!(result.data.height(), 9);
    assert!(result.data.column("c").is_err());
}

#[test]
fn test_selected_mode_has_no_auto_clean_note() {
    let config = CleaningConfig::builder()
        .step(CleaningStep::Duplicates)
        .build()
        .unwrap();

    let result = Cleaner::builder()
        .config(config)
        .build()
        .unwrap()
        .clean(load_csv("duplicates.csv"))
        .unwrap();

    assert_eq!(result.log.len(), 2);
    assert!(!result.log.kinds().contains(&ActionKind::AutoClean));
}

#[test]
fn test_duplicates_keep_first_occurrence_in_order() {
    let mut pipeline = CleaningPipeline::new(load_csv("duplicates.csv")).unwrap();
    pipeline.remove_duplicate_rows().unwrap();
    pipeline.remove_duplicate_rows().unwrap();

    let (df, log) = pipeline.finish();

    assert_eq!(texts(&df, "label"), vec![Some("A".into()), Some("B".into()), Some("C".into())]);
    assert_eq!(
        log.messages(),
        vec!["Duplicate rows removed: 1", "Duplicate rows removed: 0"]
    );
}

// ============================================================================
// Protected column
// ============================================================================

#[test]
fn test_protected_column_is_kept_by_correlation_pruning() {
    let config = CleaningConfig::builder()
        .step(CleaningStep::Correlation)
        .protected_column("x")
        .build()
        .unwrap();

    let result = Cleaner::builder()
        .config(config)
        .build()
        .unwrap()
        .clean(load_csv("correlated.csv"))
        .unwrap();

    assert!(result.data.column("x").is_ok());
    assert!(result.data.column("y").is_err());
    assert!(result.data.column("z").is_ok());
    assert_eq!(
        result.log.last().unwrap().message(),
        "Highly correlated columns removed: [\"y\"]"
    );
}

#[test]
fn test_missing_protected_column_changes_nothing() {
    let run = |target: Option<&str>| {
        let mut builder = CleaningConfig::builder().step(CleaningStep::Correlation);
        if let Some(target) = target {
            builder = builder.protected_column(target);
        }
        Cleaner::builder()
            .config(builder.build().unwrap())
            .build()
            .unwrap()
            .clean(load_csv("correlated.csv"))
            .unwrap()
    };

    let with_typo = run(Some("not_a_column"));
    let without = run(None);

    assert_eq!(with_typo.log, without.log);
    assert!(with_typo.data.equals(&without.data));
}

// ============================================================================
// Errors and progress
// ============================================================================

#[test]
fn test_zero_column_dataset_is_rejected() {
    let err = Cleaner::builder()
        .build()
        .unwrap()
        .clean(DataFrame::empty())
        .unwrap_err();

    assert!(matches!(err, CleaningError::EmptyDataset));
    assert!(err.is_structural());
}

#[test]
fn test_progress_covers_every_auto_step() {
    let stages = Arc::new(Mutex::new(Vec::new()));
    let sink = stages.clone();

    Cleaner::builder()
        .on_progress(move |update| sink.lock().unwrap().push(update.stage))
        .build()
        .unwrap()
        .clean(load_csv("customers.csv"))
        .unwrap();

    assert_eq!(
        *stages.lock().unwrap(),
        vec![
            CleaningStage::Initializing,
            CleaningStage::Imputation,
            CleaningStage::Duplicates,
            CleaningStage::Constants,
            CleaningStage::Outliers,
            CleaningStage::TextCleaning,
            CleaningStage::Correlation,
            CleaningStage::Complete,
        ]
    );
}

// ============================================================================
// Export and report
// ============================================================================

#[test]
fn test_cleaned_dataset_export_and_report() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("customers_cleaned.csv");
    let report_path = dir.path().join("customers_report.json");

    let mut result = Cleaner::builder()
        .build()
        .unwrap()
        .clean(load_csv("customers.csv"))
        .unwrap();
    write_dataset(&mut result.data, &output, ExportFormat::Csv).unwrap();

    let reloaded = read_dataset(&output).unwrap();
    assert_eq!(reloaded.shape(), (9, 3));

    let report = CleaningReport::new("customers.csv", output.to_str(), &result);
    report.write_to_file(&report_path).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(json["auto_clean"], true);
    assert_eq!(json["actions"].as_array().unwrap().len(), 7);
    assert_eq!(json["actions"][2]["kind"], "constants");
    assert_eq!(json["summary"]["data_reduction_percent"], 10.0);
}
