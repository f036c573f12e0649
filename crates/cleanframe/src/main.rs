//! CLI entry point for the cleaning pipeline.

use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};
use cleanframe::io::default_output_path;
use cleanframe::{
    ActionRecord, Cleaner, CleaningConfig, CleaningReport, CleaningStep, ExportFormat,
    read_dataset, write_dataset,
};
use std::path::Path;
use tracing::{error, info};

/// CLI-compatible cleaning step enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CliStep {
    /// Remove exact duplicate rows
    Duplicates,
    /// Remove rows outside the IQR fences
    Outliers,
    /// Remove columns with a single distinct value
    Constants,
    /// Trim text and strip punctuation
    Text,
    /// Remove highly correlated numeric columns
    Correlation,
}

impl From<CliStep> for CleaningStep {
    fn from(cli: CliStep) -> Self {
        match cli {
            CliStep::Duplicates => CleaningStep::Duplicates,
            CliStep::Outliers => CleaningStep::Outliers,
            CliStep::Constants => CleaningStep::Constants,
            CliStep::Text => CleaningStep::Text,
            CliStep::Correlation => CleaningStep::Correlation,
        }
    }
}

/// CLI-compatible export format enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliExportFormat {
    Csv,
    Json,
    Parquet,
}

impl From<CliExportFormat> for ExportFormat {
    fn from(cli: CliExportFormat) -> Self {
        match cli {
            CliExportFormat::Csv => ExportFormat::Csv,
            CliExportFormat::Json => ExportFormat::Json,
            CliExportFormat::Parquet => ExportFormat::Parquet,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Tabular data cleaning with an auditable action log",
    long_about = "Cleans a CSV dataset and explains every action taken.\n\n\
                  Missing values are always imputed. Without any --step the tool runs\n\
                  in auto-clean mode and applies every step.\n\n\
                  EXAMPLES:\n  \
                  # Auto-clean\n  \
                  cleanframe -i data.csv\n\n  \
                  # Only duplicates and outliers, exported as Parquet\n  \
                  cleanframe -i data.csv --step duplicates --step outliers --format parquet\n\n  \
                  # Keep the target column out of correlation pruning\n  \
                  cleanframe -i data.csv --target price"
)]
struct Args {
    /// Path to the CSV file to clean
    #[arg(short, long)]
    input: String,

    /// Output file path
    ///
    /// Defaults to <input_stem>_cleaned.<format> next to the input
    #[arg(short, long)]
    output: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: CliExportFormat,

    /// Column protected from correlation pruning (ignored if absent)
    #[arg(short, long)]
    target: Option<String>,

    /// Optional step to run; repeat to select several (none = auto-clean)
    #[arg(short, long = "step", value_enum)]
    steps: Vec<CliStep>,

    /// Absolute correlation above which a later column is dropped
    #[arg(long, default_value = "0.85")]
    correlation_threshold: f64,

    /// IQR multiplier for the outlier fences
    #[arg(long, default_value = "1.5")]
    iqr_multiplier: f64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,

    /// Output JSON to stdout instead of human-readable summary
    ///
    /// Disables all logs; only outputs the final JSON report.
    #[arg(long)]
    json: bool,

    /// Write a JSON report next to the output file
    ///
    /// The report will be saved as <input_stem>_report.json
    #[arg(short = 'r', long)]
    emit_report: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled so stdout only
/// carries the JSON report.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level, args.quiet, args.json);

    if !Path::new(&args.input).exists() {
        return Err(anyhow!("Input file not found: {}", args.input));
    }

    info!("Loading dataset from: {}", args.input);
    let data = read_dataset(&args.input)?;

    let mut config_builder = CleaningConfig::builder()
        .correlation_threshold(args.correlation_threshold)
        .iqr_multiplier(args.iqr_multiplier)
        .steps(args.steps.iter().copied().map(CleaningStep::from));
    if let Some(ref target) = args.target {
        config_builder = config_builder.protected_column(target);
    }
    let config = config_builder.build()?;

    let mut builder = Cleaner::builder().config(config);
    if !args.quiet {
        builder = builder.on_progress(|update| {
            info!(
                "[{:.0}%] {}: {}",
                update.progress * 100.0,
                update.stage.display_name(),
                update.message
            );
        });
    }
    let cleaner = builder.build()?;

    let mut result = match cleaner.clean(data) {
        Ok(result) => result,
        Err(e) => {
            error!("Cleaning failed: {}", e);
            return Err(anyhow!("Cleaning failed: {}", e));
        }
    };

    let format = ExportFormat::from(args.format);
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input, format).display().to_string());
    write_dataset(&mut result.data, &output_path, format)?;

    let report = CleaningReport::new(&args.input, Some(&output_path), &result);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if args.emit_report {
        let report_path = Path::new(&output_path)
            .with_file_name(format!("{}_report.json", extract_file_stem(&args.input)));
        report.write_to_file(&report_path)?;
    }

    print_human_readable_summary(&report);
    Ok(())
}

/// Extract the file stem (name without extension) from a path.
fn extract_file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string()
}

/// `[Kind] message` line for the "Actions Taken" list.
fn action_line(action: &ActionRecord) -> String {
    format!("[{}] {}", action.kind().display_name(), action)
}

/// Print a human-readable summary of the cleaning results.
fn print_human_readable_summary(report: &CleaningReport) {
    let summary = &report.summary;

    println!();
    println!("{}", "=".repeat(80));
    println!("CLEANING COMPLETE");
    println!("{}", "=".repeat(80));
    println!();

    println!(
        "Input:  {} ({} rows x {} columns)",
        report.input_file, summary.before.rows, summary.before.columns
    );
    if let Some(ref output_file) = report.output_file {
        println!(
            "Output: {} ({} rows x {} columns)",
            output_file, summary.after.rows, summary.after.columns
        );
    }
    println!(
        "Mode:   {}",
        if report.auto_clean { "auto-clean" } else { "selected steps" }
    );
    println!();

    println!("Cleaning Impact:");
    println!("  Duration: {}ms", summary.duration_ms);
    println!(
        "  Rows: {} -> {} ({} removed, {:.2}% reduction)",
        summary.before.rows, summary.after.rows, summary.rows_removed, summary.data_reduction_percent
    );
    println!(
        "  Columns: {} -> {} ({} removed)",
        summary.before.columns, summary.after.columns, summary.columns_removed
    );
    println!(
        "  Missing cells: {} -> {}",
        summary.before.missing, summary.after.missing
    );
    println!("  Duplicate rows before cleaning: {}", summary.before.duplicates);
    println!();

    println!("Actions Taken:");
    for (action, explanation) in report.actions.iter().zip(&report.explanations) {
        println!("  - {}", action_line(action));
        println!("      {}", explanation);
    }
    println!();

    println!("Use --json for machine-readable output");
    println!("Use --emit-report to save a JSON report");
    println!("{}", "=".repeat(80));
}
