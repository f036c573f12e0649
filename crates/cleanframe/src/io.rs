//! Dataset ingestion and export.

use crate::error::{CleaningError, Result};
use polars::prelude::*;
use std::fmt;
use std::fs::File;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

/// Output formats for a cleaned dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values with a header row
    #[default]
    Csv,
    /// A JSON array of row objects
    Json,
    /// Apache Parquet
    Parquet,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Parquet => "parquet",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = CleaningError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "parquet" | "pq" => Ok(Self::Parquet),
            other => Err(CleaningError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Load a delimited text file into a frame.
///
/// The first line is the header. Column types are inferred from the whole
/// file, so a column whose values all parse as numbers becomes numeric.
/// Empty fields are missing values.
///
/// # Errors
///
/// [`CleaningError::UnsupportedFormat`] for anything but `.csv`
/// (spreadsheets included). [`CleaningError::Structural`] if neither the
/// file nor its cleaned content parses, e.g. rows with more fields than the
/// header.
pub fn read_dataset(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if extension != "csv" {
        return Err(CleaningError::UnsupportedFormat(extension));
    }

    let df = match csv_options()
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
    {
        Ok(df) => df,
        Err(e) => {
            debug!("Standard loading failed: {}; retrying on cleaned content", e);
            let cleaned = clean_csv_content(&std::fs::read_to_string(path)?);
            csv_options()
                .into_reader_with_file_handle(Cursor::new(cleaned))
                .finish()
                .map_err(|e| {
                    CleaningError::Structural(format!("{} could not be parsed: {}", path.display(), e))
                })?
        }
    };

    info!("Loaded {} with shape {:?}", path.display(), df.shape());
    Ok(df)
}

fn csv_options() -> CsvReadOptions {
    CsvReadOptions::default()
        .with_infer_schema_length(None)
        .with_has_header(true)
}

/// Collapse doubled quotes and drop blank lines.
fn clean_csv_content(content: &str) -> String {
    content
        .replace("\"\"\"", "\"")
        .replace("\"\"", "\"")
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write a frame to `path` in the given format.
pub fn write_dataset(df: &mut DataFrame, path: impl AsRef<Path>, format: ExportFormat) -> Result<()> {
    let path = path.as_ref();
    let mut file = File::create(path)?;

    match format {
        ExportFormat::Csv => {
            CsvWriter::new(&mut file)
                .include_header(true)
                .with_separator(b',')
                .with_quote_char(b'"')
                .finish(df)?;
        }
        ExportFormat::Json => {
            JsonWriter::new(&mut file)
                .with_json_format(JsonFormat::Json)
                .finish(df)?;
        }
        ExportFormat::Parquet => {
            ParquetWriter::new(&mut file).finish(df)?;
        }
    }

    info!("Dataset saved: {} ({})", path.display(), format);
    Ok(())
}

/// `<dir>/<stem>_cleaned.<ext>` next to the input file.
pub fn default_output_path(input: impl AsRef<Path>, format: ExportFormat) -> PathBuf {
    let input = input.as_ref();
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("dataset");
    input.with_file_name(format!("{}_cleaned.{}", stem, format.extension()))
}
