//! Text sanitization functions for cleaning string values.

use crate::error::Result;
use crate::utils::{DtypeCategory, column_names_by_category};
use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;
use tracing::debug;

/// Anything that is neither a word character nor whitespace.
static SPECIAL_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s]").expect("Invalid regex: special characters"));

/// Normalizes free-text columns.
pub struct TextNormalizer;

impl TextNormalizer {
    /// Trim surrounding whitespace, then delete punctuation and symbols.
    ///
    /// Unicode letters, digits, underscores and inner whitespace survive.
    /// Deleted characters are not replaced by a separator.
    ///
    /// ```rust,ignore
    /// assert_eq!(TextNormalizer::normalize_value("  Hello, World!!  "), "Hello World");
    /// ```
    pub fn normalize_value(value: &str) -> String {
        SPECIAL_CHARS.replace_all(value.trim(), "").into_owned()
    }

    /// Normalize every text column in place and return the names touched.
    ///
    /// Categorical columns come back as plain strings. Null cells stay null.
    pub fn normalize_text_columns(df: &mut DataFrame) -> Result<Vec<String>> {
        let text_columns = column_names_by_category(df, DtypeCategory::Text);

        for col_name in &text_columns {
            let series = df.column(col_name)?.as_materialized_series().clone();
            let as_text = series.cast(&DataType::String)?;
            let str_series = as_text.str()?;

            let mut cleaned_values: Vec<Option<String>> = Vec::with_capacity(str_series.len());
            let mut changed = 0usize;
            for opt_val in str_series.into_iter() {
                match opt_val {
                    Some(val) => {
                        let cleaned = Self::normalize_value(val);
                        if cleaned != val {
                            changed += 1;
                        }
                        cleaned_values.push(Some(cleaned));
                    }
                    None => cleaned_values.push(None),
                }
            }

            let cleaned_series = Series::new(col_name.as_str().into(), cleaned_values);
            df.replace(col_name, cleaned_series)?;
            debug!("Normalized {} value(s) in '{}'", changed, col_name);
        }

        Ok(text_columns)
    }
}
