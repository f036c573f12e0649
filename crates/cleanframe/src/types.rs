use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of operation an [`ActionRecord`] describes.
///
/// Downstream consumers (the explainer, a UI) should match on this tag
/// instead of searching the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Missing values were imputed.
    MissingValues,
    /// Duplicate rows were removed.
    Duplicates,
    /// Rows outside the IQR fences were removed.
    Outliers,
    /// Constant columns were removed.
    Constants,
    /// Text columns were trimmed and stripped of punctuation.
    TextCleaning,
    /// Correlated numeric columns were pruned (or none were found).
    Correlation,
    /// Correlation pruning had fewer than two numeric columns to compare.
    CorrelationSkipped,
    /// Auto-clean mode ran every optional step.
    AutoClean,
}

impl ActionKind {
    /// Get a human-readable display name for the action kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::MissingValues => "Missing Values",
            Self::Duplicates => "Duplicate Rows",
            Self::Outliers => "Outliers",
            Self::Constants => "Constant Columns",
            Self::TextCleaning => "Text Cleaning",
            Self::Correlation => "Correlated Columns",
            Self::CorrelationSkipped => "Correlation Skipped",
            Self::AutoClean => "Auto Clean",
        }
    }
}

/// One completed operation and its quantitative effect.
///
/// Records are immutable once created. The message wording is kept stable:
/// explanation rules match on substrings such as "Missing values",
/// "Duplicate rows", "Outliers" and "correlated".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    kind: ActionKind,
    message: String,
}

impl ActionRecord {
    pub fn new(kind: ActionKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn missing_values() -> Self {
        Self::new(
            ActionKind::MissingValues,
            "Missing values were handled using statistical methods.",
        )
    }

    pub(crate) fn duplicates(removed: usize) -> Self {
        Self::new(
            ActionKind::Duplicates,
            format!("Duplicate rows removed: {}", removed),
        )
    }

    pub(crate) fn outliers(removed: usize) -> Self {
        Self::new(
            ActionKind::Outliers,
            format!("Outliers handled using IQR method. Rows removed: {}", removed),
        )
    }

    pub(crate) fn correlation_skipped() -> Self {
        Self::new(
            ActionKind::CorrelationSkipped,
            "Not enough numeric columns for correlation analysis.",
        )
    }

    pub(crate) fn correlated_removed(columns: &[String]) -> Self {
        if columns.is_empty() {
            Self::new(ActionKind::Correlation, "No highly correlated columns found.")
        } else {
            Self::new(
                ActionKind::Correlation,
                format!("Highly correlated columns removed: {:?}", columns),
            )
        }
    }

    pub(crate) fn constants_removed(columns: &[String]) -> Self {
        if columns.is_empty() {
            Self::new(ActionKind::Constants, "No constant columns found.")
        } else {
            Self::new(
                ActionKind::Constants,
                format!(
                    "Removed {} constant column(s): {:?}",
                    columns.len(),
                    columns
                ),
            )
        }
    }

    pub(crate) fn text_cleaned() -> Self {
        Self::new(
            ActionKind::TextCleaning,
            "Cleaned text columns by trimming spaces and removing special characters.",
        )
    }

    pub(crate) fn auto_clean() -> Self {
        Self::new(
            ActionKind::AutoClean,
            "Auto-clean mode applied: All essential cleaning steps executed.",
        )
    }
}

impl fmt::Display for ActionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Append-only audit trail of everything a pipeline did, in invocation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionLog {
    records: Vec<ActionRecord>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ActionRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ActionRecord> {
        self.records.iter()
    }

    pub fn last(&self) -> Option<&ActionRecord> {
        self.records.last()
    }

    /// Kinds of all records, in order.
    pub fn kinds(&self) -> Vec<ActionKind> {
        self.records.iter().map(ActionRecord::kind).collect()
    }

    /// Plain message strings, in order.
    pub fn messages(&self) -> Vec<String> {
        self.records.iter().map(|r| r.message.clone()).collect()
    }
}

impl<'a> IntoIterator for &'a ActionLog {
    type Item = &'a ActionRecord;
    type IntoIter = std::slice::Iter<'a, ActionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// ============================================================================
// Tests
// ============================================================================
