//! Custom error types for the cleaning pipeline.
//!
//! Only structural problems with the input become errors. Expected edge cases
//! (nothing to remove, an unknown protected column, an all-missing column) are
//! absorbed into the action log instead.
//!
//! Errors are serializable so a front end can display them as `{code, message}`.

use crate::config::ConfigValidationError;
use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the cleaning pipeline.
#[derive(Error, Debug)]
pub enum CleaningError {
    /// The dataset has no columns at all.
    #[error("Dataset has no columns")]
    EmptyDataset,

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigValidationError),

    /// File extension or format name is not supported.
    #[error("Unsupported file format: '{0}'")]
    UnsupportedFormat(String),

    /// The dataset is malformed in a way no operation can recover from.
    #[error("Malformed dataset: {0}")]
    Structural(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<CleaningError>,
    },
}

impl CleaningError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        CleaningError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get a stable error code for front-end handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyDataset => "EMPTY_DATASET",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            Self::Structural(_) => "STRUCTURAL_FAILURE",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error comes from a malformed dataset rather than from
    /// the caller's setup (configuration, file names).
    pub fn is_structural(&self) -> bool {
        match self {
            Self::EmptyDataset | Self::Structural(_) | Self::Polars(_) => true,
            Self::WithContext { source, .. } => source.is_structural(),
            _ => false,
        }
    }
}

impl Serialize for CleaningError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("CleaningError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for cleaning operations.
pub type Result<T> = std::result::Result<T, CleaningError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| CleaningError::Polars(e).with_context(context))
    }
}
