//! Data cleaning module for structural dataset cleanup.
//!
//! This module provides functionality for:
//! - Removing exact duplicate rows
//! - Dropping constant columns
//! - Normalizing free-text columns

mod constants;
mod duplicates;
mod sanitizers;

pub use constants::ConstantColumnRemover;
pub use duplicates::DuplicateRemover;
pub use sanitizers::TextNormalizer;
