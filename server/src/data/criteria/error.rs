//! Criteria parse errors

use thiserror::Error;

/// Raised while turning raw query text into [`Criteria`](super::Criteria).
///
/// Any variant aborts the whole criteria build; no predicate is ever
/// built from a partially parsed request.
#[derive(Error, Debug)]
pub enum CriteriaError {
    #[error("Invalid value for '{key}': expected an integer, got '{value}'")]
    InvalidInteger { key: String, value: String },

    #[error("Invalid sort expression '{value}'. Use 'column' or 'column asc|desc'")]
    InvalidSort { value: String },

    #[error("Invalid filter for field '{field}': {source}")]
    InvalidFilter {
        field: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Filter for field '{field}' exceeds maximum size of {max} bytes")]
    FilterTooLarge { field: String, max: usize },
}

impl CriteriaError {
    /// The query key or filter field the error is about
    pub fn key(&self) -> &str {
        match self {
            Self::InvalidInteger { key, .. } => key,
            Self::InvalidSort { .. } => "sort",
            Self::InvalidFilter { field, .. } => field,
            Self::FilterTooLarge { field, .. } => field,
        }
    }
}
