//! Criteria parsing
//!
//! Turns raw query text into a typed [`Criteria`]. Any failure aborts
//! the whole parse.

use std::collections::BTreeMap;

use super::error::CriteriaError;
use super::types::{Criteria, FilterSpec, RawCriteria, SortDirection, SortExpr};

/// Maximum size of one field's filter JSON in bytes (64KB)
const MAX_FILTER_JSON_SIZE: usize = 64 * 1024;

const KEY_SORT: &str = "sort";
const KEY_PAGE: &str = "page";
const KEY_LIMIT: &str = "limit";

/// Parse raw criteria into a typed `Criteria`.
///
/// Simple keys are coerced first, then each filter entry is decoded in
/// field-name order. Unknown simple keys are ignored.
pub fn parse_criteria(raw: &RawCriteria) -> Result<Criteria, CriteriaError> {
    let sort = match raw.params.get(KEY_SORT) {
        Some(value) => parse_sort(value)?,
        None => None,
    };
    let page = parse_int(KEY_PAGE, raw.params.get(KEY_PAGE))?;
    let limit = parse_int(KEY_LIMIT, raw.params.get(KEY_LIMIT))?;

    let mut filters = BTreeMap::new();
    for (field, json) in &raw.filters {
        filters.insert(field.clone(), parse_filter(field, json)?);
    }

    tracing::trace!(
        page,
        limit,
        sort = ?sort,
        filters = filters.len(),
        "Parsed criteria"
    );

    Ok(Criteria {
        sort,
        page,
        limit,
        filters,
    })
}

/// Decode one field's filter JSON
fn parse_filter(field: &str, json: &str) -> Result<FilterSpec, CriteriaError> {
    if json.len() > MAX_FILTER_JSON_SIZE {
        return Err(CriteriaError::FilterTooLarge {
            field: field.to_string(),
            max: MAX_FILTER_JSON_SIZE,
        });
    }

    serde_json::from_str(json).map_err(|source| CriteriaError::InvalidFilter {
        field: field.to_string(),
        source,
    })
}

/// Absent or blank means 0 (unset)
fn parse_int(key: &str, value: Option<&String>) -> Result<i64, CriteriaError> {
    let Some(value) = value else {
        return Ok(0);
    };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse::<i64>()
        .map_err(|_| CriteriaError::InvalidInteger {
            key: key.to_string(),
            value: value.clone(),
        })
}

/// Parse `column` or `column asc|desc`. Blank means no sort.
fn parse_sort(value: &str) -> Result<Option<SortExpr>, CriteriaError> {
    let parts: Vec<&str> = value.split_whitespace().collect();
    let (column, direction) = match parts.as_slice() {
        [] => return Ok(None),
        [column] => (*column, SortDirection::Asc),
        [column, direction] => match direction.to_ascii_lowercase().as_str() {
            "asc" => (*column, SortDirection::Asc),
            "desc" => (*column, SortDirection::Desc),
            _ => return Err(invalid_sort(value)),
        },
        _ => return Err(invalid_sort(value)),
    };

    if !is_identifier(column) {
        return Err(invalid_sort(value));
    }

    Ok(Some(SortExpr {
        column: column.to_string(),
        direction,
    }))
}

fn invalid_sort(value: &str) -> CriteriaError {
    CriteriaError::InvalidSort {
        value: value.to_string(),
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
