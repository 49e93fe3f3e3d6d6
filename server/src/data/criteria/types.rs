//! Criteria type definitions
//!
//! Defines the parsed shape of a caller's filter/sort/pagination request.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

/// Prefix/suffix wrapping a filter field in a query key: `filter[<field>]`
const FILTER_KEY_PREFIX: &str = "filter[";
const FILTER_KEY_SUFFIX: &str = "]";

/// Scalar operand of a comparison slot
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Operand {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

/// Operator bindings requested for one field.
///
/// Populated slots combine with AND. `or` holds nested specs for the
/// same field whose resolved branches combine with OR.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FilterSpec {
    pub eq: Option<Operand>,
    pub neq: Option<Operand>,
    pub gt: Option<Operand>,
    pub gte: Option<Operand>,
    pub lt: Option<Operand>,
    pub lte: Option<Operand>,
    pub like: Option<String>,
    #[serde(rename = "in")]
    pub in_list: Option<Vec<String>>,
    pub notin: Option<Vec<String>>,
    pub or: Option<Vec<FilterSpec>>,
}

impl FilterSpec {
    /// Comparison slots in their fixed resolution order
    pub fn comparisons(&self) -> [(FilterOp, Option<&Operand>); 6] {
        [
            (FilterOp::Eq, self.eq.as_ref()),
            (FilterOp::Neq, self.neq.as_ref()),
            (FilterOp::Gt, self.gt.as_ref()),
            (FilterOp::Gte, self.gte.as_ref()),
            (FilterOp::Lt, self.lt.as_ref()),
            (FilterOp::Lte, self.lte.as_ref()),
        ]
    }
}

/// Operator slot names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
    In,
    NotIn,
    Or,
}

impl FilterOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOp::Eq => "eq",
            FilterOp::Neq => "neq",
            FilterOp::Gt => "gt",
            FilterOp::Gte => "gte",
            FilterOp::Lt => "lt",
            FilterOp::Lte => "lte",
            FilterOp::Like => "like",
            FilterOp::In => "in",
            FilterOp::NotIn => "notin",
            FilterOp::Or => "or",
        }
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Parsed `sort` key: one column and an optional direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortExpr {
    pub column: String,
    pub direction: SortDirection,
}

/// Parsed representation of a caller's query criteria.
///
/// Built fresh per request and consumed once by the composer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    pub sort: Option<SortExpr>,
    /// 0 means unset
    pub page: i64,
    /// 0 means unset
    pub limit: i64,
    pub filters: BTreeMap<String, FilterSpec>,
}

/// Raw criteria text as extracted from a request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCriteria {
    /// Simple keys (`sort`, `page`, `limit`, anything else is ignored)
    pub params: BTreeMap<String, String>,
    /// `filter[<field>]` entries keyed by field name, values are JSON text
    pub filters: BTreeMap<String, String>,
}

impl RawCriteria {
    /// Split decoded query pairs into simple keys and filter entries.
    /// A repeated key keeps its last value.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut raw = Self::default();
        for (key, value) in pairs {
            let key = key.into();
            match key
                .strip_prefix(FILTER_KEY_PREFIX)
                .and_then(|rest| rest.strip_suffix(FILTER_KEY_SUFFIX))
            {
                Some(field) => {
                    raw.filters.insert(field.to_string(), value.into());
                }
                None => {
                    raw.params.insert(key, value.into());
                }
            }
        }
        raw
    }
}
