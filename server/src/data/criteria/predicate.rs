//! Predicate tree and SQL rendering
//!
//! Column names in a predicate are always `&'static str` taken from an
//! allow-list. Caller values only ever travel as bound parameters.

use std::fmt;

use super::types::{FilterOp, Operand};
use crate::utils::sql::escape_like_pattern;

/// A bound parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<&Operand> for SqlValue {
    fn from(operand: &Operand) -> Self {
        match operand {
            Operand::Bool(b) => SqlValue::Bool(*b),
            Operand::Int(i) => SqlValue::Int(*i),
            Operand::Float(f) => SqlValue::Float(*f),
            Operand::Text(s) => SqlValue::Text(s.clone()),
        }
    }
}

impl From<&str> for SqlValue {
    fn from(s: &str) -> Self {
        SqlValue::Text(s.to_string())
    }
}

impl From<i64> for SqlValue {
    fn from(i: i64) -> Self {
        SqlValue::Int(i)
    }
}

/// Collects SQL parameters during query building (maintains insertion order)
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SqlParams {
    pub values: Vec<SqlValue>,
}

impl SqlParams {
    fn push(&mut self, value: impl Into<SqlValue>) {
        self.values.push(value.into());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl CompareOp {
    /// Comparison operator for a filter slot, if the slot is a comparison
    pub fn from_filter_op(op: FilterOp) -> Option<Self> {
        match op {
            FilterOp::Eq => Some(CompareOp::Eq),
            FilterOp::Neq => Some(CompareOp::Ne),
            FilterOp::Gt => Some(CompareOp::Gt),
            FilterOp::Gte => Some(CompareOp::Gte),
            FilterOp::Lt => Some(CompareOp::Lt),
            FilterOp::Lte => Some(CompareOp::Lte),
            _ => None,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "<>",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
        }
    }
}

/// Boolean condition over allow-listed columns
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Compare {
        column: &'static str,
        op: CompareOp,
        value: SqlValue,
    },
    /// Substring match; the pattern is matched literally
    Like {
        column: &'static str,
        pattern: String,
    },
    In {
        column: &'static str,
        values: Vec<String>,
        negated: bool,
    },
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
}

impl Predicate {
    /// Conjunction of `parts`, or `None` when there is nothing to combine
    pub fn all(mut parts: Vec<Predicate>) -> Option<Predicate> {
        match parts.len() {
            0 => None,
            1 => parts.pop(),
            _ => Some(Predicate::And(parts)),
        }
    }

    /// Disjunction of `parts`, or `None` when there is nothing to combine
    pub fn any(mut parts: Vec<Predicate>) -> Option<Predicate> {
        match parts.len() {
            0 => None,
            1 => parts.pop(),
            _ => Some(Predicate::Or(parts)),
        }
    }

    /// AND `other` onto this predicate, flattening nested conjunctions
    pub fn and(self, other: Predicate) -> Predicate {
        let mut parts = match self {
            Predicate::And(parts) => parts,
            p => vec![p],
        };
        match other {
            Predicate::And(more) => parts.extend(more),
            p => parts.push(p),
        }
        Predicate::And(parts)
    }

    /// Generate SQL WHERE clause fragment
    /// Returns the SQL clause with ? placeholders and updates params
    pub fn to_sql(&self, params: &mut SqlParams) -> String {
        match self {
            Predicate::Compare { column, op, value } => {
                params.push(value.clone());
                format!("{} {} ?", column, op.as_sql())
            }
            Predicate::Like { column, pattern } => {
                params.push(format!("%{}%", escape_like_pattern(pattern)).as_str());
                format!("{} LIKE ? ESCAPE '\\'", column)
            }
            Predicate::In {
                column,
                values,
                negated,
            } => {
                if values.is_empty() {
                    return if *negated { "1=1" } else { "1=0" }.to_string();
                }
                let placeholders: Vec<&str> = values.iter().map(|_| "?").collect();
                for v in values {
                    params.push(v.as_str());
                }
                let op = if *negated { "NOT IN" } else { "IN" };
                format!("{} {} ({})", column, op, placeholders.join(", "))
            }
            Predicate::And(parts) => join(parts, " AND ", "1=1", params),
            Predicate::Or(parts) => join(parts, " OR ", "1=0", params),
        }
    }
}

fn join(parts: &[Predicate], sep: &str, empty: &str, params: &mut SqlParams) -> String {
    match parts {
        [] => empty.to_string(),
        [only] => only.to_sql(params),
        _ => {
            let rendered: Vec<String> = parts.iter().map(|p| p.to_sql(params)).collect();
            format!("({})", rendered.join(sep))
        }
    }
}

impl fmt::Display for Predicate {
    /// SQL text with placeholders; parameter values are not shown
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut params = SqlParams::default();
        f.write_str(&self.to_sql(&mut params))
    }
}
