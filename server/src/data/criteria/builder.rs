//! Predicate builder
//!
//! Resolves each field's `FilterSpec` against an allow-list into
//! predicates, and records what happened to every slot.

use std::collections::BTreeMap;
use std::fmt;

use super::allow_list::{AllowList, FieldType};
use super::predicate::{CompareOp, Predicate, SqlValue};
use super::types::{FilterOp, FilterSpec};

/// Why a field or slot contributed nothing to the query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Field (or sort column) is not on the allow-list
    NotAllowListed,
    /// `like` on a field whose declared type is not string
    LikeOnNonString,
    /// `like` with an empty pattern
    EmptyPattern,
    /// `in`, `notin` or `or` with no entries
    EmptyList,
    /// An `or` branch resolved to nothing, so the disjunction is always true
    TrivialDisjunction,
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IgnoreReason::NotAllowListed => "not allow-listed",
            IgnoreReason::LikeOnNonString => "like on non-string field",
            IgnoreReason::EmptyPattern => "empty like pattern",
            IgnoreReason::EmptyList => "empty list",
            IgnoreReason::TrivialDisjunction => "or branch matches everything",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Ignored(IgnoreReason),
}

/// Part of the criteria a resolution refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clause {
    /// The whole field entry
    Field,
    Filter(FilterOp),
    Sort,
}

/// Outcome of resolving one part of the criteria
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub field: String,
    pub clause: Clause,
    pub outcome: Outcome,
}

impl Resolution {
    pub fn new(field: impl Into<String>, clause: Clause, outcome: Outcome) -> Self {
        Self {
            field: field.into(),
            clause,
            outcome,
        }
    }

    pub fn is_applied(&self) -> bool {
        self.outcome == Outcome::Applied
    }
}

/// Build the conjunction of all allow-listed filters.
///
/// Returns `None` when no slot produced a predicate. Never fails: input
/// that could not be parsed was already rejected by the parser.
pub fn build_predicates(
    filters: &BTreeMap<String, FilterSpec>,
    allow_list: &AllowList,
) -> (Option<Predicate>, Vec<Resolution>) {
    let mut resolutions = Vec::new();
    let mut parts = Vec::new();

    for (field, spec) in filters {
        let Some((column, field_type)) = allow_list.lookup(field) else {
            tracing::debug!(field = %field, "Ignoring filter on field outside allow-list");
            resolutions.push(Resolution::new(
                field.as_str(),
                Clause::Field,
                Outcome::Ignored(IgnoreReason::NotAllowListed),
            ));
            continue;
        };

        let mut resolver = FieldResolver {
            field,
            column,
            field_type,
            resolutions: &mut resolutions,
        };
        parts.extend(resolver.resolve(spec));
    }

    (Predicate::all(parts), resolutions)
}

struct FieldResolver<'a> {
    field: &'a str,
    column: &'static str,
    field_type: FieldType,
    resolutions: &'a mut Vec<Resolution>,
}

impl FieldResolver<'_> {
    /// Predicates for every populated slot, in fixed slot order
    fn resolve(&mut self, spec: &FilterSpec) -> Vec<Predicate> {
        let mut parts = Vec::new();

        for (op, operand) in spec.comparisons() {
            let (Some(operand), Some(cmp)) = (operand, CompareOp::from_filter_op(op)) else {
                continue;
            };
            parts.push(Predicate::Compare {
                column: self.column,
                op: cmp,
                value: SqlValue::from(operand),
            });
            self.applied(op);
        }

        if let Some(pattern) = &spec.like {
            if !self.field_type.is_string() {
                self.ignored(FilterOp::Like, IgnoreReason::LikeOnNonString);
            } else if pattern.is_empty() {
                self.ignored(FilterOp::Like, IgnoreReason::EmptyPattern);
            } else {
                parts.push(Predicate::Like {
                    column: self.column,
                    pattern: pattern.clone(),
                });
                self.applied(FilterOp::Like);
            }
        }

        for (op, list, negated) in [
            (FilterOp::In, &spec.in_list, false),
            (FilterOp::NotIn, &spec.notin, true),
        ] {
            let Some(values) = list else { continue };
            if values.is_empty() {
                self.ignored(op, IgnoreReason::EmptyList);
                continue;
            }
            parts.push(Predicate::In {
                column: self.column,
                values: values.clone(),
                negated,
            });
            self.applied(op);
        }

        if let Some(branches) = &spec.or
            && let Some(disjunction) = self.resolve_or(branches)
        {
            parts.push(disjunction);
        }

        parts
    }

    fn resolve_or(&mut self, branches: &[FilterSpec]) -> Option<Predicate> {
        if branches.is_empty() {
            self.ignored(FilterOp::Or, IgnoreReason::EmptyList);
            return None;
        }

        let mut resolved = Vec::with_capacity(branches.len());
        let mut trivial = false;
        for branch in branches {
            match Predicate::all(self.resolve(branch)) {
                Some(p) => resolved.push(p),
                None => trivial = true,
            }
        }

        if trivial {
            self.ignored(FilterOp::Or, IgnoreReason::TrivialDisjunction);
            return None;
        }

        self.applied(FilterOp::Or);
        Predicate::any(resolved)
    }

    fn applied(&mut self, op: FilterOp) {
        self.resolutions
            .push(Resolution::new(self.field, Clause::Filter(op), Outcome::Applied));
    }

    fn ignored(&mut self, op: FilterOp, reason: IgnoreReason) {
        tracing::debug!(field = %self.field, op = %op, reason = %reason, "Ignoring filter slot");
        self.resolutions.push(Resolution::new(
            self.field,
            Clause::Filter(op),
            Outcome::Ignored(reason),
        ));
    }
}
