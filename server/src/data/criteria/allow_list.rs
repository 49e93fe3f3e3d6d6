//! Field allow-lists
//!
//! Only fields named here may reach a predicate or an ORDER BY. The
//! resolved column name always comes from the list, never from input.

/// Storage category of an allow-listed field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Int,
    Float,
    String,
}

impl FieldType {
    pub fn is_string(&self) -> bool {
        matches!(self, FieldType::String)
    }
}

/// Immutable field name to type mapping for one entity
#[derive(Debug, Clone, Copy)]
pub struct AllowList {
    entries: &'static [(&'static str, FieldType)],
}

impl AllowList {
    pub const fn new(entries: &'static [(&'static str, FieldType)]) -> Self {
        Self { entries }
    }

    /// Resolve a caller-supplied field to its static column name and type.
    /// Matching is exact and case-sensitive.
    pub fn lookup(&self, field: &str) -> Option<(&'static str, FieldType)> {
        self.entries
            .iter()
            .find(|(name, _)| *name == field)
            .copied()
    }

    pub fn is_allowed(&self, field: &str) -> bool {
        self.lookup(field).is_some()
    }

    /// All column names, in declaration order
    pub fn columns(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(name, _)| *name).collect()
    }
}

/// Allow-lists for queryable entities
pub mod columns {
    use super::{AllowList, FieldType};

    pub const PLANETS: AllowList = AllowList::new(&[
        ("id", FieldType::Int),
        ("name", FieldType::String),
        ("description", FieldType::String),
        ("distance", FieldType::Int),
        ("radius", FieldType::Float),
        ("mass", FieldType::Float),
        ("type", FieldType::String),
    ]);
}
