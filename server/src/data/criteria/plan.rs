//! Immutable query plan
//!
//! Every stage takes a `QueryPlan` by value and returns a new one, so a
//! plan is never shared or mutated across requests.

use super::predicate::{Predicate, SqlParams, SqlValue};
use super::types::SortDirection;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub column: &'static str,
    pub direction: SortDirection,
}

/// Row window produced by pagination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub limit: i64,
    pub offset: i64,
}

/// Description of a SELECT against one table
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    table: &'static str,
    columns: Vec<&'static str>,
    predicate: Option<Predicate>,
    order: Option<OrderBy>,
    window: Option<Window>,
}

impl QueryPlan {
    pub fn new(table: &'static str, columns: Vec<&'static str>) -> Self {
        Self {
            table,
            columns,
            predicate: None,
            order: None,
            window: None,
        }
    }

    /// AND a predicate onto the plan
    pub fn with_predicate(self, predicate: Predicate) -> Self {
        let predicate = match self.predicate {
            Some(existing) => existing.and(predicate),
            None => predicate,
        };
        Self {
            predicate: Some(predicate),
            ..self
        }
    }

    pub fn with_order(self, order: OrderBy) -> Self {
        Self {
            order: Some(order),
            ..self
        }
    }

    pub fn with_window(self, window: Window) -> Self {
        Self {
            window: Some(window),
            ..self
        }
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    pub fn predicate(&self) -> Option<&Predicate> {
        self.predicate.as_ref()
    }

    pub fn order(&self) -> Option<&OrderBy> {
        self.order.as_ref()
    }

    pub fn window(&self) -> Option<Window> {
        self.window
    }

    fn where_clause(&self, params: &mut SqlParams) -> String {
        match &self.predicate {
            Some(p) => format!(" WHERE {}", p.to_sql(params)),
            None => String::new(),
        }
    }

    /// Full SELECT with filter, order and window applied
    pub fn select_sql(&self) -> (String, SqlParams) {
        let mut params = SqlParams::default();
        let mut sql = format!(
            "SELECT {} FROM {}{}",
            self.columns.join(", "),
            self.table,
            self.where_clause(&mut params)
        );

        if let Some(order) = &self.order {
            sql.push_str(&format!(
                " ORDER BY {} {}",
                order.column,
                order.direction.as_sql()
            ));
        }

        if let Some(window) = self.window {
            sql.push_str(" LIMIT ? OFFSET ?");
            params.values.push(SqlValue::Int(window.limit));
            params.values.push(SqlValue::Int(window.offset));
        }

        (sql, params)
    }

    /// COUNT over the filtered set; order and window are ignored
    pub fn count_sql(&self) -> (String, SqlParams) {
        let mut params = SqlParams::default();
        let sql = format!(
            "SELECT COUNT(*) FROM {}{}",
            self.table,
            self.where_clause(&mut params)
        );
        (sql, params)
    }
}
