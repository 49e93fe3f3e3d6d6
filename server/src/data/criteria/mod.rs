//! Query criteria translation
//!
//! Turns caller-supplied filter, sort and pagination criteria into a
//! parameterized query plan, gated by a field allow-list.
//!
//! ## Usage
//!
//! ```
//! use planets_server::data::criteria::{QueryPlan, RawCriteria, columns, compose, parse_criteria};
//!
//! let raw = RawCriteria::from_pairs([
//!     ("filter[type]", r#"{"eq": "gas_giant"}"#),
//!     ("sort", "radius desc"),
//! ]);
//! let criteria = parse_criteria(&raw).unwrap();
//! let base = QueryPlan::new("planets", columns::PLANETS.columns());
//! let composed = compose(base, &criteria, &columns::PLANETS);
//! let (sql, params) = composed.plan.select_sql();
//! assert!(sql.ends_with("WHERE type = ? ORDER BY radius DESC"));
//! assert_eq!(params.values.len(), 1);
//! ```

mod allow_list;
mod builder;
mod composer;
mod error;
mod parser;
mod plan;
mod predicate;
mod stages;
mod types;

pub use allow_list::{AllowList, FieldType, columns};
pub use builder::{Clause, IgnoreReason, Outcome, Resolution, build_predicates};
pub use composer::{Composed, CriteriaExecutor, CriteriaPage, compose, execute};
pub use error::CriteriaError;
pub use parser::parse_criteria;
pub use plan::{OrderBy, QueryPlan, Window};
pub use predicate::{CompareOp, Predicate, SqlParams, SqlValue};
pub use stages::{filter_stage, paginate_stage, sort_stage};
pub use types::{Criteria, FilterOp, FilterSpec, Operand, RawCriteria, SortDirection, SortExpr};
