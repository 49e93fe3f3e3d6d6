//! Filter, sort and pagination stages

use std::collections::BTreeMap;

use super::allow_list::AllowList;
use super::builder::{Clause, IgnoreReason, Outcome, Resolution, build_predicates};
use super::plan::{OrderBy, QueryPlan, Window};
use super::types::{FilterSpec, SortExpr};

/// AND the allow-listed filters onto the plan
pub fn filter_stage(
    plan: QueryPlan,
    filters: &BTreeMap<String, FilterSpec>,
    allow_list: &AllowList,
) -> (QueryPlan, Vec<Resolution>) {
    let (predicate, resolutions) = build_predicates(filters, allow_list);
    let plan = match predicate {
        Some(p) => plan.with_predicate(p),
        None => plan,
    };
    (plan, resolutions)
}

/// Order by the sort column when it is allow-listed
pub fn sort_stage(
    plan: QueryPlan,
    sort: Option<&SortExpr>,
    allow_list: &AllowList,
) -> (QueryPlan, Option<Resolution>) {
    let Some(sort) = sort else {
        return (plan, None);
    };

    match allow_list.lookup(&sort.column) {
        Some((column, _)) => {
            let plan = plan.with_order(OrderBy {
                column,
                direction: sort.direction,
            });
            let resolution = Resolution::new(column, Clause::Sort, Outcome::Applied);
            (plan, Some(resolution))
        }
        None => {
            tracing::debug!(column = %sort.column, "Ignoring sort on column outside allow-list");
            let resolution = Resolution::new(
                sort.column.as_str(),
                Clause::Sort,
                Outcome::Ignored(IgnoreReason::NotAllowListed),
            );
            (plan, Some(resolution))
        }
    }
}

/// Window the plan when both page and limit are positive
pub fn paginate_stage(plan: QueryPlan, page: i64, limit: i64) -> QueryPlan {
    if page <= 0 || limit <= 0 {
        return plan;
    }
    let offset = (page - 1).saturating_mul(limit);
    plan.with_window(Window { limit, offset })
}
