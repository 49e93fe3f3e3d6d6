//! Composer
//!
//! Threads one plan through filter, sort and pagination, in that order,
//! then hands it to a storage executor.

use async_trait::async_trait;

use super::allow_list::AllowList;
use super::builder::Resolution;
use super::plan::QueryPlan;
use super::stages::{filter_stage, paginate_stage, sort_stage};
use super::types::Criteria;

/// Storage side of criteria execution.
///
/// Returns the windowed rows and the filtered count without the window.
#[async_trait]
pub trait CriteriaExecutor: Send + Sync {
    type Row: Send;
    type Error: Send;

    async fn fetch(&self, plan: &QueryPlan) -> Result<(Vec<Self::Row>, u64), Self::Error>;
}

/// A composed plan with the resolution report
#[derive(Debug, Clone)]
pub struct Composed {
    pub plan: QueryPlan,
    pub resolutions: Vec<Resolution>,
    pub page: i64,
    pub limit: i64,
}

/// Result of executing criteria
#[derive(Debug, Clone)]
pub struct CriteriaPage<T> {
    pub rows: Vec<T>,
    /// Filtered count, ignoring the page window
    pub total: u64,
    pub page: i64,
    pub limit: i64,
    pub resolutions: Vec<Resolution>,
}

/// Apply filter, sort, then pagination to `base`
pub fn compose(base: QueryPlan, criteria: &Criteria, allow_list: &AllowList) -> Composed {
    let (plan, mut resolutions) = filter_stage(base, &criteria.filters, allow_list);
    let (plan, sort_resolution) = sort_stage(plan, criteria.sort.as_ref(), allow_list);
    resolutions.extend(sort_resolution);
    let plan = paginate_stage(plan, criteria.page, criteria.limit);

    Composed {
        plan,
        resolutions,
        page: criteria.page,
        limit: criteria.limit,
    }
}

/// Compose and run criteria against an executor
pub async fn execute<E>(
    executor: &E,
    base: QueryPlan,
    criteria: &Criteria,
    allow_list: &AllowList,
) -> Result<CriteriaPage<E::Row>, E::Error>
where
    E: CriteriaExecutor + ?Sized,
{
    let composed = compose(base, criteria, allow_list);
    let (rows, total) = executor.fetch(&composed.plan).await?;

    tracing::debug!(
        table = composed.plan.table(),
        rows = rows.len(),
        total,
        "Executed criteria"
    );

    Ok(CriteriaPage {
        rows,
        total,
        page: composed.page,
        limit: composed.limit,
        resolutions: composed.resolutions,
    })
}
