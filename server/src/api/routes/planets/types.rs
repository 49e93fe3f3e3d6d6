//! Planet API types

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::data::criteria::CriteriaPage;
use crate::domain::Planet;

/// Page of planets matching the query criteria
#[derive(Debug, Serialize, ToSchema)]
pub struct ListPlanetsResponse {
    pub data: Vec<Planet>,
    /// Matching planets ignoring the page window
    pub total: u64,
    /// Requested page, 0 when unset
    pub page: i64,
    /// Requested page size, 0 when unset
    pub limit: i64,
}

impl From<CriteriaPage<Planet>> for ListPlanetsResponse {
    fn from(page: CriteriaPage<Planet>) -> Self {
        Self {
            data: page.rows,
            total: page.total,
            page: page.page,
            limit: page.limit,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PlanetResponse {
    pub data: Planet,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatePlanetResponse {
    pub message: String,
    pub data: Planet,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FuelCostResponse {
    /// Estimated fuel cost for the trip
    pub data: f64,
}

/// Query params for the fuel cost estimate
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct FuelCostQuery {
    #[validate(range(min = 1, message = "crew_capacity must be at least 1"))]
    pub crew_capacity: i64,
}
