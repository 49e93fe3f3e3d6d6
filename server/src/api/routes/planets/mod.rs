//! Planet API endpoints

pub mod types;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::extractors::{CriteriaQuery, PlanetPath, ValidatedJson, ValidatedQuery};
use crate::api::types::{ApiError, ErrorBody, MessageResponse};
use crate::data::SqliteService;
use crate::domain::PlanetDraft;

use types::{
    CreatePlanetResponse, FuelCostQuery, FuelCostResponse, ListPlanetsResponse, PlanetResponse,
};

/// Shared state for Planets API endpoints
#[derive(Clone)]
pub struct PlanetsApiState {
    pub database: Arc<SqliteService>,
}

/// Build Planets API routes
pub fn routes(database: Arc<SqliteService>) -> Router<()> {
    let state = PlanetsApiState { database };

    Router::new()
        .route("/", get(list_planets).post(create_planet))
        .route(
            "/{id}",
            get(get_planet).put(update_planet).delete(delete_planet),
        )
        .route("/{id}/fuel-cost", get(get_fuel_cost))
        .with_state(state)
}

fn planet_not_found(id: i64) -> ApiError {
    ApiError::not_found("PLANET_NOT_FOUND", format!("Planet not found: {}", id))
}

/// List planets matching filter, sort and pagination criteria
///
/// Filters are passed as `filter[<field>]=<json>` where the JSON object may
/// hold `eq`, `neq`, `gt`, `gte`, `lt`, `lte`, `like`, `in`, `notin` and `or`.
/// Fields outside the planet columns are ignored.
#[utoipa::path(
    get,
    path = "/api/v1/planets",
    tag = "planets",
    params(
        ("sort" = Option<String>, Query, description = "Sort expression: `<column>[ asc|desc]`"),
        ("page" = Option<i64>, Query, description = "Page number, applied together with limit"),
        ("limit" = Option<i64>, Query, description = "Page size, applied together with page"),
        ("filter[field]" = Option<String>, Query, description = "JSON filter spec for a planet field")
    ),
    responses(
        (status = 200, description = "Matching planets", body = ListPlanetsResponse),
        (status = 400, description = "Malformed criteria", body = ErrorBody)
    )
)]
pub async fn list_planets(
    State(state): State<PlanetsApiState>,
    CriteriaQuery(criteria): CriteriaQuery,
) -> Result<Json<ListPlanetsResponse>, ApiError> {
    let page = state
        .database
        .repository()
        .list_planets(&criteria)
        .await
        .map_err(ApiError::from_data)?;

    Ok(Json(ListPlanetsResponse::from(page)))
}

/// Create a planet
#[utoipa::path(
    post,
    path = "/api/v1/planets",
    tag = "planets",
    request_body = PlanetDraft,
    responses(
        (status = 201, description = "Planet created", body = CreatePlanetResponse),
        (status = 400, description = "Invalid planet", body = ErrorBody)
    )
)]
pub async fn create_planet(
    State(state): State<PlanetsApiState>,
    ValidatedJson(body): ValidatedJson<PlanetDraft>,
) -> Result<(StatusCode, Json<CreatePlanetResponse>), ApiError> {
    let planet = state
        .database
        .repository()
        .create_planet(&body.normalized())
        .await
        .map_err(ApiError::from_data)?;

    tracing::debug!(id = planet.id, name = %planet.name, "Planet created");

    Ok((
        StatusCode::CREATED,
        Json(CreatePlanetResponse {
            message: "Planet created!".to_string(),
            data: planet,
        }),
    ))
}

/// Get a single planet by ID
#[utoipa::path(
    get,
    path = "/api/v1/planets/{id}",
    tag = "planets",
    params(
        ("id" = i64, Path, description = "Planet ID")
    ),
    responses(
        (status = 200, description = "Planet details", body = PlanetResponse),
        (status = 404, description = "Planet not found", body = ErrorBody)
    )
)]
pub async fn get_planet(
    State(state): State<PlanetsApiState>,
    path: PlanetPath,
) -> Result<Json<PlanetResponse>, ApiError> {
    let planet = state
        .database
        .repository()
        .get_planet(path.id)
        .await
        .map_err(ApiError::from_data)?
        .ok_or_else(|| planet_not_found(path.id))?;

    Ok(Json(PlanetResponse { data: planet }))
}

/// Estimate the fuel cost of a trip to a planet
#[utoipa::path(
    get,
    path = "/api/v1/planets/{id}/fuel-cost",
    tag = "planets",
    params(
        ("id" = i64, Path, description = "Planet ID"),
        ("crew_capacity" = i64, Query, description = "Crew size, at least 1")
    ),
    responses(
        (status = 200, description = "Fuel cost estimate", body = FuelCostResponse),
        (status = 400, description = "Invalid crew capacity", body = ErrorBody),
        (status = 404, description = "Planet not found", body = ErrorBody)
    )
)]
pub async fn get_fuel_cost(
    State(state): State<PlanetsApiState>,
    path: PlanetPath,
    ValidatedQuery(query): ValidatedQuery<FuelCostQuery>,
) -> Result<Json<FuelCostResponse>, ApiError> {
    let planet = state
        .database
        .repository()
        .get_planet(path.id)
        .await
        .map_err(ApiError::from_data)?
        .ok_or_else(|| planet_not_found(path.id))?;

    Ok(Json(FuelCostResponse {
        data: planet.fuel_cost(query.crew_capacity),
    }))
}

/// Replace a planet's fields
#[utoipa::path(
    put,
    path = "/api/v1/planets/{id}",
    tag = "planets",
    params(
        ("id" = i64, Path, description = "Planet ID")
    ),
    request_body = PlanetDraft,
    responses(
        (status = 200, description = "Planet updated", body = MessageResponse),
        (status = 400, description = "Invalid planet", body = ErrorBody),
        (status = 404, description = "Planet not found", body = ErrorBody)
    )
)]
pub async fn update_planet(
    State(state): State<PlanetsApiState>,
    path: PlanetPath,
    ValidatedJson(body): ValidatedJson<PlanetDraft>,
) -> Result<Json<MessageResponse>, ApiError> {
    let updated = state
        .database
        .repository()
        .update_planet(path.id, &body.normalized())
        .await
        .map_err(ApiError::from_data)?;

    if !updated {
        return Err(planet_not_found(path.id));
    }

    Ok(Json(MessageResponse::new("Planet updated successfully!")))
}

/// Delete a planet
#[utoipa::path(
    delete,
    path = "/api/v1/planets/{id}",
    tag = "planets",
    params(
        ("id" = i64, Path, description = "Planet ID")
    ),
    responses(
        (status = 200, description = "Planet deleted", body = MessageResponse),
        (status = 404, description = "Planet not found", body = ErrorBody)
    )
)]
pub async fn delete_planet(
    State(state): State<PlanetsApiState>,
    path: PlanetPath,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = state
        .database
        .repository()
        .delete_planet(path.id)
        .await
        .map_err(ApiError::from_data)?;

    if !deleted {
        return Err(planet_not_found(path.id));
    }

    tracing::debug!(id = path.id, "Planet deleted");
    Ok(Json(MessageResponse::new("Planet deleted successfully!")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn app() -> Router {
        let database = Arc::new(SqliteService::in_memory().await.unwrap());
        routes(database)
    }

    fn encode(s: &str) -> String {
        s.bytes()
            .map(|b| {
                if b.is_ascii_alphanumeric() || b == b'_' || b == b'-' {
                    (b as char).to_string()
                } else {
                    format!("%{:02X}", b)
                }
            })
            .collect()
    }

    fn query(pairs: &[(&str, &str)]) -> String {
        let encoded: Vec<String> = pairs
            .iter()
            .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
            .collect();
        format!("/?{}", encoded.join("&"))
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn jupiter() -> Value {
        json!({
            "name": "Jupiter",
            "description": "Gas giant",
            "distance": 20,
            "radius": 9,
            "mass": 9,
            "type": "gas_giant"
        })
    }

    fn pluto() -> Value {
        json!({
            "name": "Pluto",
            "description": "Dwarf",
            "distance": 50,
            "radius": 2,
            "mass": 2,
            "type": "terrestrial"
        })
    }

    async fn seeded() -> Router {
        let app = app().await;
        for planet in [jupiter(), pluto()] {
            let (status, _) = send(&app, Method::POST, "/", Some(planet)).await;
            assert_eq!(status, StatusCode::CREATED);
        }
        app
    }

    fn names(body: &Value) -> Vec<&str> {
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_create_planet() {
        let app = app().await;
        let (status, body) = send(&app, Method::POST, "/", Some(pluto())).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Planet created!");
        assert_eq!(body["data"]["name"], "Pluto");
        assert_eq!(body["data"]["type"], "terrestrial");
        assert!(body["data"]["id"].as_i64().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_create_gas_giant_forces_mass() {
        let app = app().await;
        let mut planet = jupiter();
        planet.as_object_mut().unwrap().remove("mass");

        let (status, body) = send(&app, Method::POST, "/", Some(planet)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["mass"], 5.0);
    }

    #[tokio::test]
    async fn test_create_rejects_out_of_range() {
        let app = app().await;
        let mut planet = pluto();
        planet["distance"] = json!(1000);

        let (status, body) = send(&app, Method::POST, "/", Some(planet)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["message"], "Distance should be between 10 and 1000.");
    }

    #[tokio::test]
    async fn test_create_rejects_terrestrial_mass() {
        let app = app().await;
        let mut planet = pluto();
        planet["mass"] = json!(12);

        let (status, body) = send(&app, Method::POST, "/", Some(planet)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Mass should be between 0.1 and 10.");
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_type() {
        let app = app().await;
        let mut planet = pluto();
        planet["type"] = json!("ice_giant");

        let (status, body) = send(&app, Method::POST, "/", Some(planet)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "JSON_PARSE_ERROR");
    }

    #[tokio::test]
    async fn test_get_planet() {
        let app = seeded().await;
        let (status, body) = send(&app, Method::GET, "/1", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "Jupiter");
    }

    #[tokio::test]
    async fn test_get_planet_not_found() {
        let app = seeded().await;
        let (status, body) = send(&app, Method::GET, "/99", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
        assert_eq!(body["code"], "PLANET_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_get_planet_invalid_id() {
        let app = seeded().await;
        let (status, body) = send(&app, Method::GET, "/abc", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_PLANET_ID");
    }

    #[tokio::test]
    async fn test_fuel_cost() {
        let app = seeded().await;
        let (status, body) =
            send(&app, Method::GET, "/2/fuel-cost?crew_capacity=10", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], 2000.0);
    }

    #[tokio::test]
    async fn test_fuel_cost_requires_crew() {
        let app = seeded().await;

        let (status, _) =
            send(&app, Method::GET, "/2/fuel-cost?crew_capacity=0", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(&app, Method::GET, "/2/fuel-cost", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "QUERY_PARSE_ERROR");
    }

    #[tokio::test]
    async fn test_update_planet() {
        let app = seeded().await;
        let mut planet = pluto();
        planet["name"] = json!("Pluto II");

        let (status, body) = send(&app, Method::PUT, "/2", Some(planet)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Planet updated successfully!");

        let (_, body) = send(&app, Method::GET, "/2", None).await;
        assert_eq!(body["data"]["name"], "Pluto II");
    }

    #[tokio::test]
    async fn test_update_planet_not_found() {
        let app = seeded().await;
        let (status, _) = send(&app, Method::PUT, "/42", Some(pluto())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_planet() {
        let app = seeded().await;

        let (status, body) = send(&app, Method::DELETE, "/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Planet deleted successfully!");

        let (status, _) = send(&app, Method::DELETE, "/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_all() {
        let app = seeded().await;
        let (status, body) = send(&app, Method::GET, "/", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 2);
        assert_eq!(body["page"], 0);
        assert_eq!(body["limit"], 0);
        assert_eq!(names(&body).len(), 2);
    }

    #[tokio::test]
    async fn test_list_filter_eq() {
        let app = seeded().await;
        let uri = query(&[("filter[type]", r#"{"eq":"gas_giant"}"#)]);
        let (status, body) = send(&app, Method::GET, &uri, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(names(&body), vec!["Jupiter"]);
        assert_eq!(body["total"], 1);
    }

    #[tokio::test]
    async fn test_list_filter_in_and_like() {
        let app = seeded().await;

        let uri = query(&[("filter[name]", r#"{"in":["Pluto","Mars"]}"#)]);
        let (_, body) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(names(&body), vec!["Pluto"]);

        let uri = query(&[("filter[name]", r#"{"like":"upi"}"#)]);
        let (_, body) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(names(&body), vec!["Jupiter"]);
    }

    #[tokio::test]
    async fn test_list_sort_and_paginate() {
        let app = seeded().await;

        let uri = query(&[("sort", "radius desc")]);
        let (_, body) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(names(&body), vec!["Jupiter", "Pluto"]);

        let uri = query(&[("sort", "radius asc"), ("page", "2"), ("limit", "1")]);
        let (_, body) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(names(&body), vec!["Jupiter"]);
        assert_eq!(body["total"], 2);
        assert_eq!(body["page"], 2);
        assert_eq!(body["limit"], 1);
    }

    #[tokio::test]
    async fn test_list_ignores_unknown_field() {
        let app = seeded().await;
        let uri = query(&[("filter[password]", r#"{"eq":"x"}"#)]);
        let (status, body) = send(&app, Method::GET, &uri, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 2);
    }

    #[tokio::test]
    async fn test_list_rejects_malformed_criteria() {
        let app = seeded().await;

        let uri = query(&[("filter[name]", "{not json")]);
        let (status, body) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_CRITERIA");
        assert!(body["message"].as_str().unwrap().contains("name"));

        let uri = query(&[("page", "two")]);
        let (status, body) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("page"));

        let uri = query(&[("sort", "name; DROP TABLE planets")]);
        let (status, _) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
