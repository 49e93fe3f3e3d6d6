//! Path, query and body extractors for API routes
//!
//! Every rejection produced here answers with the shared
//! `{error, code, message}` body and a 400 status.

use std::ops::Deref;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use validator::Validate;

use super::types::ApiError;
use crate::data::criteria::{Criteria, CriteriaError, RawCriteria, parse_criteria};

/// Raw path extractor for planet routes (internal use)
#[derive(Debug, Deserialize)]
struct PlanetPathRaw {
    id: String,
}

/// Validated planet path extractor.
///
/// Extracts `id` from the URL and requires a positive integer.
#[derive(Debug)]
pub struct PlanetPath {
    pub id: i64,
}

/// Parse a planet id: a positive base-10 integer
pub fn parse_planet_id(id: &str) -> Option<i64> {
    id.parse::<i64>().ok().filter(|id| *id > 0)
}

impl<S> FromRequestParts<S> for PlanetPath
where
    S: Send + Sync,
{
    type Rejection = ValidationRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<PlanetPathRaw>::from_request_parts(parts, state)
            .await
            .map_err(ValidationRejection::Path)?;

        let id = parse_planet_id(&raw.id).ok_or(ValidationRejection::InvalidPlanetId)?;
        Ok(Self { id })
    }
}

/// Criteria extractor for list endpoints.
///
/// Decodes the query string into simple keys and `filter[<field>]`
/// entries, then parses them into [`Criteria`].
#[derive(Debug)]
pub struct CriteriaQuery(pub Criteria);

impl<S> FromRequestParts<S> for CriteriaQuery
where
    S: Send + Sync,
{
    type Rejection = ValidationRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(ValidationRejection::Query)?;

        let raw = RawCriteria::from_pairs(pairs);
        let criteria = parse_criteria(&raw).map_err(ValidationRejection::Criteria)?;
        Ok(Self(criteria))
    }
}

/// Validation rejection with structured error response
pub enum ValidationRejection {
    /// Failed to parse path parameters
    Path(PathRejection),
    /// Planet id is not a positive integer
    InvalidPlanetId,
    /// Failed to parse query string
    Query(QueryRejection),
    /// Query criteria could not be parsed
    Criteria(CriteriaError),
    /// Failed to parse JSON body
    Json(JsonRejection),
    /// Validation constraints not satisfied
    Validation(validator::ValidationErrors),
}

impl IntoResponse for ValidationRejection {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::Criteria(e) => return ApiError::from(e).into_response(),
            Self::Path(rejection) => (
                StatusCode::BAD_REQUEST,
                "PATH_PARSE_ERROR",
                rejection.body_text(),
            ),
            Self::InvalidPlanetId => (
                StatusCode::BAD_REQUEST,
                "INVALID_PLANET_ID",
                "Invalid planet id: must be a positive integer".to_string(),
            ),
            Self::Query(rejection) => (
                StatusCode::BAD_REQUEST,
                "QUERY_PARSE_ERROR",
                rejection.body_text(),
            ),
            Self::Json(rejection) => (
                StatusCode::BAD_REQUEST,
                "JSON_PARSE_ERROR",
                rejection.body_text(),
            ),
            Self::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                format_validation_errors(&errors),
            ),
        };
        (
            status,
            Json(serde_json::json!({
                "error": "bad_request",
                "code": code,
                "message": message
            })),
        )
            .into_response()
    }
}

fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{}: validation failed", field))
            })
        })
        .collect();
    messages.sort();
    messages.dedup();
    messages.join("; ")
}

/// Query extractor with automatic validation.
#[derive(Debug)]
pub struct ValidatedQuery<T>(pub T);

impl<T> Deref for ValidatedQuery<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ValidationRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(ValidationRejection::Query)?;
        value.validate().map_err(ValidationRejection::Validation)?;
        Ok(Self(value))
    }
}

/// JSON body extractor with automatic validation.
///
/// Deserializes JSON body and validates it using the `validator` crate.
/// Returns a `ValidationRejection` on parse or validation failure.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ValidationRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidationRejection::Json)?;
        value.validate().map_err(ValidationRejection::Validation)?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_planet_id() {
        assert_eq!(parse_planet_id("42"), Some(42));
        assert_eq!(parse_planet_id("0"), None);
        assert_eq!(parse_planet_id("-3"), None);
        assert_eq!(parse_planet_id("abc"), None);
        assert_eq!(parse_planet_id("1.5"), None);
    }

    #[test]
    fn test_validation_messages_deduplicated() {
        use crate::domain::planet::{PlanetDraft, PlanetType};

        let draft = PlanetDraft {
            name: String::new(),
            description: String::new(),
            distance: 50,
            radius: 2.0,
            mass: 2.0,
            planet_type: PlanetType::Terrestrial,
        };
        let errors = draft.validate().unwrap_err();
        assert_eq!(
            format_validation_errors(&errors),
            "Name and description are required."
        );
    }
}
