//! OpenAPI specification and Swagger UI

use axum::http::header;
use axum::response::{Html, IntoResponse, Json};
use utoipa::OpenApi;

use crate::api::routes::{health, planets};
use crate::api::types::{ErrorBody, MessageResponse};
use crate::domain::{Planet, PlanetDraft, PlanetType};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Planets API",
        version = env!("CARGO_PKG_VERSION"),
        description = "Planet catalog with filterable, sortable listings"
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "planets", description = "Planet catalog")
    ),
    paths(
        health::health,
        planets::list_planets,
        planets::create_planet,
        planets::get_planet,
        planets::get_fuel_cost,
        planets::update_planet,
        planets::delete_planet,
    ),
    components(schemas(
        ErrorBody,
        MessageResponse,
        health::HealthResponse,
        Planet,
        PlanetDraft,
        PlanetType,
        planets::types::ListPlanetsResponse,
        planets::types::PlanetResponse,
        planets::types::CreatePlanetResponse,
        planets::types::FuelCostResponse,
        planets::types::FuelCostQuery,
    ))
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
pub async fn openapi_json() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        Json(ApiDoc::openapi()),
    )
}

/// Serve Swagger UI from CDN
pub async fn swagger_ui_html() -> Html<&'static str> {
    Html(SWAGGER_UI_HTML)
}

const SWAGGER_UI_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Planets API Documentation</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
    <style>
        body { margin: 0; background: #fafafa; }
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
        window.onload = () => {
            window.ui = SwaggerUIBundle({
                url: "/api/openapi.json",
                dom_id: '#swagger-ui',
                deepLinking: true
            });
        };
    </script>
</body>
</html>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_planet_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| *p == "/api/v1/planets"));
        assert!(paths.iter().any(|p| *p == "/api/v1/planets/{id}"));
        assert!(paths.iter().any(|p| *p == "/api/v1/planets/{id}/fuel-cost"));
        assert!(paths.iter().any(|p| *p == "/api/v1/health"));
    }
}
