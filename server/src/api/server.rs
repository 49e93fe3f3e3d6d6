//! API server initialization

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use super::middleware::{self, AllowedOrigins};
use super::openapi::{openapi_json, swagger_ui_html};
use super::routes::{health, planets};
use crate::core::CoreApp;
use crate::core::constants::{API_PREFIX, DEFAULT_BODY_LIMIT};
use crate::data::SqliteService;

pub struct ApiServer {
    app: CoreApp,
    allowed_origins: AllowedOrigins,
}

impl ApiServer {
    pub fn new(app: CoreApp) -> Self {
        let allowed_origins = AllowedOrigins::new(&app.config.server.host, app.config.server.port);
        Self {
            app,
            allowed_origins,
        }
    }

    /// Serve until shutdown is triggered. Returns CoreApp for graceful shutdown
    pub async fn start(self) -> Result<CoreApp> {
        let Self {
            app,
            allowed_origins,
        } = self;

        let shutdown = app.shutdown.clone();

        let host = app.config.server.host.clone();
        let port = app.config.server.port;
        let ip = if host == "localhost" {
            "127.0.0.1".to_string()
        } else {
            host.trim_matches(|c| c == '[' || c == ']').to_string()
        };
        let addr = SocketAddr::new(
            ip.parse()
                .with_context(|| format!("Invalid server host: {}", host))?,
            port,
        );

        let router = build_router(app.database.clone(), &allowed_origins);

        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        tracing::info!(%addr, "Server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown.wait())
            .await?;

        Ok(app)
    }
}

/// Assemble the full HTTP router
pub fn build_router(database: Arc<SqliteService>, allowed_origins: &AllowedOrigins) -> Router {
    Router::new()
        .route(
            &format!("{}/health", API_PREFIX),
            get(health::health).with_state(database.clone()),
        )
        .route("/api/openapi.json", get(openapi_json))
        .route("/api/docs", get(swagger_ui_html))
        .route("/api/docs/", get(swagger_ui_html))
        .nest(&format!("{}/planets", API_PREFIX), planets::routes(database))
        .fallback(middleware::handle_404)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(middleware::cors(allowed_origins))
        .layer(DefaultBodyLimit::max(DEFAULT_BODY_LIMIT))
}
