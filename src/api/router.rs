//! Health-query API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Query endpoints live under `/api/health/`; `/health` is the bare
//! liveness check. All responses, including the 404 fallback, use the
//! `{success, ...}` wire shape.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;

/// Build the health-query API router.
pub fn health_api_router(core: Arc<CoreState>) -> Router {
    let ctx = ApiContext::new(core);

    Router::new()
        .route("/api/health/query", post(endpoints::query::submit))
        .route("/api/health/validate", post(endpoints::validate::check))
        .route(
            "/api/health/history/:session_id",
            get(endpoints::history::session),
        )
        .route("/api/health/stats", get(endpoints::stats::summary))
        .route("/health", get(endpoints::health::check))
        .fallback(unknown_route)
        // Browser clients call this API cross-origin; sessions carry no
        // credentials, so a permissive policy is safe here.
        .layer(CorsLayer::permissive())
        .with_state(ctx)
}

async fn unknown_route() -> ApiError {
    ApiError::NotFound("Endpoint not found".into())
}
