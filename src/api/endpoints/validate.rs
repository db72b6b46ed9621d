//! `POST /api/health/validate` — validation-only endpoint.
//!
//! Runs the gate without touching the collaborators or history, so a
//! client can give live-typing feedback. Invalid queries still return 200
//! with the full report; only a blank query is a 400.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::api::types::ApiContext;
use crate::validation::{RejectReason, ValidationReport};

#[derive(Deserialize)]
pub struct ValidateRequest {
    #[serde(default)]
    pub query: String,
}

pub async fn check(
    State(ctx): State<ApiContext>,
    Json(req): Json<ValidateRequest>,
) -> impl IntoResponse {
    if req.query.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ValidationReport::rejected(RejectReason::Empty)),
        );
    }

    let report = ctx.core.gate.validate(&req.query);
    (StatusCode::OK, Json(report))
}
