//! `GET /api/health/history/:session_id` — recent session history.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::history::HistoryEntry;

#[derive(Serialize)]
pub struct HistoryResponse {
    pub success: bool,
    pub history: Vec<HistoryEntry>,
}

/// Up to the 10 most recent entries, oldest first; unknown sessions yield
/// an empty list rather than a 404.
pub async fn session(
    State(ctx): State<ApiContext>,
    Path(session_id): Path<String>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let history = ctx.core.history.session_history(&session_id)?;
    Ok(Json(HistoryResponse {
        success: true,
        history,
    }))
}
