//! `GET /api/health/stats` — aggregate counters.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;

#[derive(Serialize)]
pub struct StatsBody {
    pub total_sessions: usize,
    pub total_queries: usize,
    pub answer_agent_available: bool,
    pub specialist_agent_available: bool,
    pub system_status: &'static str,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub stats: StatsBody,
}

pub async fn summary(
    State(ctx): State<ApiContext>,
) -> Result<Json<StatsResponse>, ApiError> {
    let counters = ctx.core.history.stats()?;
    Ok(Json(StatsResponse {
        success: true,
        stats: StatsBody {
            total_sessions: counters.total_sessions,
            total_queries: counters.total_queries,
            answer_agent_available: ctx.core.answer_agent.is_configured(),
            specialist_agent_available: ctx.core.specialist_agent.is_configured(),
            system_status: "healthy",
        },
    }))
}
