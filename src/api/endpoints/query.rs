//! `POST /api/health/query` — the main query endpoint.
//!
//! Gates the query, then fans out to the answer and specialist agents and
//! records a history entry. Collaborator failures degrade inside the
//! agents; only validation failures and store errors surface as HTTP
//! errors.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::agents::Specialist;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::history::HistoryEntry;

#[derive(Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub query: String,
    pub session_id: Option<String>,
}

#[derive(Serialize)]
pub struct QueryData {
    pub ai_response: String,
    pub confidence: f32,
    pub is_health_related: bool,
    pub has_urgency: bool,
    pub specialist_recommendations: Vec<Specialist>,
}

#[derive(Serialize)]
pub struct QueryResponse {
    pub success: bool,
    pub message: &'static str,
    pub data: QueryData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

pub async fn submit(
    State(ctx): State<ApiContext>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, ApiError> {
    let raw = req.query.trim();
    if raw.is_empty() {
        return Err(ApiError::BadRequest("Query cannot be empty".into()));
    }

    // Client-supplied session ids are kept verbatim; generated ones use the
    // short uuid prefix the original clients expect.
    let session_id = req
        .session_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(short_session_id);

    let report = ctx.core.gate.validate(raw);
    if !report.is_valid {
        tracing::warn!(%session_id, error = %report.error_message, "query rejected");
        return Err(ApiError::BadRequest(report.error_message));
    }

    let cleaned = report.cleaned_input.clone();
    let ai_response = ctx.core.answer_agent.generate(&cleaned).await;

    let specialists = if report.is_health_related {
        ctx.core.specialist_agent.recommend(&cleaned).await
    } else {
        Vec::new()
    };

    ctx.core.history.record(
        &session_id,
        HistoryEntry::new(
            &cleaned,
            ai_response.len(),
            report.confidence_score,
            report.is_health_related,
        ),
    )?;

    tracing::info!(%session_id, "query processed");

    let warning = Some(report.warning_message).filter(|w| !w.is_empty());
    Ok(Json(QueryResponse {
        success: true,
        message: "Query processed successfully",
        data: QueryData {
            ai_response,
            confidence: report.confidence_score,
            is_health_related: report.is_health_related,
            has_urgency: report.has_urgency,
            specialist_recommendations: specialists,
        },
        warning,
    }))
}

/// First 8 characters of a v4 UUID, matching the ids the web client shows.
fn short_session_id() -> String {
    let mut id = uuid::Uuid::new_v4().to_string();
    id.truncate(8);
    id
}
