use axum::{extract::State, http::StatusCode, response::Html, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::AppState;
use crate::pipeline::PipelineError;
use crate::report::{html, MoodReport};
use crate::sensors::Snapshot;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub stage: &'static str,
}

#[derive(Serialize)]
pub struct SnapshotResponse {
    pub generation: u64,
    pub updated_at: Option<DateTime<Utc>>,
    pub count: usize,
    pub sensors: Snapshot,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub sensors: usize,
}

fn log_abort(err: &PipelineError) {
    tracing::error!(stage = err.stage(), err = %err, "mood pipeline aborted");
}

/// GET /
///
/// A failed pass still answers 200 with just the page header.
pub async fn dashboard(State(state): State<AppState>) -> Html<String> {
    match state.pipeline.run(state.settings.as_ref()).await {
        Ok(report) => Html(html::render_page(&report)),
        Err(e) => {
            log_abort(&e);
            Html(html::header_only_page())
        }
    }
}

/// GET /api/mood
pub async fn mood_json(
    State(state): State<AppState>,
) -> Result<Json<MoodReport>, (StatusCode, Json<ErrorResponse>)> {
    state
        .pipeline
        .run(state.settings.as_ref())
        .await
        .map(Json)
        .map_err(|e| {
            log_abort(&e);
            let status = if e.is_upstream() {
                StatusCode::BAD_GATEWAY
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (
                status,
                Json(ErrorResponse {
                    error: e.to_string(),
                    stage: e.stage(),
                }),
            )
        })
}

/// GET /api/snapshot
pub async fn snapshot_json(State(state): State<AppState>) -> Json<SnapshotResponse> {
    let stored = state.pipeline.store().stored();
    Json(SnapshotResponse {
        generation: stored.generation,
        updated_at: stored.updated_at,
        count: stored.sensors.len(),
        sensors: (*stored.sensors).clone(),
    })
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        sensors: state.pipeline.store().len(),
    })
}
