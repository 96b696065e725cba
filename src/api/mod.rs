pub mod routes;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::SettingsSource;
use crate::pipeline::MoodPipeline;

/// Shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub pipeline: MoodPipeline,
    /// Read on every request, so settings changes apply without a restart
    pub settings: Arc<dyn SettingsSource>,
}

impl AppState {
    pub fn new(pipeline: MoodPipeline, settings: Arc<dyn SettingsSource>) -> Self {
        Self { pipeline, settings }
    }
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::dashboard))
        .route("/api/mood", get(routes::mood_json))
        .route("/api/snapshot", get(routes::snapshot_json))
        .route("/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
