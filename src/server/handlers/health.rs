use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde_json::json;

use crate::state::AppState;

pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let chunks = state.store.count().await.unwrap_or(0);
    let uptime_seconds = (Utc::now() - state.started_at).num_seconds();

    Json(json!({
        "status": "ok",
        "provider": state.llm.name(),
        "chunks": chunks,
        "uptime_seconds": uptime_seconds,
    }))
}
