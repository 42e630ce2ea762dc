use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::agent::{build_agent_graph, AgentState, NodeContext, SYSTEM_PROMPT};
use crate::core::errors::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub user_id: String,
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub user_id: String,
    pub response: String,
}

/// Runs one query through the agent loop and returns the final answer.
///
/// Synchronous from the caller's perspective; any collaborator fault inside
/// the loop surfaces as a generic 500-class error.
pub async fn process_query(
    State(state): State<Arc<AppState>>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, ApiError> {
    if request.query.trim().is_empty() {
        return Err(ApiError::BadRequest("query must not be empty".to_string()));
    }

    let request_id = Uuid::new_v4();
    tracing::info!(%request_id, user_id = %request.user_id, "processing query");

    let graph = build_agent_graph(state.settings.max_tool_rounds)?;
    let mut agent_state = AgentState::new(&request.user_id, SYSTEM_PROMPT, &request.query);
    let ctx = NodeContext { app_state: &state };

    graph.run(&mut agent_state, &ctx).await?;

    let response = agent_state
        .output
        .ok_or_else(|| ApiError::Internal("agent finished without an answer".to_string()))?;

    tracing::info!(%request_id, tool_rounds = agent_state.tool_rounds, "query answered");

    Ok(Json(QueryResponse {
        user_id: request.user_id,
        response,
    }))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::llm::testing::ScriptedProvider;
    use crate::server::router::router;
    use crate::state::testing::{test_settings, test_state};

    async fn post_query(app: axum::Router, body: Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/query")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn query_returns_final_answer_with_user_id() {
        let llm = Arc::new(ScriptedProvider::new(&["¡Hola! ¿En qué puedo ayudarte?"]));
        let (state, _store) = test_state(test_settings(), llm).await;

        let (status, body) = post_query(
            router(state),
            json!({"user_id": "u1", "query": "Hola"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user_id"], "u1");
        assert_eq!(body["response"], "¡Hola! ¿En qué puedo ayudarte?");
    }

    #[tokio::test]
    async fn empty_query_is_rejected() {
        let llm = Arc::new(ScriptedProvider::new(&[]));
        let (state, _store) = test_state(test_settings(), llm).await;

        let (status, body) = post_query(
            router(state),
            json!({"user_id": "u1", "query": "   "}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("query"));
    }

    #[tokio::test]
    async fn provider_fault_maps_to_internal_error() {
        // Scripted provider with no replies fails the first chat call.
        let llm = Arc::new(ScriptedProvider::new(&[]));
        let (state, _store) = test_state(test_settings(), llm).await;

        let (status, _body) = post_query(
            router(state),
            json!({"user_id": "u1", "query": "Hola"}),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn health_reports_chunk_count() {
        let llm = Arc::new(ScriptedProvider::new(&[]));
        let (state, _store) = test_state(test_settings(), llm).await;

        let response = router(state)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["chunks"], 0);
        assert!(body["uptime_seconds"].as_i64().unwrap() >= 0);
    }
}
