use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;

use solvex_bot::agent;
use solvex_bot::core::config::{AppPaths, Settings};
use solvex_bot::core::logging;
use solvex_bot::server;
use solvex_bot::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env()?;
    let paths = Arc::new(AppPaths::new(&settings.persist_dir));
    logging::init(&paths);

    let state = AppState::initialize(settings, paths).await?;

    // Startup wiring check; the graph itself is rebuilt per request.
    agent::build_agent_graph(state.settings.max_tool_rounds)
        .context("failed to build agent graph")?;

    match state.llm.health_check().await {
        Ok(true) => tracing::info!("inference endpoint reachable"),
        _ => tracing::warn!("inference endpoint not reachable; queries will fail until it is"),
    }

    let bind_addr = format!("127.0.0.1:{}", state.settings.port);
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    let app: Router = server::router::router(state);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
