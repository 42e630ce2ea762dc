use std::path::Path;

use solvex_bot::core::config::{AppPaths, Settings};
use solvex_bot::core::logging;
use solvex_bot::ingest;
use solvex_bot::llm::HfEndpointProvider;
use solvex_bot::rag::SqliteVectorStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env()?;
    let paths = AppPaths::new(&settings.persist_dir);
    logging::init(&paths);

    let llm = HfEndpointProvider::new(
        &settings.router_base_url,
        &settings.inference_base_url,
        &settings.api_token,
    );
    let store = SqliteVectorStore::with_path(paths.db_path.clone()).await?;

    let total = ingest::run(&settings, Path::new(ingest::DOCS_DIR), &store, &llm).await?;
    tracing::info!(
        chunks = total,
        db = %paths.db_path.display(),
        "vector index ready"
    );

    Ok(())
}
