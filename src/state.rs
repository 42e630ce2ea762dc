use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::core::config::{AppPaths, Settings};
use crate::llm::{HfEndpointProvider, LlmProvider};
use crate::rag::{Retriever, SqliteVectorStore, VectorStore};

/// Process-wide application state, constructed once at startup and injected
/// into the request handlers. There is no module-level global state.
#[derive(Clone)]
pub struct AppState {
    pub paths: Arc<AppPaths>,
    pub settings: Arc<Settings>,
    pub llm: Arc<dyn LlmProvider>,
    pub store: Arc<dyn VectorStore>,
    pub retriever: Arc<Retriever>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Paths are built (and logging initialized) by the caller before this
    /// runs, so store/pool setup is already traced.
    pub async fn initialize(settings: Settings, paths: Arc<AppPaths>) -> anyhow::Result<Arc<Self>> {
        let llm: Arc<dyn LlmProvider> = Arc::new(HfEndpointProvider::new(
            &settings.router_base_url,
            &settings.inference_base_url,
            &settings.api_token,
        ));
        let store: Arc<dyn VectorStore> =
            Arc::new(SqliteVectorStore::with_path(paths.db_path.clone()).await?);

        Ok(Self::with_components(settings, paths, llm, store))
    }

    /// Assemble state from pre-built collaborators. Seam for tests and for
    /// the ingestion binary, which shares the provider and store wiring.
    pub fn with_components(
        settings: Settings,
        paths: Arc<AppPaths>,
        llm: Arc<dyn LlmProvider>,
        store: Arc<dyn VectorStore>,
    ) -> Arc<Self> {
        let retriever = Arc::new(Retriever::new(
            llm.clone(),
            store.clone(),
            &settings.embedding_model,
            settings.top_k,
        ));

        Arc::new(AppState {
            paths,
            settings: Arc::new(settings),
            llm,
            store,
            retriever,
            started_at: Utc::now(),
        })
    }
}
