//! The retrieval tool exposed to the agent loop.
//!
//! Embeds the free-text query, runs a top-K similarity search and joins the
//! matching chunk texts in rank order. Zero matches yield a fixed sentinel
//! string that the model is instructed to handle gracefully.

use std::sync::Arc;

use crate::core::errors::ApiError;
use crate::llm::LlmProvider;
use crate::rag::store::VectorStore;

/// Tool name the model must use in its structured tool-call replies.
pub const RETRIEVER_TOOL_NAME: &str = "retriever_tool";

/// Surfaced to the model when the search returns nothing useful.
pub const NOT_FOUND_MESSAGE: &str =
    "No se encontró información en los documentos para esta consulta.";

/// Chunks with no positive similarity to the query are treated as
/// non-matches rather than padded into the context.
const MIN_SCORE: f32 = 0.0;

pub struct Retriever {
    llm: Arc<dyn LlmProvider>,
    store: Arc<dyn VectorStore>,
    embedding_model: String,
    top_k: usize,
}

impl Retriever {
    pub fn new(
        llm: Arc<dyn LlmProvider>,
        store: Arc<dyn VectorStore>,
        embedding_model: &str,
        top_k: usize,
    ) -> Self {
        Self {
            llm,
            store,
            embedding_model: embedding_model.to_string(),
            top_k: top_k.max(1),
        }
    }

    /// Resolve a query to concatenated chunk text, or the not-found sentinel.
    ///
    /// Embedding or store failures propagate; they are fatal to the request.
    pub async fn retrieve(&self, query: &str) -> Result<String, ApiError> {
        let embeddings = self
            .llm
            .embed(&[query.to_string()], &self.embedding_model)
            .await?;
        let query_embedding = embeddings
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::Internal("embedding provider returned no vector".to_string()))?;

        let mut results = self.store.search(&query_embedding, self.top_k).await?;
        results.retain(|r| r.score > MIN_SCORE);

        tracing::debug!(query, matches = results.len(), "retriever executed");

        if results.is_empty() {
            return Ok(NOT_FOUND_MESSAGE.to_string());
        }

        Ok(results
            .iter()
            .map(|r| r.chunk.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n"))
    }
}
