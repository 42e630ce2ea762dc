//! VectorStore trait — abstract interface for the chunk storage backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::errors::ApiError;

/// A persisted document chunk with its source metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredChunk {
    /// Unique chunk identifier (content hash, stable across reruns).
    pub chunk_id: String,
    /// The text content of the chunk.
    pub content: String,
    /// Source document identifier (filename).
    pub source: String,
    /// Optional metadata (JSON).
    pub metadata: Option<serde_json::Value>,
}

/// Result of a similarity search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkSearchResult {
    pub chunk: StoredChunk,
    /// Cosine similarity (higher = better).
    pub score: f32,
}

/// Abstract trait for the vector storage backend.
///
/// Writes happen only during the offline ingestion run; at request time the
/// store is shared read-only across requests.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Insert chunks with their embedding vectors. Re-inserting an existing
    /// `chunk_id` replaces the stored row.
    async fn insert_batch(&self, items: Vec<(StoredChunk, Vec<f32>)>) -> Result<(), ApiError>;

    /// Return up to `limit` chunks ranked by similarity to the query vector.
    async fn search(
        &self,
        query_embedding: &[f32],
        limit: usize,
    ) -> Result<Vec<ChunkSearchResult>, ApiError>;

    /// Total number of stored chunks.
    async fn count(&self) -> Result<usize, ApiError>;
}
