//! Retrieval side of the chatbot.
//!
//! - `VectorStore` / `SqliteVectorStore`: persisted chunk vectors with
//!   brute-force cosine similarity search
//! - `TextSplitter`: overlapping character windows for ingestion
//! - `Retriever`: the single tool exposed to the agent loop

pub mod retriever;
pub mod splitter;
pub mod sqlite;
pub mod store;

pub use retriever::{Retriever, NOT_FOUND_MESSAGE, RETRIEVER_TOOL_NAME};
pub use splitter::TextSplitter;
pub use sqlite::SqliteVectorStore;
pub use store::{ChunkSearchResult, StoredChunk, VectorStore};
