//! One-shot ingestion batch: PDFs -> overlapping text windows -> embeddings
//! -> vector store.
//!
//! Fails fast when the document folder is missing or holds no PDFs; nothing
//! is written in that case. Chunk IDs are content hashes, so re-running over
//! unchanged documents replaces rows instead of appending duplicates.

use std::path::{Path, PathBuf};

use anyhow::Context;
use sha2::{Digest, Sha256};
use walkdir::WalkDir;

use crate::core::config::Settings;
use crate::llm::LlmProvider;
use crate::rag::splitter::TextSplitter;
use crate::rag::{StoredChunk, VectorStore};

/// Fixed source-document folder, relative to the working directory.
pub const DOCS_DIR: &str = "productos_pdf";

const EMBED_BATCH_SIZE: usize = 32;

/// Run the full batch against a documents directory.
pub async fn run(
    settings: &Settings,
    docs_dir: &Path,
    store: &dyn VectorStore,
    llm: &dyn LlmProvider,
) -> anyhow::Result<usize> {
    anyhow::ensure!(
        docs_dir.is_dir(),
        "document folder '{}' not found; create it and place the PDF files inside",
        docs_dir.display()
    );

    let pdf_paths = find_pdfs(docs_dir);
    anyhow::ensure!(
        !pdf_paths.is_empty(),
        "no PDF documents found in '{}'",
        docs_dir.display()
    );

    tracing::info!(documents = pdf_paths.len(), "loading PDF documents");

    let mut documents = Vec::new();
    for path in &pdf_paths {
        let text = pdf_extract::extract_text(path)
            .with_context(|| format!("failed to extract text from '{}'", path.display()))?;
        documents.push((source_name(path), text));
    }

    ingest_documents(settings, &documents, store, llm).await
}

/// Split, embed and store already-extracted document texts.
///
/// Returns the number of chunks written.
pub async fn ingest_documents(
    settings: &Settings,
    documents: &[(String, String)],
    store: &dyn VectorStore,
    llm: &dyn LlmProvider,
) -> anyhow::Result<usize> {
    let splitter = TextSplitter::default();

    let mut chunks = Vec::new();
    for (source, text) in documents {
        for window in splitter.split(text) {
            chunks.push(StoredChunk {
                chunk_id: chunk_id(source, window.index, &window.text),
                content: window.text,
                source: source.clone(),
                metadata: Some(serde_json::json!({
                    "chunk_index": window.index,
                    "start_offset": window.start_offset,
                })),
            });
        }
    }
    anyhow::ensure!(!chunks.is_empty(), "documents contained no extractable text");

    tracing::info!(
        documents = documents.len(),
        chunks = chunks.len(),
        "embedding chunks"
    );

    let mut items = Vec::with_capacity(chunks.len());
    for batch in chunks.chunks(EMBED_BATCH_SIZE) {
        let texts: Vec<String> = batch.iter().map(|c| c.content.clone()).collect();
        let embeddings = llm.embed(&texts, &settings.embedding_model).await?;
        items.extend(batch.iter().cloned().zip(embeddings));
    }

    let total = items.len();
    store.insert_batch(items).await?;

    tracing::info!(chunks = total, "ingestion complete");
    Ok(total)
}

fn find_pdfs(docs_dir: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = WalkDir::new(docs_dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("pdf"))
                .unwrap_or(false)
        })
        .collect();
    paths.sort();
    paths
}

fn source_name(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("unknown.pdf")
        .to_string()
}

fn chunk_id(source: &str, index: usize, content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source.as_bytes());
    hasher.update([0]);
    hasher.update(index.to_le_bytes());
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}
