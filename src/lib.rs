pub mod agent;
pub mod core;
pub mod ingest;
pub mod llm;
pub mod rag;
pub mod server;
pub mod state;
