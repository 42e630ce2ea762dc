pub mod hf;
pub mod provider;
pub mod types;

#[cfg(test)]
pub mod testing;

pub use hf::HfEndpointProvider;
pub use provider::LlmProvider;
pub use types::{ChatMessage, ChatRequest};
