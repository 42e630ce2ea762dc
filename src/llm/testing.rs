//! Test doubles for the provider seam.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::provider::LlmProvider;
use super::types::ChatRequest;
use crate::core::errors::ApiError;

/// Provider that replays a fixed list of chat replies and embeds text with
/// a two-dimensional keyword vector: `[1, 0]` when the text contains one of
/// the match terms, `[0, 1]` otherwise.
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<String>>,
    repeat_last: bool,
    match_terms: Vec<String>,
    pub chat_calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new(replies: &[&str]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
            repeat_last: false,
            match_terms: Vec::new(),
            chat_calls: AtomicUsize::new(0),
        }
    }

    /// Provider that answers every chat turn with the same reply.
    pub fn always(reply: &str) -> Self {
        let mut provider = Self::new(&[reply]);
        provider.repeat_last = true;
        provider
    }

    pub fn with_match_terms(mut self, terms: &[&str]) -> Self {
        self.match_terms = terms.iter().map(|t| t.to_lowercase()).collect();
        self
    }

    pub fn chat_call_count(&self) -> usize {
        self.chat_calls.load(Ordering::SeqCst)
    }

    fn keyword_embedding(&self, text: &str) -> Vec<f32> {
        let lowered = text.to_lowercase();
        if self.match_terms.iter().any(|term| lowered.contains(term)) {
            vec![1.0, 0.0]
        } else {
            vec![0.0, 1.0]
        }
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn health_check(&self) -> Result<bool, ApiError> {
        Ok(true)
    }

    async fn chat(&self, _request: ChatRequest, _model_id: &str) -> Result<String, ApiError> {
        self.chat_calls.fetch_add(1, Ordering::SeqCst);

        let mut replies = self.replies.lock().unwrap();
        let reply = if self.repeat_last {
            replies.front().cloned()
        } else {
            replies.pop_front()
        };

        reply.ok_or_else(|| ApiError::Internal("scripted replies exhausted".to_string()))
    }

    async fn embed(&self, inputs: &[String], _model_id: &str) -> Result<Vec<Vec<f32>>, ApiError> {
        Ok(inputs.iter().map(|t| self.keyword_embedding(t)).collect())
    }
}
