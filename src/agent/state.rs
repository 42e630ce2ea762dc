// Agent state
// Per-request conversation history and loop bookkeeping

use serde::Deserialize;

use crate::llm::ChatMessage;

/// Structured action request the model may emit in place of a final answer.
///
/// Decoded from the raw reply text; anything that is not a JSON object with
/// both fields is, by definition, a final answer rather than an error.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ToolCall {
    pub tool_name: String,
    pub query: String,
}

impl ToolCall {
    pub fn parse(text: &str) -> Option<Self> {
        serde_json::from_str(text.trim()).ok()
    }
}

/// Mutable state threaded through one run of the agent graph.
///
/// History is append-only: each node pushes exactly one message per visit
/// and nothing is ever reordered or removed. The state lives for one HTTP
/// request and is dropped afterwards.
#[derive(Debug, Clone)]
pub struct AgentState {
    pub user_id: String,
    pub messages: Vec<ChatMessage>,
    /// Tool-invocation rounds consumed so far.
    pub tool_rounds: usize,
    /// Final answer, set exactly once when the run completes.
    pub output: Option<String>,
}

impl AgentState {
    pub fn new(user_id: &str, system_prompt: &str, query: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            messages: vec![
                ChatMessage::system(system_prompt),
                ChatMessage::user(query),
            ],
            tool_rounds: 0,
            output: None,
        }
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn last_content(&self) -> &str {
        self.messages
            .last()
            .map(|m| m.content.as_str())
            .unwrap_or("")
    }
}
