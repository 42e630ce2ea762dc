use serde::{Deserialize, Serialize};

pub const ROLE_SYSTEM: &str = "system";
pub const ROLE_USER: &str = "user";
pub const ROLE_ASSISTANT: &str = "assistant";
pub const ROLE_TOOL: &str = "tool";

/// A role-tagged unit of conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self::with_role(ROLE_SYSTEM, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::with_role(ROLE_USER, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::with_role(ROLE_ASSISTANT, content)
    }

    pub fn tool(content: impl Into<String>) -> Self {
        Self::with_role(ROLE_TOOL, content)
    }

    fn with_role(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: Option<f64>,
    pub top_p: Option<f64>,
    pub max_tokens: Option<u32>,
}

impl ChatRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            temperature: Some(0.2),
            top_p: None,
            max_tokens: Some(1024),
        }
    }
}
