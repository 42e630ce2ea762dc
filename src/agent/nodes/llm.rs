// Model turn
// Asks the language model for the next step given the full history

use async_trait::async_trait;

use crate::agent::node::{GraphError, Node, NodeContext, NodeOutput};
use crate::agent::state::{AgentState, ToolCall};
use crate::agent::ACTION_BRANCH;
use crate::llm::{ChatMessage, ChatRequest};

pub struct LlmNode;

impl LlmNode {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LlmNode {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Node for LlmNode {
    fn id(&self) -> &'static str {
        "llm"
    }

    async fn execute(
        &self,
        state: &mut AgentState,
        ctx: &NodeContext<'_>,
    ) -> Result<NodeOutput, GraphError> {
        let request = ChatRequest::new(state.messages.clone());
        let reply = ctx
            .app_state
            .llm
            .chat(request, &ctx.app_state.settings.llm_model)
            .await
            .map_err(|e| GraphError::new(self.id(), e.to_string()))?;

        tracing::debug!(reply = %reply, "model reply");
        state.push(ChatMessage::assistant(reply.clone()));

        if ToolCall::parse(&reply).is_some() {
            if state.tool_rounds < ctx.app_state.settings.max_tool_rounds {
                return Ok(NodeOutput::Branch(ACTION_BRANCH.to_string()));
            }
            // Round budget exhausted: surface the raw reply as the answer
            // rather than looping forever on a model that keeps asking for
            // the tool.
            tracing::warn!(
                rounds = state.tool_rounds,
                "tool-round budget exhausted, ending run"
            );
        }

        state.output = Some(reply);
        Ok(NodeOutput::Final)
    }
}
