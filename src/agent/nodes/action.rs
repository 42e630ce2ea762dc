// Action node
// Executes the tool named by the model's structured reply

use async_trait::async_trait;

use crate::agent::node::{GraphError, Node, NodeContext, NodeOutput};
use crate::agent::state::{AgentState, ToolCall};
use crate::llm::ChatMessage;
use crate::rag::RETRIEVER_TOOL_NAME;

pub struct ActionNode;

impl ActionNode {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ActionNode {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Node for ActionNode {
    fn id(&self) -> &'static str {
        "action"
    }

    async fn execute(
        &self,
        state: &mut AgentState,
        ctx: &NodeContext<'_>,
    ) -> Result<NodeOutput, GraphError> {
        // The llm node only branches here after a successful parse.
        let Some(call) = ToolCall::parse(state.last_content()) else {
            return Err(GraphError::new(
                self.id(),
                "entered without a parsable tool call",
            ));
        };

        state.tool_rounds += 1;

        if call.tool_name == RETRIEVER_TOOL_NAME {
            tracing::info!(query = %call.query, "executing retriever");
            let result = ctx
                .app_state
                .retriever
                .retrieve(&call.query)
                .await
                .map_err(|e| GraphError::new(self.id(), e.to_string()))?;
            state.push(ChatMessage::tool(result));
        } else {
            // Unknown tool is recovered in-conversation: the model sees the
            // error on its next turn and can answer without it.
            tracing::warn!(tool = %call.tool_name, "unknown tool requested");
            state.push(ChatMessage::assistant(format!(
                "Error: la herramienta '{}' no fue encontrada.",
                call.tool_name
            )));
        }

        Ok(NodeOutput::Continue)
    }
}
