// Node trait and types
// Base abstraction for graph nodes

use async_trait::async_trait;

use crate::core::errors::ApiError;
use crate::state::AppState;

use super::state::AgentState;

/// Context passed to nodes during execution.
///
/// Everything a node touches (provider, retriever, settings) hangs off the
/// injected application state; nodes keep no state of their own.
pub struct NodeContext<'a> {
    pub app_state: &'a AppState,
}

/// Output from a node execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeOutput {
    /// Follow the default edge to the next node
    Continue,
    /// Follow the conditional edge matching this condition
    Branch(String),
    /// Graph execution complete
    Final,
}

/// Graph execution error
#[derive(Debug, Clone)]
pub struct GraphError {
    pub node_id: String,
    pub message: String,
    /// Node ids visited before the failure, in execution order.
    pub execution_trace: Vec<String>,
}

impl GraphError {
    pub fn new(node_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            message: message.into(),
            execution_trace: Vec::new(),
        }
    }

    pub fn with_trace(mut self, trace: Vec<String>) -> Self {
        self.execution_trace = trace;
        self
    }
}

impl From<GraphError> for ApiError {
    fn from(err: GraphError) -> Self {
        tracing::error!(
            node = %err.node_id,
            trace = %err.execution_trace.join(" -> "),
            "graph execution failed"
        );
        ApiError::internal(format!("graph error in {}: {}", err.node_id, err.message))
    }
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GraphError in {}: {}", self.node_id, self.message)?;
        if !self.execution_trace.is_empty() {
            write!(f, " (visited: {})", self.execution_trace.join(" -> "))?;
        }
        Ok(())
    }
}

impl std::error::Error for GraphError {}

/// Node trait - all graph nodes implement this
#[async_trait]
pub trait Node: Send + Sync {
    /// Unique identifier for this node
    fn id(&self) -> &'static str;

    /// Execute the node logic
    async fn execute(
        &self,
        state: &mut AgentState,
        ctx: &NodeContext<'_>,
    ) -> Result<NodeOutput, GraphError>;
}
