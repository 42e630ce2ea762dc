// Agent module
// Two-node state graph: ask the model, execute the retrieval action,
// repeat until the reply is a final answer.

pub mod node;
pub mod nodes;
pub mod prompt;
pub mod runtime;
pub mod state;


use node::GraphError;
use nodes::{ActionNode, LlmNode};
use runtime::{GraphBuilder, GraphRuntime};

pub use node::{Node, NodeContext, NodeOutput};
pub use prompt::SYSTEM_PROMPT;
pub use state::{AgentState, ToolCall};

/// Floor for the runtime step guard. The per-request tool-round budget in
/// `AgentState` terminates the loop first; the guard only breaks wiring bugs.
const MIN_GRAPH_STEPS: usize = 64;

/// Node id the model turn branches to when a tool call is requested.
pub const ACTION_BRANCH: &str = "action";

/// Build the query-answering graph for the given tool-round budget.
///
/// Entry point is the model turn. A reply that parses as a tool call
/// branches to the action node, which always hands control back to the
/// model; any other reply ends the run.
pub fn build_agent_graph(max_tool_rounds: usize) -> Result<GraphRuntime, GraphError> {
    // Each tool round costs two node visits, plus one closing model turn;
    // the step guard must stay above that so the round budget fires first.
    let max_steps = (2 * max_tool_rounds + 2).max(MIN_GRAPH_STEPS);

    GraphBuilder::new()
        .entry("llm")
        .max_steps(max_steps)
        .node(Box::new(LlmNode::new()))
        .node(Box::new(ActionNode::new()))
        .conditional_edge("llm", "action", ACTION_BRANCH)
        .edge("action", "llm")
        .build()
}
