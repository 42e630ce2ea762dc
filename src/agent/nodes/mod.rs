// Graph nodes
// Model turn and tool execution

pub mod action;
pub mod llm;

pub use action::ActionNode;
pub use llm::LlmNode;
