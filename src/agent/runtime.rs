// Graph runtime - petgraph based
// Sequential state-graph execution with conditional edges

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use super::node::{GraphError, Node, NodeContext, NodeOutput};
use super::state::AgentState;

/// Edge condition for graph routing
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EdgeCondition {
    /// Always follow this edge (default edge)
    Always,
    /// Follow this edge when the node branches with this condition
    OnCondition(String),
}

impl EdgeCondition {
    pub fn on(condition: impl Into<String>) -> Self {
        Self::OnCondition(condition.into())
    }
}

pub struct GraphRuntime {
    graph: DiGraph<Box<dyn Node>, EdgeCondition>,
    node_indices: HashMap<String, NodeIndex>,
    entry_node_id: String,
    max_steps: usize,
}

impl GraphRuntime {
    /// Execute the graph until a node reports `Final`.
    ///
    /// The step guard exists only to break wiring mistakes; a well-formed
    /// run always terminates through `Final`.
    pub async fn run(
        &self,
        state: &mut AgentState,
        ctx: &NodeContext<'_>,
    ) -> Result<(), GraphError> {
        let mut current_idx = *self.node_indices.get(&self.entry_node_id).ok_or_else(|| {
            GraphError::new(
                "runtime",
                format!("entry node not found: {}", self.entry_node_id),
            )
        })?;

        let mut trace: Vec<String> = Vec::new();

        for step in 0.. {
            if step >= self.max_steps {
                return Err(GraphError::new(
                    "runtime",
                    format!("maximum steps ({}) exceeded", self.max_steps),
                )
                .with_trace(trace));
            }

            let node = self
                .graph
                .node_weight(current_idx)
                .ok_or_else(|| GraphError::new("runtime", "node not found in graph"))?;

            tracing::debug!("executing node: {} (step {})", node.id(), step);
            trace.push(node.id().to_string());

            match node
                .execute(state, ctx)
                .await
                .map_err(|e| e.with_trace(trace.clone()))?
            {
                NodeOutput::Final => {
                    tracing::debug!("graph execution complete at node: {}", node.id());
                    return Ok(());
                }
                NodeOutput::Continue => {
                    current_idx = self
                        .resolve_next_node(current_idx, None)
                        .map_err(|e| e.with_trace(trace.clone()))?;
                }
                NodeOutput::Branch(condition) => {
                    current_idx = self
                        .resolve_next_node(current_idx, Some(&condition))
                        .map_err(|e| e.with_trace(trace.clone()))?;
                }
            }
        }

        unreachable!("graph loop exits via Final or the step guard");
    }

    fn resolve_next_node(
        &self,
        current_idx: NodeIndex,
        condition: Option<&str>,
    ) -> Result<NodeIndex, GraphError> {
        let current_id = self
            .graph
            .node_weight(current_idx)
            .map(|n| n.id())
            .unwrap_or("unknown");

        let outgoing: Vec<(NodeIndex, &EdgeCondition)> = self
            .graph
            .edges_directed(current_idx, Direction::Outgoing)
            .map(|edge| (edge.target(), edge.weight()))
            .collect();

        if let Some(cond) = condition {
            for (target_idx, weight) in &outgoing {
                if matches!(weight, EdgeCondition::OnCondition(expected) if expected == cond) {
                    return Ok(*target_idx);
                }
            }
            return Err(GraphError::new(
                current_id,
                format!("no edge matching condition '{cond}'"),
            ));
        }

        outgoing
            .iter()
            .find(|(_, weight)| **weight == EdgeCondition::Always)
            .map(|(target_idx, _)| *target_idx)
            .ok_or_else(|| {
                GraphError::new(current_id, format!("no default edge from '{current_id}'"))
            })
    }
}

/// Builder for constructing graphs fluently
pub struct GraphBuilder {
    graph: DiGraph<Box<dyn Node>, EdgeCondition>,
    node_indices: HashMap<String, NodeIndex>,
    entry_node_id: String,
    max_steps: usize,
    pending_edges: Vec<(String, String, EdgeCondition)>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_indices: HashMap::new(),
            entry_node_id: String::new(),
            max_steps: 64,
            pending_edges: Vec::new(),
        }
    }

    pub fn entry(mut self, node_id: impl Into<String>) -> Self {
        self.entry_node_id = node_id.into();
        self
    }

    pub fn max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn node(mut self, node: Box<dyn Node>) -> Self {
        let id = node.id().to_string();
        let index = self.graph.add_node(node);
        self.node_indices.insert(id, index);
        self
    }

    pub fn edge(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.pending_edges
            .push((from.into(), to.into(), EdgeCondition::Always));
        self
    }

    pub fn conditional_edge(
        mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        condition: impl Into<String>,
    ) -> Self {
        self.pending_edges
            .push((from.into(), to.into(), EdgeCondition::on(condition)));
        self
    }

    pub fn build(mut self) -> Result<GraphRuntime, GraphError> {
        if self.entry_node_id.is_empty() {
            return Err(GraphError::new("builder", "no entry node set"));
        }
        if !self.node_indices.contains_key(&self.entry_node_id) {
            return Err(GraphError::new(
                "builder",
                format!("entry node not registered: {}", self.entry_node_id),
            ));
        }

        for (from, to, condition) in std::mem::take(&mut self.pending_edges) {
            let from_idx = *self
                .node_indices
                .get(&from)
                .ok_or_else(|| GraphError::new(&from, format!("source node not found: {from}")))?;
            let to_idx = *self
                .node_indices
                .get(&to)
                .ok_or_else(|| GraphError::new(&to, format!("target node not found: {to}")))?;
            self.graph.add_edge(from_idx, to_idx, condition);
        }

        Ok(GraphRuntime {
            graph: self.graph,
            node_indices: self.node_indices,
            entry_node_id: self.entry_node_id,
            max_steps: self.max_steps,
        })
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
