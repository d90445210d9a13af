//! Workflow document model: JSON → Rust types + graph view.

pub mod graph;
pub mod types;

pub use graph::WorkflowGraph;
pub use types::*;

use crate::error::Result;

/// Deserialize a saved workflow JSON string.
pub fn parse(json: &str) -> Result<Workflow> {
    Ok(serde_json::from_str::<Workflow>(json)?)
}

/// Deserialize a single canvas node.
pub fn parse_node(json: &str) -> Result<WorkflowNode> {
    Ok(serde_json::from_str::<WorkflowNode>(json)?)
}

/// Deserialize a node array and an edge array, as held by the canvas.
pub fn parse_snapshot(
    nodes_json: &str,
    edges_json: &str,
) -> Result<(Vec<WorkflowNode>, Vec<WorkflowEdge>)> {
    let nodes = serde_json::from_str::<Vec<WorkflowNode>>(nodes_json)?;
    let edges = serde_json::from_str::<Vec<WorkflowEdge>>(edges_json)?;
    Ok((nodes, edges))
}
