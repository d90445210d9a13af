//! Pre-insertion gate for a new edge.
//!
//! Narrower than full validation: only degree limits and the loop check are
//! evaluated, so it is cheap enough to run while the user drags a connection.

use tracing::debug;

use super::ValidationResult;
use super::cycle::has_cycle;
use crate::model::{WorkflowEdge, WorkflowGraph, WorkflowNode};

/// Id given to the speculative edge. Calls are synchronous, so a fixed id
/// cannot collide with another in-flight check.
const CANDIDATE_EDGE_ID: &str = "temp";

/// Check whether `source → target` may be added to the current graph.
/// All three checks run; the result carries every failure.
pub fn can_connect(
    source_id: &str,
    target_id: &str,
    nodes: &[WorkflowNode],
    edges: &[WorkflowEdge],
) -> ValidationResult {
    let mut errors = Vec::new();
    let graph = WorkflowGraph::build(nodes, edges);

    if graph.outgoing_count(source_id) >= 1 {
        errors.push("Each node can only have one outgoing connection".to_string());
    }

    if graph.incoming_count(target_id) >= 1 {
        errors.push("Each node can only have one incoming connection".to_string());
    }

    let mut candidate_edges = edges.to_vec();
    candidate_edges.push(WorkflowEdge::new(CANDIDATE_EDGE_ID, source_id, target_id));
    if has_cycle(nodes, &candidate_edges) {
        errors.push("This connection would create a loop".to_string());
    }

    let result = ValidationResult::from_errors(errors);
    debug!(
        source = source_id,
        target = target_id,
        is_valid = result.is_valid,
        "connection checked"
    );
    result
}
