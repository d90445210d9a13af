//! Graph-level structural rules: start node, linearity, acyclicity, connectivity.

use tracing::debug;

use super::ValidationResult;
use super::cycle::has_cycle;
use crate::model::{WorkflowEdge, WorkflowGraph, WorkflowNode};

/// Exactly one Start Trigger node.
pub fn validate_single_start_trigger(nodes: &[WorkflowNode]) -> ValidationResult {
    let start_count = nodes.iter().filter(|n| n.is_start_trigger()).count();

    if start_count == 0 {
        return ValidationResult::invalid("Workflow must have a Start Trigger node");
    }
    if start_count > 1 {
        return ValidationResult::invalid("Workflow can only have one Start Trigger node");
    }
    ValidationResult::valid()
}

/// At most one incoming and one outgoing edge per node.
pub fn validate_linear_workflow(
    nodes: &[WorkflowNode],
    edges: &[WorkflowEdge],
) -> ValidationResult {
    let graph = WorkflowGraph::build(nodes, edges);
    let mut errors = Vec::new();

    for node in nodes {
        if graph.incoming_count(node.id()) > 1 {
            errors.push(format!(
                "Node \"{}\" has multiple incoming connections",
                node.label()
            ));
        }
        if graph.outgoing_count(node.id()) > 1 {
            errors.push(format!(
                "Node \"{}\" has multiple outgoing connections",
                node.label()
            ));
        }
    }

    ValidationResult::from_errors(errors)
}

/// One generic error no matter how many cycles exist.
pub fn validate_no_cycles(nodes: &[WorkflowNode], edges: &[WorkflowEdge]) -> ValidationResult {
    if has_cycle(nodes, edges) {
        debug!(nodes = nodes.len(), edges = edges.len(), "cycle detected");
        return ValidationResult::invalid("Workflow contains a cycle/loop which is not allowed");
    }
    ValidationResult::valid()
}

/// Every node touches an edge. A lone node is exempt; an empty workflow is not.
pub fn validate_all_nodes_connected(
    nodes: &[WorkflowNode],
    edges: &[WorkflowEdge],
) -> ValidationResult {
    match nodes.len() {
        0 => return ValidationResult::invalid("Workflow must have at least one node"),
        1 => return ValidationResult::valid(),
        _ => {}
    }

    let graph = WorkflowGraph::build(nodes, edges);
    let isolated: Vec<String> = nodes
        .iter()
        .filter(|n| !graph.is_connected(n.id()))
        .map(|n| format!("\"{}\"", n.label()))
        .collect();

    if isolated.is_empty() {
        return ValidationResult::valid();
    }

    ValidationResult::invalid(format!(
        "Isolated nodes found: {}. All nodes must be connected.",
        isolated.join(", ")
    ))
}
