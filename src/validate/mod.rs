//! Authoring-time validation of the workflow graph.
//!
//! Every check is pure and returns a `ValidationResult`; nothing here fails
//! with an `Err`. Rules never short-circuit each other, so the caller sees
//! every problem at once.

pub mod connect;
pub mod cycle;
pub mod node_rules;
pub mod structural;

pub use connect::can_connect;
pub use cycle::has_cycle;
pub use node_rules::validate_node_fields;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{WorkflowEdge, WorkflowNode};

/// Pass/fail flag plus user-facing messages in rule-check order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        ValidationResult {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        ValidationResult {
            is_valid: false,
            errors: vec![message.into()],
        }
    }

    pub fn from_errors(errors: Vec<String>) -> Self {
        ValidationResult {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Append another result's messages; validity is the AND of both.
    pub fn merge(&mut self, other: ValidationResult) {
        self.is_valid &= other.is_valid;
        self.errors.extend(other.errors);
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        ValidationResult::valid()
    }
}

/// Validate the entire workflow: structural rules, then each node's fields.
pub fn validate_workflow(nodes: &[WorkflowNode], edges: &[WorkflowEdge]) -> ValidationResult {
    let mut result = structural::validate_single_start_trigger(nodes);
    result.merge(structural::validate_linear_workflow(nodes, edges));
    result.merge(structural::validate_no_cycles(nodes, edges));
    result.merge(structural::validate_all_nodes_connected(nodes, edges));

    for node in nodes {
        result.merge(validate_node_fields(node));
    }

    debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        errors = result.errors.len(),
        "workflow validated"
    );
    result
}

/// Validate a single node on its own, e.g. for inline field hints.
pub fn validate_node(node: &WorkflowNode) -> ValidationResult {
    validate_node_fields(node)
}
