//! Per-node required-field validation.
//! Match arms here must track `WorkflowNode` in `model/types.rs`.

use super::ValidationResult;
use crate::model::WorkflowNode;

/// Validate a single node's fields. Returns all errors found.
pub fn validate_node_fields(node: &WorkflowNode) -> ValidationResult {
    let mut errors = Vec::new();

    match node {
        WorkflowNode::StartTrigger(_) | WorkflowNode::WaitTimer(_) | WorkflowNode::Unknown(_) => {}
        WorkflowNode::SendMessage(n) => {
            if is_blank(&n.data.fields.username) {
                errors.push("Username is required for Send Message node".to_string());
            }
            if is_blank(&n.data.fields.message) {
                errors.push("Message is required for Send Message node".to_string());
            }
        }
        WorkflowNode::Condition(n) => {
            if is_blank(&n.data.fields.condition_type) {
                errors.push("Condition type is required".to_string());
            }
        }
        WorkflowNode::FollowUser(n) => {
            if is_blank(&n.data.fields.username) {
                errors.push("Username is required for Follow User node".to_string());
            }
        }
    }

    ValidationResult::from_errors(errors)
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
