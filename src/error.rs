//! Error type for operations that can genuinely fail.
//!
//! Authoring mistakes in a workflow graph are not errors here: they are
//! reported as a `ValidationResult`. `WorkflowError` covers malformed input,
//! storage failures, and editor operations that were refused.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Failed to parse workflow JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Node '{0}' not found")]
    NodeNotFound(String),

    #[error("Edge '{0}' not found")]
    EdgeNotFound(String),

    #[error("Only one Start Trigger is allowed per workflow")]
    DuplicateStartTrigger,

    #[error("Node '{node_id}' is a {expected} node, cannot apply {found} data")]
    NodeKindMismatch {
        node_id: String,
        expected: String,
        found: &'static str,
    },

    #[error("Connection rejected: {}", .0.join("; "))]
    ConnectionRejected(Vec<String>),

    #[error("Workflow is invalid: {}", .0.join("; "))]
    InvalidWorkflow(Vec<String>),

    #[error("Please enter a workflow name")]
    EmptyName,

    #[error("Storage error: {0}")]
    Storage(String),
}

impl WorkflowError {
    /// Messages suitable for showing to the user one by one.
    pub fn messages(&self) -> Vec<String> {
        match self {
            WorkflowError::ConnectionRejected(errors) | WorkflowError::InvalidWorkflow(errors) => {
                errors.clone()
            }
            other => vec![other.to_string()],
        }
    }
}

pub type Result<T> = std::result::Result<T, WorkflowError>;
