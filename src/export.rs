//! JSON export of a workflow.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{Workflow, WorkflowEdge, WorkflowNode};

/// The exported document: only the name and the graph, no ids or timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDocument {
    pub name: String,
    pub nodes: Vec<WorkflowNode>,
    pub edges: Vec<WorkflowEdge>,
}

impl From<&Workflow> for ExportDocument {
    fn from(workflow: &Workflow) -> Self {
        ExportDocument {
            name: workflow.name.clone(),
            nodes: workflow.nodes.clone(),
            edges: workflow.edges.clone(),
        }
    }
}

impl ExportDocument {
    /// Pretty-printed with two-space indentation.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Download file name: whitespace runs become `_`.
    pub fn file_name(&self) -> String {
        let mut out = String::with_capacity(self.name.len() + 5);
        let mut in_space = false;
        for c in self.name.chars() {
            if c.is_whitespace() {
                if !in_space {
                    out.push('_');
                }
                in_space = true;
            } else {
                out.push(c);
                in_space = false;
            }
        }
        out.push_str(".json");
        out
    }
}
