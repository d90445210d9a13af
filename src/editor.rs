//! Authoring session over a single workflow.
//!
//! Holds the node/edge state the canvas edits. Edge insertion always goes
//! through `can_connect`; saving and exporting always go through
//! `validate_workflow` and are refused while the graph is invalid.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{Result, WorkflowError};
use crate::export::ExportDocument;
use crate::library::{KeyValueStore, WorkflowLibrary};
use crate::model::{
    NodeFields, NodeType, Position, StartTriggerFields, Workflow, WorkflowEdge, WorkflowNode,
};
use crate::validate::{self, ValidationResult};

const INITIAL_START_NODE_ID: &str = "start-1";
const EXPORT_FALLBACK_NAME: &str = "Exported Workflow";

/// The start node every new session begins with.
pub fn initial_start_node() -> WorkflowNode {
    WorkflowNode::with_fields(
        INITIAL_START_NODE_ID,
        Position::new(250.0, 50.0),
        NodeType::StartTrigger.default_label(),
        NodeFields::StartTrigger(StartTriggerFields::default()),
    )
}

#[derive(Debug, Clone)]
pub struct WorkflowEditor {
    nodes: Vec<WorkflowNode>,
    edges: Vec<WorkflowEdge>,
    current_workflow: Option<Workflow>,
}

impl Default for WorkflowEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkflowEditor {
    pub fn new() -> Self {
        WorkflowEditor {
            nodes: vec![initial_start_node()],
            edges: Vec::new(),
            current_workflow: None,
        }
    }

    pub fn nodes(&self) -> &[WorkflowNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[WorkflowEdge] {
        &self.edges
    }

    pub fn current_workflow(&self) -> Option<&Workflow> {
        self.current_workflow.as_ref()
    }

    pub fn node(&self, node_id: &str) -> Option<&WorkflowNode> {
        self.nodes.iter().find(|n| n.id() == node_id)
    }

    fn node_mut(&mut self, node_id: &str) -> Result<&mut WorkflowNode> {
        self.nodes
            .iter_mut()
            .find(|n| n.id() == node_id)
            .ok_or_else(|| WorkflowError::NodeNotFound(node_id.to_string()))
    }

    /// Drop a new node of `node_type` onto the canvas with default fields.
    pub fn add_node(&mut self, node_type: NodeType, position: Position) -> Result<&WorkflowNode> {
        if node_type == NodeType::StartTrigger && self.nodes.iter().any(|n| n.is_start_trigger()) {
            warn!("rejected second start trigger");
            return Err(WorkflowError::DuplicateStartTrigger);
        }

        let node_id = Uuid::new_v4().to_string();
        debug!(node_id = %node_id, node_type = %node_type, "node added");
        self.nodes.push(WorkflowNode::new(node_type, node_id.clone(), position));
        self.nodes.last().ok_or(WorkflowError::NodeNotFound(node_id))
    }

    /// Replace a node's fields, e.g. after a form edit.
    pub fn update_node_data(&mut self, node_id: &str, fields: NodeFields) -> Result<()> {
        self.node_mut(node_id)?.set_fields(fields)
    }

    pub fn rename_node(&mut self, node_id: &str, label: impl Into<String>) -> Result<()> {
        self.node_mut(node_id)?.set_label(label);
        Ok(())
    }

    pub fn move_node(&mut self, node_id: &str, position: Position) -> Result<()> {
        self.node_mut(node_id)?.set_position(position);
        Ok(())
    }

    /// Remove a node together with every edge touching it.
    pub fn delete_node(&mut self, node_id: &str) -> Result<WorkflowNode> {
        let idx = self
            .nodes
            .iter()
            .position(|n| n.id() == node_id)
            .ok_or_else(|| WorkflowError::NodeNotFound(node_id.to_string()))?;
        let removed = self.nodes.remove(idx);
        self.edges
            .retain(|e| e.source != node_id && e.target != node_id);
        debug!(node_id, "node deleted");
        Ok(removed)
    }

    pub fn delete_edge(&mut self, edge_id: &str) -> Result<WorkflowEdge> {
        let idx = self
            .edges
            .iter()
            .position(|e| e.id == edge_id)
            .ok_or_else(|| WorkflowError::EdgeNotFound(edge_id.to_string()))?;
        Ok(self.edges.remove(idx))
    }

    pub fn can_connect(&self, source_id: &str, target_id: &str) -> ValidationResult {
        validate::can_connect(source_id, target_id, &self.nodes, &self.edges)
    }

    /// Add `source → target` if the admission check passes. On rejection the
    /// edge is discarded and every message is returned.
    pub fn connect(&mut self, source_id: &str, target_id: &str) -> Result<&WorkflowEdge> {
        let admission = self.can_connect(source_id, target_id);
        if !admission.is_valid {
            warn!(
                source = source_id,
                target = target_id,
                errors = ?admission.errors,
                "connection rejected"
            );
            return Err(WorkflowError::ConnectionRejected(admission.errors));
        }

        let edge_id = format!("xy-edge__{source_id}-{target_id}");
        let mut edge = WorkflowEdge::new(edge_id.clone(), source_id, target_id);
        edge.animated = true;
        self.edges.push(edge);
        self.edges.last().ok_or(WorkflowError::EdgeNotFound(edge_id))
    }

    pub fn validate(&self) -> ValidationResult {
        validate::validate_workflow(&self.nodes, &self.edges)
    }

    /// Reset to a fresh session with only the initial start node.
    pub fn clear(&mut self) {
        self.nodes = vec![initial_start_node()];
        self.edges.clear();
        self.current_workflow = None;
    }

    pub fn load(&mut self, workflow: Workflow) {
        self.nodes = workflow.nodes.clone();
        self.edges = workflow.edges.clone();
        self.current_workflow = Some(workflow);
    }

    /// Forget the current workflow if it is the one being deleted from the library.
    pub fn forget_workflow(&mut self, workflow_id: &str) {
        if self
            .current_workflow
            .as_ref()
            .is_some_and(|w| w.id == workflow_id)
        {
            self.clear();
        }
    }

    fn ensure_valid(&self) -> Result<()> {
        let validation = self.validate();
        if !validation.is_valid {
            return Err(WorkflowError::InvalidWorkflow(validation.errors));
        }
        Ok(())
    }

    /// Build the workflow record to hand to the library. Updating an already
    /// saved workflow keeps its id and creation time. The session itself is
    /// not changed; see [`WorkflowEditor::save_into`].
    pub fn prepare_save(&self, name: &str, now: DateTime<Utc>) -> Result<Workflow> {
        self.ensure_valid()?;

        let name = name.trim();
        if name.is_empty() {
            return Err(WorkflowError::EmptyName);
        }

        let (id, created_at) = match &self.current_workflow {
            Some(current) => (current.id.clone(), current.created_at),
            None => (Uuid::new_v4().to_string(), now),
        };

        let workflow = Workflow {
            id,
            name: name.to_string(),
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
            created_at,
            updated_at: now,
        };
        Ok(workflow)
    }

    /// Validate, persist to `library`, and only then make the saved record
    /// the session's current workflow. A failed write leaves the session as
    /// it was.
    pub fn save_into<S: KeyValueStore>(
        &mut self,
        library: &mut WorkflowLibrary<S>,
        name: &str,
        now: DateTime<Utc>,
    ) -> Result<Workflow> {
        let workflow = self.prepare_save(name, now)?;
        library.save(workflow.clone(), now)?;
        debug!(workflow_id = %workflow.id, "workflow saved");
        self.current_workflow = Some(workflow.clone());
        Ok(workflow)
    }

    pub fn prepare_export(&self) -> Result<ExportDocument> {
        self.ensure_valid()?;

        let name = self
            .current_workflow
            .as_ref()
            .map_or(EXPORT_FALLBACK_NAME, |w| w.name.as_str());
        Ok(ExportDocument {
            name: name.to_string(),
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        })
    }
}
