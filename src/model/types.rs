//! Rust types for the workflow document produced by the builder canvas.
//!
//! These types are the serde target for the canvas JSON. Node payloads are a
//! tagged union over the five step kinds; each kind carries its own field
//! record, so the required-field rules match on the tag instead of probing a
//! loose key/value bag.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::{Map, Value};

use crate::error::{Result, WorkflowError};

// =============================================================================
// SAVED WORKFLOW
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub id: String,
    pub name: String,
    pub nodes: Vec<WorkflowNode>,
    pub edges: Vec<WorkflowEdge>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
    #[serde(default)]
    pub animated: bool,
}

impl WorkflowEdge {
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        WorkflowEdge {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
            animated: false,
        }
    }
}

/// Canvas coordinates. Carried through untouched; validation never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }
}

// =============================================================================
// NODE TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeType {
    StartTrigger,
    Condition,
    WaitTimer,
    SendMessage,
    FollowUser,
}

impl NodeType {
    pub const ALL: [NodeType; 5] = [
        NodeType::StartTrigger,
        NodeType::Condition,
        NodeType::WaitTimer,
        NodeType::SendMessage,
        NodeType::FollowUser,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::StartTrigger => "startTrigger",
            NodeType::Condition => "condition",
            NodeType::WaitTimer => "waitTimer",
            NodeType::SendMessage => "sendMessage",
            NodeType::FollowUser => "followUser",
        }
    }

    /// Label given to a freshly dropped node of this type.
    pub fn default_label(&self) -> &'static str {
        match self {
            NodeType::StartTrigger => "Start Trigger",
            NodeType::Condition => "Condition",
            NodeType::WaitTimer => "Wait Timer",
            NodeType::SendMessage => "Send Message",
            NodeType::FollowUser => "Follow User",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// PER-TYPE FIELD RECORDS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerType {
    #[default]
    Manual,
    Scheduled,
    Webhook,
    Event,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StartTriggerFields {
    pub trigger_type: TriggerType,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConditionFields {
    /// One of `user_follows`, `message_contains`, `time_passed`, `user_replied`
    /// once chosen; blank until the user picks one.
    pub condition_type: String,
    pub condition_value: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WaitTimerFields {
    pub hours: u32,
    pub minutes: u32,
}

impl WaitTimerFields {
    pub fn duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.hours) * 3600 + u64::from(self.minutes) * 60)
    }

    /// Short text shown on the canvas card, e.g. `2h 30m`.
    pub fn summary(&self) -> String {
        if self.hours > 0 || self.minutes > 0 {
            format!("{}h {}m", self.hours, self.minutes)
        } else {
            "Not set".to_string()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SendMessageFields {
    pub username: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FollowUserFields {
    pub username: String,
}

/// A node payload detached from its node, used to replace a node's fields.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeFields {
    StartTrigger(StartTriggerFields),
    Condition(ConditionFields),
    WaitTimer(WaitTimerFields),
    SendMessage(SendMessageFields),
    FollowUser(FollowUserFields),
}

impl NodeFields {
    pub fn default_for(node_type: NodeType) -> Self {
        match node_type {
            NodeType::StartTrigger => NodeFields::StartTrigger(StartTriggerFields::default()),
            NodeType::Condition => NodeFields::Condition(ConditionFields::default()),
            NodeType::WaitTimer => NodeFields::WaitTimer(WaitTimerFields::default()),
            NodeType::SendMessage => NodeFields::SendMessage(SendMessageFields::default()),
            NodeType::FollowUser => NodeFields::FollowUser(FollowUserFields::default()),
        }
    }

    pub fn node_type(&self) -> NodeType {
        match self {
            NodeFields::StartTrigger(_) => NodeType::StartTrigger,
            NodeFields::Condition(_) => NodeType::Condition,
            NodeFields::WaitTimer(_) => NodeType::WaitTimer,
            NodeFields::SendMessage(_) => NodeType::SendMessage,
            NodeFields::FollowUser(_) => NodeType::FollowUser,
        }
    }
}

// =============================================================================
// NODE BASE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData<F> {
    pub label: String,
    #[serde(flatten)]
    pub fields: F,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeBase<F> {
    pub id: String,
    #[serde(default)]
    pub position: Position,
    pub data: NodeData<F>,
}

impl<F> NodeBase<F> {
    fn build(id: String, position: Position, label: &str, fields: F) -> Self {
        NodeBase {
            id,
            position,
            data: NodeData {
                label: label.to_string(),
                fields,
            },
        }
    }
}

/// A node whose `type` tag this crate does not know. It keeps its payload
/// verbatim and has no required fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnknownNode {
    pub id: String,
    #[serde(rename = "type", deserialize_with = "unrecognised_tag")]
    pub node_type: String,
    #[serde(default)]
    pub position: Position,
    pub data: NodeData<Map<String, Value>>,
}

/// Known tags never fall back to [`UnknownNode`]; a malformed known node
/// stays a parse error.
fn unrecognised_tag<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let tag = String::deserialize(deserializer)?;
    if NodeType::ALL.iter().any(|t| t.as_str() == tag) {
        return Err(de::Error::custom(format_args!("malformed `{tag}` node")));
    }
    Ok(tag)
}

// =============================================================================
// WORKFLOW NODE — tagged union over the five step kinds
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WorkflowNode {
    #[serde(rename = "startTrigger")]
    StartTrigger(NodeBase<StartTriggerFields>),
    #[serde(rename = "condition")]
    Condition(NodeBase<ConditionFields>),
    #[serde(rename = "waitTimer")]
    WaitTimer(NodeBase<WaitTimerFields>),
    #[serde(rename = "sendMessage")]
    SendMessage(NodeBase<SendMessageFields>),
    #[serde(rename = "followUser")]
    FollowUser(NodeBase<FollowUserFields>),
    #[serde(untagged)]
    Unknown(UnknownNode),
}

impl WorkflowNode {
    /// A node of `node_type` with the default label and blank fields.
    pub fn new(node_type: NodeType, id: impl Into<String>, position: Position) -> Self {
        Self::with_fields(
            id,
            position,
            node_type.default_label(),
            NodeFields::default_for(node_type),
        )
    }

    pub fn with_fields(
        id: impl Into<String>,
        position: Position,
        label: &str,
        fields: NodeFields,
    ) -> Self {
        let id = id.into();
        match fields {
            NodeFields::StartTrigger(f) => {
                WorkflowNode::StartTrigger(NodeBase::build(id, position, label, f))
            }
            NodeFields::Condition(f) => {
                WorkflowNode::Condition(NodeBase::build(id, position, label, f))
            }
            NodeFields::WaitTimer(f) => {
                WorkflowNode::WaitTimer(NodeBase::build(id, position, label, f))
            }
            NodeFields::SendMessage(f) => {
                WorkflowNode::SendMessage(NodeBase::build(id, position, label, f))
            }
            NodeFields::FollowUser(f) => {
                WorkflowNode::FollowUser(NodeBase::build(id, position, label, f))
            }
        }
    }

    pub fn id(&self) -> &str {
        match self {
            WorkflowNode::StartTrigger(n) => &n.id,
            WorkflowNode::Condition(n) => &n.id,
            WorkflowNode::WaitTimer(n) => &n.id,
            WorkflowNode::SendMessage(n) => &n.id,
            WorkflowNode::FollowUser(n) => &n.id,
            WorkflowNode::Unknown(n) => &n.id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            WorkflowNode::StartTrigger(n) => &n.data.label,
            WorkflowNode::Condition(n) => &n.data.label,
            WorkflowNode::WaitTimer(n) => &n.data.label,
            WorkflowNode::SendMessage(n) => &n.data.label,
            WorkflowNode::FollowUser(n) => &n.data.label,
            WorkflowNode::Unknown(n) => &n.data.label,
        }
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        let label = label.into();
        match self {
            WorkflowNode::StartTrigger(n) => n.data.label = label,
            WorkflowNode::Condition(n) => n.data.label = label,
            WorkflowNode::WaitTimer(n) => n.data.label = label,
            WorkflowNode::SendMessage(n) => n.data.label = label,
            WorkflowNode::FollowUser(n) => n.data.label = label,
            WorkflowNode::Unknown(n) => n.data.label = label,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            WorkflowNode::StartTrigger(n) => n.position,
            WorkflowNode::Condition(n) => n.position,
            WorkflowNode::WaitTimer(n) => n.position,
            WorkflowNode::SendMessage(n) => n.position,
            WorkflowNode::FollowUser(n) => n.position,
            WorkflowNode::Unknown(n) => n.position,
        }
    }

    pub fn set_position(&mut self, position: Position) {
        match self {
            WorkflowNode::StartTrigger(n) => n.position = position,
            WorkflowNode::Condition(n) => n.position = position,
            WorkflowNode::WaitTimer(n) => n.position = position,
            WorkflowNode::SendMessage(n) => n.position = position,
            WorkflowNode::FollowUser(n) => n.position = position,
            WorkflowNode::Unknown(n) => n.position = position,
        }
    }

    /// `None` for a node with an unrecognised tag.
    pub fn node_type(&self) -> Option<NodeType> {
        match self {
            WorkflowNode::StartTrigger(_) => Some(NodeType::StartTrigger),
            WorkflowNode::Condition(_) => Some(NodeType::Condition),
            WorkflowNode::WaitTimer(_) => Some(NodeType::WaitTimer),
            WorkflowNode::SendMessage(_) => Some(NodeType::SendMessage),
            WorkflowNode::FollowUser(_) => Some(NodeType::FollowUser),
            WorkflowNode::Unknown(_) => None,
        }
    }

    /// The `type` tag as it appears in the document.
    pub fn type_tag(&self) -> &str {
        match self {
            WorkflowNode::Unknown(n) => &n.node_type,
            known => known.node_type().map_or("", |t| t.as_str()),
        }
    }

    pub fn is_start_trigger(&self) -> bool {
        matches!(self, WorkflowNode::StartTrigger(_))
    }

    pub fn fields(&self) -> Option<NodeFields> {
        let fields = match self {
            WorkflowNode::StartTrigger(n) => NodeFields::StartTrigger(n.data.fields.clone()),
            WorkflowNode::Condition(n) => NodeFields::Condition(n.data.fields.clone()),
            WorkflowNode::WaitTimer(n) => NodeFields::WaitTimer(n.data.fields.clone()),
            WorkflowNode::SendMessage(n) => NodeFields::SendMessage(n.data.fields.clone()),
            WorkflowNode::FollowUser(n) => NodeFields::FollowUser(n.data.fields.clone()),
            WorkflowNode::Unknown(_) => return None,
        };
        Some(fields)
    }

    /// Replace this node's fields. The payload kind must match the node kind.
    pub fn set_fields(&mut self, fields: NodeFields) -> Result<()> {
        match (&mut *self, fields) {
            (WorkflowNode::StartTrigger(n), NodeFields::StartTrigger(f)) => n.data.fields = f,
            (WorkflowNode::Condition(n), NodeFields::Condition(f)) => n.data.fields = f,
            (WorkflowNode::WaitTimer(n), NodeFields::WaitTimer(f)) => n.data.fields = f,
            (WorkflowNode::SendMessage(n), NodeFields::SendMessage(f)) => n.data.fields = f,
            (WorkflowNode::FollowUser(n), NodeFields::FollowUser(f)) => n.data.fields = f,
            (node, fields) => {
                return Err(WorkflowError::NodeKindMismatch {
                    node_id: node.id().to_string(),
                    expected: node.type_tag().to_string(),
                    found: fields.node_type().as_str(),
                });
            }
        }
        Ok(())
    }
}
