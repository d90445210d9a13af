use workflow_core::model::*;

// =============================================================================
// Node builders
// =============================================================================

pub fn start(id: &str, label: &str) -> WorkflowNode {
    WorkflowNode::with_fields(
        id,
        Position::default(),
        label,
        NodeFields::StartTrigger(StartTriggerFields::default()),
    )
}

pub fn send_message(id: &str, label: &str, username: &str, message: &str) -> WorkflowNode {
    WorkflowNode::with_fields(
        id,
        Position::default(),
        label,
        NodeFields::SendMessage(SendMessageFields {
            username: username.into(),
            message: message.into(),
        }),
    )
}

pub fn condition(id: &str, label: &str, condition_type: &str) -> WorkflowNode {
    WorkflowNode::with_fields(
        id,
        Position::default(),
        label,
        NodeFields::Condition(ConditionFields {
            condition_type: condition_type.into(),
            condition_value: String::new(),
        }),
    )
}

pub fn wait_timer(id: &str, label: &str, hours: u32, minutes: u32) -> WorkflowNode {
    WorkflowNode::with_fields(
        id,
        Position::default(),
        label,
        NodeFields::WaitTimer(WaitTimerFields { hours, minutes }),
    )
}

pub fn follow_user(id: &str, label: &str, username: &str) -> WorkflowNode {
    WorkflowNode::with_fields(
        id,
        Position::default(),
        label,
        NodeFields::FollowUser(FollowUserFields {
            username: username.into(),
        }),
    )
}

// =============================================================================
// Edge builders
// =============================================================================

pub fn edge(source: &str, target: &str) -> WorkflowEdge {
    WorkflowEdge::new(format!("e-{source}-{target}"), source, target)
}

/// Edges chaining the given node ids in order.
pub fn chain(ids: &[&str]) -> Vec<WorkflowEdge> {
    ids.windows(2).map(|w| edge(w[0], w[1])).collect()
}

/// A fully valid five-step workflow covering every node type.
pub fn valid_workflow() -> (Vec<WorkflowNode>, Vec<WorkflowEdge>) {
    let nodes = vec![
        start("s", "Start"),
        condition("c", "Follows me?", "user_follows"),
        wait_timer("w", "Wait a day", 24, 0),
        send_message("m", "Say hi", "@alice", "Thanks for the follow!"),
        follow_user("f", "Follow back", "@alice"),
    ];
    let edges = chain(&["s", "c", "w", "m", "f"]);
    (nodes, edges)
}
