//! Integration tests for the authoring session: gated edge insertion,
//! node edits, save and export preconditions.

use chrono::{TimeZone, Utc};
use workflow_core::editor::WorkflowEditor;
use workflow_core::library::{KeyValueStore, MemoryStore, WorkflowLibrary};
use workflow_core::model::{FollowUserFields, NodeFields, NodeType, Position};
use workflow_core::{Result, WorkflowError};

/// Store whose writes always fail, as a full browser quota would.
struct FullStore;

impl KeyValueStore for FullStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&mut self, _key: &str, _value: String) -> Result<()> {
        Err(WorkflowError::Storage("quota exceeded".into()))
    }
}

fn library() -> WorkflowLibrary<MemoryStore> {
    WorkflowLibrary::new(MemoryStore::new())
}

fn follow(username: &str) -> NodeFields {
    NodeFields::FollowUser(FollowUserFields {
        username: username.into(),
    })
}

/// Session with start → follow-user, ready to save.
fn connected_editor() -> (WorkflowEditor, String) {
    let mut editor = WorkflowEditor::new();
    let follow_id = editor
        .add_node(NodeType::FollowUser, Position::new(250.0, 200.0))
        .expect("add follow node")
        .id()
        .to_string();
    editor.update_node_data(&follow_id, follow("@carol")).unwrap();
    editor.connect("start-1", &follow_id).expect("connect");
    (editor, follow_id)
}

#[test]
fn new_session_has_only_the_start_node() {
    let editor = WorkflowEditor::new();
    assert_eq!(editor.nodes().len(), 1);
    assert_eq!(editor.nodes()[0].id(), "start-1");
    assert_eq!(editor.nodes()[0].label(), "Start Trigger");
    assert!(editor.edges().is_empty());
    assert!(editor.validate().is_valid);
}

#[test]
fn second_start_trigger_is_refused() {
    let mut editor = WorkflowEditor::new();
    let err = editor
        .add_node(NodeType::StartTrigger, Position::default())
        .unwrap_err();
    assert!(matches!(err, WorkflowError::DuplicateStartTrigger));
    assert_eq!(err.to_string(), "Only one Start Trigger is allowed per workflow");
    assert_eq!(editor.nodes().len(), 1);
}

#[test]
fn new_nodes_get_unique_ids_and_defaults() {
    let mut editor = WorkflowEditor::new();
    let a = editor
        .add_node(NodeType::SendMessage, Position::default())
        .unwrap()
        .id()
        .to_string();
    let b = editor
        .add_node(NodeType::SendMessage, Position::default())
        .unwrap()
        .id()
        .to_string();
    assert_ne!(a, b);
    assert_eq!(editor.node(&a).map(|n| n.label()), Some("Send Message"));
}

#[test]
fn add_and_connect_return_the_new_entries() {
    let mut editor = WorkflowEditor::new();
    let added = editor
        .add_node(NodeType::WaitTimer, Position::new(10.0, 20.0))
        .unwrap()
        .clone();
    assert_eq!(editor.nodes().last(), Some(&added));
    assert_eq!(added.position(), Position::new(10.0, 20.0));

    let edge = editor.connect("start-1", added.id()).unwrap().clone();
    assert_eq!(edge.id, format!("xy-edge__start-1-{}", added.id()));
    assert_eq!(editor.edges().last(), Some(&edge));
}

#[test]
fn accepted_connection_is_animated() {
    let (editor, follow_id) = connected_editor();
    assert_eq!(editor.edges().len(), 1);
    let edge = &editor.edges()[0];
    assert_eq!(edge.source, "start-1");
    assert_eq!(edge.target, follow_id);
    assert!(edge.animated);
}

#[test]
fn rejected_connection_is_discarded_with_all_messages() {
    let (mut editor, follow_id) = connected_editor();
    let wait_id = editor
        .add_node(NodeType::WaitTimer, Position::default())
        .unwrap()
        .id()
        .to_string();

    let err = editor.connect(&follow_id, "start-1").unwrap_err();
    assert_eq!(err.messages(), vec!["This connection would create a loop"]);

    let err = editor.connect("start-1", &follow_id).unwrap_err();
    assert_eq!(
        err.messages(),
        vec![
            "Each node can only have one outgoing connection",
            "Each node can only have one incoming connection",
        ]
    );

    assert!(editor.connect(&follow_id, &wait_id).is_ok());
    assert_eq!(editor.edges().len(), 2);
}

#[test]
fn update_with_wrong_kind_is_refused() {
    let mut editor = WorkflowEditor::new();
    let err = editor.update_node_data("start-1", follow("@x")).unwrap_err();
    assert!(matches!(err, WorkflowError::NodeKindMismatch { .. }));
}

#[test]
fn unknown_node_is_reported() {
    let mut editor = WorkflowEditor::new();
    assert!(matches!(
        editor.move_node("nope", Position::default()),
        Err(WorkflowError::NodeNotFound(_))
    ));
}

#[test]
fn deleting_a_node_drops_its_edges() {
    let (mut editor, follow_id) = connected_editor();
    let removed = editor.delete_node(&follow_id).unwrap();
    assert_eq!(removed.id(), follow_id);
    assert!(editor.edges().is_empty());
    assert_eq!(editor.nodes().len(), 1);
}

#[test]
fn save_is_blocked_while_invalid() {
    let mut editor = WorkflowEditor::new();
    editor
        .add_node(NodeType::FollowUser, Position::default())
        .unwrap();
    let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
    let mut library = library();
    let err = editor.save_into(&mut library, "My flow", now).unwrap_err();
    match err {
        WorkflowError::InvalidWorkflow(errors) => {
            assert!(errors.iter().any(|e| e.starts_with("Isolated nodes found")));
            assert!(errors.contains(&"Username is required for Follow User node".to_string()));
        }
        other => panic!("expected InvalidWorkflow, got {other:?}"),
    }
    assert!(editor.current_workflow().is_none());
    assert!(library.list().is_empty());
}

#[test]
fn save_requires_a_name() {
    let (mut editor, _) = connected_editor();
    let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
    assert!(matches!(
        editor.save_into(&mut library(), "   ", now),
        Err(WorkflowError::EmptyName)
    ));
    assert!(editor.current_workflow().is_none());
}

#[test]
fn failed_write_leaves_session_unsaved() {
    let (mut editor, _) = connected_editor();
    let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
    let mut full = WorkflowLibrary::new(FullStore);

    let err = editor.save_into(&mut full, "Flow", now).unwrap_err();
    assert!(matches!(err, WorkflowError::Storage(_)));
    assert!(editor.current_workflow().is_none());

    // A later successful save is a fresh insert, not an update of a phantom.
    let mut library = library();
    let saved = editor.save_into(&mut library, "Flow", now).unwrap();
    assert_eq!(saved.created_at, now);
    assert_eq!(library.list().len(), 1);
}

#[test]
fn prepare_save_does_not_touch_the_session() {
    let (editor, _) = connected_editor();
    let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
    let record = editor.prepare_save("Flow", now).unwrap();
    assert_eq!(record.name, "Flow");
    assert!(editor.current_workflow().is_none());
}

#[test]
fn resaving_keeps_id_and_creation_time() {
    let (mut editor, _) = connected_editor();
    let first = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
    let second = Utc.with_ymd_and_hms(2025, 3, 2, 9, 30, 0).unwrap();

    let mut library = library();

    let saved = editor.save_into(&mut library, "  Follow back  ", first).unwrap();
    assert_eq!(saved.name, "Follow back");
    assert_eq!(saved.created_at, first);

    let updated = editor.save_into(&mut library, "Follow back v2", second).unwrap();
    assert_eq!(updated.id, saved.id);
    assert_eq!(updated.created_at, first);
    assert_eq!(updated.updated_at, second);

    let stored = library.list();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].name, "Follow back v2");
}

#[test]
fn export_uses_fallback_name_until_saved() {
    let (mut editor, _) = connected_editor();
    let doc = editor.prepare_export().unwrap();
    assert_eq!(doc.name, "Exported Workflow");
    assert_eq!(doc.file_name(), "Exported_Workflow.json");

    let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
    editor.save_into(&mut library(), "Welcome flow", now).unwrap();
    let doc = editor.prepare_export().unwrap();
    assert_eq!(doc.name, "Welcome flow");
    assert_eq!(doc.nodes.len(), 2);

    let json = doc.to_json_pretty().unwrap();
    assert!(json.contains("\n  \"name\": \"Welcome flow\""));
    assert!(!json.contains("createdAt"));
}

#[test]
fn clear_and_load() {
    let (mut editor, _) = connected_editor();
    let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
    let saved = editor.save_into(&mut library(), "Flow", now).unwrap();

    editor.clear();
    assert_eq!(editor.nodes().len(), 1);
    assert!(editor.edges().is_empty());
    assert!(editor.current_workflow().is_none());

    editor.load(saved.clone());
    assert_eq!(editor.nodes().len(), 2);
    assert_eq!(editor.current_workflow().map(|w| w.id.as_str()), Some(saved.id.as_str()));

    editor.forget_workflow(&saved.id);
    assert!(editor.current_workflow().is_none());
}
