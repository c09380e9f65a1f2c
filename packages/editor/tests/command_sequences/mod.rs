//! Long command sequences: every prefix undoes back to where it started and
//! redo lands on the same document as the original execution.

use apistudio_editor::{
    AddChild, Aggregate, ChangeProperty, ChangeType, Command, CommandManager, DeleteNode, Rename,
    ReplaceNode,
};
use apistudio_model::{
    Document, HttpMethod, Node, NodePath, Operation, Parameter, ParameterLocation, PathItem,
    Response, Schema, SecurityScheme, SimplifiedType, SpecVersion, Tag,
};
use serde_json::json;

fn script(version: SpecVersion) -> Vec<Command> {
    let op = NodePath::operation("/pets/{id}", HttpMethod::Get);
    vec![
        AddChild::path_item("/pets/{id}", PathItem::default()).into(),
        AddChild::operation("/pets/{id}", HttpMethod::Get, Operation::default()).into(),
        AddChild::parameter(op.clone(), Parameter::new("id", ParameterLocation::Path)).into(),
        AddChild::response(op.clone(), "200", Response::new("OK")).into(),
        AddChild::schema_definition(version, "Pet", Schema::object()).into(),
        AddChild::tag(Tag::new("pets")).into(),
        AddChild::security_scheme(
            version,
            "key",
            SecurityScheme {
                type_: Some("apiKey".to_string()),
                ..Default::default()
            },
        )
        .into(),
        ChangeProperty::set(op.clone(), "operationId", "getPet").into(),
        ChangeProperty::set(op.clone(), "x-internal", json!(null)).into(),
        ChangeType::new(
            op.property("parameters").index(0),
            SimplifiedType::simple("integer", Some("int64")),
        )
        .into(),
        Rename::new(NodePath::schema_definition(version, "Pet"), "Animal").into(),
        Aggregate::new(
            Some("Describe".to_string()),
            vec![
                ChangeProperty::set(NodePath::root().property("info"), "description", "All pets")
                    .into(),
                ChangeProperty::remove(NodePath::root().property("info"), "version").into(),
            ],
        )
        .into(),
        ReplaceNode::new(
            NodePath::tags().index(0),
            Node::Tag(Tag::new("animals")),
        )
        .into(),
        DeleteNode::new(NodePath::path_item("/pets/{id}")).into(),
    ]
}

fn run(mut doc: Document) {
    let version = doc.spec_version();
    let mut manager = CommandManager::new();
    let mut snapshots = vec![doc.clone()];

    for command in script(version) {
        manager.execute_command(command, &mut doc);
        snapshots.push(doc.clone());
    }
    let executed = doc.clone();

    // Undo one step at a time back to the start
    for expected in snapshots.iter().rev().skip(1) {
        assert!(manager.undo_last_command(&mut doc));
        assert_eq!(&doc, expected);
    }
    assert!(manager.is_empty());
    assert!(!manager.undo_last_command(&mut doc));

    while manager.redo_last_command(&mut doc) {}
    assert_eq!(doc, executed);
}

#[test]
fn test_swagger2_sequence_undoes_and_redoes() {
    run(Document::swagger2("Pets", "1.0"));
}

#[test]
fn test_openapi3_sequence_undoes_and_redoes() {
    run(Document::openapi3("Pets", "1.0"));
}

#[test]
fn test_sequence_against_empty_document_is_safe() {
    // Nothing resolves until the script creates it; no step may panic
    run(Document::default());
}
