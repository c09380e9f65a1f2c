use crate::command_trait::CommandOp;
use apistudio_model::{
    Document, HttpMethod, Node, NodeKind, NodePath, NodeRef, Operation, Parameter, PathItem,
    Response, Schema, SecurityScheme, Segment, SpecVersion, Tag,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Add a named child under `parent`.
///
/// The parent decides how `name` is used: a map stores the node under that
/// key, a list (tags, parameters) appends it and uses the name only to
/// detect duplicates, and any other node takes it as a property slot
/// (`get`, `post`, ... on a path item).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddChild {
    pub parent: NodePath,
    pub name: String,
    pub node: Node,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    existed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_container: Option<NodePath>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    added_at: Option<NodePath>,
}

impl AddChild {
    pub fn new(parent: NodePath, name: impl Into<String>, node: Node) -> Self {
        Self {
            parent,
            name: name.into(),
            node,
            existed: false,
            created_container: None,
            added_at: None,
        }
    }

    pub fn path_item(path: &str, item: PathItem) -> Self {
        Self::new(NodePath::paths(), path, Node::PathItem(item))
    }

    pub fn operation(path: &str, method: HttpMethod, operation: Operation) -> Self {
        Self::new(
            NodePath::path_item(path),
            method.as_str(),
            Node::Operation(operation),
        )
    }

    pub fn schema_definition(version: SpecVersion, name: &str, schema: Schema) -> Self {
        Self::new(
            NodePath::schema_definitions(version),
            name,
            Node::Schema(schema),
        )
    }

    /// Add a parameter to a path item or operation
    pub fn parameter(owner: NodePath, parameter: Parameter) -> Self {
        let name = parameter.name.clone().unwrap_or_default();
        Self::new(owner.property("parameters"), name, Node::Parameter(parameter))
    }

    pub fn response(operation: NodePath, code: &str, response: Response) -> Self {
        Self::new(operation.property("responses"), code, Node::Response(response))
    }

    pub fn tag(tag: Tag) -> Self {
        let name = tag.name.clone();
        Self::new(NodePath::tags(), name, Node::Tag(tag))
    }

    pub fn security_scheme(version: SpecVersion, name: &str, scheme: SecurityScheme) -> Self {
        Self::new(
            NodePath::security_schemes(version),
            name,
            Node::SecurityScheme(scheme),
        )
    }

    /// Whether `parent` already holds a child with this name
    fn exists(&self, doc: &Document) -> bool {
        let Some(parent) = doc.resolve(&self.parent) else {
            return false;
        };
        match (parent, &self.node) {
            (NodeRef::Tags(tags), Node::Tag(tag)) => tags.iter().any(|t| t.name == tag.name),
            (NodeRef::Parameters(params), Node::Parameter(param)) => params
                .iter()
                .any(|p| p.matches(&self.name, param.in_)),
            (NodeRef::Tags(_) | NodeRef::Parameters(_), _) => false,
            (parent, _) => parent.child(&self.child_segment(parent.kind())).is_some(),
        }
    }

    fn child_segment(&self, parent: NodeKind) -> Segment {
        if parent.is_collection() {
            Segment::key(self.name.as_str())
        } else {
            Segment::property(self.name.as_str())
        }
    }

    fn target(&self, doc: &Document) -> Option<NodePath> {
        match doc.resolve(&self.parent)? {
            NodeRef::Tags(list) => Some(self.parent.index(list.len())),
            NodeRef::Parameters(list) => Some(self.parent.index(list.len())),
            parent => Some(self.parent.join(self.child_segment(parent.kind()))),
        }
    }
}

impl CommandOp for AddChild {
    fn execute(&mut self, doc: &mut Document) {
        self.existed = false;
        self.created_container = None;
        self.added_at = None;

        if self.exists(doc) {
            debug!(parent = %self.parent, name = %self.name, "child already exists");
            self.existed = true;
            return;
        }

        let Some(created) = doc.ensure_containers(&self.parent) else {
            debug!(parent = %self.parent, "parent does not resolve");
            return;
        };
        let Some(target) = self.target(doc) else {
            return;
        };

        match doc.attach(&target, self.node.clone(), None) {
            Ok(()) => {
                self.created_container = created;
                self.added_at = Some(target);
            }
            Err(node) => {
                debug!(path = %target, kind = ?node.kind(), "node does not fit its parent");
                if let Some(created) = created {
                    doc.detach(&created);
                }
            }
        }
    }

    fn undo(&mut self, doc: &mut Document) {
        if std::mem::take(&mut self.existed) {
            return;
        }
        let removed = match (self.created_container.take(), self.added_at.take()) {
            (Some(container), _) => doc.detach(&container),
            (None, Some(added)) => doc.detach(&added),
            (None, None) => return,
        };
        if removed.is_none() {
            debug!(parent = %self.parent, name = %self.name, "added node vanished before undo");
        }
    }

    fn name(&self) -> &'static str {
        "add_child"
    }
}
