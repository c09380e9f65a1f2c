//! Raw source editing of a single node.
//!
//! The text is reparsed on every change. Text that does not parse, or that
//! parses into something other than the node kind being edited, marks the
//! editor invalid and never reaches the command boundary.

use crate::commands::{Command, ReplaceNode};
use apistudio_model::{from_value, parse_value, Document, Node, NodeKind, NodePath, SourceFormat};
use serde_json::{json, Value};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct SourceEditor {
    path: NodePath,
    kind: NodeKind,
    format: SourceFormat,
    original: String,
    text: String,
    parsed: Option<Node>,
    valid: bool,
    dirty: bool,
}

impl SourceEditor {
    /// Start editing the node at `path`; `None` when nothing is there
    pub fn open(doc: &Document, path: NodePath, format: SourceFormat) -> Option<Self> {
        let node = doc.resolve(&path)?;
        let kind = node.kind();
        let mut tagged = serde_json::to_value(node.to_node()).ok()?;
        let value = tagged.get_mut("value").map(Value::take).unwrap_or(Value::Null);
        let original = render(&value, format)?;

        Some(Self {
            path,
            kind,
            format,
            text: original.clone(),
            original,
            parsed: None,
            valid: true,
            dirty: false,
        })
    }

    pub fn path(&self) -> &NodePath {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.dirty = self.text != self.original;
        self.parsed = if self.dirty { self.parse() } else { None };
        self.valid = !self.dirty || self.parsed.is_some();
    }

    fn parse(&self) -> Option<Node> {
        let value = parse_value(&self.text, self.format)
            .map_err(|e| debug!(path = %self.path, error = %e, "source does not parse"))
            .ok()?;
        let node = if self.kind == NodeKind::Document {
            from_value(value).map(Node::Document).ok()
        } else {
            serde_json::from_value(json!({ "kind": self.kind, "value": value })).ok()
        };
        if node.is_none() {
            debug!(path = %self.path, kind = ?self.kind, "source is not a valid node");
        }
        node
    }

    /// Replace command for the edited text; only when valid and changed
    pub fn to_command(&self) -> Option<Command> {
        if !(self.valid && self.dirty) {
            return None;
        }
        let node = self.parsed.clone()?;
        Some(ReplaceNode::new(self.path.clone(), node).into())
    }

    /// Drop edits and go back to the text the editor was opened with
    pub fn revert(&mut self) {
        self.text = self.original.clone();
        self.parsed = None;
        self.valid = true;
        self.dirty = false;
    }
}

fn render(value: &Value, format: SourceFormat) -> Option<String> {
    match format {
        SourceFormat::Json => serde_json::to_string_pretty(value).ok(),
        SourceFormat::Yaml => serde_norway::to_string(value).ok(),
    }
}
