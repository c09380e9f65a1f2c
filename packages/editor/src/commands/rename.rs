use crate::command_trait::CommandOp;
use apistudio_common::{traverse, walk_schema, Visitor};
use apistudio_model::{Document, NodeMut, NodePath, NodeRef, Schema, Segment};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Collects the paths of every schema whose `$ref` equals `target`
struct RefCollector<'a> {
    target: &'a str,
    found: Vec<NodePath>,
}

impl Visitor for RefCollector<'_> {
    fn visit_schema(&mut self, path: &NodePath, schema: &Schema) {
        if schema.reference.as_deref() == Some(self.target) {
            self.found.push(path.clone());
        }
        walk_schema(self, path, schema);
    }
}

fn set_reference(doc: &mut Document, path: &NodePath, reference: &str) -> bool {
    match doc.resolve_mut(path) {
        Some(NodeMut::Schema(schema)) => {
            schema.reference = Some(reference.to_string());
            true
        }
        _ => false,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Renamed {
    position: usize,
    rewritten_refs: Vec<NodePath>,
}

/// Re-key a keyed entry (path item, schema definition, ...) in place.
/// Renaming a schema definition also rewrites every `$ref` to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rename {
    pub path: NodePath,
    pub new_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    renamed: Option<Renamed>,
}

impl Rename {
    pub fn new(path: NodePath, new_name: impl Into<String>) -> Self {
        Self {
            path,
            new_name: new_name.into(),
            renamed: None,
        }
    }

    fn new_path(&self) -> Option<NodePath> {
        match self.path.last()? {
            Segment::Key(old) if *old != self.new_name => self.path.with_last_key(&self.new_name),
            _ => None,
        }
    }

    fn is_schema_definition(&self, doc: &Document) -> bool {
        self.path.parent() == Some(NodePath::schema_definitions(doc.spec_version()))
    }
}

impl CommandOp for Rename {
    fn execute(&mut self, doc: &mut Document) {
        self.renamed = None;
        let Some(new_path) = self.new_path() else {
            debug!(path = %self.path, "not a renamable entry");
            return;
        };
        let keyed_parent = self
            .path
            .parent()
            .and_then(|parent| doc.resolve(&parent))
            .map(|parent| !matches!(parent, NodeRef::Tags(_) | NodeRef::Parameters(_)))
            .unwrap_or(false);
        if !keyed_parent || doc.resolve(&new_path).is_some() {
            debug!(from = %self.path, to = %new_path, "rename target is taken or not keyed");
            return;
        }
        let Some(detached) = doc.detach(&self.path) else {
            debug!(path = %self.path, "nothing to rename");
            return;
        };
        let position = detached.position;
        if let Err(node) = doc.attach(&new_path, detached.node, Some(position)) {
            let _ = doc.attach(&self.path, node, Some(position));
            return;
        }

        let mut rewritten_refs = Vec::new();
        if self.is_schema_definition(doc) {
            let old_reference = self.path.to_reference();
            let new_reference = new_path.to_reference();
            let mut collector = RefCollector {
                target: &old_reference,
                found: Vec::new(),
            };
            traverse(doc, &mut collector);
            for path in collector.found {
                if set_reference(doc, &path, &new_reference) {
                    rewritten_refs.push(path);
                }
            }
            debug!(count = rewritten_refs.len(), "rewrote schema references");
        }

        self.renamed = Some(Renamed {
            position,
            rewritten_refs,
        });
    }

    fn undo(&mut self, doc: &mut Document) {
        let (Some(renamed), Some(new_path)) = (self.renamed.take(), self.new_path()) else {
            return;
        };

        let old_reference = self.path.to_reference();
        for path in &renamed.rewritten_refs {
            if !set_reference(doc, path, &old_reference) {
                debug!(path = %path, "rewritten reference vanished before undo");
            }
        }

        let Some(detached) = doc.detach(&new_path) else {
            debug!(path = %new_path, "renamed entry vanished before undo");
            return;
        };
        if let Err(node) = doc.attach(&self.path, detached.node, Some(renamed.position)) {
            debug!(path = %self.path, kind = ?node.kind(), "could not restore original name");
        }
    }

    fn name(&self) -> &'static str {
        "rename"
    }
}
