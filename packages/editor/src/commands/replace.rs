use crate::command_trait::CommandOp;
use apistudio_model::{Detached, Document, Node, NodePath};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Swap the node at `path` for a new one, keeping its key and position.
/// The root path replaces the whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplaceNode {
    pub path: NodePath,
    pub node: Node,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    replaced: Option<Detached>,
}

impl ReplaceNode {
    pub fn new(path: NodePath, node: Node) -> Self {
        Self {
            path,
            node,
            replaced: None,
        }
    }
}

impl CommandOp for ReplaceNode {
    fn execute(&mut self, doc: &mut Document) {
        self.replaced = None;
        let Some(old) = doc.detach(&self.path) else {
            debug!(path = %self.path, "nothing to replace");
            return;
        };

        match doc.attach(&self.path, self.node.clone(), Some(old.position)) {
            Ok(()) => self.replaced = Some(old),
            Err(rejected) => {
                debug!(
                    path = %self.path,
                    expected = ?old.node.kind(),
                    found = ?rejected.kind(),
                    "replacement does not fit, keeping the original"
                );
                let _ = doc.attach(&self.path, old.node, Some(old.position));
            }
        }
    }

    fn undo(&mut self, doc: &mut Document) {
        let Some(old) = self.replaced.take() else {
            return;
        };
        if doc.detach(&self.path).is_none() {
            debug!(path = %self.path, "replacement vanished before undo");
            return;
        }
        if let Err(node) = doc.attach(&self.path, old.node, Some(old.position)) {
            debug!(path = %self.path, kind = ?node.kind(), "could not restore replaced node");
        }
    }

    fn name(&self) -> &'static str {
        "replace_node"
    }
}
