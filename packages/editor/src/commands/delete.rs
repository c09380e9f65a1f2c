use crate::command_trait::CommandOp;
use apistudio_model::{Detached, Document, NodePath};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Remove the node at `path` from its parent collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteNode {
    pub path: NodePath,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    removed: Option<Detached>,
}

impl DeleteNode {
    pub fn new(path: NodePath) -> Self {
        Self {
            path,
            removed: None,
        }
    }
}

impl CommandOp for DeleteNode {
    fn execute(&mut self, doc: &mut Document) {
        if self.path.is_root() {
            debug!("refusing to delete the document root");
            self.removed = None;
            return;
        }
        self.removed = doc.detach(&self.path);
        if self.removed.is_none() {
            debug!(path = %self.path, "nothing to delete");
        }
    }

    fn undo(&mut self, doc: &mut Document) {
        let Some(removed) = self.removed.take() else {
            return;
        };
        if let Err(node) = doc.attach(&self.path, removed.node, Some(removed.position)) {
            debug!(path = %self.path, kind = ?node.kind(), "could not restore deleted node");
        }
    }

    fn name(&self) -> &'static str {
        "delete_node"
    }
}
