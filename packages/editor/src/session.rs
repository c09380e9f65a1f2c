//! # Edit Session Management
//!
//! An [`EditSession`] is one client's view of a shared document: the local
//! document plus the commands it has executed optimistically and not yet
//! had acknowledged by the server.

use crate::commands::Command;
use crate::ApiDocument;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Command waiting for server acknowledgment
#[derive(Debug, Clone)]
pub struct PendingCommand {
    /// Unique command ID within the session
    pub id: String,

    /// The command as it was submitted
    pub command: Command,

    /// Milliseconds since the Unix epoch
    pub timestamp: u64,
}

/// Single edit session (one client in a multi-user edit)
pub struct EditSession {
    /// Unique session identifier
    pub id: String,

    /// Document being edited
    pub document: ApiDocument,

    /// Node paths currently selected in the UI, in their string form
    pub selected_nodes: Vec<String>,

    pending: Vec<PendingCommand>,
    next_sequence: u64,
}

impl EditSession {
    pub fn new(id: impl Into<String>, document: ApiDocument) -> Self {
        Self {
            id: id.into(),
            document,
            selected_nodes: Vec::new(),
            pending: Vec::new(),
            next_sequence: 0,
        }
    }

    /// Execute a command locally right away and queue it for the server.
    /// Returns the id the server will acknowledge or reject.
    pub fn execute_local(&mut self, command: Command) -> String {
        let id = format!("{}-{}", self.id, self.next_sequence);
        self.next_sequence += 1;

        self.pending.push(PendingCommand {
            id: id.clone(),
            command: command.clone(),
            timestamp: current_timestamp(),
        });
        self.document.execute(command);
        id
    }

    /// The server accepted a command; it stays applied and in the undo history
    pub fn acknowledge(&mut self, command_id: &str) -> bool {
        let before = self.pending.len();
        self.pending.retain(|pending| pending.id != command_id);
        self.pending.len() != before
    }

    /// The server refused a command: rewind the local commands executed
    /// since, undo the refused one, and replay the rest.
    ///
    /// Returns false when the id is unknown or the local undo history no
    /// longer reaches back to the refused command; the pending entry is
    /// dropped either way.
    pub fn reject(&mut self, command_id: &str) -> bool {
        let Some(index) = self.pending.iter().position(|p| p.id == command_id) else {
            return false;
        };
        let rejected = self.pending.remove(index);
        let later: Vec<Command> = self.pending[index..]
            .iter()
            .map(|pending| pending.command.clone())
            .collect();

        let rewind = later.len() + 1;
        if self.document.history().undo_levels() < rewind {
            debug!(id = %rejected.id, "history too short to rewind rejected command");
            return false;
        }

        for _ in 0..rewind {
            self.document.undo();
        }
        self.document.history_mut().clear_redo();
        for command in later {
            self.document.execute(command);
        }
        debug!(id = %rejected.id, replayed = rewind - 1, "rejected command undone");
        true
    }

    /// Apply a collaborator's command. It is not recorded in the local undo
    /// history.
    pub fn apply_remote(&mut self, command: Command) -> u64 {
        self.document.apply_untracked(command)
    }

    pub fn set_selection(&mut self, node_paths: Vec<String>) {
        self.selected_nodes = node_paths;
    }

    pub fn pending(&self) -> &[PendingCommand] {
        &self.pending
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{AddChild, ChangeProperty};
    use apistudio_model::{Document, NodePath, PathItem, SourceFormat, Tag};
    use std::path::PathBuf;

    fn session() -> EditSession {
        let doc = ApiDocument::from_document(
            PathBuf::from("api.json"),
            Document::swagger2("Pets", "1.0"),
            SourceFormat::Json,
        );
        EditSession::new("client-1", doc)
    }

    #[test]
    fn test_session_creation() {
        let session = session();
        assert_eq!(session.id, "client-1");
        assert_eq!(session.pending_count(), 0);
        assert!(session.selected_nodes.is_empty());
    }

    #[test]
    fn test_local_commands_are_pending_until_acknowledged() {
        let mut session = session();
        let first = session.execute_local(AddChild::tag(Tag::new("pets")).into());
        let second = session.execute_local(AddChild::tag(Tag::new("owners")).into());
        assert_eq!(first, "client-1-0");
        assert_eq!(second, "client-1-1");
        assert_eq!(session.pending_count(), 2);

        assert!(session.acknowledge(&first));
        assert!(!session.acknowledge(&first));
        assert_eq!(session.pending_count(), 1);
        assert_eq!(session.document.document().tags.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn test_reject_undoes_only_the_rejected_command() {
        let mut session = session();
        let path_id =
            session.execute_local(AddChild::path_item("/pets", PathItem::default()).into());
        session.execute_local(
            ChangeProperty::set(NodePath::root().property("info"), "title", "Animals").into(),
        );

        assert!(session.reject(&path_id));
        let doc = session.document.document();
        assert!(doc.paths.is_none());
        assert_eq!(doc.info.as_ref().unwrap().title.as_deref(), Some("Animals"));
        assert_eq!(session.pending_count(), 1);
        assert_eq!(session.document.history().undo_levels(), 1);
        assert!(!session.document.history().can_redo());
    }

    #[test]
    fn test_reject_unknown_id() {
        let mut session = session();
        assert!(!session.reject("client-1-9"));
    }

    #[test]
    fn test_remote_commands_skip_local_history() {
        let mut session = session();
        session.apply_remote(AddChild::tag(Tag::new("remote")).into());
        assert_eq!(session.pending_count(), 0);
        assert!(session.document.history().is_empty());
        assert!(session.document.document().tags.is_some());
    }
}
