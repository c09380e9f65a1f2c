//! # Command Manager
//!
//! Tracks command history and enables undo/redo.
//!
//! ## Design
//!
//! - Commands capture whatever they need to undo themselves at execute time
//! - Undo moves the most recent command to the redo stack
//! - Redo re-executes it, capturing fresh state
//! - New commands clear the redo stack
//! - Groups bundle several commands into one [`Aggregate`] undo step
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut manager = CommandManager::new();
//! manager.execute_command(AddChild::tag(Tag::new("pets")).into(), &mut doc);
//! manager.undo_last_command(&mut doc);
//! manager.redo_last_command(&mut doc);
//! ```

use crate::command_trait::CommandOp;
use crate::commands::{Aggregate, Command};
use apistudio_model::Document;
use tracing::debug;

/// Undo/redo history for one document
#[derive(Debug, Default)]
pub struct CommandManager {
    /// Executed commands (most recent last)
    executed: Vec<Command>,

    /// Undone commands (most recent last)
    undone: Vec<Command>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    /// Currently building a group
    current_group: Option<Aggregate>,
}

impl CommandManager {
    /// Unbounded history
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            max_levels,
            ..Self::default()
        }
    }

    /// Execute a command and record it for undo
    pub fn execute_command(&mut self, mut command: Command, doc: &mut Document) {
        debug!(command = command.name(), "execute");
        command.execute(doc);
        self.undone.clear();

        match &mut self.current_group {
            Some(group) => group.commands.push(command),
            None => self.push_executed(command),
        }
    }

    /// Start bundling commands into a single undo step
    pub fn begin_group(&mut self, description: impl Into<String>) {
        self.end_group();
        self.current_group = Some(Aggregate::new(Some(description.into()), Vec::new()));
    }

    /// Close the current group; an empty group leaves no history entry
    pub fn end_group(&mut self) {
        if let Some(group) = self.current_group.take() {
            if !group.is_empty() {
                self.push_executed(group.into());
            }
        }
    }

    fn push_executed(&mut self, command: Command) {
        self.executed.push(command);

        if self.max_levels > 0 && self.executed.len() > self.max_levels {
            self.executed.remove(0);
        }
    }

    /// Undo the most recent command. Returns false when there is nothing to undo.
    pub fn undo_last_command(&mut self, doc: &mut Document) -> bool {
        self.end_group();
        match self.executed.pop() {
            Some(mut command) => {
                debug!(command = command.name(), "undo");
                command.undo(doc);
                self.undone.push(command);
                true
            }
            None => false,
        }
    }

    /// Redo the most recently undone command. Returns false when there is nothing to redo.
    pub fn redo_last_command(&mut self, doc: &mut Document) -> bool {
        self.end_group();
        match self.undone.pop() {
            Some(mut command) => {
                debug!(command = command.name(), "redo");
                command.execute(doc);
                self.executed.push(command);
                true
            }
            None => false,
        }
    }

    /// Open group holding at least one executed command
    fn pending_group(&self) -> Option<&Aggregate> {
        self.current_group.as_ref().filter(|group| !group.is_empty())
    }

    /// True when no executed command is on record, including in an open group
    pub fn is_empty(&self) -> bool {
        self.executed.is_empty() && self.pending_group().is_none()
    }

    pub fn can_undo(&self) -> bool {
        !self.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    /// An open group counts as the one step it will become
    pub fn undo_levels(&self) -> usize {
        self.executed.len() + usize::from(self.pending_group().is_some())
    }

    pub fn redo_levels(&self) -> usize {
        self.undone.len()
    }

    /// Drop all history without touching the document
    pub fn clear(&mut self) {
        self.executed.clear();
        self.undone.clear();
        self.current_group = None;
    }

    /// Forget undone commands so they can no longer be redone
    pub fn clear_redo(&mut self) {
        self.undone.clear();
    }

    pub fn undo_description(&self) -> Option<&str> {
        match self.pending_group() {
            Some(Aggregate {
                description: Some(description),
                ..
            }) => Some(description.as_str()),
            Some(_) => Some("aggregate"),
            None => self.executed.last().map(Command::description),
        }
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.undone.last().map(Command::description)
    }

    /// Executed commands, oldest first
    pub fn executed(&self) -> &[Command] {
        &self.executed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{AddChild, ChangeProperty, DeleteNode};
    use apistudio_model::{NodePath, PathItem, Tag};

    fn doc() -> Document {
        Document::swagger2("Pets", "1.0")
    }

    #[test]
    fn test_manager_creation() {
        let manager = CommandManager::new();
        assert!(manager.is_empty());
        assert_eq!(manager.undo_levels(), 0);
        assert_eq!(manager.redo_levels(), 0);
        assert!(!manager.can_undo());
        assert!(!manager.can_redo());
    }

    #[test]
    fn test_undo_and_redo_empty_are_false() {
        let mut doc = doc();
        let before = doc.clone();
        let mut manager = CommandManager::new();
        assert!(!manager.undo_last_command(&mut doc));
        assert!(!manager.redo_last_command(&mut doc));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_execute_undo_redo() {
        let mut doc = doc();
        let before = doc.clone();
        let mut manager = CommandManager::new();

        manager.execute_command(AddChild::tag(Tag::new("pets")).into(), &mut doc);
        let after = doc.clone();
        assert!(!manager.is_empty());

        assert!(manager.undo_last_command(&mut doc));
        assert_eq!(doc, before);
        assert!(manager.is_empty());
        assert_eq!(manager.redo_levels(), 1);

        assert!(manager.redo_last_command(&mut doc));
        assert_eq!(doc, after);
        assert_eq!(manager.undo_levels(), 1);
        assert_eq!(manager.redo_levels(), 0);
    }

    #[test]
    fn test_new_command_clears_redo() {
        let mut doc = doc();
        let mut manager = CommandManager::new();

        manager.execute_command(AddChild::tag(Tag::new("pets")).into(), &mut doc);
        manager.undo_last_command(&mut doc);
        assert!(manager.can_redo());

        manager.execute_command(AddChild::tag(Tag::new("owners")).into(), &mut doc);
        assert!(!manager.can_redo());
        assert_eq!(manager.redo_description(), None);
    }

    #[test]
    fn test_grouped_commands_undo_as_one_step() {
        let mut doc = doc();
        let before = doc.clone();
        let mut manager = CommandManager::new();

        manager.begin_group("Add pets path");
        manager.execute_command(AddChild::path_item("/pets", PathItem::default()).into(), &mut doc);
        manager.execute_command(
            ChangeProperty::set(NodePath::path_item("/pets"), "summary", "Pets").into(),
            &mut doc,
        );
        manager.end_group();

        assert_eq!(manager.undo_levels(), 1);
        assert_eq!(manager.undo_description(), Some("Add pets path"));

        manager.undo_last_command(&mut doc);
        assert_eq!(doc, before);
        assert_eq!(manager.redo_description(), Some("Add pets path"));
    }

    #[test]
    fn test_undo_closes_open_group() {
        let mut doc = doc();
        let before = doc.clone();
        let mut manager = CommandManager::new();

        manager.begin_group("Tags");
        manager.execute_command(AddChild::tag(Tag::new("a")).into(), &mut doc);
        manager.execute_command(AddChild::tag(Tag::new("b")).into(), &mut doc);
        assert!(manager.undo_last_command(&mut doc));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_open_group_counts_as_history() {
        let mut doc = doc();
        let before = doc.clone();
        let mut manager = CommandManager::new();

        manager.begin_group("edit");
        assert!(manager.is_empty());

        manager.execute_command(AddChild::path_item("/pets", PathItem::default()).into(), &mut doc);
        assert_ne!(doc, before);
        assert!(!manager.is_empty());
        assert!(manager.can_undo());
        assert_eq!(manager.undo_levels(), 1);
        assert_eq!(manager.undo_description(), Some("edit"));

        manager.end_group();
        assert_eq!(manager.undo_levels(), 1);
        assert!(!manager.is_empty());
    }

    #[test]
    fn test_empty_group_leaves_no_history() {
        let mut manager = CommandManager::new();
        manager.begin_group("Nothing");
        manager.end_group();
        assert!(manager.is_empty());
    }

    #[test]
    fn test_max_levels_enforced() {
        let mut doc = doc();
        let mut manager = CommandManager::with_max_levels(2);
        for name in ["a", "b", "c"] {
            manager.execute_command(AddChild::tag(Tag::new(name)).into(), &mut doc);
        }
        assert_eq!(manager.undo_levels(), 2);
        assert_eq!(manager.undo_description(), Some("add_child"));
    }

    #[test]
    fn test_missing_target_is_recorded_but_harmless() {
        let mut doc = doc();
        let before = doc.clone();
        let mut manager = CommandManager::new();
        manager.execute_command(DeleteNode::new(NodePath::path_item("/nope")).into(), &mut doc);
        assert_eq!(doc, before);
        assert!(manager.undo_last_command(&mut doc));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_clear_drops_history() {
        let mut doc = doc();
        let mut manager = CommandManager::new();
        manager.execute_command(AddChild::tag(Tag::new("a")).into(), &mut doc);
        manager.clear();
        assert!(manager.is_empty());
        assert!(!manager.can_redo());
    }
}
