use crate::command_trait::CommandOp;
use crate::commands::Command;
use apistudio_model::Document;
use serde::{Deserialize, Serialize};

/// Several commands executed and undone as one step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub commands: Vec<Command>,
}

impl Aggregate {
    pub fn new(description: Option<String>, commands: Vec<Command>) -> Self {
        Self {
            description,
            commands,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl CommandOp for Aggregate {
    fn execute(&mut self, doc: &mut Document) {
        for command in &mut self.commands {
            command.execute(doc);
        }
    }

    fn undo(&mut self, doc: &mut Document) {
        for command in self.commands.iter_mut().rev() {
            command.undo(doc);
        }
    }

    fn name(&self) -> &'static str {
        "aggregate"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{AddChild, ChangeProperty};
    use apistudio_model::{NodePath, PathItem};

    #[test]
    fn test_children_undo_in_reverse_order() {
        let mut doc = Document::swagger2("Pets", "1.0");
        let before = doc.clone();

        // The second command depends on the first having run
        let mut group = Aggregate::new(
            Some("Add documented path".to_string()),
            vec![
                AddChild::path_item("/pets", PathItem::default()).into(),
                ChangeProperty::set(NodePath::path_item("/pets"), "summary", "Pets").into(),
            ],
        );
        group.execute(&mut doc);
        assert_eq!(
            doc.path_item("/pets").unwrap().summary.as_deref(),
            Some("Pets")
        );

        group.undo(&mut doc);
        assert_eq!(doc, before);
    }
}
