//! # Commands
//!
//! Reversible, serializable changes to an API document.
//!
//! ## Command Semantics
//!
//! ### AddChild
//! - Creates missing parent containers and remembers the outermost one
//! - A same-named child already present makes the command a no-op
//!
//! ### DeleteNode / ReplaceNode
//! - Remember the removed node and its position among its siblings
//!
//! ### ChangeProperty / ChangeType
//! - Capture the previous value lazily, at execute time
//!
//! ### Rename
//! - Re-keys a path item or schema definition; schema renames also rewrite
//!   every `$ref` that pointed at the old name
//!
//! Captured state is part of the serialized form, so a command log can be
//! stored and undone later.

mod add;
mod aggregate;
mod change_property;
mod change_type;
mod delete;
mod rename;
mod replace;

pub use add::AddChild;
pub use aggregate::Aggregate;
pub use change_property::{ChangeProperty, OldValue};
pub use change_type::{ChangeType, TypeFields};
pub use delete::DeleteNode;
pub use rename::Rename;
pub use replace::ReplaceNode;

use crate::command_trait::CommandOp;
use apistudio_model::Document;
use serde::{Deserialize, Serialize};

/// Every command the editor knows how to execute and undo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    AddChild(AddChild),
    DeleteNode(DeleteNode),
    ChangeProperty(ChangeProperty),
    ChangeType(ChangeType),
    ReplaceNode(ReplaceNode),
    Rename(Rename),
    Aggregate(Aggregate),
}

impl Command {
    fn op(&self) -> &dyn CommandOp {
        match self {
            Command::AddChild(c) => c,
            Command::DeleteNode(c) => c,
            Command::ChangeProperty(c) => c,
            Command::ChangeType(c) => c,
            Command::ReplaceNode(c) => c,
            Command::Rename(c) => c,
            Command::Aggregate(c) => c,
        }
    }

    fn op_mut(&mut self) -> &mut dyn CommandOp {
        match self {
            Command::AddChild(c) => c,
            Command::DeleteNode(c) => c,
            Command::ChangeProperty(c) => c,
            Command::ChangeType(c) => c,
            Command::ReplaceNode(c) => c,
            Command::Rename(c) => c,
            Command::Aggregate(c) => c,
        }
    }

    /// Human-readable label for history menus
    pub fn description(&self) -> &str {
        match self {
            Command::Aggregate(Aggregate {
                description: Some(description),
                ..
            }) => description.as_str(),
            other => other.name(),
        }
    }
}

impl CommandOp for Command {
    fn execute(&mut self, doc: &mut Document) {
        self.op_mut().execute(doc);
    }

    fn undo(&mut self, doc: &mut Document) {
        self.op_mut().undo(doc);
    }

    fn name(&self) -> &'static str {
        self.op().name()
    }
}

macro_rules! impl_from_command {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Command {
                fn from(command: $variant) -> Self {
                    Command::$variant(command)
                }
            }
        )*
    };
}

impl_from_command!(
    AddChild,
    DeleteNode,
    ChangeProperty,
    ChangeType,
    ReplaceNode,
    Rename,
    Aggregate
);
