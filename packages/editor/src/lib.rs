//! # API Studio Editor
//!
//! Reversible editing of API documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: source text → Document, NodePath     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: commands + history                  │
//! │  - Add/delete/replace/rename nodes          │
//! │  - Change properties and types              │
//! │  - Undo/redo with grouped steps             │
//! │  - Optimistic sessions, raw source mode     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ validation / codegen: read-only visitors    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Paths, not pointers**: commands address nodes by [`NodePath`] and
//!    hold no references into the document
//! 2. **Missing targets are no-ops**: a command whose target is gone does
//!    nothing, and neither does its undo
//! 3. **Lazy capture**: undo state is captured at execute time, so a
//!    command can be built before the document it runs against
//!
//! ## Usage
//!
//! ```rust,ignore
//! use apistudio_editor::{AddChild, ApiDocument};
//!
//! let mut doc = ApiDocument::load("api.yaml".into())?;
//! doc.execute(AddChild::path_item("/pets", PathItem::default()).into());
//! doc.undo();
//! doc.save()?;
//! ```
//!
//! [`NodePath`]: apistudio_model::NodePath

mod command_manager;
mod command_trait;
mod commands;
mod document;
mod errors;
mod session;
mod source_mode;

pub use command_manager::CommandManager;
pub use command_trait::CommandOp;
pub use commands::{
    AddChild, Aggregate, ChangeProperty, ChangeType, Command, DeleteNode, OldValue, Rename,
    ReplaceNode, TypeFields,
};
pub use document::{ApiDocument, DocumentStorage};
pub use errors::EditorError;
pub use session::{EditSession, PendingCommand};
pub use source_mode::SourceEditor;
