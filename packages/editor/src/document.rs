//! # Document Handle
//!
//! An [`ApiDocument`] is one API description and its editing state.
//! Documents are either:
//! - **Memory-backed**: built from source text, for tests and scratch work
//! - **File-backed**: loaded from disk, tracks unsaved changes
//!
//! ## Lifecycle
//!
//! ```text
//! Load → Parse → Execute/Undo/Redo → Serialize → Save
//!   ↓      ↓            ↓                ↓         ↓
//! File  Document    Commands          Source     File
//! ```

use crate::command_manager::CommandManager;
use crate::command_trait::CommandOp;
use crate::commands::Command;
use crate::EditorError;
use apistudio_common::{read_document, write_document, FileSystem, RealFileSystem};
use apistudio_model::{from_value, parse_value, serialize, Document, SourceFormat, SpecVersion};
use std::path::PathBuf;
use tracing::debug;

/// Storage backend for a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentStorage {
    /// In-memory only
    Memory,

    /// Backed by a file on disk
    File { dirty: bool },
}

/// Editable API document with its own undo history
#[derive(Debug)]
pub struct ApiDocument {
    /// Path to the source file (nominal for memory-backed documents)
    pub path: PathBuf,

    /// Increments on every execute, undo, redo and untracked change
    pub version: u64,

    format: SourceFormat,
    document: Document,
    storage: DocumentStorage,
    history: CommandManager,
}

impl ApiDocument {
    /// Create a memory-backed document from source text
    pub fn from_source(path: PathBuf, source: &str) -> Result<Self, EditorError> {
        let format = SourceFormat::from_path(&path).unwrap_or_else(|| SourceFormat::detect(source));
        let document = from_value(parse_value(source, format)?)?;
        Ok(Self::new(path, format, document, DocumentStorage::Memory))
    }

    /// Wrap an already-built document (memory-backed)
    pub fn from_document(path: PathBuf, document: Document, format: SourceFormat) -> Self {
        Self::new(path, format, document, DocumentStorage::Memory)
    }

    /// Load a file-backed document from disk
    pub fn load(path: PathBuf) -> Result<Self, EditorError> {
        Self::load_from(&RealFileSystem, path)
    }

    pub fn load_from(fs: &dyn FileSystem, path: PathBuf) -> Result<Self, EditorError> {
        let (document, format) = read_document(fs, &path)?;
        debug!(path = %path.display(), ?format, "loaded document");
        Ok(Self::new(
            path,
            format,
            document,
            DocumentStorage::File { dirty: false },
        ))
    }

    fn new(path: PathBuf, format: SourceFormat, document: Document, storage: DocumentStorage) -> Self {
        Self {
            path,
            version: 0,
            format,
            document,
            storage,
            history: CommandManager::new(),
        }
    }

    /// Replace the undo history, e.g. with a bounded one
    pub fn with_history(mut self, history: CommandManager) -> Self {
        self.history = history;
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn spec_version(&self) -> SpecVersion {
        self.document.spec_version()
    }

    pub fn format(&self) -> SourceFormat {
        self.format
    }

    pub fn storage(&self) -> DocumentStorage {
        self.storage
    }

    pub fn history(&self) -> &CommandManager {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut CommandManager {
        &mut self.history
    }

    /// Execute a command and record it in the undo history
    pub fn execute(&mut self, command: Command) -> u64 {
        self.history.execute_command(command, &mut self.document);
        self.touch()
    }

    /// Execute a command without recording it (remote or replayed edits)
    pub fn apply_untracked(&mut self, mut command: Command) -> u64 {
        command.execute(&mut self.document);
        self.touch()
    }

    pub fn undo(&mut self) -> bool {
        let undone = self.history.undo_last_command(&mut self.document);
        if undone {
            self.touch();
        }
        undone
    }

    pub fn redo(&mut self) -> bool {
        let redone = self.history.redo_last_command(&mut self.document);
        if redone {
            self.touch();
        }
        redone
    }

    fn touch(&mut self) -> u64 {
        self.version += 1;
        if let DocumentStorage::File { dirty } = &mut self.storage {
            *dirty = true;
        }
        self.version
    }

    /// Check if the document has unsaved changes
    pub fn is_dirty(&self) -> bool {
        matches!(self.storage, DocumentStorage::File { dirty: true })
    }

    /// Serialized source in the format the document was read in
    pub fn source(&self) -> Result<String, EditorError> {
        Ok(serialize(&self.document, self.format)?)
    }

    /// Save to disk (file-backed documents only)
    pub fn save(&mut self) -> Result<(), EditorError> {
        self.save_to(&RealFileSystem)
    }

    pub fn save_to(&mut self, fs: &dyn FileSystem) -> Result<(), EditorError> {
        match &mut self.storage {
            DocumentStorage::File { dirty } => {
                write_document(fs, &self.path, &self.document, self.format)?;
                *dirty = false;
                debug!(path = %self.path.display(), "saved document");
                Ok(())
            }
            DocumentStorage::Memory => Err(EditorError::NotFileBacked),
        }
    }
}
