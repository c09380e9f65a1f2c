//! Error types for the editor

use apistudio_common::CommonError;
use apistudio_model::ParseError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] CommonError),

    #[error("Document is not file-backed")]
    NotFileBacked,
}
