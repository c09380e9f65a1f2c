use thiserror::Error;

/// Errors that can occur while generating codegen info
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodegenError {
    #[error("Invalid Java package name '{0}'")]
    InvalidPackageName(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type CodegenResult<T> = Result<T, CodegenError>;
