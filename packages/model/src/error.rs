use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Invalid JSON at {line}:{column}: {message}")]
    Json {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Invalid YAML: {message}")]
    Yaml { message: String },

    #[error("Document root must be an object")]
    NotAnObject,

    #[error("Document declares neither `swagger` nor `openapi`")]
    UnknownVersion,

    #[error("Document does not match the OpenAPI model: {message}")]
    InvalidStructure { message: String },

    #[error("Invalid node path '{path}': {message}")]
    InvalidNodePath { path: String, message: String },

    #[error("Serialization failed: {message}")]
    Serialization { message: String },
}

impl ParseError {
    pub fn invalid_node_path(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidNodePath {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn yaml(message: impl Into<String>) -> Self {
        Self::Yaml {
            message: message.into(),
        }
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_data() {
            ParseError::InvalidStructure {
                message: e.to_string(),
            }
        } else {
            ParseError::Json {
                line: e.line(),
                column: e.column(),
                message: e.to_string(),
            }
        }
    }
}
