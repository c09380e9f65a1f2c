use apistudio_model::NodePath;
use serde::{Deserialize, Serialize};

/// Severity level of a validation problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// A problem found in an API document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationProblem {
    /// Code of the rule that reported it, e.g. `OP-001`
    pub code: String,

    /// Node the problem is attached to
    pub path: NodePath,

    /// Offending property of that node, when there is one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,

    /// Human-readable message
    pub message: String,

    pub severity: Severity,
}

impl ValidationProblem {
    pub fn error(code: impl Into<String>, path: NodePath, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            path,
            property: None,
            message: message.into(),
            severity: Severity::Error,
        }
    }

    pub fn warning(code: impl Into<String>, path: NodePath, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(code, path, message)
        }
    }

    pub fn with_property(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
