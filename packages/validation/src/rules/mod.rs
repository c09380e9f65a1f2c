mod info;
mod operation;
mod parameter;
mod reference;
mod security;
mod tag;

pub use info::{MissingTitleRule, MissingVersionRule};
pub use operation::{DuplicateOperationIdRule, NoResponsesRule};
pub use parameter::{PathParameterNotRequiredRule, UndeclaredPathParameterRule, UnusedPathParameterRule};
pub use reference::UnresolvedReferenceRule;
pub use security::UndefinedSecuritySchemeRule;
pub use tag::UndeclaredTagRule;

use crate::problem::ValidationProblem;
use apistudio_model::{
    Document, NodePath, Operation, Parameter, PathItem, RequestBody, Response, Schema,
};

/// Trait for implementing validation rules.
///
/// Every hook receives the whole document so rules can follow references
/// and compare against declarations elsewhere.
pub trait ValidationRule {
    /// Stable code, e.g. `OP-001`
    fn code(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Checked once per document, before any node
    fn check_document(&self, _doc: &Document) -> Vec<ValidationProblem> {
        Vec::new()
    }

    fn check_path_item(&self, _doc: &Document, _path: &NodePath, _item: &PathItem) -> Vec<ValidationProblem> {
        Vec::new()
    }

    fn check_operation(&self, _doc: &Document, _path: &NodePath, _op: &Operation) -> Vec<ValidationProblem> {
        Vec::new()
    }

    fn check_parameter(&self, _doc: &Document, _path: &NodePath, _param: &Parameter) -> Vec<ValidationProblem> {
        Vec::new()
    }

    fn check_request_body(&self, _doc: &Document, _path: &NodePath, _body: &RequestBody) -> Vec<ValidationProblem> {
        Vec::new()
    }

    fn check_response(&self, _doc: &Document, _path: &NodePath, _response: &Response) -> Vec<ValidationProblem> {
        Vec::new()
    }

    fn check_schema(&self, _doc: &Document, _path: &NodePath, _schema: &Schema) -> Vec<ValidationProblem> {
        Vec::new()
    }
}

/// Registry of active validation rules
pub struct RuleRegistry {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl RuleRegistry {
    /// Create a new registry with all built-in rules
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(MissingTitleRule),
                Box::new(MissingVersionRule),
                Box::new(NoResponsesRule),
                Box::new(DuplicateOperationIdRule),
                Box::new(UndeclaredPathParameterRule),
                Box::new(PathParameterNotRequiredRule),
                Box::new(UnusedPathParameterRule),
                Box::new(UnresolvedReferenceRule),
                Box::new(UndeclaredTagRule),
                Box::new(UndefinedSecuritySchemeRule),
            ],
        }
    }

    /// Get all registered rules
    pub fn rules(&self) -> &[Box<dyn ValidationRule>] {
        &self.rules
    }

    /// Create an empty registry
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a custom rule to the registry
    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    /// Remove every rule with the given code. Returns whether one was removed.
    pub fn disable(&mut self, code: &str) -> bool {
        let before = self.rules.len();
        self.rules.retain(|rule| !rule.code().eq_ignore_ascii_case(code));
        self.rules.len() != before
    }

    pub fn codes(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.code()).collect()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.codes())
            .finish()
    }
}
