use crate::problem::ValidationProblem;
use crate::rules::RuleRegistry;
use apistudio_common::{
    matches_filter, sort_case_insensitive, traverse, walk_operation, walk_parameter,
    walk_path_item, walk_request_body, walk_response, walk_schema, Visitor,
};
use apistudio_model::{
    Document, NodePath, Operation, Parameter, PathItem, RequestBody, Response, Schema,
};
use tracing::debug;

/// Options for configuring validation
#[derive(Debug, Default)]
pub struct ValidationOptions {
    /// Custom rule registry (uses the built-in rules if None)
    pub registry: Option<RuleRegistry>,

    /// Rule codes to skip
    pub disabled_rules: Vec<String>,
}

impl ValidationOptions {
    pub fn disabling<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            registry: None,
            disabled_rules: codes.into_iter().map(Into::into).collect(),
        }
    }
}

struct ValidatingVisitor<'a> {
    doc: &'a Document,
    registry: &'a RuleRegistry,
    problems: Vec<ValidationProblem>,
}

impl Visitor for ValidatingVisitor<'_> {
    fn visit_path_item(&mut self, path: &NodePath, item: &PathItem) {
        for rule in self.registry.rules() {
            self.problems.extend(rule.check_path_item(self.doc, path, item));
        }
        walk_path_item(self, path, item);
    }

    fn visit_operation(&mut self, path: &NodePath, op: &Operation) {
        for rule in self.registry.rules() {
            self.problems.extend(rule.check_operation(self.doc, path, op));
        }
        walk_operation(self, path, op);
    }

    fn visit_parameter(&mut self, path: &NodePath, param: &Parameter) {
        for rule in self.registry.rules() {
            self.problems.extend(rule.check_parameter(self.doc, path, param));
        }
        walk_parameter(self, path, param);
    }

    fn visit_request_body(&mut self, path: &NodePath, body: &RequestBody) {
        for rule in self.registry.rules() {
            self.problems.extend(rule.check_request_body(self.doc, path, body));
        }
        walk_request_body(self, path, body);
    }

    fn visit_response(&mut self, path: &NodePath, response: &Response) {
        for rule in self.registry.rules() {
            self.problems.extend(rule.check_response(self.doc, path, response));
        }
        walk_response(self, path, response);
    }

    fn visit_schema(&mut self, path: &NodePath, schema: &Schema) {
        for rule in self.registry.rules() {
            self.problems.extend(rule.check_schema(self.doc, path, schema));
        }
        walk_schema(self, path, schema);
    }
}

/// Validate a document and return problems in document order
pub fn validate_document(doc: &Document, options: ValidationOptions) -> Vec<ValidationProblem> {
    let mut registry = options.registry.unwrap_or_default();
    for code in &options.disabled_rules {
        if !registry.disable(code) {
            debug!(code = %code, "disabled rule is not registered");
        }
    }

    let mut visitor = ValidatingVisitor {
        doc,
        registry: &registry,
        problems: Vec::new(),
    };
    for rule in registry.rules() {
        visitor.problems.extend(rule.check_document(doc));
    }
    traverse(doc, &mut visitor);

    debug!(count = visitor.problems.len(), "validated document");
    visitor.problems
}

/// Validate, keep problems whose message contains `filter`
/// (case-insensitive), and sort them by message
pub fn find_problems(
    doc: &Document,
    options: ValidationOptions,
    filter: Option<&str>,
) -> Vec<ValidationProblem> {
    let mut problems: Vec<_> = validate_document(doc, options)
        .into_iter()
        .filter(|problem| matches_filter(&problem.message, filter))
        .collect();
    sort_case_insensitive(&mut problems, |problem| problem.message.as_str());
    problems
}
