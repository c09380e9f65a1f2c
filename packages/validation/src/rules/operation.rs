use crate::problem::ValidationProblem;
use crate::rules::ValidationRule;
use apistudio_model::{Document, NodePath, Operation};
use std::collections::HashSet;

/// OP-001: every operation documents at least one response
pub struct NoResponsesRule;

impl ValidationRule for NoResponsesRule {
    fn code(&self) -> &'static str {
        "OP-001"
    }

    fn description(&self) -> &'static str {
        "Operations must define at least one response"
    }

    fn check_operation(&self, _doc: &Document, path: &NodePath, op: &Operation) -> Vec<ValidationProblem> {
        if op.responses.as_ref().is_some_and(|responses| !responses.is_empty()) {
            return Vec::new();
        }
        vec![ValidationProblem::error(self.code(), path.clone(), "Operation has no responses")
            .with_property("responses")]
    }
}

/// OP-002: operationIds are unique across the document. The first
/// occurrence is fine; every later one is reported.
pub struct DuplicateOperationIdRule;

impl ValidationRule for DuplicateOperationIdRule {
    fn code(&self) -> &'static str {
        "OP-002"
    }

    fn description(&self) -> &'static str {
        "operationId must be unique"
    }

    fn check_document(&self, doc: &Document) -> Vec<ValidationProblem> {
        let mut seen = HashSet::new();
        let mut problems = Vec::new();

        for (key, item) in doc.paths.iter().flatten() {
            for (method, op) in item.operations() {
                let Some(id) = op.operation_id.as_deref() else {
                    continue;
                };
                if !seen.insert(id) {
                    problems.push(
                        ValidationProblem::error(
                            self.code(),
                            NodePath::operation(key, method),
                            format!("Duplicate operationId '{}'", id),
                        )
                        .with_property("operationId"),
                    );
                }
            }
        }

        problems
    }
}
