use crate::problem::ValidationProblem;
use crate::rules::ValidationRule;
use apistudio_model::{Document, NodePath, Parameter, PathItem, RequestBody, Response, Schema};

/// REF-001: local `$ref`s point at something. External references
/// (anything not starting with `#`) are not followed.
pub struct UnresolvedReferenceRule;

impl UnresolvedReferenceRule {
    fn check(&self, doc: &Document, path: &NodePath, reference: Option<&str>) -> Vec<ValidationProblem> {
        let Some(reference) = reference.filter(|r| r.starts_with('#')) else {
            return Vec::new();
        };
        if doc.resolve_reference(reference).is_some() {
            return Vec::new();
        }
        vec![ValidationProblem::error(
            self.code(),
            path.clone(),
            format!("Reference '{}' cannot be resolved", reference),
        )
        .with_property("$ref")]
    }
}

impl ValidationRule for UnresolvedReferenceRule {
    fn code(&self) -> &'static str {
        "REF-001"
    }

    fn description(&self) -> &'static str {
        "Local references must resolve"
    }

    fn check_path_item(&self, doc: &Document, path: &NodePath, item: &PathItem) -> Vec<ValidationProblem> {
        self.check(doc, path, item.reference.as_deref())
    }

    fn check_parameter(&self, doc: &Document, path: &NodePath, param: &Parameter) -> Vec<ValidationProblem> {
        self.check(doc, path, param.reference.as_deref())
    }

    fn check_request_body(&self, doc: &Document, path: &NodePath, body: &RequestBody) -> Vec<ValidationProblem> {
        self.check(doc, path, body.reference.as_deref())
    }

    fn check_response(&self, doc: &Document, path: &NodePath, response: &Response) -> Vec<ValidationProblem> {
        self.check(doc, path, response.reference.as_deref())
    }

    fn check_schema(&self, doc: &Document, path: &NodePath, schema: &Schema) -> Vec<ValidationProblem> {
        self.check(doc, path, schema.reference.as_deref())
    }
}
