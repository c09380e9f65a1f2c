use crate::path_template::{declared_path_parameters, template_parameters};
use crate::problem::ValidationProblem;
use crate::rules::ValidationRule;
use apistudio_model::{Document, NodePath, Operation, Parameter, ParameterLocation};

/// PAR-001: every `{name}` in the path template is declared as a path
/// parameter on the operation or its path item
pub struct UndeclaredPathParameterRule;

impl ValidationRule for UndeclaredPathParameterRule {
    fn code(&self) -> &'static str {
        "PAR-001"
    }

    fn description(&self) -> &'static str {
        "Path template parameters must be declared"
    }

    fn check_operation(&self, doc: &Document, path: &NodePath, _op: &Operation) -> Vec<ValidationProblem> {
        let Some((key, method)) = path.operation_location() else {
            return Vec::new();
        };
        let declared = declared_path_parameters(doc, key, method);
        template_parameters(key)
            .into_iter()
            .filter(|name| !declared.contains(name))
            .map(|name| {
                ValidationProblem::error(
                    self.code(),
                    path.clone(),
                    format!("Path parameter '{}' is not declared", name),
                )
                .with_property("parameters")
            })
            .collect()
    }
}

/// PAR-002: path parameters are always required
pub struct PathParameterNotRequiredRule;

impl ValidationRule for PathParameterNotRequiredRule {
    fn code(&self) -> &'static str {
        "PAR-002"
    }

    fn description(&self) -> &'static str {
        "Path parameters must be marked required"
    }

    fn check_parameter(&self, _doc: &Document, path: &NodePath, param: &Parameter) -> Vec<ValidationProblem> {
        if param.in_ != Some(ParameterLocation::Path) || param.required == Some(true) {
            return Vec::new();
        }
        let name = param.name.as_deref().unwrap_or_default();
        vec![ValidationProblem::error(
            self.code(),
            path.clone(),
            format!("Path parameter '{}' must be required", name),
        )
        .with_property("required")]
    }
}

/// PAR-003: a parameter declared `in: path` appears in its path template.
/// Reusable parameter definitions are not tied to a path and are skipped.
pub struct UnusedPathParameterRule;

impl ValidationRule for UnusedPathParameterRule {
    fn code(&self) -> &'static str {
        "PAR-003"
    }

    fn description(&self) -> &'static str {
        "Path parameters must appear in the path template"
    }

    fn check_parameter(&self, _doc: &Document, path: &NodePath, param: &Parameter) -> Vec<ValidationProblem> {
        if param.in_ != Some(ParameterLocation::Path) {
            return Vec::new();
        }
        let (Some(key), Some(name)) = (path.path_item_key(), param.name.as_deref()) else {
            return Vec::new();
        };
        if template_parameters(key).iter().any(|declared| declared == name) {
            return Vec::new();
        }
        vec![ValidationProblem::error(
            self.code(),
            path.clone(),
            format!("Path parameter '{}' does not appear in '{}'", name, key),
        )
        .with_property("name")]
    }
}
