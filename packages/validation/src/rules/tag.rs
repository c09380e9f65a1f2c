use crate::problem::ValidationProblem;
use crate::rules::ValidationRule;
use apistudio_model::{Document, NodePath, Operation};

/// TAG-001: operation tags are declared in the top-level `tags` list
pub struct UndeclaredTagRule;

impl ValidationRule for UndeclaredTagRule {
    fn code(&self) -> &'static str {
        "TAG-001"
    }

    fn description(&self) -> &'static str {
        "Operation tags should be declared"
    }

    fn check_operation(&self, doc: &Document, path: &NodePath, op: &Operation) -> Vec<ValidationProblem> {
        let declared: Vec<&str> = doc.tags.iter().flatten().map(|tag| tag.name.as_str()).collect();
        op.tags
            .iter()
            .flatten()
            .filter(|tag| !declared.contains(&tag.as_str()))
            .map(|tag| {
                ValidationProblem::warning(self.code(), path.clone(), format!("Tag '{}' is not declared", tag))
                    .with_property("tags")
            })
            .collect()
    }
}
