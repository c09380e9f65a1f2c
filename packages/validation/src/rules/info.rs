use crate::problem::ValidationProblem;
use crate::rules::ValidationRule;
use apistudio_model::{Document, NodePath};

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// INF-001: the API must have a title
pub struct MissingTitleRule;

impl ValidationRule for MissingTitleRule {
    fn code(&self) -> &'static str {
        "INF-001"
    }

    fn description(&self) -> &'static str {
        "API title is required"
    }

    fn check_document(&self, doc: &Document) -> Vec<ValidationProblem> {
        let title = doc.info.as_ref().and_then(|info| info.title.as_deref());
        if !is_blank(title) {
            return Vec::new();
        }
        vec![
            ValidationProblem::error(self.code(), NodePath::root().property("info"), "API is missing a title")
                .with_property("title"),
        ]
    }
}

/// INF-002: the API must have a version
pub struct MissingVersionRule;

impl ValidationRule for MissingVersionRule {
    fn code(&self) -> &'static str {
        "INF-002"
    }

    fn description(&self) -> &'static str {
        "API version is required"
    }

    fn check_document(&self, doc: &Document) -> Vec<ValidationProblem> {
        let version = doc.info.as_ref().and_then(|info| info.version.as_deref());
        if !is_blank(version) {
            return Vec::new();
        }
        vec![
            ValidationProblem::error(self.code(), NodePath::root().property("info"), "API is missing a version")
                .with_property("version"),
        ]
    }
}
