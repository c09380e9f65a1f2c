use crate::problem::ValidationProblem;
use crate::rules::ValidationRule;
use apistudio_model::{Document, NodePath, Operation, SecurityRequirement};

/// SEC-001: security requirements only name defined security schemes
pub struct UndefinedSecuritySchemeRule;

impl UndefinedSecuritySchemeRule {
    fn check(
        &self,
        doc: &Document,
        path: &NodePath,
        requirements: Option<&Vec<SecurityRequirement>>,
    ) -> Vec<ValidationProblem> {
        let schemes = doc.security_schemes();
        requirements
            .into_iter()
            .flatten()
            .flat_map(|requirement| requirement.keys())
            .filter(|name| !schemes.is_some_and(|schemes| schemes.contains_key(name.as_str())))
            .map(|name| {
                ValidationProblem::error(
                    self.code(),
                    path.clone(),
                    format!("Security scheme '{}' is not defined", name),
                )
                .with_property("security")
            })
            .collect()
    }
}

impl ValidationRule for UndefinedSecuritySchemeRule {
    fn code(&self) -> &'static str {
        "SEC-001"
    }

    fn description(&self) -> &'static str {
        "Security requirements must name defined schemes"
    }

    fn check_document(&self, doc: &Document) -> Vec<ValidationProblem> {
        self.check(doc, &NodePath::root(), doc.security.as_ref())
    }

    fn check_operation(&self, doc: &Document, path: &NodePath, op: &Operation) -> Vec<ValidationProblem> {
        self.check(doc, path, op.security.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apistudio_model::parse_yaml;

    #[test]
    fn test_undefined_schemes() {
        let doc = parse_yaml(
            r#"
openapi: 3.0.3
info: {title: Pets, version: "1"}
security:
  - apiKey: []
  - oauth: [read]
components:
  securitySchemes:
    apiKey: {type: apiKey, name: X-Key, in: header}
"#,
        )
        .unwrap();
        let problems = UndefinedSecuritySchemeRule.check_document(&doc);
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].message, "Security scheme 'oauth' is not defined");
        assert_eq!(problems[0].path, NodePath::root());
    }
}
