//! Path template parameters (`/pets/{id}`) and the derived list of template
//! parameters an operation never declares.

use apistudio_model::{Document, HttpMethod, NodePath, ParameterLocation};
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

fn template_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{([^{}/]+)\}").expect("path template pattern compiles"))
}

/// Parameter names in a path template, in order of appearance
pub fn template_parameters(path: &str) -> Vec<String> {
    template_pattern()
        .captures_iter(path)
        .map(|captures| captures[1].to_string())
        .collect()
}

/// Names of the path parameters declared on a path item and one of its
/// operations, with references followed
pub(crate) fn declared_path_parameters(
    doc: &Document,
    path: &str,
    method: HttpMethod,
) -> Vec<String> {
    let Some(item) = doc.path_item(path) else {
        return Vec::new();
    };
    let inherited = item.parameters.iter().flatten();
    let own = item
        .operation(method)
        .and_then(|op| op.parameters.as_ref())
        .into_iter()
        .flatten();

    inherited
        .chain(own)
        .filter_map(|param| doc.resolve_parameter(param))
        .filter(|param| param.in_ == Some(ParameterLocation::Path))
        .filter_map(|param| param.name.clone())
        .collect()
}

/// A path template parameter an operation relies on but never declares.
///
/// This is a read-only projection for display: it is computed on demand
/// and never stored in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingParameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    /// Operation that is missing the declaration
    pub operation: NodePath,
}

/// Template parameters of `path` that neither the path item nor the
/// operation declares. Empty when the operation does not exist.
pub fn missing_path_parameters(
    doc: &Document,
    path: &str,
    method: HttpMethod,
) -> Vec<MissingParameter> {
    if doc.path_item(path).and_then(|item| item.operation(method)).is_none() {
        return Vec::new();
    }
    let declared = declared_path_parameters(doc, path, method);
    template_parameters(path)
        .into_iter()
        .filter(|name| !declared.contains(name))
        .map(|name| MissingParameter {
            name,
            location: ParameterLocation::Path,
            operation: NodePath::operation(path, method),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use apistudio_model::parse_yaml;

    #[test]
    fn test_template_parameters() {
        assert_eq!(template_parameters("/pets/{petId}/toys/{toy_id}"), vec!["petId", "toy_id"]);
        assert!(template_parameters("/pets").is_empty());
        assert!(template_parameters("/pets/{}").is_empty());
    }

    #[test]
    fn test_missing_parameters_follow_refs_and_inheritance() {
        let doc = parse_yaml(
            r##"
swagger: "2.0"
info: {title: Pets, version: "1"}
parameters:
  ownerId: {name: ownerId, in: path, required: true, type: string}
paths:
  "/owners/{ownerId}/pets/{petId}/toys/{toyId}":
    parameters:
      - $ref: "#/parameters/ownerId"
    get:
      parameters:
        - {name: petId, in: path, required: true, type: string}
        - {name: toyId, in: query, type: string}
      responses: {"200": {description: OK}}
"##,
        )
        .unwrap();
        let path = "/owners/{ownerId}/pets/{petId}/toys/{toyId}";
        let missing = missing_path_parameters(&doc, path, HttpMethod::Get);
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].name, "toyId");
        assert_eq!(missing[0].operation, NodePath::operation(path, HttpMethod::Get));

        assert!(missing_path_parameters(&doc, path, HttpMethod::Post).is_empty());
    }

    #[test]
    fn test_projection_leaves_document_untouched() {
        let doc = parse_yaml(
            r#"
openapi: 3.0.3
info: {title: Pets, version: "1"}
paths:
  "/pets/{id}": {get: {responses: {"200": {description: OK}}}}
"#,
        )
        .unwrap();
        let before = doc.clone();
        assert_eq!(missing_path_parameters(&doc, "/pets/{id}", HttpMethod::Get).len(), 1);
        assert_eq!(doc, before);
    }
}
