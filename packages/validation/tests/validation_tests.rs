use apistudio_model::{parse_yaml, Document, NodePath};
use apistudio_validation::{find_problems, validate_document, RuleRegistry, Severity, ValidationOptions};

const PETSTORE: &str = r##"
swagger: "2.0"
info:
  title: Pets
paths:
  "/pets/{petId}":
    get:
      operationId: getPet
      tags: [pets, admin]
      security:
        - apiKey: []
      parameters:
        - {name: petId, in: path, type: string}
      responses:
        "200":
          description: OK
          schema: {$ref: "#/definitions/Pet"}
    delete:
      operationId: getPet
  /owners:
    post:
      parameters:
        - {$ref: "#/parameters/missing"}
      responses: {"201": {description: Created}}
definitions:
  Pet:
    type: object
    properties:
      owner: {$ref: "#/definitions/Owner"}
tags:
  - name: pets
"##;

fn codes(doc: &Document, options: ValidationOptions) -> Vec<String> {
    validate_document(doc, options)
        .into_iter()
        .map(|problem| problem.code)
        .collect()
}

#[test]
fn test_petstore_problems_in_document_order() {
    let doc = parse_yaml(PETSTORE).unwrap();
    assert_eq!(
        codes(&doc, ValidationOptions::default()),
        vec![
            "INF-002", "OP-002", "TAG-001", "SEC-001", "PAR-002", "OP-001", "PAR-001", "REF-001",
            "REF-001",
        ]
    );
}

#[test]
fn test_problem_details() {
    let doc = parse_yaml(PETSTORE).unwrap();
    let problems = validate_document(&doc, ValidationOptions::default());

    let missing_ref = problems
        .iter()
        .find(|p| p.message.contains("#/definitions/Owner"))
        .unwrap();
    assert_eq!(
        missing_ref.path,
        NodePath::root()
            .property("definitions")
            .key("Pet")
            .property("properties")
            .key("owner")
    );
    assert_eq!(missing_ref.severity, Severity::Error);

    let json = serde_json::to_value(&problems[0]).unwrap();
    assert_eq!(json["code"], "INF-002");
    assert_eq!(json["path"], "/info");
    assert_eq!(json["property"], "version");
    assert_eq!(json["severity"], "error");
}

#[test]
fn test_disabled_rules_are_skipped() {
    let doc = parse_yaml(PETSTORE).unwrap();
    let found = codes(&doc, ValidationOptions::disabling(["REF-001", "tag-001", "NOPE-1"]));
    assert!(!found.iter().any(|code| code == "REF-001" || code == "TAG-001"));
    assert!(found.iter().any(|code| code == "OP-002"));

    let none = ValidationOptions {
        registry: Some(RuleRegistry::empty()),
        disabled_rules: Vec::new(),
    };
    assert!(codes(&doc, none).is_empty());
}

#[test]
fn test_find_problems_filters_and_sorts_by_message() {
    let doc = parse_yaml(PETSTORE).unwrap();
    let problems = find_problems(&doc, ValidationOptions::default(), Some("REFERENCE"));
    let messages: Vec<_> = problems.iter().map(|p| p.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "Reference '#/definitions/Owner' cannot be resolved",
            "Reference '#/parameters/missing' cannot be resolved",
        ]
    );

    let all = find_problems(&doc, ValidationOptions::default(), None);
    assert_eq!(all.first().unwrap().message, "API is missing a version");
    assert_eq!(all.len(), 9);
}

#[test]
fn test_clean_document_has_no_problems() {
    let doc = parse_yaml(
        r#"
openapi: 3.0.3
info: {title: Pets, version: "1.0"}
paths:
  "/pets/{id}":
    parameters:
      - {name: id, in: path, required: true, schema: {type: string}}
    get:
      responses: {"200": {description: OK}}
"#,
    )
    .unwrap();
    assert!(validate_document(&doc, ValidationOptions::default()).is_empty());
}
