use apistudio_codegen::{generate_info, to_json, CodegenError, CodegenOptions, CodegenType};
use apistudio_model::{parse_yaml, Document};
use serde_json::json;

fn options() -> CodegenOptions {
    CodegenOptions::new("org.pets")
}

const SWAGGER: &str = r##"
swagger: "2.0"
info:
  title: Pet Store
  version: "1.0.0"
  description: Pets and owners
produces: [application/json]
paths:
  /pets:
    get:
      summary: Get all pets
      parameters:
        - {name: limit, in: query, type: integer, format: int32}
        - {name: tags, in: query, type: array, items: {type: string}}
      responses:
        "200":
          description: OK
          schema: {type: array, items: {$ref: "#/definitions/Pet"}}
    post:
      operationId: createPet
      consumes: [application/xml]
      parameters:
        - {name: pet, in: body, required: true, schema: {$ref: "#/definitions/Pet"}}
      responses:
        "200": {description: Updated, schema: {$ref: "#/definitions/Pet"}}
        "201": {description: Created, schema: {$ref: "#/definitions/Owner"}}
  "/pets/{id}":
    parameters:
      - {name: id, in: path, required: true, type: string}
      - {name: trace, in: header, type: string}
    get:
      parameters:
        - {name: id, in: path, required: true, type: integer, format: int64}
      responses:
        "404": {description: Missing}
        "200": {description: OK, schema: {$ref: "#/definitions/Pet"}}
    delete:
      responses: {"204": {description: Deleted}}
  "/{tenant}/health":
    get:
      responses: {"200": {description: OK}}
definitions:
  Pet:
    type: object
    properties:
      name: {type: string}
  Owner: {type: object}
"##;

#[test]
fn test_method_name_from_summary() {
    let doc = parse_yaml(SWAGGER).unwrap();
    let info = generate_info(&doc, &options()).unwrap();
    let pets = &info.interfaces[0];
    assert_eq!(pets.name, "PetsResource");
    assert_eq!(pets.methods[0].name, "getAllPets");
    assert_eq!(pets.methods[1].name, "createPet");
}

#[test]
fn test_first_success_response_is_the_return_type() {
    let doc = parse_yaml(SWAGGER).unwrap();
    let info = generate_info(&doc, &options()).unwrap();
    let create = &info.interfaces[0].methods[1];
    assert_eq!(
        create.return_,
        Some(CodegenType {
            type_: Some("org.pets.beans.Pet".to_string()),
            ..Default::default()
        })
    );
    assert_eq!(create.consumes, vec!["application/xml"]);
    assert_eq!(create.produces, vec!["application/json"]);
}

#[test]
fn test_interfaces_paths_and_arguments() {
    let doc = parse_yaml(SWAGGER).unwrap();
    let info = generate_info(&doc, &options()).unwrap();
    assert_eq!(info.name, "Pet Store");
    assert_eq!(info.description.as_deref(), Some("Pets and owners"));

    let names: Vec<_> = info.interfaces.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["PetsResource", "RootResource"]);

    let pets = &info.interfaces[0];
    assert_eq!(pets.path, "/pets");
    assert_eq!(pets.package, "org.pets");
    assert_eq!(pets.methods[0].path, None);
    assert_eq!(pets.methods[0].method, "GET");

    let list_return = pets.methods[0].return_.as_ref().unwrap();
    assert_eq!(list_return.collection.as_deref(), Some("list"));
    assert_eq!(list_return.type_.as_deref(), Some("org.pets.beans.Pet"));

    let tags = &pets.methods[0].arguments[1];
    assert_eq!(tags.name, "tags");
    assert_eq!(tags.type_.collection.as_deref(), Some("list"));
    assert!(!tags.required);

    // Inherited path-item parameters come first; the operation redeclares `id`
    let get_one = &pets.methods[2];
    assert_eq!(get_one.name, "generatedMethod1");
    assert_eq!(get_one.path.as_deref(), Some("/{id}"));
    let args: Vec<_> = get_one
        .arguments
        .iter()
        .map(|a| (a.name.as_str(), a.in_.as_str(), a.type_.type_.as_deref()))
        .collect();
    assert_eq!(
        args,
        vec![("trace", "header", Some("string")), ("id", "path", Some("integer"))]
    );

    let delete = &pets.methods[3];
    assert_eq!(delete.name, "generatedMethod2");
    assert_eq!(delete.method, "DELETE");
    assert_eq!(delete.arguments.len(), 2);
    assert_eq!(delete.return_, None);

    let root = &info.interfaces[1];
    assert_eq!(root.path, "/");
    assert_eq!(root.methods[0].path.as_deref(), Some("/{tenant}/health"));
    assert_eq!(root.methods[0].name, "generatedMethod3");
}

#[test]
fn test_beans_from_definitions() {
    let doc = parse_yaml(SWAGGER).unwrap();
    let info = generate_info(&doc, &options()).unwrap();
    let beans: Vec<_> = info.beans.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(beans, vec!["Pet", "Owner"]);
    assert_eq!(info.beans[0].package, "org.pets.beans");
    assert_eq!(
        info.beans[0].schema,
        json!({"type": "object", "properties": {"name": {"type": "string"}}})
    );
}

#[test]
fn test_openapi3_request_body_and_content() {
    let doc = parse_yaml(
        r##"
openapi: 3.0.3
info: {title: Pets, version: "1"}
paths:
  /pets:
    put:
      summary: Replace pet
      requestBody:
        $ref: "#/components/requestBodies/PetBody"
      responses:
        "201":
          $ref: "#/components/responses/PetCreated"
components:
  requestBodies:
    PetBody:
      required: true
      content:
        application/json: {schema: {$ref: "#/components/schemas/Pet"}}
  responses:
    PetCreated:
      description: Created
      content:
        application/json: {schema: {$ref: "#/components/schemas/Pet"}}
  schemas:
    Pet: {type: object}
"##,
    )
    .unwrap();
    let info = generate_info(&doc, &options()).unwrap();
    let method = &info.interfaces[0].methods[0];
    assert_eq!(method.name, "replacePet");
    assert_eq!(method.consumes, vec!["application/json"]);
    assert_eq!(method.produces, vec!["application/json"]);
    assert_eq!(method.arguments[0].name, "data");
    assert_eq!(method.arguments[0].in_, "body");
    assert!(method.arguments[0].required);
    assert_eq!(
        method.return_.as_ref().and_then(|r| r.type_.as_deref()),
        Some("org.pets.beans.Pet")
    );
    assert_eq!(info.beans.len(), 1);
}

#[test]
fn test_empty_document_and_bad_package() {
    let doc = Document::openapi3("Empty", "0");
    let info = generate_info(&doc, &options()).unwrap();
    assert!(info.interfaces.is_empty());
    assert!(info.beans.is_empty());

    let json: serde_json::Value = serde_json::from_str(&to_json(&info).unwrap()).unwrap();
    assert_eq!(json, json!({"name": "Empty", "version": "0", "interfaces": [], "beans": []}));

    assert_eq!(
        generate_info(&doc, &CodegenOptions::new("org.pets-api")),
        Err(CodegenError::InvalidPackageName("org.pets-api".to_string()))
    );
}

#[test]
fn test_paths_differing_in_case_keep_their_routes() {
    let doc = parse_yaml(
        r#"
swagger: "2.0"
info: {title: Pets, version: "1"}
paths:
  /pets:
    get: {operationId: listPets, responses: {"200": {description: OK}}}
  /Pets:
    get: {operationId: listUpperPets, responses: {"200": {description: OK}}}
  "/Pets/{id}":
    get: {operationId: getUpperPet, responses: {"200": {description: OK}}}
"#,
    )
    .unwrap();
    let info = generate_info(&doc, &options()).unwrap();
    let routes: Vec<_> = info
        .interfaces
        .iter()
        .flat_map(|i| {
            i.methods
                .iter()
                .map(move |m| (i.name.as_str(), i.path.as_str(), m.name.as_str(), m.path.as_deref()))
        })
        .collect();
    assert_eq!(
        routes,
        vec![
            ("PetsResource", "/pets", "listPets", None),
            ("PetsResource2", "/Pets", "listUpperPets", None),
            ("PetsResource2", "/Pets", "getUpperPet", Some("/{id}")),
        ]
    );
}
