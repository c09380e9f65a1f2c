use crate::command_trait::CommandOp;
use apistudio_model::{
    Document, NodeMut, NodePath, ParameterLocation, Schema, SimplifiedType, SpecVersion,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The fields that together make up a node's type, captured as one unit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeFields {
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

impl TypeFields {
    fn of_schema(schema: &Schema) -> Self {
        Self {
            reference: schema.reference.clone(),
            type_: schema.type_.clone(),
            format: schema.format.clone(),
            items: schema.items.clone(),
            schema: None,
        }
    }

    fn restore_schema(self, schema: &mut Schema) {
        schema.reference = self.reference;
        schema.type_ = self.type_;
        schema.format = self.format;
        schema.items = self.items;
    }
}

/// Overwrite the shape fields of a schema, leaving its other properties
fn write_shape(schema: &mut Schema, shape: &SimplifiedType) {
    TypeFields::of_schema(&shape.to_schema()).restore_schema(schema);
}

/// Change the type of a parameter, schema, 2.0 response or 3.x media type.
/// Writing one shape (simple, array, `$ref`) clears the other two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeType {
    pub path: NodePath,
    pub new_type: SimplifiedType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    old: Option<TypeFields>,
}

impl ChangeType {
    pub fn new(path: NodePath, new_type: SimplifiedType) -> Self {
        Self {
            path,
            new_type,
            old: None,
        }
    }
}

impl CommandOp for ChangeType {
    fn execute(&mut self, doc: &mut Document) {
        self.old = None;
        let version = doc.spec_version();
        let Some(node) = doc.resolve_mut(&self.path) else {
            debug!(path = %self.path, "type target does not resolve");
            return;
        };
        let shape = &self.new_type;

        self.old = match node {
            NodeMut::Parameter(param) => {
                let old = TypeFields {
                    reference: None,
                    type_: param.type_.take(),
                    format: param.format.take(),
                    items: param.items.take(),
                    schema: param.schema.take(),
                };
                // 2.0 non-body parameters carry their type inline
                let inline = version == SpecVersion::Swagger2
                    && param.in_ != Some(ParameterLocation::Body)
                    && !matches!(shape, SimplifiedType::Reference { .. });
                if inline {
                    let fresh = shape.to_schema();
                    param.type_ = fresh.type_;
                    param.format = fresh.format;
                    param.items = fresh.items;
                } else {
                    param.schema = Some(shape.to_schema());
                }
                Some(old)
            }
            NodeMut::Schema(schema) => {
                let old = TypeFields::of_schema(schema);
                write_shape(schema, shape);
                Some(old)
            }
            NodeMut::Response(response) if version == SpecVersion::Swagger2 => {
                let old = TypeFields {
                    schema: response.schema.clone(),
                    ..Default::default()
                };
                write_shape(response.schema.get_or_insert_with(Schema::default), shape);
                Some(old)
            }
            NodeMut::MediaType(media) => {
                let old = TypeFields {
                    schema: media.schema.clone(),
                    ..Default::default()
                };
                write_shape(media.schema.get_or_insert_with(Schema::default), shape);
                Some(old)
            }
            other => {
                debug!(path = %self.path, kind = ?other.kind(), "node has no type");
                None
            }
        };
    }

    fn undo(&mut self, doc: &mut Document) {
        let Some(old) = self.old.take() else {
            return;
        };
        let Some(node) = doc.resolve_mut(&self.path) else {
            debug!(path = %self.path, "type target vanished before undo");
            return;
        };
        match node {
            NodeMut::Parameter(param) => {
                param.type_ = old.type_;
                param.format = old.format;
                param.items = old.items;
                param.schema = old.schema;
            }
            NodeMut::Schema(schema) => old.restore_schema(schema),
            NodeMut::Response(response) => response.schema = old.schema,
            NodeMut::MediaType(media) => media.schema = old.schema,
            _ => {}
        }
    }

    fn name(&self) -> &'static str {
        "change_type"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apistudio_model::{parse_json, HttpMethod};

    fn sample() -> Document {
        parse_json(
            r#"{
              "swagger": "2.0",
              "info": {"title": "Pets", "version": "1.0"},
              "paths": {
                "/pets": {
                  "get": {
                    "parameters": [
                      {"name": "limit", "in": "query", "type": "string", "format": "byte"},
                      {"name": "body", "in": "body", "schema": {"type": "object"}}
                    ],
                    "responses": {"200": {"description": "OK"}}
                  }
                }
              },
              "definitions": {
                "Pet": {"type": "object", "properties": {"age": {"type": "integer", "format": "int32"}}}
              }
            }"#,
        )
        .unwrap()
    }

    fn param_path(index: usize) -> NodePath {
        NodePath::operation("/pets", HttpMethod::Get)
            .property("parameters")
            .index(index)
    }

    #[test]
    fn test_inline_parameter_becomes_array() {
        let mut doc = sample();
        let before = doc.clone();
        let array = SimplifiedType::array(SimplifiedType::simple("integer", None));
        let mut command = ChangeType::new(param_path(0), array);
        command.execute(&mut doc);

        let get = doc.path_item("/pets").unwrap().get.as_ref().unwrap();
        let param = &get.parameters.as_ref().unwrap()[0];
        assert_eq!(param.type_.as_deref(), Some("array"));
        assert_eq!(param.format, None);
        assert_eq!(param.items.as_ref().unwrap().type_.as_deref(), Some("integer"));
        assert!(param.schema.is_none());

        command.undo(&mut doc);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_body_parameter_uses_schema() {
        let mut doc = sample();
        let before = doc.clone();
        let mut command = ChangeType::new(param_path(1), SimplifiedType::reference("#/definitions/Pet"));
        command.execute(&mut doc);
        let get = doc.path_item("/pets").unwrap().get.as_ref().unwrap();
        let schema = get.parameters.as_ref().unwrap()[1].schema.as_ref().unwrap();
        assert_eq!(schema.reference.as_deref(), Some("#/definitions/Pet"));
        assert!(schema.type_.is_none());

        command.undo(&mut doc);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_schema_shape_keeps_description() {
        let mut doc = sample();
        let path = NodePath::schema_definition(SpecVersion::Swagger2, "Pet")
            .property("properties")
            .key("age");
        if let Some(NodeMut::Schema(age)) = doc.resolve_mut(&path) {
            age.description = Some("Years".to_string());
        }
        let before = doc.clone();

        let mut command = ChangeType::new(path, SimplifiedType::simple("string", None));
        command.execute(&mut doc);
        let age = &doc.definitions.as_ref().unwrap()["Pet"].properties.as_ref().unwrap()["age"];
        assert_eq!(age.type_.as_deref(), Some("string"));
        assert_eq!(age.format, None);
        assert_eq!(age.description.as_deref(), Some("Years"));

        command.undo(&mut doc);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_response_schema_created_and_removed() {
        let mut doc = sample();
        let before = doc.clone();
        let path = NodePath::operation("/pets", HttpMethod::Get)
            .property("responses")
            .key("200");
        let mut command = ChangeType::new(path, SimplifiedType::reference("#/definitions/Pet"));
        command.execute(&mut doc);
        let get = doc.path_item("/pets").unwrap().get.as_ref().unwrap();
        let response = &get.responses.as_ref().unwrap()["200"];
        assert_eq!(response.schema.as_ref().unwrap().ref_name(), Some("Pet"));

        command.undo(&mut doc);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_untyped_target_is_noop() {
        let mut doc = sample();
        let before = doc.clone();
        let mut command = ChangeType::new(
            NodePath::path_item("/pets"),
            SimplifiedType::simple("string", None),
        );
        command.execute(&mut doc);
        command.undo(&mut doc);
        assert_eq!(doc, before);
    }
}
