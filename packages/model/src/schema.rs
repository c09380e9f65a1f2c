use crate::document::Extra;
use crate::Map;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON schema node (definitions, properties, payloads, array items)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Map<String, Schema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_: Option<Vec<Value>>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Schema {
    pub fn reference(reference: impl Into<String>) -> Self {
        Self {
            reference: Some(reference.into()),
            ..Default::default()
        }
    }

    pub fn of_type(type_: impl Into<String>, format: Option<&str>) -> Self {
        Self {
            type_: Some(type_.into()),
            format: format.map(str::to_string),
            ..Default::default()
        }
    }

    pub fn array_of(items: Schema) -> Self {
        Self {
            type_: Some("array".to_string()),
            items: Some(Box::new(items)),
            ..Default::default()
        }
    }

    pub fn object() -> Self {
        Self::of_type("object", None)
    }

    pub fn is_array(&self) -> bool {
        self.type_.as_deref() == Some("array")
    }

    /// Last segment of the `$ref`, e.g. `Pet` for `#/definitions/Pet`
    pub fn ref_name(&self) -> Option<&str> {
        let reference = self.reference.as_deref()?;
        reference.rsplit('/').next().filter(|name| !name.is_empty())
    }

    pub fn with_property(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.properties
            .get_or_insert_with(Map::new)
            .insert(name.into(), schema);
        self
    }
}

/// The three mutually exclusive shapes a typed node can take
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "camelCase")]
pub enum SimplifiedType {
    /// A primitive or object type, with an optional format
    Simple {
        #[serde(rename = "type")]
        type_: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<String>,
    },

    /// An array of another simplified type
    Array { of: Box<SimplifiedType> },

    /// A `$ref` to a definition
    Reference {
        #[serde(rename = "$ref")]
        reference: String,
    },
}

impl SimplifiedType {
    pub fn simple(type_: impl Into<String>, format: Option<&str>) -> Self {
        SimplifiedType::Simple {
            type_: type_.into(),
            format: format.map(str::to_string),
        }
    }

    pub fn array(of: SimplifiedType) -> Self {
        SimplifiedType::Array { of: Box::new(of) }
    }

    pub fn reference(reference: impl Into<String>) -> Self {
        SimplifiedType::Reference {
            reference: reference.into(),
        }
    }

    /// Read the shape of a schema. Untyped schemas have no simplified form.
    pub fn from_schema(schema: &Schema) -> Option<Self> {
        if let Some(reference) = &schema.reference {
            return Some(SimplifiedType::reference(reference.clone()));
        }
        match schema.type_.as_deref()? {
            "array" => {
                let of = schema
                    .items
                    .as_deref()
                    .and_then(SimplifiedType::from_schema)?;
                Some(SimplifiedType::array(of))
            }
            type_ => Some(SimplifiedType::simple(type_, schema.format.as_deref())),
        }
    }

    /// Build a fresh schema with exactly this shape
    pub fn to_schema(&self) -> Schema {
        match self {
            SimplifiedType::Simple { type_, format } => Schema::of_type(type_, format.as_deref()),
            SimplifiedType::Array { of } => Schema::array_of(of.to_schema()),
            SimplifiedType::Reference { reference } => Schema::reference(reference),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ref_name() {
        assert_eq!(Schema::reference("#/definitions/Pet").ref_name(), Some("Pet"));
        assert_eq!(
            Schema::reference("#/components/schemas/Order").ref_name(),
            Some("Order")
        );
        assert_eq!(Schema::object().ref_name(), None);
    }

    #[test]
    fn test_simplified_type_from_schema() {
        let schema = Schema::array_of(Schema::of_type("integer", Some("int64")));
        assert_eq!(
            SimplifiedType::from_schema(&schema),
            Some(SimplifiedType::array(SimplifiedType::simple("integer", Some("int64"))))
        );
        assert_eq!(SimplifiedType::from_schema(&Schema::default()), None);
    }

    #[test]
    fn test_simplified_type_shapes_are_exclusive() {
        let schema = SimplifiedType::reference("#/definitions/Pet").to_schema();
        assert!(schema.type_.is_none());
        assert!(schema.items.is_none());

        let schema = SimplifiedType::array(SimplifiedType::simple("string", None)).to_schema();
        assert!(schema.reference.is_none());
        assert!(schema.format.is_none());
        assert!(schema.is_array());
    }

    #[test]
    fn test_simplified_type_json_shape() {
        let json = r#"{"shape":"array","of":{"shape":"simple","type":"integer"}}"#;
        let parsed: SimplifiedType = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, SimplifiedType::array(SimplifiedType::simple("integer", None)));
    }
}
