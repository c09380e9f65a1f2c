//! Name-based access to the simple (non-node) properties of a node.
//!
//! Typed fields are read and written through their JSON form; any other
//! name goes to the node's `extra` map. Names that address child nodes are
//! structural and cannot be read or written here.

use crate::document::Extra;
use crate::node::{NodeMut, NodeRef};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

trait PropertyField {
    fn read(&self) -> Option<Value>;
    fn write(&mut self, value: Option<Value>) -> bool;
}

impl<T: Serialize + DeserializeOwned> PropertyField for Option<T> {
    fn read(&self) -> Option<Value> {
        self.as_ref().and_then(|v| serde_json::to_value(v).ok())
    }

    fn write(&mut self, value: Option<Value>) -> bool {
        match value {
            None | Some(Value::Null) => {
                *self = None;
                true
            }
            Some(value) => match serde_json::from_value(value) {
                Ok(parsed) => {
                    *self = Some(parsed);
                    true
                }
                Err(_) => false,
            },
        }
    }
}

/// Required string fields cannot be removed
impl PropertyField for String {
    fn read(&self) -> Option<Value> {
        Some(Value::String(self.clone()))
    }

    fn write(&mut self, value: Option<Value>) -> bool {
        match value {
            Some(Value::String(s)) => {
                *self = s;
                true
            }
            _ => false,
        }
    }
}

fn write_extra(extra: &mut Extra, name: &str, value: Option<Value>) -> bool {
    match value {
        Some(value) => {
            extra.insert(name.to_string(), value);
        }
        None => {
            extra.shift_remove(name);
        }
    }
    true
}

macro_rules! property_table {
    ($(
        $variant:ident {
            fields: [$($prop:literal => $field:ident),* $(,)?],
            nodes: [$($structural:literal),* $(,)?] $(,)?
        }
    ),* $(,)?) => {
        impl NodeRef<'_> {
            /// Current value of a simple property. `None` means absent;
            /// `Some(Value::Null)` is an explicit null kept in `extra`.
            pub fn property(&self, name: &str) -> Option<Value> {
                match self {
                    $(NodeRef::$variant(node) => match name {
                        $($prop => node.$field.read(),)*
                        $($structural => None,)*
                        _ => node.extra.get(name).cloned(),
                    },)*
                    _ => None,
                }
            }
        }

        impl NodeMut<'_> {
            /// Set (`Some`) or remove (`None`) a simple property. Returns
            /// false when the name is structural, the node kind has no
            /// properties, or the value does not fit the field.
            pub fn set_property(&mut self, name: &str, value: Option<Value>) -> bool {
                match self {
                    $(NodeMut::$variant(node) => match name {
                        $($prop => node.$field.write(value),)*
                        $($structural => false,)*
                        _ => write_extra(&mut node.extra, name, value),
                    },)*
                    _ => false,
                }
            }
        }
    };
}

property_table! {
    Document {
        fields: [
            "swagger" => swagger,
            "openapi" => openapi,
            "consumes" => consumes,
            "produces" => produces,
            "security" => security,
        ],
        nodes: [
            "info", "paths", "definitions", "parameters", "responses",
            "securityDefinitions", "components", "tags",
        ],
    },
    Info {
        fields: [
            "title" => title,
            "description" => description,
            "termsOfService" => terms_of_service,
            "version" => version,
        ],
        nodes: ["contact", "license"],
    },
    Contact {
        fields: ["name" => name, "url" => url, "email" => email],
        nodes: [],
    },
    License {
        fields: ["name" => name, "url" => url],
        nodes: [],
    },
    Tag {
        fields: ["name" => name, "description" => description],
        nodes: [],
    },
    PathItem {
        fields: ["$ref" => reference, "summary" => summary, "description" => description],
        nodes: [
            "parameters", "get", "put", "post", "delete", "options", "head", "patch", "trace",
        ],
    },
    Operation {
        fields: [
            "tags" => tags,
            "summary" => summary,
            "description" => description,
            "operationId" => operation_id,
            "consumes" => consumes,
            "produces" => produces,
            "deprecated" => deprecated,
            "security" => security,
        ],
        nodes: ["parameters", "requestBody", "responses"],
    },
    Parameter {
        fields: [
            "$ref" => reference,
            "name" => name,
            "in" => in_,
            "description" => description,
            "required" => required,
            "type" => type_,
            "format" => format,
        ],
        nodes: ["schema", "items"],
    },
    RequestBody {
        fields: ["$ref" => reference, "description" => description, "required" => required],
        nodes: ["content"],
    },
    MediaType {
        fields: [],
        nodes: ["schema"],
    },
    Response {
        fields: ["$ref" => reference, "description" => description],
        nodes: ["schema", "content"],
    },
    Schema {
        fields: [
            "$ref" => reference,
            "title" => title,
            "description" => description,
            "type" => type_,
            "format" => format,
            "required" => required,
            "enum" => enum_,
        ],
        nodes: ["items", "properties"],
    },
    Components {
        fields: [],
        nodes: ["schemas", "responses", "parameters", "requestBodies", "securitySchemes"],
    },
    SecurityScheme {
        fields: [
            "type" => type_,
            "description" => description,
            "name" => name,
            "in" => in_,
            "scheme" => scheme,
            "bearerFormat" => bearer_format,
        ],
        nodes: [],
    },
}
