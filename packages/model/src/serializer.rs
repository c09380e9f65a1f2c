use crate::document::Document;
use crate::error::{ParseError, ParseResult};
use crate::parser::SourceFormat;

/// Pretty-printed JSON, keys in document order
pub fn to_json(document: &Document) -> ParseResult<String> {
    serde_json::to_string_pretty(document).map_err(|e| ParseError::serialization(e.to_string()))
}

pub fn to_yaml(document: &Document) -> ParseResult<String> {
    serde_norway::to_string(document).map_err(|e| ParseError::serialization(e.to_string()))
}

pub fn serialize(document: &Document, format: SourceFormat) -> ParseResult<String> {
    match format {
        SourceFormat::Json => to_json(document),
        SourceFormat::Yaml => to_yaml(document),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_json, parse_yaml};

    const PETSTORE: &str = r#"{
  "swagger": "2.0",
  "info": { "title": "Pets", "version": "1.0", "x-audience": "public" },
  "paths": {
    "/pets": {
      "get": {
        "operationId": "listPets",
        "responses": { "200": { "description": "OK" } }
      }
    }
  },
  "x-generator": "hand"
}"#;

    #[test]
    fn test_json_round_trip_keeps_extensions() {
        let doc = parse_json(PETSTORE).unwrap();
        let text = to_json(&doc).unwrap();
        let reparsed = parse_json(&text).unwrap();
        assert_eq!(reparsed, doc);
        assert!(text.contains("\"x-generator\": \"hand\""));
        assert!(text.contains("\"x-audience\": \"public\""));
    }

    #[test]
    fn test_yaml_round_trip() {
        let doc = parse_json(PETSTORE).unwrap();
        let yaml = serialize(&doc, SourceFormat::Yaml).unwrap();
        assert_eq!(parse_yaml(&yaml).unwrap(), doc);
    }
}
