use crate::document::Document;
use crate::error::{ParseError, ParseResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Number, Value};
use serde_norway::Value as Yaml;
use std::path::Path;

/// Textual encoding of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Json,
    Yaml,
}

impl SourceFormat {
    /// Sniff the format from content: JSON documents start with `{`
    pub fn detect(content: &str) -> Self {
        if content.trim_start().starts_with('{') {
            SourceFormat::Json
        } else {
            SourceFormat::Yaml
        }
    }

    /// Format implied by a file extension, if recognized
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(SourceFormat::Json),
            "yaml" | "yml" => Some(SourceFormat::Yaml),
            _ => None,
        }
    }
}

/// Parse a document, detecting JSON or YAML from the content
pub fn parse(content: &str) -> ParseResult<Document> {
    match SourceFormat::detect(content) {
        SourceFormat::Json => parse_json(content),
        SourceFormat::Yaml => parse_yaml(content),
    }
}

pub fn parse_json(content: &str) -> ParseResult<Document> {
    from_value(parse_value(content, SourceFormat::Json)?)
}

pub fn parse_yaml(content: &str) -> ParseResult<Document> {
    from_value(parse_value(content, SourceFormat::Yaml)?)
}

/// Decode source text into a plain JSON value without interpreting it
pub fn parse_value(content: &str, format: SourceFormat) -> ParseResult<Value> {
    match format {
        SourceFormat::Json => Ok(serde_json::from_str(content)?),
        SourceFormat::Yaml => {
            let value: Yaml =
                serde_norway::from_str(content).map_err(|e| ParseError::yaml(e.to_string()))?;
            yaml_to_json(value)
        }
    }
}

/// Build a document from an already-decoded JSON value
pub fn from_value(value: Value) -> ParseResult<Document> {
    let Value::Object(root) = &value else {
        return Err(ParseError::NotAnObject);
    };
    if !root.contains_key("swagger") && !root.contains_key("openapi") {
        return Err(ParseError::UnknownVersion);
    }
    Ok(serde_json::from_value(value)?)
}

/// YAML allows non-string mapping keys (`200:` under `responses`); JSON
/// objects do not, so scalar keys are stringified.
fn yaml_to_json(value: Yaml) -> ParseResult<Value> {
    Ok(match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or(Value::Null)
            }
        }
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<ParseResult<Vec<_>>>()?,
        ),
        Yaml::Mapping(mapping) => {
            let mut object = JsonMap::new();
            for (key, value) in mapping {
                object.insert(yaml_key(key)?, yaml_to_json(value)?);
            }
            Value::Object(object)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}

fn yaml_key(key: Yaml) -> ParseResult<String> {
    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Null => Ok("null".to_string()),
        other => Err(ParseError::yaml(format!(
            "unsupported mapping key: {:?}",
            other
        ))),
    }
}
