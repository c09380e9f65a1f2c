use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Normalized description of an API for Java code generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodegenInfo {
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub interfaces: Vec<CodegenInterface>,
    pub beans: Vec<CodegenBean>,
}

/// One generated JAX-RS style interface: a resource group of paths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodegenInterface {
    pub name: String,
    pub package: String,
    /// Base path shared by every method of the interface
    pub path: String,
    pub methods: Vec<CodegenMethod>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodegenMethod {
    pub name: String,
    /// Path relative to the interface base path; absent when equal to it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Upper-case HTTP method
    pub method: String,
    pub produces: Vec<String>,
    pub consumes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub arguments: Vec<CodegenArgument>,
    #[serde(rename = "return", default, skip_serializing_if = "Option::is_none")]
    pub return_: Option<CodegenType>,
}

/// Java-facing type of an argument or return value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodegenType {
    /// Primitive type name, or the fully-qualified bean name for a `$ref`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// `list` when the value is an array of `type`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
}

impl CodegenType {
    pub fn is_empty(&self) -> bool {
        self.type_.is_none() && self.format.is_none() && self.collection.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodegenArgument {
    pub name: String,
    #[serde(rename = "in")]
    pub in_: String,
    pub required: bool,
    #[serde(flatten)]
    pub type_: CodegenType,
}

/// A schema definition to generate a bean class from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodegenBean {
    pub name: String,
    pub package: String,
    #[serde(rename = "$schema")]
    pub schema: Value,
}
