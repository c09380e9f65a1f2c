//! Second codegen pass: turn operations into interface methods and schema
//! definitions into beans.

use crate::error::CodegenError;
use crate::interfaces::{interface_for_path, InterfaceGroup};
use crate::options::CodegenOptions;
use crate::types::{CodegenArgument, CodegenBean, CodegenInterface, CodegenMethod, CodegenType};
use apistudio_common::{walk_operation, Visitor};
use apistudio_model::{
    Document, NodePath, NodeRef, Operation, Parameter, ParameterLocation,
    RequestBody, Response, Schema, Segment, SpecVersion,
};
use std::collections::HashMap;
use tracing::debug;

/// Method name from a summary: words joined in camel case. Only the first
/// letter is lower-cased; the rest of each word keeps its case.
pub fn camel_case_summary(summary: &str) -> Option<String> {
    let mut name = String::new();
    let words = summary
        .split_whitespace()
        .map(|word| word.chars().filter(|c| c.is_alphanumeric()).collect::<String>())
        .filter(|word| !word.is_empty());

    for word in words {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            if name.is_empty() {
                name.extend(first.to_lowercase());
            } else {
                name.extend(first.to_uppercase());
            }
            name.push_str(chars.as_str());
        }
    }
    (!name.is_empty()).then_some(name)
}

fn is_success(code: &str) -> bool {
    code.len() == 3 && code.starts_with('2')
}

pub(crate) struct CodegenVisitor<'a> {
    doc: &'a Document,
    beans_package: String,
    definitions: NodePath,
    interfaces: Vec<CodegenInterface>,
    /// Interface index by path template
    lookup: HashMap<String, usize>,
    beans: Vec<CodegenBean>,
    generated_names: usize,
    current: Option<CodegenMethod>,
    error: Option<CodegenError>,
}

impl<'a> CodegenVisitor<'a> {
    pub fn new(doc: &'a Document, options: &'a CodegenOptions, groups: Vec<InterfaceGroup>) -> Self {
        let mut lookup = HashMap::new();
        let mut interfaces = Vec::with_capacity(groups.len());
        for (index, group) in groups.into_iter().enumerate() {
            for path in group.paths {
                lookup.insert(path, index);
            }
            interfaces.push(CodegenInterface {
                name: group.name,
                package: options.package_name.clone(),
                path: group.path,
                methods: Vec::new(),
            });
        }

        Self {
            doc,
            beans_package: options.beans_package(),
            definitions: NodePath::schema_definitions(doc.spec_version()),
            interfaces,
            lookup,
            beans: Vec::new(),
            generated_names: 0,
            current: None,
            error: None,
        }
    }

    pub fn finish(self) -> Result<(Vec<CodegenInterface>, Vec<CodegenBean>), CodegenError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok((self.interfaces, self.beans)),
        }
    }

    fn method_name(&mut self, op: &Operation) -> String {
        if let Some(id) = op.operation_id.as_deref().filter(|id| !id.is_empty()) {
            return id.to_string();
        }
        if let Some(name) = op.summary.as_deref().and_then(camel_case_summary) {
            return name;
        }
        self.generated_names += 1;
        format!("generatedMethod{}", self.generated_names)
    }

    fn schema_type(&self, schema: &Schema) -> CodegenType {
        if let Some(name) = schema.ref_name() {
            return CodegenType {
                type_: Some(format!("{}.{}", self.beans_package, name)),
                ..Default::default()
            };
        }
        if schema.is_array() {
            let item = schema
                .items
                .as_deref()
                .map(|items| self.schema_type(items))
                .unwrap_or_default();
            return CodegenType {
                collection: Some("list".to_string()),
                ..item
            };
        }
        CodegenType {
            type_: schema.type_.clone(),
            format: schema.format.clone(),
            collection: None,
        }
    }

    fn parameter_argument(&self, param: &Parameter) -> Option<CodegenArgument> {
        let param = self.doc.resolve_parameter(param)?;
        let location = param.in_?;
        let type_ = match &param.schema {
            Some(schema) => self.schema_type(schema),
            None => self.schema_type(&Schema {
                type_: param.type_.clone(),
                format: param.format.clone(),
                items: param.items.clone(),
                ..Default::default()
            }),
        };
        Some(CodegenArgument {
            name: param.name.clone()?,
            in_: location.as_str().to_string(),
            required: location == ParameterLocation::Path || param.required == Some(true),
            type_,
        })
    }

    fn inherited_arguments(&self, path: &str) -> Vec<CodegenArgument> {
        self.doc
            .path_item(path)
            .and_then(|item| item.parameters.as_ref())
            .into_iter()
            .flatten()
            .filter_map(|param| self.parameter_argument(param))
            .collect()
    }

    /// Payload schema of a response in either dialect, with its media types
    fn response_payload<'r>(&self, response: &'r Response) -> Option<(&'r Schema, Vec<String>)> {
        if let Some(schema) = &response.schema {
            return Some((schema, Vec::new()));
        }
        let content = response.content.as_ref()?;
        let schema = content.values().find_map(|media| media.schema.as_ref())?;
        Some((schema, content.keys().cloned().collect()))
    }
}

impl Visitor for CodegenVisitor<'_> {
    fn visit_operation(&mut self, path: &NodePath, op: &Operation) {
        let Some((key, method)) = path.operation_location() else {
            return;
        };
        let Some(&index) = self.lookup.get(key) else {
            debug!(path = %path, "operation outside any interface");
            return;
        };

        let base = self.interfaces[index].path.as_str();
        let method_path = if key == base {
            None
        } else if base == "/" {
            Some(key.to_string())
        } else {
            // Keys outside the base keep their full template
            Some(key.strip_prefix(base).unwrap_or(key).to_string())
        };

        let (produces, consumes) = match self.doc.spec_version() {
            SpecVersion::Swagger2 => (
                op.produces.clone().or_else(|| self.doc.produces.clone()).unwrap_or_default(),
                op.consumes.clone().or_else(|| self.doc.consumes.clone()).unwrap_or_default(),
            ),
            SpecVersion::OpenApi3 => (Vec::new(), Vec::new()),
        };

        let name = self.method_name(op);
        self.current = Some(CodegenMethod {
            name,
            path: method_path,
            method: method.as_str().to_uppercase(),
            produces,
            consumes,
            description: op.description.clone(),
            arguments: Vec::new(),
            return_: None,
        });
        walk_operation(self, path, op);

        let Some(mut built) = self.current.take() else {
            return;
        };
        // Path-item parameters apply to every operation unless redeclared
        let mut arguments: Vec<_> = self
            .inherited_arguments(key)
            .into_iter()
            .filter(|inherited| {
                !built
                    .arguments
                    .iter()
                    .any(|own| own.name == inherited.name && own.in_ == inherited.in_)
            })
            .collect();
        arguments.append(&mut built.arguments);
        built.arguments = arguments;

        debug!(method = %built.name, http = %method, "generated method");
        self.interfaces[index].methods.push(built);
    }

    fn visit_parameter(&mut self, _path: &NodePath, param: &Parameter) {
        // Path-item parameters are met outside any operation and re-applied later
        if self.current.is_none() {
            return;
        }
        let argument = self.parameter_argument(param);
        if let (Some(method), Some(argument)) = (self.current.as_mut(), argument) {
            method.arguments.push(argument);
        }
    }

    fn visit_request_body(&mut self, _path: &NodePath, body: &RequestBody) {
        if self.current.is_none() {
            return;
        }
        let body = match &body.reference {
            None => body,
            Some(reference) => match self.doc.resolve_reference(reference) {
                Some(NodeRef::RequestBody(target)) => target,
                _ => return,
            },
        };
        let Some(content) = &body.content else {
            return;
        };
        let type_ = content
            .values()
            .find_map(|media| media.schema.as_ref())
            .map(|schema| self.schema_type(schema))
            .unwrap_or_default();

        if let Some(method) = self.current.as_mut() {
            if method.consumes.is_empty() {
                method.consumes = content.keys().cloned().collect();
            }
            method.arguments.push(CodegenArgument {
                name: "data".to_string(),
                in_: "body".to_string(),
                required: body.required == Some(true),
                type_,
            });
        }
    }

    fn visit_response(&mut self, path: &NodePath, response: &Response) {
        let Some(Segment::Key(code)) = path.last() else {
            return;
        };
        if !is_success(code) || self.current.as_ref().map_or(true, |m| m.return_.is_some()) {
            return;
        }
        let response = match &response.reference {
            None => response,
            Some(reference) => match self.doc.resolve_reference(reference) {
                Some(NodeRef::Response(target)) => target,
                _ => return,
            },
        };
        // Only the first success response with a payload is the return type
        let Some((schema, media_types)) = self.response_payload(response) else {
            return;
        };
        let type_ = self.schema_type(schema);
        if let Some(method) = self.current.as_mut() {
            method.return_ = Some(type_);
            if method.produces.is_empty() {
                method.produces = media_types;
            }
        }
    }

    fn visit_schema(&mut self, path: &NodePath, schema: &Schema) {
        if path.parent().as_ref() != Some(&self.definitions) {
            return;
        }
        let Some(Segment::Key(name)) = path.last() else {
            return;
        };
        match serde_json::to_value(schema) {
            Ok(body) => self.beans.push(CodegenBean {
                name: name.clone(),
                package: self.beans_package.clone(),
                schema: body,
            }),
            Err(e) => {
                self.error
                    .get_or_insert_with(|| CodegenError::Serialization(e.to_string()));
            }
        }
    }
}
