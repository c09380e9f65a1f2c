use crate::error::{CodegenError, CodegenResult};
use crate::interfaces::find_interfaces;
use crate::options::CodegenOptions;
use crate::types::CodegenInfo;
use crate::visitor::CodegenVisitor;
use apistudio_common::traverse;
use apistudio_model::Document;
use tracing::{info, instrument};

/// Build the codegen report for a document: group paths into interfaces,
/// then turn operations into methods and definitions into beans.
#[instrument(skip(document, options), fields(package = %options.package_name))]
pub fn generate_info(document: &Document, options: &CodegenOptions) -> CodegenResult<CodegenInfo> {
    options.validate()?;

    let groups = find_interfaces(document);
    let mut visitor = CodegenVisitor::new(document, options, groups);
    traverse(document, &mut visitor);
    let (interfaces, beans) = visitor.finish()?;

    let info = document.info.as_ref();
    let report = CodegenInfo {
        name: info.and_then(|i| i.title.clone()).unwrap_or_default(),
        version: info.and_then(|i| i.version.clone()).unwrap_or_default(),
        description: info.and_then(|i| i.description.clone()),
        interfaces,
        beans,
    };
    info!(
        interfaces = report.interfaces.len(),
        beans = report.beans.len(),
        "generated codegen info"
    );
    Ok(report)
}

/// Pretty-printed JSON form of a codegen report
pub fn to_json(info: &CodegenInfo) -> CodegenResult<String> {
    serde_json::to_string_pretty(info).map_err(|e| CodegenError::Serialization(e.to_string()))
}
