use apistudio_codegen::{generate_info, to_json, CodegenOptions};
use apistudio_editor::{ApiDocument, Command};
use apistudio_model::{parse, to_json as document_json};
use apistudio_validation::{validate_document, ValidationOptions};
use std::path::PathBuf;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn to_js(message: String) -> JsValue {
    JsValue::from_str(&message)
}

fn generate_info_json(source: &str, package_name: &str) -> Result<String, String> {
    let doc = parse(source).map_err(|e| format!("Parse error: {}", e))?;
    let info = generate_info(&doc, &CodegenOptions::new(package_name))
        .map_err(|e| format!("Codegen error: {}", e))?;
    to_json(&info).map_err(|e| e.to_string())
}

fn validate_json(source: &str) -> Result<String, String> {
    let doc = parse(source).map_err(|e| format!("Parse error: {}", e))?;
    let problems = validate_document(&doc, ValidationOptions::default());
    serde_json::to_string(&problems).map_err(|e| format!("Serialization error: {}", e))
}

/// Codegen description of an API document, as JSON
#[wasm_bindgen(js_name = generateInfo)]
pub fn generate_info_js(source: &str, package_name: &str) -> Result<String, JsValue> {
    generate_info_json(source, package_name).map_err(to_js)
}

/// Validation problems of an API document, as a JSON array
#[wasm_bindgen(js_name = validate)]
pub fn validate_js(source: &str) -> Result<String, JsValue> {
    validate_json(source).map_err(to_js)
}

/// One document being edited in the browser, with undo/redo
#[wasm_bindgen]
pub struct EditorSession {
    document: ApiDocument,
}

impl EditorSession {
    fn open(source: &str) -> Result<Self, String> {
        let document = ApiDocument::from_source(PathBuf::from("memory"), source)
            .map_err(|e| format!("Parse error: {}", e))?;
        Ok(Self { document })
    }

    fn apply(&mut self, command_json: &str) -> Result<(), String> {
        let command: Command =
            serde_json::from_str(command_json).map_err(|e| format!("Invalid command: {}", e))?;
        self.document.execute(command);
        Ok(())
    }

    fn document_json(&self) -> Result<String, String> {
        document_json(self.document.document()).map_err(|e| e.to_string())
    }
}

#[wasm_bindgen]
impl EditorSession {
    #[wasm_bindgen(constructor)]
    pub fn new(source: &str) -> Result<EditorSession, JsValue> {
        Self::open(source).map_err(to_js)
    }

    #[wasm_bindgen(js_name = executeCommand)]
    pub fn execute_command(&mut self, command_json: &str) -> Result<(), JsValue> {
        self.apply(command_json).map_err(to_js)
    }

    pub fn undo(&mut self) -> bool {
        self.document.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.document.redo()
    }

    /// True when there is nothing to undo
    #[wasm_bindgen(js_name = isEmpty)]
    pub fn is_empty(&self) -> bool {
        self.document.history().is_empty()
    }

    #[wasm_bindgen(js_name = canRedo)]
    pub fn can_redo(&self) -> bool {
        self.document.history().can_redo()
    }

    #[wasm_bindgen(getter)]
    pub fn version(&self) -> f64 {
        self.document.version as f64
    }

    /// Current document as JSON
    pub fn document(&self) -> Result<String, JsValue> {
        self.document_json().map_err(to_js)
    }
}
