//! # API Studio Codegen
//!
//! Turns an API document into a normalized description of Java interfaces
//! and beans, ready for a template engine.
//!
//! ## Passes
//!
//! - **Interfaces**: path items are grouped by their first path segment
//!   (`/pets/{id}` joins `PetsResource`)
//! - **Methods and beans**: each operation becomes a method of its group;
//!   each schema definition becomes a bean
//!
//! ## Example
//!
//! ```rust
//! use apistudio_codegen::{generate_info, CodegenOptions};
//! use apistudio_model::parse_yaml;
//!
//! let doc = parse_yaml(r#"
//! swagger: "2.0"
//! info: {title: Pets, version: "1.0"}
//! paths:
//!   /pets:
//!     get:
//!       summary: Get all pets
//!       responses: {"200": {description: OK}}
//! "#).unwrap();
//!
//! let info = generate_info(&doc, &CodegenOptions::new("org.pets")).unwrap();
//! assert_eq!(info.interfaces[0].name, "PetsResource");
//! assert_eq!(info.interfaces[0].methods[0].name, "getAllPets");
//! ```

pub mod error;
pub mod generator;
pub mod interfaces;
pub mod options;
pub mod types;
mod visitor;

pub use error::{CodegenError, CodegenResult};
pub use generator::{generate_info, to_json};
pub use interfaces::{find_interfaces, interface_for_path, InterfaceGroup, ROOT_INTERFACE};
pub use options::CodegenOptions;
pub use types::{CodegenArgument, CodegenBean, CodegenInfo, CodegenInterface, CodegenMethod, CodegenType};
pub use visitor::camel_case_summary;
