//! # API Studio Document Model
//!
//! Typed, in-memory representation of OpenAPI 2.0 and 3.x documents, plus
//! the addressing scheme ([`NodePath`]) that commands and visitors use to
//! refer to nodes without holding references into the tree.
//!
//! ```text
//! source (JSON/YAML) ──parse──▶ Document ──serialize──▶ source
//!                                  │
//!                    NodePath ──resolve──▶ NodeRef / NodeMut
//!                                  │
//!                  detach / attach / ensure_containers
//! ```

pub mod collection;
pub mod document;
pub mod error;
pub mod node;
pub mod node_path;
pub mod parser;
pub mod properties;
pub mod schema;
pub mod serializer;

/// Ordered map used for every keyed collection in the model.
pub type Map<K, V> = indexmap::IndexMap<K, V>;

pub use collection::Detached;
pub use document::{
    Components, Contact, Document, Extra, HttpMethod, Info, License, MediaType, Operation,
    Parameter, ParameterLocation, PathItem, RequestBody, Response, SecurityRequirement,
    SecurityScheme, SpecVersion, Tag,
};
pub use error::{ParseError, ParseResult};
pub use node::{Node, NodeKind, NodeMut, NodeRef};
pub use node_path::{NodePath, Segment};
pub use parser::{from_value, parse, parse_json, parse_value, parse_yaml, SourceFormat};
pub use schema::{Schema, SimplifiedType};
pub use serializer::{serialize, to_json, to_yaml};
