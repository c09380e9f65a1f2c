//! # Node Paths
//!
//! Identity-independent addresses of nodes in a [`Document`](crate::Document).
//!
//! ```text
//! /                                    document root
//! /info                                property step
//! /paths[/pets]/get/parameters[0]      keyed and indexed steps
//! /components/schemas[Pet]
//! ```
//!
//! A path is rebuilt from the root on every use, so it stays valid across
//! undo/redo even though the nodes it points at are replaced.

use crate::document::{HttpMethod, SpecVersion};
use crate::error::{ParseError, ParseResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// One step from a node to one of its children
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Named property of a node (`/info`)
    Property(String),
    /// Key of a map entry or index of a list entry (`[/pets]`, `[0]`)
    Key(String),
}

impl Segment {
    pub fn property(name: impl Into<String>) -> Self {
        Segment::Property(name.into())
    }

    pub fn key(key: impl Into<String>) -> Self {
        Segment::Key(key.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            Segment::Property(s) | Segment::Key(s) => s,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath {
    segments: Vec<Segment>,
}

/// Properties whose children are addressed by key rather than by name
const KEYED_CONTAINERS: &[&str] = &[
    "paths",
    "definitions",
    "parameters",
    "responses",
    "securityDefinitions",
    "schemas",
    "requestBodies",
    "securitySchemes",
    "properties",
    "content",
    "tags",
];

impl NodePath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn last(&self) -> Option<&Segment> {
        self.segments.last()
    }

    pub fn parent(&self) -> Option<NodePath> {
        if self.segments.is_empty() {
            return None;
        }
        Some(self.prefix(self.segments.len() - 1))
    }

    /// First `len` steps of this path
    pub fn prefix(&self, len: usize) -> NodePath {
        Self {
            segments: self.segments[..len.min(self.segments.len())].to_vec(),
        }
    }

    pub fn starts_with(&self, other: &NodePath) -> bool {
        self.segments.starts_with(&other.segments)
    }

    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    pub fn join(&self, segment: Segment) -> NodePath {
        let mut joined = self.clone();
        joined.push(segment);
        joined
    }

    pub fn property(&self, name: impl Into<String>) -> NodePath {
        self.join(Segment::Property(name.into()))
    }

    pub fn key(&self, key: impl Into<String>) -> NodePath {
        self.join(Segment::Key(key.into()))
    }

    pub fn index(&self, index: usize) -> NodePath {
        self.join(Segment::Key(index.to_string()))
    }

    /// Replace the last step's key (used when re-keying a node)
    pub fn with_last_key(&self, key: impl Into<String>) -> Option<NodePath> {
        let mut renamed = self.parent()?;
        renamed.push(Segment::Key(key.into()));
        Some(renamed)
    }

    pub fn paths() -> NodePath {
        NodePath::root().property("paths")
    }

    pub fn path_item(path: &str) -> NodePath {
        NodePath::paths().key(path)
    }

    pub fn operation(path: &str, method: HttpMethod) -> NodePath {
        NodePath::path_item(path).property(method.as_str())
    }

    /// Container holding schema definitions for the given dialect
    pub fn schema_definitions(version: SpecVersion) -> NodePath {
        match version {
            SpecVersion::Swagger2 => NodePath::root().property("definitions"),
            SpecVersion::OpenApi3 => NodePath::root().property("components").property("schemas"),
        }
    }

    pub fn schema_definition(version: SpecVersion, name: &str) -> NodePath {
        NodePath::schema_definitions(version).key(name)
    }

    pub fn security_schemes(version: SpecVersion) -> NodePath {
        match version {
            SpecVersion::Swagger2 => NodePath::root().property("securityDefinitions"),
            SpecVersion::OpenApi3 => NodePath::root()
                .property("components")
                .property("securitySchemes"),
        }
    }

    pub fn security_scheme(version: SpecVersion, name: &str) -> NodePath {
        NodePath::security_schemes(version).key(name)
    }

    pub fn tags() -> NodePath {
        NodePath::root().property("tags")
    }

    /// Path item key and method when this path addresses an operation or
    /// something inside one
    pub fn operation_location(&self) -> Option<(&str, HttpMethod)> {
        match self.segments.as_slice() {
            [Segment::Property(paths), Segment::Key(path), Segment::Property(method), ..]
                if paths == "paths" =>
            {
                method.parse().ok().map(|m| (path.as_str(), m))
            }
            _ => None,
        }
    }

    /// Path item key when this path addresses a path item or something inside one
    pub fn path_item_key(&self) -> Option<&str> {
        match self.segments.as_slice() {
            [Segment::Property(paths), Segment::Key(path), ..] if paths == "paths" => {
                Some(path.as_str())
            }
            _ => None,
        }
    }

    /// Convert a local JSON reference (`#/definitions/Pet`) into a node path
    pub fn from_reference(reference: &str) -> Option<NodePath> {
        let pointer = reference.strip_prefix('#')?;
        if pointer.is_empty() {
            return Some(NodePath::root());
        }
        let pointer = pointer.strip_prefix('/')?;

        let mut path = NodePath::root();
        let mut after_container = false;
        for token in pointer.split('/') {
            let token = token.replace("~1", "/").replace("~0", "~");
            if after_container {
                path.push(Segment::Key(token));
                after_container = false;
            } else {
                after_container = KEYED_CONTAINERS.contains(&token.as_str());
                path.push(Segment::Property(token));
            }
        }
        Some(path)
    }

    /// Inverse of [`NodePath::from_reference`]
    pub fn to_reference(&self) -> String {
        let mut reference = String::from("#");
        for segment in &self.segments {
            reference.push('/');
            reference.push_str(&segment.as_str().replace('~', "~0").replace('/', "~1"));
        }
        reference
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            match segment {
                Segment::Property(name) => write!(f, "/{}", name)?,
                Segment::Key(key) => {
                    f.write_str("[")?;
                    for c in key.chars() {
                        if c == ']' || c == '\\' {
                            f.write_str("\\")?;
                        }
                        write!(f, "{}", c)?;
                    }
                    f.write_str("]")?;
                }
            }
        }
        Ok(())
    }
}

impl FromStr for NodePath {
    type Err = ParseError;

    fn from_str(s: &str) -> ParseResult<Self> {
        if s == "/" {
            return Ok(NodePath::root());
        }
        if !s.starts_with('/') {
            return Err(ParseError::invalid_node_path(s, "must start with '/'"));
        }

        let bytes = s.as_bytes();
        let mut segments = Vec::new();
        let mut pos = 0;

        while pos < bytes.len() {
            match bytes[pos] {
                b'/' => {
                    let start = pos + 1;
                    let end = s[start..]
                        .find(|c| c == '/' || c == '[')
                        .map(|i| start + i)
                        .unwrap_or(s.len());
                    if end == start {
                        return Err(ParseError::invalid_node_path(s, "empty property name"));
                    }
                    segments.push(Segment::Property(s[start..end].to_string()));
                    pos = end;
                }
                b'[' => {
                    let (key, end) = parse_key(s, pos + 1)
                        .ok_or_else(|| ParseError::invalid_node_path(s, "unterminated '['"))?;
                    segments.push(Segment::Key(key));
                    pos = end + 1;
                }
                _ => {
                    return Err(ParseError::invalid_node_path(
                        s,
                        format!("unexpected character at {}", pos),
                    ))
                }
            }
        }

        Ok(NodePath { segments })
    }
}

/// Read a key starting after its `[`. A backslash escapes the next
/// character, so keys may hold `]`. Returns the key and the index of the
/// closing `]`.
fn parse_key(s: &str, start: usize) -> Option<(String, usize)> {
    let mut key = String::new();
    let mut chars = s[start..].char_indices();
    while let Some((offset, c)) = chars.next() {
        match c {
            '\\' => key.push(chars.next()?.1),
            ']' => return Some((key, start + offset)),
            other => key.push(other),
        }
    }
    None
}

impl Serialize for NodePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NodePath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
