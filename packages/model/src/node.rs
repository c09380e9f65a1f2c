//! # Node Views
//!
//! Three parallel sum types over every addressable node kind:
//!
//! - [`Node`]: an owned, detached node (captured by commands)
//! - [`NodeRef`]: a shared borrow into a document
//! - [`NodeMut`]: an exclusive borrow into a document
//!
//! Resolution walks a [`NodePath`] from the root one [`Segment`] at a time.

use crate::document::*;
use crate::node_path::{NodePath, Segment};
use crate::schema::Schema;
use crate::Map;
use serde::{Deserialize, Serialize};

macro_rules! node_kinds {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        /// Kind tag shared by the three node views
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum NodeKind {
            $($variant),*
        }

        /// Owned node, detached from any document
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(tag = "kind", content = "value")]
        pub enum Node {
            $($variant($ty)),*
        }

        /// Shared reference to a node inside a document
        #[derive(Debug, Clone, Copy)]
        pub enum NodeRef<'a> {
            $($variant(&'a $ty)),*
        }

        /// Exclusive reference to a node inside a document
        #[derive(Debug)]
        pub enum NodeMut<'a> {
            $($variant(&'a mut $ty)),*
        }

        $(
            impl From<$ty> for Node {
                fn from(value: $ty) -> Self {
                    Node::$variant(value)
                }
            }

            impl TryFrom<Node> for $ty {
                type Error = Node;

                fn try_from(node: Node) -> Result<Self, Node> {
                    match node {
                        Node::$variant(value) => Ok(value),
                        other => Err(other),
                    }
                }
            }
        )*

        impl Node {
            pub fn kind(&self) -> NodeKind {
                match self {
                    $(Node::$variant(_) => NodeKind::$variant),*
                }
            }

            pub fn as_ref(&self) -> NodeRef<'_> {
                match self {
                    $(Node::$variant(n) => NodeRef::$variant(n)),*
                }
            }
        }

        impl<'a> NodeRef<'a> {
            pub fn kind(&self) -> NodeKind {
                match self {
                    $(NodeRef::$variant(_) => NodeKind::$variant),*
                }
            }

            /// Clone the referenced node out of the document
            pub fn to_node(&self) -> Node {
                match self {
                    $(NodeRef::$variant(n) => Node::$variant((*n).clone())),*
                }
            }

            /// Same kind and same address
            pub fn is_same(&self, other: &NodeRef<'_>) -> bool {
                self.kind() == other.kind() && self.addr() == other.addr()
            }

            fn addr(&self) -> *const () {
                match self {
                    $(NodeRef::$variant(n) => *n as *const $ty as *const ()),*
                }
            }
        }

        impl<'a> NodeMut<'a> {
            pub fn kind(&self) -> NodeKind {
                match self {
                    $(NodeMut::$variant(_) => NodeKind::$variant),*
                }
            }

            pub fn as_ref(&self) -> NodeRef<'_> {
                match self {
                    $(NodeMut::$variant(n) => NodeRef::$variant(n)),*
                }
            }
        }
    };
}

node_kinds! {
    Document(Document),
    Info(Info),
    Contact(Contact),
    License(License),
    Tags(Vec<Tag>),
    Tag(Tag),
    Paths(Map<String, PathItem>),
    PathItem(PathItem),
    Operation(Operation),
    Parameters(Vec<Parameter>),
    ParameterDefinitions(Map<String, Parameter>),
    Parameter(Parameter),
    RequestBodies(Map<String, RequestBody>),
    RequestBody(RequestBody),
    Content(Map<String, MediaType>),
    MediaType(MediaType),
    Responses(Map<String, Response>),
    Response(Response),
    Schemas(Map<String, Schema>),
    Schema(Schema),
    Components(Components),
    SecuritySchemes(Map<String, SecurityScheme>),
    SecurityScheme(SecurityScheme),
}

impl NodeKind {
    /// Kinds that are pure collections and may be created empty on demand
    pub fn is_collection(&self) -> bool {
        matches!(
            self,
            NodeKind::Tags
                | NodeKind::Paths
                | NodeKind::Parameters
                | NodeKind::ParameterDefinitions
                | NodeKind::RequestBodies
                | NodeKind::Content
                | NodeKind::Responses
                | NodeKind::Schemas
                | NodeKind::SecuritySchemes
        )
    }
}

fn keyed<'a, V>(
    map: &'a Map<String, V>,
    wrap: fn(&'a V) -> NodeRef<'a>,
) -> Vec<(Segment, NodeRef<'a>)> {
    map.iter().map(|(k, v)| (Segment::Key(k.clone()), wrap(v))).collect()
}

fn indexed<'a, V>(list: &'a [V], wrap: fn(&'a V) -> NodeRef<'a>) -> Vec<(Segment, NodeRef<'a>)> {
    list.iter()
        .enumerate()
        .map(|(i, v)| (Segment::Key(i.to_string()), wrap(v)))
        .collect()
}

fn prop<'a, V: 'a>(
    name: &str,
    value: Option<&'a V>,
    wrap: fn(&'a V) -> NodeRef<'a>,
) -> Option<(Segment, NodeRef<'a>)> {
    value.map(|v| (Segment::Property(name.to_string()), wrap(v)))
}

impl<'a> NodeRef<'a> {
    /// Direct children in document order, each with the step that reaches it
    pub fn children(&self) -> Vec<(Segment, NodeRef<'a>)> {
        match *self {
            NodeRef::Document(d) => [
                prop("info", d.info.as_ref(), NodeRef::Info),
                prop("paths", d.paths.as_ref(), NodeRef::Paths),
                prop("definitions", d.definitions.as_ref(), NodeRef::Schemas),
                prop("parameters", d.parameters.as_ref(), NodeRef::ParameterDefinitions),
                prop("responses", d.responses.as_ref(), NodeRef::Responses),
                prop(
                    "securityDefinitions",
                    d.security_definitions.as_ref(),
                    NodeRef::SecuritySchemes,
                ),
                prop("components", d.components.as_ref(), NodeRef::Components),
                prop("tags", d.tags.as_ref(), NodeRef::Tags),
            ]
            .into_iter()
            .flatten()
            .collect(),
            NodeRef::Info(i) => [
                prop("contact", i.contact.as_ref(), NodeRef::Contact),
                prop("license", i.license.as_ref(), NodeRef::License),
            ]
            .into_iter()
            .flatten()
            .collect(),
            NodeRef::Tags(tags) => indexed(tags, NodeRef::Tag),
            NodeRef::Paths(paths) => keyed(paths, NodeRef::PathItem),
            NodeRef::PathItem(item) => {
                let mut children: Vec<_> =
                    prop("parameters", item.parameters.as_ref(), NodeRef::Parameters)
                        .into_iter()
                        .collect();
                children.extend(item.operations().map(|(method, op)| {
                    (Segment::Property(method.as_str().to_string()), NodeRef::Operation(op))
                }));
                children
            }
            NodeRef::Operation(op) => [
                prop("parameters", op.parameters.as_ref(), NodeRef::Parameters),
                prop("requestBody", op.request_body.as_ref(), NodeRef::RequestBody),
                prop("responses", op.responses.as_ref(), NodeRef::Responses),
            ]
            .into_iter()
            .flatten()
            .collect(),
            NodeRef::Parameters(params) => indexed(params, NodeRef::Parameter),
            NodeRef::ParameterDefinitions(params) => keyed(params, NodeRef::Parameter),
            NodeRef::Parameter(param) => [
                prop("schema", param.schema.as_ref(), NodeRef::Schema),
                prop("items", param.items.as_deref(), NodeRef::Schema),
            ]
            .into_iter()
            .flatten()
            .collect(),
            NodeRef::RequestBodies(bodies) => keyed(bodies, NodeRef::RequestBody),
            NodeRef::RequestBody(body) => prop("content", body.content.as_ref(), NodeRef::Content)
                .into_iter()
                .collect(),
            NodeRef::Content(content) => keyed(content, NodeRef::MediaType),
            NodeRef::MediaType(media) => prop("schema", media.schema.as_ref(), NodeRef::Schema)
                .into_iter()
                .collect(),
            NodeRef::Responses(responses) => keyed(responses, NodeRef::Response),
            NodeRef::Response(response) => [
                prop("schema", response.schema.as_ref(), NodeRef::Schema),
                prop("content", response.content.as_ref(), NodeRef::Content),
            ]
            .into_iter()
            .flatten()
            .collect(),
            NodeRef::Schemas(schemas) => keyed(schemas, NodeRef::Schema),
            NodeRef::Schema(schema) => [
                prop("items", schema.items.as_deref(), NodeRef::Schema),
                prop("properties", schema.properties.as_ref(), NodeRef::Schemas),
            ]
            .into_iter()
            .flatten()
            .collect(),
            NodeRef::Components(c) => [
                prop("schemas", c.schemas.as_ref(), NodeRef::Schemas),
                prop("responses", c.responses.as_ref(), NodeRef::Responses),
                prop("parameters", c.parameters.as_ref(), NodeRef::ParameterDefinitions),
                prop("requestBodies", c.request_bodies.as_ref(), NodeRef::RequestBodies),
                prop("securitySchemes", c.security_schemes.as_ref(), NodeRef::SecuritySchemes),
            ]
            .into_iter()
            .flatten()
            .collect(),
            NodeRef::SecuritySchemes(schemes) => keyed(schemes, NodeRef::SecurityScheme),
            NodeRef::Contact(_)
            | NodeRef::License(_)
            | NodeRef::Tag(_)
            | NodeRef::SecurityScheme(_) => Vec::new(),
        }
    }

    /// Follow one step
    pub fn child(&self, segment: &Segment) -> Option<NodeRef<'a>> {
        self.children()
            .into_iter()
            .find(|(step, _)| step == segment)
            .map(|(_, node)| node)
    }

    /// Follow every step of `path` starting from this node
    pub fn resolve(self, path: &NodePath) -> Option<NodeRef<'a>> {
        path.segments()
            .iter()
            .try_fold(self, |node, segment| node.child(segment))
    }
}

fn slot<T: Default>(slot: &mut Option<T>, create: bool) -> Option<&mut T> {
    if create {
        Some(slot.get_or_insert_with(T::default))
    } else {
        slot.as_mut()
    }
}

fn list_entry<'a, V>(list: &'a mut [V], key: &str) -> Option<&'a mut V> {
    key.parse::<usize>().ok().and_then(move |i| list.get_mut(i))
}

impl<'a> NodeMut<'a> {
    /// Follow one step. With `create`, missing collection and container
    /// properties (`paths`, `definitions`, `components`, `info`, ...) are
    /// materialized empty on the way. Named entries are never created.
    pub fn child(self, segment: &Segment, create: bool) -> Option<NodeMut<'a>> {
        use crate::node_path::Segment::{Key, Property};

        match (self, segment) {
            (NodeMut::Document(d), Property(p)) => match p.as_str() {
                "info" => slot(&mut d.info, create).map(NodeMut::Info),
                "paths" => slot(&mut d.paths, create).map(NodeMut::Paths),
                "definitions" => slot(&mut d.definitions, create).map(NodeMut::Schemas),
                "parameters" => slot(&mut d.parameters, create).map(NodeMut::ParameterDefinitions),
                "responses" => slot(&mut d.responses, create).map(NodeMut::Responses),
                "securityDefinitions" => {
                    slot(&mut d.security_definitions, create).map(NodeMut::SecuritySchemes)
                }
                "components" => slot(&mut d.components, create).map(NodeMut::Components),
                "tags" => slot(&mut d.tags, create).map(NodeMut::Tags),
                _ => None,
            },
            (NodeMut::Info(i), Property(p)) => match p.as_str() {
                "contact" => slot(&mut i.contact, create).map(NodeMut::Contact),
                "license" => slot(&mut i.license, create).map(NodeMut::License),
                _ => None,
            },
            (NodeMut::Tags(tags), Key(k)) => list_entry(tags, k).map(NodeMut::Tag),
            (NodeMut::Paths(paths), Key(k)) => paths.get_mut(k).map(NodeMut::PathItem),
            (NodeMut::PathItem(item), Property(p)) => {
                if p == "parameters" {
                    return slot(&mut item.parameters, create).map(NodeMut::Parameters);
                }
                let method = p.parse::<HttpMethod>().ok()?;
                item.operation_slot(method).as_mut().map(NodeMut::Operation)
            }
            (NodeMut::Operation(op), Property(p)) => match p.as_str() {
                "parameters" => slot(&mut op.parameters, create).map(NodeMut::Parameters),
                "requestBody" => op.request_body.as_mut().map(NodeMut::RequestBody),
                "responses" => slot(&mut op.responses, create).map(NodeMut::Responses),
                _ => None,
            },
            (NodeMut::Parameters(params), Key(k)) => list_entry(params, k).map(NodeMut::Parameter),
            (NodeMut::ParameterDefinitions(params), Key(k)) => {
                params.get_mut(k).map(NodeMut::Parameter)
            }
            (NodeMut::Parameter(param), Property(p)) => match p.as_str() {
                "schema" => param.schema.as_mut().map(NodeMut::Schema),
                "items" => param.items.as_deref_mut().map(NodeMut::Schema),
                _ => None,
            },
            (NodeMut::RequestBodies(bodies), Key(k)) => bodies.get_mut(k).map(NodeMut::RequestBody),
            (NodeMut::RequestBody(body), Property(p)) if p == "content" => {
                slot(&mut body.content, create).map(NodeMut::Content)
            }
            (NodeMut::Content(content), Key(k)) => content.get_mut(k).map(NodeMut::MediaType),
            (NodeMut::MediaType(media), Property(p)) if p == "schema" => {
                media.schema.as_mut().map(NodeMut::Schema)
            }
            (NodeMut::Responses(responses), Key(k)) => responses.get_mut(k).map(NodeMut::Response),
            (NodeMut::Response(response), Property(p)) => match p.as_str() {
                "schema" => response.schema.as_mut().map(NodeMut::Schema),
                "content" => slot(&mut response.content, create).map(NodeMut::Content),
                _ => None,
            },
            (NodeMut::Schemas(schemas), Key(k)) => schemas.get_mut(k).map(NodeMut::Schema),
            (NodeMut::Schema(schema), Property(p)) => match p.as_str() {
                "items" => schema.items.as_deref_mut().map(NodeMut::Schema),
                "properties" => slot(&mut schema.properties, create).map(NodeMut::Schemas),
                _ => None,
            },
            (NodeMut::Components(c), Property(p)) => match p.as_str() {
                "schemas" => slot(&mut c.schemas, create).map(NodeMut::Schemas),
                "responses" => slot(&mut c.responses, create).map(NodeMut::Responses),
                "parameters" => slot(&mut c.parameters, create).map(NodeMut::ParameterDefinitions),
                "requestBodies" => slot(&mut c.request_bodies, create).map(NodeMut::RequestBodies),
                "securitySchemes" => {
                    slot(&mut c.security_schemes, create).map(NodeMut::SecuritySchemes)
                }
                _ => None,
            },
            (NodeMut::SecuritySchemes(schemes), Key(k)) => {
                schemes.get_mut(k).map(NodeMut::SecurityScheme)
            }
            _ => None,
        }
    }

    pub fn resolve(self, path: &NodePath, create: bool) -> Option<NodeMut<'a>> {
        path.segments()
            .iter()
            .try_fold(self, |node, segment| node.child(segment, create))
    }
}

impl Document {
    /// Resolve a node path; `None` when any step is missing
    pub fn resolve(&self, path: &NodePath) -> Option<NodeRef<'_>> {
        NodeRef::Document(self).resolve(path)
    }

    pub fn resolve_mut(&mut self, path: &NodePath) -> Option<NodeMut<'_>> {
        NodeMut::Document(self).resolve(path, false)
    }

    /// Resolve a local `$ref` (`#/definitions/Pet`) within this document
    pub fn resolve_reference(&self, reference: &str) -> Option<NodeRef<'_>> {
        self.resolve(&NodePath::from_reference(reference)?)
    }

    /// Follow a parameter's local `$ref`. Inline parameters resolve to
    /// themselves; references to anything but a parameter yield `None`.
    pub fn resolve_parameter<'a>(&'a self, param: &'a Parameter) -> Option<&'a Parameter> {
        match &param.reference {
            None => Some(param),
            Some(reference) => match self.resolve_reference(reference)? {
                NodeRef::Parameter(target) => Some(target),
                _ => None,
            },
        }
    }
}
