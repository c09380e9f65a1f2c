//! Structural edits: removing a node from its parent and putting one back.
//!
//! Both operations address nodes by [`NodePath`]. Keyed entries remember
//! their position so a detach followed by an attach restores map order.

use crate::document::{Document, HttpMethod};
use crate::node::{Node, NodeMut};
use crate::node_path::{NodePath, Segment};
use crate::schema::Schema;
use crate::Map;
use serde::{Deserialize, Serialize};
use std::mem;

/// A node removed from a document, with where it sat in its parent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detached {
    pub node: Node,
    /// Index within the parent map or list; 0 for property slots
    pub position: usize,
}

impl Document {
    /// Remove the node at `path`. Detaching the root takes the whole
    /// document and leaves an empty one behind.
    pub fn detach(&mut self, path: &NodePath) -> Option<Detached> {
        let Some(parent) = path.parent() else {
            return Some(Detached {
                node: Node::Document(mem::take(self)),
                position: 0,
            });
        };
        let segment = path.last()?;
        take_child(self.resolve_mut(&parent)?, segment)
    }

    /// Put `node` at `path`. Fails (handing the node back) when the parent
    /// is missing, the slot is occupied, or the node kind does not fit.
    /// `position` places keyed entries; `None` appends.
    pub fn attach(
        &mut self,
        path: &NodePath,
        node: Node,
        position: Option<usize>,
    ) -> Result<(), Node> {
        let Some(parent) = path.parent() else {
            *self = Document::try_from(node)?;
            return Ok(());
        };
        let Some(segment) = path.last() else {
            return Err(node);
        };
        match self.resolve_mut(&parent) {
            Some(parent) => put_child(parent, segment, node, position),
            None => Err(node),
        }
    }

    /// Materialize missing containers along `path`.
    ///
    /// Returns `None` when the path cannot be built (a named entry on the
    /// way is missing), otherwise the outermost container that had to be
    /// created, if any. Undo detaches that one path.
    pub fn ensure_containers(&mut self, path: &NodePath) -> Option<Option<NodePath>> {
        let missing = (1..=path.len())
            .map(|len| path.prefix(len))
            .find(|prefix| self.resolve(prefix).is_none());

        let Some(first_missing) = missing else {
            return Some(None);
        };

        if NodeMut::Document(self).resolve(path, true).is_some() {
            Some(Some(first_missing))
        } else {
            self.detach(&first_missing);
            None
        }
    }
}

fn take_slot<T: Into<Node>>(slot: &mut Option<T>) -> Option<Detached> {
    slot.take().map(|value| Detached {
        node: value.into(),
        position: 0,
    })
}

fn take_boxed(slot: &mut Option<Box<Schema>>) -> Option<Detached> {
    slot.take().map(|schema| Detached {
        node: Node::Schema(*schema),
        position: 0,
    })
}

fn take_keyed<V: Into<Node>>(map: &mut Map<String, V>, key: &str) -> Option<Detached> {
    map.shift_remove_full(key)
        .map(|(position, _, value)| Detached {
            node: value.into(),
            position,
        })
}

fn take_indexed<V: Into<Node>>(list: &mut Vec<V>, key: &str) -> Option<Detached> {
    let position = key.parse::<usize>().ok().filter(|i| *i < list.len())?;
    Some(Detached {
        node: list.remove(position).into(),
        position,
    })
}

fn take_child(parent: NodeMut<'_>, segment: &Segment) -> Option<Detached> {
    use crate::node_path::Segment::{Key, Property};

    match (parent, segment) {
        (NodeMut::Document(d), Property(p)) => match p.as_str() {
            "info" => take_slot(&mut d.info),
            "paths" => take_slot(&mut d.paths),
            "definitions" => take_slot(&mut d.definitions),
            "parameters" => take_slot(&mut d.parameters),
            "responses" => take_slot(&mut d.responses),
            "securityDefinitions" => take_slot(&mut d.security_definitions),
            "components" => take_slot(&mut d.components),
            "tags" => take_slot(&mut d.tags),
            _ => None,
        },
        (NodeMut::Info(i), Property(p)) => match p.as_str() {
            "contact" => take_slot(&mut i.contact),
            "license" => take_slot(&mut i.license),
            _ => None,
        },
        (NodeMut::PathItem(item), Property(p)) => {
            if p == "parameters" {
                return take_slot(&mut item.parameters);
            }
            let method = p.parse::<HttpMethod>().ok()?;
            take_slot(item.operation_slot(method))
        }
        (NodeMut::Operation(op), Property(p)) => match p.as_str() {
            "parameters" => take_slot(&mut op.parameters),
            "requestBody" => take_slot(&mut op.request_body),
            "responses" => take_slot(&mut op.responses),
            _ => None,
        },
        (NodeMut::Parameter(param), Property(p)) => match p.as_str() {
            "schema" => take_slot(&mut param.schema),
            "items" => take_boxed(&mut param.items),
            _ => None,
        },
        (NodeMut::RequestBody(body), Property(p)) if p == "content" => {
            take_slot(&mut body.content)
        }
        (NodeMut::MediaType(media), Property(p)) if p == "schema" => take_slot(&mut media.schema),
        (NodeMut::Response(response), Property(p)) => match p.as_str() {
            "schema" => take_slot(&mut response.schema),
            "content" => take_slot(&mut response.content),
            _ => None,
        },
        (NodeMut::Schema(schema), Property(p)) => match p.as_str() {
            "items" => take_boxed(&mut schema.items),
            "properties" => take_slot(&mut schema.properties),
            _ => None,
        },
        (NodeMut::Components(c), Property(p)) => match p.as_str() {
            "schemas" => take_slot(&mut c.schemas),
            "responses" => take_slot(&mut c.responses),
            "parameters" => take_slot(&mut c.parameters),
            "requestBodies" => take_slot(&mut c.request_bodies),
            "securitySchemes" => take_slot(&mut c.security_schemes),
            _ => None,
        },
        (NodeMut::Tags(tags), Key(k)) => take_indexed(tags, k),
        (NodeMut::Parameters(params), Key(k)) => take_indexed(params, k),
        (NodeMut::Paths(paths), Key(k)) => take_keyed(paths, k),
        (NodeMut::ParameterDefinitions(params), Key(k)) => take_keyed(params, k),
        (NodeMut::RequestBodies(bodies), Key(k)) => take_keyed(bodies, k),
        (NodeMut::Content(content), Key(k)) => take_keyed(content, k),
        (NodeMut::Responses(responses), Key(k)) => take_keyed(responses, k),
        (NodeMut::Schemas(schemas), Key(k)) => take_keyed(schemas, k),
        (NodeMut::SecuritySchemes(schemes), Key(k)) => take_keyed(schemes, k),
        _ => None,
    }
}

fn put_slot<T: TryFrom<Node, Error = Node>>(slot: &mut Option<T>, node: Node) -> Result<(), Node> {
    if slot.is_some() {
        return Err(node);
    }
    *slot = Some(T::try_from(node)?);
    Ok(())
}

fn put_boxed(slot: &mut Option<Box<Schema>>, node: Node) -> Result<(), Node> {
    if slot.is_some() {
        return Err(node);
    }
    *slot = Some(Box::new(Schema::try_from(node)?));
    Ok(())
}

fn put_keyed<V: TryFrom<Node, Error = Node>>(
    map: &mut Map<String, V>,
    key: &str,
    node: Node,
    position: Option<usize>,
) -> Result<(), Node> {
    if map.contains_key(key) {
        return Err(node);
    }
    let value = V::try_from(node)?;
    let index = position.unwrap_or(map.len()).min(map.len());
    map.shift_insert(index, key.to_string(), value);
    Ok(())
}

fn put_indexed<V: TryFrom<Node, Error = Node>>(
    list: &mut Vec<V>,
    key: &str,
    node: Node,
) -> Result<(), Node> {
    let Ok(index) = key.parse::<usize>() else {
        return Err(node);
    };
    let value = V::try_from(node)?;
    list.insert(index.min(list.len()), value);
    Ok(())
}

fn put_child(
    parent: NodeMut<'_>,
    segment: &Segment,
    node: Node,
    position: Option<usize>,
) -> Result<(), Node> {
    use crate::node_path::Segment::{Key, Property};

    match (parent, segment) {
        (NodeMut::Document(d), Property(p)) => match p.as_str() {
            "info" => put_slot(&mut d.info, node),
            "paths" => put_slot(&mut d.paths, node),
            "definitions" => put_slot(&mut d.definitions, node),
            "parameters" => put_slot(&mut d.parameters, node),
            "responses" => put_slot(&mut d.responses, node),
            "securityDefinitions" => put_slot(&mut d.security_definitions, node),
            "components" => put_slot(&mut d.components, node),
            "tags" => put_slot(&mut d.tags, node),
            _ => Err(node),
        },
        (NodeMut::Info(i), Property(p)) => match p.as_str() {
            "contact" => put_slot(&mut i.contact, node),
            "license" => put_slot(&mut i.license, node),
            _ => Err(node),
        },
        (NodeMut::PathItem(item), Property(p)) => {
            if p == "parameters" {
                return put_slot(&mut item.parameters, node);
            }
            match p.parse::<HttpMethod>() {
                Ok(method) => put_slot(item.operation_slot(method), node),
                Err(()) => Err(node),
            }
        }
        (NodeMut::Operation(op), Property(p)) => match p.as_str() {
            "parameters" => put_slot(&mut op.parameters, node),
            "requestBody" => put_slot(&mut op.request_body, node),
            "responses" => put_slot(&mut op.responses, node),
            _ => Err(node),
        },
        (NodeMut::Parameter(param), Property(p)) => match p.as_str() {
            "schema" => put_slot(&mut param.schema, node),
            "items" => put_boxed(&mut param.items, node),
            _ => Err(node),
        },
        (NodeMut::RequestBody(body), Property(p)) if p == "content" => {
            put_slot(&mut body.content, node)
        }
        (NodeMut::MediaType(media), Property(p)) if p == "schema" => {
            put_slot(&mut media.schema, node)
        }
        (NodeMut::Response(response), Property(p)) => match p.as_str() {
            "schema" => put_slot(&mut response.schema, node),
            "content" => put_slot(&mut response.content, node),
            _ => Err(node),
        },
        (NodeMut::Schema(schema), Property(p)) => match p.as_str() {
            "items" => put_boxed(&mut schema.items, node),
            "properties" => put_slot(&mut schema.properties, node),
            _ => Err(node),
        },
        (NodeMut::Components(c), Property(p)) => match p.as_str() {
            "schemas" => put_slot(&mut c.schemas, node),
            "responses" => put_slot(&mut c.responses, node),
            "parameters" => put_slot(&mut c.parameters, node),
            "requestBodies" => put_slot(&mut c.request_bodies, node),
            "securitySchemes" => put_slot(&mut c.security_schemes, node),
            _ => Err(node),
        },
        (NodeMut::Tags(tags), Key(k)) => put_indexed(tags, k, node),
        (NodeMut::Parameters(params), Key(k)) => put_indexed(params, k, node),
        (NodeMut::Paths(paths), Key(k)) => put_keyed(paths, k, node, position),
        (NodeMut::ParameterDefinitions(params), Key(k)) => put_keyed(params, k, node, position),
        (NodeMut::RequestBodies(bodies), Key(k)) => put_keyed(bodies, k, node, position),
        (NodeMut::Content(content), Key(k)) => put_keyed(content, k, node, position),
        (NodeMut::Responses(responses), Key(k)) => put_keyed(responses, k, node, position),
        (NodeMut::Schemas(schemas), Key(k)) => put_keyed(schemas, k, node, position),
        (NodeMut::SecuritySchemes(schemes), Key(k)) => put_keyed(schemes, k, node, position),
        _ => Err(node),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{PathItem, Tag};
    use crate::SpecVersion;

    fn with_definitions(names: &[&str]) -> Document {
        let mut doc = Document::swagger2("Pets", "1.0");
        let definitions = doc.definitions.get_or_insert_with(Map::new);
        for name in names {
            definitions.insert(name.to_string(), Schema::object());
        }
        doc
    }

    fn definition_names(doc: &Document) -> Vec<String> {
        doc.schema_definitions()
            .map(|d| d.keys().cloned().collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_detach_then_attach_restores_order() {
        let mut doc = with_definitions(&["A", "B", "C"]);
        let path = NodePath::schema_definition(SpecVersion::Swagger2, "B");
        let detached = doc.detach(&path).unwrap();
        assert_eq!(detached.position, 1);
        assert_eq!(definition_names(&doc), vec!["A", "C"]);

        doc.attach(&path, detached.node, Some(detached.position)).unwrap();
        assert_eq!(definition_names(&doc), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_attach_refuses_occupied_slot() {
        let mut doc = with_definitions(&["A"]);
        let path = NodePath::schema_definition(SpecVersion::Swagger2, "A");
        let node = Node::Schema(Schema::of_type("string", None));
        assert_eq!(doc.attach(&path, node.clone(), None), Err(node));
    }

    #[test]
    fn test_attach_refuses_wrong_kind() {
        let mut doc = with_definitions(&[]);
        let path = NodePath::schema_definition(SpecVersion::Swagger2, "A");
        let node = Node::Tag(Tag::new("pets"));
        assert!(doc.attach(&path, node, None).is_err());
        assert!(definition_names(&doc).is_empty());
    }

    #[test]
    fn test_attach_out_of_range_position_appends() {
        let mut doc = with_definitions(&["A"]);
        let path = NodePath::schema_definition(SpecVersion::Swagger2, "B");
        doc.attach(&path, Node::Schema(Schema::object()), Some(9)).unwrap();
        assert_eq!(definition_names(&doc), vec!["A", "B"]);
    }

    #[test]
    fn test_indexed_detach_and_attach() {
        let mut doc = Document::openapi3("Pets", "1.0");
        doc.tags = Some(vec![Tag::new("a"), Tag::new("b")]);
        let detached = doc.detach(&NodePath::tags().index(0)).unwrap();
        assert_eq!(doc.tags.as_ref().unwrap()[0].name, "b");
        doc.attach(&NodePath::tags().index(0), detached.node, None).unwrap();
        assert_eq!(doc.tags.as_ref().unwrap()[0].name, "a");
        assert!(doc.detach(&NodePath::tags().index(5)).is_none());
    }

    #[test]
    fn test_root_replacement() {
        let mut doc = Document::swagger2("Old", "1.0");
        let replacement = Document::openapi3("New", "2.0");
        doc.attach(&NodePath::root(), Node::Document(replacement.clone()), None)
            .unwrap();
        assert_eq!(doc, replacement);
    }

    #[test]
    fn test_ensure_containers_reports_outermost_creation() {
        let mut doc = Document::openapi3("Pets", "1.0");
        let schemas = NodePath::schema_definitions(SpecVersion::OpenApi3);
        let created = doc.ensure_containers(&schemas).unwrap();
        assert_eq!(created, Some(NodePath::root().property("components")));
        assert!(doc.resolve(&schemas).is_some());

        assert_eq!(doc.ensure_containers(&schemas), Some(None));

        doc.detach(&NodePath::root().property("components"));
        assert!(doc.components.is_none());
    }

    #[test]
    fn test_ensure_containers_fails_on_missing_entry() {
        let mut doc = Document::swagger2("Pets", "1.0");
        doc.paths = None;
        let path = NodePath::path_item("/pets").property("parameters");
        assert_eq!(doc.ensure_containers(&path), None);
        assert!(doc.paths.is_none());

        doc.paths = Some(Map::from_iter([("/pets".to_string(), PathItem::default())]));
        assert_eq!(
            doc.ensure_containers(&path),
            Some(Some(NodePath::path_item("/pets").property("parameters")))
        );
    }
}
