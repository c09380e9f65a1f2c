use apistudio_model::*;

/// Visitor pattern for traversing API documents immutably
///
/// The driver walks depth-first, pre-order, in document order and hands
/// every node the [`NodePath`] it was reached by. Collections (`paths`,
/// `definitions`, parameter lists, ...) are walked transparently.
/// Override specific visit_* methods to act on nodes; call the matching
/// walk_* function to keep descending.
pub trait Visitor: Sized {
    fn visit_document(&mut self, path: &NodePath, doc: &Document) {
        walk_document(self, path, doc);
    }

    fn visit_info(&mut self, path: &NodePath, info: &Info) {
        walk_info(self, path, info);
    }

    fn visit_contact(&mut self, _path: &NodePath, _contact: &Contact) {
        // Leaf node, no children to walk
    }

    fn visit_license(&mut self, _path: &NodePath, _license: &License) {
        // Leaf node, no children to walk
    }

    fn visit_tag(&mut self, _path: &NodePath, _tag: &Tag) {
        // Leaf node, no children to walk
    }

    fn visit_path_item(&mut self, path: &NodePath, item: &PathItem) {
        walk_path_item(self, path, item);
    }

    fn visit_operation(&mut self, path: &NodePath, operation: &Operation) {
        walk_operation(self, path, operation);
    }

    fn visit_parameter(&mut self, path: &NodePath, parameter: &Parameter) {
        walk_parameter(self, path, parameter);
    }

    fn visit_request_body(&mut self, path: &NodePath, body: &RequestBody) {
        walk_request_body(self, path, body);
    }

    fn visit_media_type(&mut self, path: &NodePath, media: &MediaType) {
        walk_media_type(self, path, media);
    }

    fn visit_response(&mut self, path: &NodePath, response: &Response) {
        walk_response(self, path, response);
    }

    fn visit_schema(&mut self, path: &NodePath, schema: &Schema) {
        walk_schema(self, path, schema);
    }

    fn visit_components(&mut self, path: &NodePath, components: &Components) {
        walk_components(self, path, components);
    }

    fn visit_security_scheme(&mut self, _path: &NodePath, _scheme: &SecurityScheme) {
        // Leaf node, no children to walk
    }
}

/// Walk a whole document from the root
pub fn traverse<V: Visitor>(doc: &Document, visitor: &mut V) {
    visitor.visit_document(&NodePath::root(), doc);
}

/// Dispatch one node to the matching visit_* method
pub fn visit_node<V: Visitor>(visitor: &mut V, path: &NodePath, node: NodeRef<'_>) {
    match node {
        NodeRef::Document(doc) => visitor.visit_document(path, doc),
        NodeRef::Info(info) => visitor.visit_info(path, info),
        NodeRef::Contact(contact) => visitor.visit_contact(path, contact),
        NodeRef::License(license) => visitor.visit_license(path, license),
        NodeRef::Tag(tag) => visitor.visit_tag(path, tag),
        NodeRef::PathItem(item) => visitor.visit_path_item(path, item),
        NodeRef::Operation(op) => visitor.visit_operation(path, op),
        NodeRef::Parameter(param) => visitor.visit_parameter(path, param),
        NodeRef::RequestBody(body) => visitor.visit_request_body(path, body),
        NodeRef::MediaType(media) => visitor.visit_media_type(path, media),
        NodeRef::Response(response) => visitor.visit_response(path, response),
        NodeRef::Schema(schema) => visitor.visit_schema(path, schema),
        NodeRef::Components(components) => visitor.visit_components(path, components),
        NodeRef::SecurityScheme(scheme) => visitor.visit_security_scheme(path, scheme),
        NodeRef::Tags(_)
        | NodeRef::Paths(_)
        | NodeRef::Parameters(_)
        | NodeRef::ParameterDefinitions(_)
        | NodeRef::RequestBodies(_)
        | NodeRef::Content(_)
        | NodeRef::Responses(_)
        | NodeRef::Schemas(_)
        | NodeRef::SecuritySchemes(_) => walk_children(visitor, path, node),
    }
}

/// Visit every direct child of `node`
pub fn walk_children<V: Visitor>(visitor: &mut V, path: &NodePath, node: NodeRef<'_>) {
    for (segment, child) in node.children() {
        visit_node(visitor, &path.join(segment), child);
    }
}

// Default walk implementations

pub fn walk_document<V: Visitor>(visitor: &mut V, path: &NodePath, doc: &Document) {
    walk_children(visitor, path, NodeRef::Document(doc));
}

pub fn walk_info<V: Visitor>(visitor: &mut V, path: &NodePath, info: &Info) {
    walk_children(visitor, path, NodeRef::Info(info));
}

pub fn walk_path_item<V: Visitor>(visitor: &mut V, path: &NodePath, item: &PathItem) {
    walk_children(visitor, path, NodeRef::PathItem(item));
}

pub fn walk_operation<V: Visitor>(visitor: &mut V, path: &NodePath, operation: &Operation) {
    walk_children(visitor, path, NodeRef::Operation(operation));
}

pub fn walk_parameter<V: Visitor>(visitor: &mut V, path: &NodePath, parameter: &Parameter) {
    walk_children(visitor, path, NodeRef::Parameter(parameter));
}

pub fn walk_request_body<V: Visitor>(visitor: &mut V, path: &NodePath, body: &RequestBody) {
    walk_children(visitor, path, NodeRef::RequestBody(body));
}

pub fn walk_media_type<V: Visitor>(visitor: &mut V, path: &NodePath, media: &MediaType) {
    walk_children(visitor, path, NodeRef::MediaType(media));
}

pub fn walk_response<V: Visitor>(visitor: &mut V, path: &NodePath, response: &Response) {
    walk_children(visitor, path, NodeRef::Response(response));
}

pub fn walk_schema<V: Visitor>(visitor: &mut V, path: &NodePath, schema: &Schema) {
    walk_children(visitor, path, NodeRef::Schema(schema));
}

pub fn walk_components<V: Visitor>(visitor: &mut V, path: &NodePath, components: &Components) {
    walk_children(visitor, path, NodeRef::Components(components));
}

/// Node path of `node` within `doc`, found by identity. `None` when the
/// node does not belong to this document.
pub fn create_path(doc: &Document, node: NodeRef<'_>) -> Option<NodePath> {
    fn search(path: NodePath, current: NodeRef<'_>, target: &NodeRef<'_>) -> Option<NodePath> {
        if current.is_same(target) {
            return Some(path);
        }
        current
            .children()
            .into_iter()
            .find_map(|(segment, child)| search(path.join(segment), child, target))
    }

    search(NodePath::root(), NodeRef::Document(doc), &node)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        parse_json(
            r#"{
              "swagger": "2.0",
              "info": {"title": "Pets", "version": "1.0"},
              "paths": {
                "/pets": {
                  "parameters": [{"name": "trace", "in": "header", "type": "string"}],
                  "get": {"responses": {"200": {"description": "OK"}}},
                  "post": {"responses": {"201": {"description": "Created"}}}
                }
              },
              "definitions": {"Pet": {"type": "object"}}
            }"#,
        )
        .unwrap()
    }

    #[derive(Default)]
    struct Recorder {
        visited: Vec<String>,
    }

    impl Visitor for Recorder {
        fn visit_operation(&mut self, path: &NodePath, operation: &Operation) {
            self.visited.push(path.to_string());
            walk_operation(self, path, operation);
        }

        fn visit_parameter(&mut self, path: &NodePath, _parameter: &Parameter) {
            self.visited.push(path.to_string());
        }

        fn visit_response(&mut self, path: &NodePath, _response: &Response) {
            self.visited.push(path.to_string());
        }

        fn visit_schema(&mut self, path: &NodePath, _schema: &Schema) {
            self.visited.push(path.to_string());
        }
    }

    #[test]
    fn test_pre_order_document_order() {
        let doc = sample();
        let mut recorder = Recorder::default();
        traverse(&doc, &mut recorder);
        assert_eq!(
            recorder.visited,
            vec![
                "/paths[/pets]/parameters[0]",
                "/paths[/pets]/get",
                "/paths[/pets]/get/responses[200]",
                "/paths[/pets]/post",
                "/paths[/pets]/post/responses[201]",
                "/definitions[Pet]",
            ]
        );
    }

    #[test]
    fn test_visit_node_starts_below_root() {
        let doc = sample();
        let path = NodePath::operation("/pets", HttpMethod::Post);
        let mut recorder = Recorder::default();
        visit_node(&mut recorder, &path, doc.resolve(&path).unwrap());
        assert_eq!(
            recorder.visited,
            vec!["/paths[/pets]/post", "/paths[/pets]/post/responses[201]"]
        );
    }

    #[test]
    fn test_create_path_inverts_resolve() {
        let doc = sample();
        let op = doc.path_item("/pets").and_then(|item| item.get.as_ref()).unwrap();
        let path = create_path(&doc, NodeRef::Operation(op)).unwrap();
        assert_eq!(path, NodePath::operation("/pets", HttpMethod::Get));

        let stranger = Operation::default();
        assert_eq!(create_path(&doc, NodeRef::Operation(&stranger)), None);
        assert_eq!(create_path(&doc, NodeRef::Document(&doc)), Some(NodePath::root()));
    }

    #[test]
    fn test_missing_structure_visits_nothing() {
        let doc = Document::default();
        let mut recorder = Recorder::default();
        traverse(&doc, &mut recorder);
        assert!(recorder.visited.is_empty());
    }
}
