//! Discovery visitors used by list views: path items, schema definitions
//! and reusable responses, filtered and sorted by name.

use crate::visitor::{traverse, Visitor};
use apistudio_model::*;
use serde::Serialize;

/// A named node found by a discovery visitor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedNode {
    pub name: String,
    pub path: NodePath,
}

/// Case-insensitive substring match; no filter accepts everything
pub fn matches_filter(value: &str, filter: Option<&str>) -> bool {
    match filter {
        None => true,
        Some(filter) => value.to_lowercase().contains(&filter.to_lowercase()),
    }
}

/// Stable, case-insensitive sort by the given key
pub fn sort_case_insensitive<T>(items: &mut [T], key: impl Fn(&T) -> &str) {
    items.sort_by_cached_key(|item| key(item).to_lowercase());
}

fn finish(mut found: Vec<NamedNode>) -> Vec<NamedNode> {
    sort_case_insensitive(&mut found, |node| node.name.as_str());
    found
}

fn key_of(path: &NodePath) -> Option<String> {
    match path.last()? {
        Segment::Key(key) => Some(key.clone()),
        Segment::Property(_) => None,
    }
}

struct PathItemFinder<'f> {
    filter: Option<&'f str>,
    found: Vec<NamedNode>,
}

impl Visitor for PathItemFinder<'_> {
    fn visit_document(&mut self, _path: &NodePath, doc: &Document) {
        // Only `paths` holds path items; skip the rest of the tree
        for (key, item) in doc.paths.iter().flatten() {
            self.visit_path_item(&NodePath::path_item(key), item);
        }
    }

    fn visit_path_item(&mut self, path: &NodePath, _item: &PathItem) {
        if let Some(name) = key_of(path).filter(|name| matches_filter(name, self.filter)) {
            self.found.push(NamedNode {
                name,
                path: path.clone(),
            });
        }
    }
}

/// Path items whose path matches `filter`
pub fn find_path_items(doc: &Document, filter: Option<&str>) -> Vec<NamedNode> {
    let mut finder = PathItemFinder {
        filter,
        found: Vec::new(),
    };
    traverse(doc, &mut finder);
    finish(finder.found)
}

struct DefinitionFinder<'f> {
    container: NodePath,
    filter: Option<&'f str>,
    found: Vec<NamedNode>,
}

impl Visitor for DefinitionFinder<'_> {
    fn visit_path_item(&mut self, _path: &NodePath, _item: &PathItem) {}

    fn visit_schema(&mut self, path: &NodePath, _schema: &Schema) {
        if path.parent().as_ref() != Some(&self.container) {
            return;
        }
        if let Some(name) = key_of(path).filter(|name| matches_filter(name, self.filter)) {
            self.found.push(NamedNode {
                name,
                path: path.clone(),
            });
        }
    }
}

/// Schema definitions (`definitions` or `components/schemas`) whose name
/// matches `filter`
pub fn find_schema_definitions(doc: &Document, filter: Option<&str>) -> Vec<NamedNode> {
    let mut finder = DefinitionFinder {
        container: NodePath::schema_definitions(doc.spec_version()),
        filter,
        found: Vec::new(),
    };
    traverse(doc, &mut finder);
    finish(finder.found)
}

struct ResponseFinder<'f> {
    container: NodePath,
    filter: Option<&'f str>,
    found: Vec<NamedNode>,
}

impl Visitor for ResponseFinder<'_> {
    // Operation responses are not reusable definitions
    fn visit_path_item(&mut self, _path: &NodePath, _item: &PathItem) {}

    fn visit_response(&mut self, path: &NodePath, _response: &Response) {
        if path.parent().as_ref() != Some(&self.container) {
            return;
        }
        if let Some(name) = key_of(path).filter(|name| matches_filter(name, self.filter)) {
            self.found.push(NamedNode {
                name,
                path: path.clone(),
            });
        }
    }
}

/// Reusable responses (`responses` or `components/responses`) whose name
/// matches `filter`
pub fn find_response_definitions(doc: &Document, filter: Option<&str>) -> Vec<NamedNode> {
    let container = match doc.spec_version() {
        SpecVersion::Swagger2 => NodePath::root().property("responses"),
        SpecVersion::OpenApi3 => NodePath::root().property("components").property("responses"),
    };
    let mut finder = ResponseFinder {
        container,
        filter,
        found: Vec::new(),
    };
    traverse(doc, &mut finder);
    finish(finder.found)
}

/// Operations of one path item, in method order
pub fn find_operations(doc: &Document, path: &str) -> Vec<(HttpMethod, NodePath)> {
    struct OperationFinder {
        found: Vec<(HttpMethod, NodePath)>,
    }

    impl Visitor for OperationFinder {
        fn visit_operation(&mut self, path: &NodePath, _operation: &Operation) {
            if let Some((_, method)) = path.operation_location() {
                self.found.push((method, path.clone()));
            }
        }
    }

    let Some(item) = doc.path_item(path) else {
        return Vec::new();
    };
    let mut finder = OperationFinder { found: Vec::new() };
    finder.visit_path_item(&NodePath::path_item(path), item);
    finder.found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(found: &[NamedNode]) -> Vec<&str> {
        found.iter().map(|n| n.name.as_str()).collect()
    }

    fn sample() -> Document {
        parse_yaml(
            r#"
openapi: 3.0.3
info: {title: Pets, version: "1.0"}
paths:
  /pets: {get: {responses: {"200": {description: OK}}}}
  /Owners: {}
  "/pets/{id}": {delete: {}, get: {}}
components:
  schemas:
    pet: {type: object, properties: {Tag: {type: string}}}
    Owner: {type: object}
    Error: {type: object}
  responses:
    NotFound: {description: Missing}
    badRequest: {description: Bad}
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_find_path_items_sorted_case_insensitively() {
        let doc = sample();
        assert_eq!(
            names(&find_path_items(&doc, None)),
            vec!["/Owners", "/pets", "/pets/{id}"]
        );
        assert_eq!(names(&find_path_items(&doc, Some("PETS"))), vec!["/pets", "/pets/{id}"]);
    }

    #[test]
    fn test_find_schema_definitions_skips_nested_properties() {
        let doc = sample();
        let found = find_schema_definitions(&doc, None);
        assert_eq!(names(&found), vec!["Error", "Owner", "pet"]);
        assert_eq!(found[2].path.to_string(), "/components/schemas[pet]");
        assert!(find_schema_definitions(&doc, Some("tag")).is_empty());
    }

    #[test]
    fn test_find_response_definitions() {
        let doc = sample();
        assert_eq!(
            names(&find_response_definitions(&doc, None)),
            vec!["badRequest", "NotFound"]
        );
        assert_eq!(names(&find_response_definitions(&doc, Some("found"))), vec!["NotFound"]);
    }

    #[test]
    fn test_find_operations_in_method_order() {
        let doc = sample();
        let methods: Vec<_> = find_operations(&doc, "/pets/{id}")
            .into_iter()
            .map(|(m, _)| m)
            .collect();
        assert_eq!(methods, vec![HttpMethod::Get, HttpMethod::Delete]);
        assert!(find_operations(&doc, "/nope").is_empty());
    }

    #[test]
    fn test_sort_is_stable() {
        let mut items = vec![("b", 1), ("A", 2), ("a", 3)];
        sort_case_insensitive(&mut items, |item| item.0);
        assert_eq!(items, vec![("A", 2), ("a", 3), ("b", 1)]);
    }

    #[test]
    fn test_empty_document_finds_nothing() {
        let doc = Document::swagger2("Empty", "1.0");
        assert!(find_path_items(&doc, None).is_empty());
        assert!(find_schema_definitions(&doc, None).is_empty());
        assert!(find_response_definitions(&doc, None).is_empty());
    }
}
