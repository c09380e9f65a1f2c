//! First codegen pass: group path items into resource interfaces.

use apistudio_common::{traverse, Visitor};
use apistudio_model::{Document, NodePath, PathItem, Segment};
use serde::Serialize;

pub const ROOT_INTERFACE: &str = "RootResource";

/// Paths that share a resource interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceGroup {
    pub name: String,
    /// Base path of the group, `/` for the root group
    pub path: String,
    pub paths: Vec<String>,
}

/// Group name and base path for one path template.
///
/// The first segment decides: a literal segment `pets` gives
/// `PetsResource` at `/pets`; a parameter or no segment at all gives the
/// root group.
pub fn interface_for_path(path: &str) -> (String, String) {
    let first = path.split('/').nth(1).unwrap_or_default();
    if first.is_empty() || first.contains('{') {
        return (ROOT_INTERFACE.to_string(), "/".to_string());
    }

    let mut chars = first.chars();
    let capitalized: String = chars
        .next()
        .map(|c| c.to_uppercase().chain(chars).collect())
        .unwrap_or_default();
    let name: String = capitalized
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if name.is_empty() {
        return (ROOT_INTERFACE.to_string(), "/".to_string());
    }
    (format!("{}Resource", name), format!("/{}", first))
}

#[derive(Default)]
struct InterfacesVisitor {
    groups: Vec<InterfaceGroup>,
}

impl Visitor for InterfacesVisitor {
    fn visit_path_item(&mut self, path: &NodePath, _item: &PathItem) {
        let Some(Segment::Key(key)) = path.last() else {
            return;
        };
        let (name, base) = interface_for_path(key);
        // The base path identifies a group; names only need to stay unique
        match self.groups.iter_mut().find(|group| group.path == base) {
            Some(group) => group.paths.push(key.clone()),
            None => {
                let name = self.unique_name(name, &base);
                self.groups.push(InterfaceGroup {
                    name,
                    path: base,
                    paths: vec![key.clone()],
                });
            }
        }
    }
}

impl InterfacesVisitor {
    /// `/pets` and `/Pets` both clean up to `PetsResource`; later groups get
    /// a numeric suffix. `RootResource` is kept for the `/` group.
    fn unique_name(&self, name: String, base: &str) -> String {
        let taken = |candidate: &str| {
            (candidate == ROOT_INTERFACE && base != "/")
                || self.groups.iter().any(|group| group.name == candidate)
        };
        if !taken(&name) {
            return name;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{}{}", name, n);
            if !taken(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}

/// Interface groups in first-seen order
pub fn find_interfaces(doc: &Document) -> Vec<InterfaceGroup> {
    let mut visitor = InterfacesVisitor::default();
    traverse(doc, &mut visitor);
    visitor.groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use apistudio_model::parse_yaml;

    #[test]
    fn test_interface_names() {
        assert_eq!(interface_for_path("/pets/{id}"), ("PetsResource".to_string(), "/pets".to_string()));
        assert_eq!(
            interface_for_path("/pet-store"),
            ("PetstoreResource".to_string(), "/pet-store".to_string())
        );
        assert_eq!(interface_for_path("/{id}/toys").0, ROOT_INTERFACE);
        assert_eq!(interface_for_path("/").0, ROOT_INTERFACE);
        assert_eq!(interface_for_path("").1, "/");
    }

    #[test]
    fn test_grouping_is_first_seen_and_deterministic() {
        let doc = parse_yaml(
            r#"
swagger: "2.0"
info: {title: Pets, version: "1"}
paths:
  /pets: {}
  /owners: {}
  "/pets/{id}": {}
  "/{tenant}": {}
"#,
        )
        .unwrap();
        let groups = find_interfaces(&doc);
        let names: Vec<_> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["PetsResource", "OwnersResource", "RootResource"]);
        assert_eq!(groups[0].paths, vec!["/pets", "/pets/{id}"]);
        assert_eq!(find_interfaces(&doc), groups);
    }

    #[test]
    fn test_colliding_names_get_distinct_groups() {
        let doc = parse_yaml(
            r#"
swagger: "2.0"
info: {title: Pets, version: "1"}
paths:
  /pets: {}
  /Pets: {}
  /PETS/{id}: {}
  /api-v1: {}
  /apiv1: {}
  /root: {}
  "/{id}": {}
"#,
        )
        .unwrap();
        let groups: Vec<_> = find_interfaces(&doc)
            .into_iter()
            .map(|g| (g.name, g.path))
            .collect();
        let expected = [
            ("PetsResource", "/pets"),
            ("PetsResource2", "/Pets"),
            ("PETSResource", "/PETS"),
            ("Apiv1Resource", "/api-v1"),
            ("Apiv1Resource2", "/apiv1"),
            ("RootResource2", "/root"),
            ("RootResource", "/"),
        ];
        assert_eq!(
            groups,
            expected
                .iter()
                .map(|(n, p)| (n.to_string(), p.to_string()))
                .collect::<Vec<_>>()
        );
    }
}
