use crate::command_trait::CommandOp;
use apistudio_model::{Document, NodePath};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Prior value of a property. `Absent` restores by removal, which is not
/// the same as restoring an explicit `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "camelCase")]
pub enum OldValue {
    Absent,
    Present(Value),
}

impl From<Option<Value>> for OldValue {
    fn from(value: Option<Value>) -> Self {
        match value {
            Some(value) => OldValue::Present(value),
            None => OldValue::Absent,
        }
    }
}

impl From<OldValue> for Option<Value> {
    fn from(value: OldValue) -> Self {
        match value {
            OldValue::Present(value) => Some(value),
            OldValue::Absent => None,
        }
    }
}

/// Set (or remove, with `value: None`) a simple property of the node at
/// `path`. Missing container nodes such as `info/contact` are created on
/// demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeProperty {
    pub path: NodePath,
    pub name: String,
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    old: Option<OldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_container: Option<NodePath>,
}

impl ChangeProperty {
    pub fn new(path: NodePath, name: impl Into<String>, value: Option<Value>) -> Self {
        Self {
            path,
            name: name.into(),
            value,
            old: None,
            created_container: None,
        }
    }

    /// Set `name` to a new value
    pub fn set(path: NodePath, name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(path, name, Some(value.into()))
    }

    /// Remove `name` from the node
    pub fn remove(path: NodePath, name: impl Into<String>) -> Self {
        Self::new(path, name, None)
    }
}

impl CommandOp for ChangeProperty {
    fn execute(&mut self, doc: &mut Document) {
        self.old = None;
        self.created_container = None;

        let Some(created) = doc.ensure_containers(&self.path) else {
            debug!(path = %self.path, "property owner does not resolve");
            return;
        };
        let Some(mut node) = doc.resolve_mut(&self.path) else {
            return;
        };

        let old = node.as_ref().property(&self.name);
        if node.set_property(&self.name, self.value.clone()) {
            self.old = Some(old.into());
            self.created_container = created;
        } else {
            debug!(path = %self.path, name = %self.name, "property not settable");
            if let Some(created) = created {
                doc.detach(&created);
            }
        }
    }

    fn undo(&mut self, doc: &mut Document) {
        let Some(old) = self.old.take() else {
            return;
        };
        if let Some(created) = self.created_container.take() {
            doc.detach(&created);
            return;
        }
        match doc.resolve_mut(&self.path) {
            Some(mut node) => {
                node.set_property(&self.name, old.into());
            }
            None => debug!(path = %self.path, "property owner vanished before undo"),
        }
    }

    fn name(&self) -> &'static str {
        "change_property"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apistudio_model::{HttpMethod, Operation, PathItem};
    use serde_json::json;

    fn info_path() -> NodePath {
        NodePath::root().property("info")
    }

    #[test]
    fn test_change_and_undo_typed_property() {
        let mut doc = Document::swagger2("Pets", "1.0");
        let before = doc.clone();
        let mut command = ChangeProperty::set(info_path(), "title", "Pet Store");
        command.execute(&mut doc);
        assert_eq!(doc.info.as_ref().unwrap().title.as_deref(), Some("Pet Store"));
        command.undo(&mut doc);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_absent_property_is_removed_on_undo() {
        let mut doc = Document::swagger2("Pets", "1.0");
        let before = doc.clone();
        let mut command = ChangeProperty::set(info_path(), "description", "All pets");
        command.execute(&mut doc);
        command.undo(&mut doc);
        assert_eq!(doc.info.as_ref().unwrap().description, None);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_explicit_null_is_restored() {
        let mut doc = Document::swagger2("Pets", "1.0");
        doc.info.as_mut().unwrap().extra.insert("x-logo".to_string(), Value::Null);
        let mut command = ChangeProperty::set(info_path(), "x-logo", "logo.png");
        command.execute(&mut doc);
        command.undo(&mut doc);
        assert_eq!(doc.info.as_ref().unwrap().extra.get("x-logo"), Some(&Value::Null));
    }

    #[test]
    fn test_created_container_is_removed_on_undo() {
        let mut doc = Document::swagger2("Pets", "1.0");
        let before = doc.clone();
        let path = info_path().property("contact");
        let mut command = ChangeProperty::set(path, "email", "team@example.com");
        command.execute(&mut doc);
        let contact = doc.info.as_ref().unwrap().contact.as_ref().unwrap();
        assert_eq!(contact.email.as_deref(), Some("team@example.com"));

        command.undo(&mut doc);
        assert!(doc.info.as_ref().unwrap().contact.is_none());
        assert_eq!(doc, before);
    }

    #[test]
    fn test_rejected_value_rolls_back_container() {
        let mut doc = Document::swagger2("Pets", "1.0");
        let before = doc.clone();
        let path = info_path().property("license");
        let mut command = ChangeProperty::set(path, "name", json!({"not": "a string"}));
        command.execute(&mut doc);
        assert_eq!(doc, before);
        command.undo(&mut doc);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_missing_operation_is_noop() {
        let mut doc = Document::swagger2("Pets", "1.0");
        doc.paths = Some([("/pets".to_string(), PathItem::default())].into_iter().collect());
        let before = doc.clone();
        let path = NodePath::operation("/pets", HttpMethod::Get);
        let mut command = ChangeProperty::set(path, "summary", "List");
        command.execute(&mut doc);
        assert_eq!(doc, before);

        doc.paths.as_mut().unwrap()["/pets"].get = Some(Operation::default());
        command.execute(&mut doc);
        let get = doc.path_item("/pets").unwrap().get.as_ref().unwrap();
        assert_eq!(get.summary.as_deref(), Some("List"));
    }
}
