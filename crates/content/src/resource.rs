use indexmap::IndexMap;
use serde_json::{Map, Value};

use afcore_types::property;

use crate::value_map::ValueMap;

/// A content node: its path, property bag, and ordered children.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resource {
    path: String,
    resource_type: Option<String>,
    properties: ValueMap,
    children: IndexMap<String, Resource>,
}

impl Resource {
    /// Creates a leaf node. The resource type is taken from
    /// `sling:resourceType` when the bag carries one.
    pub fn new(path: impl Into<String>, properties: ValueMap) -> Self {
        let resource_type = properties.get_str(property::RESOURCE_TYPE);
        Self {
            path: path.into(),
            resource_type,
            properties,
            children: IndexMap::new(),
        }
    }

    /// Builds a node tree from a JSON object.
    ///
    /// Object-valued entries become child nodes; every other entry is a
    /// property of this node.
    pub fn from_json_object(path: &str, object: &Map<String, Value>) -> Self {
        let mut properties = ValueMap::new();
        let mut children = IndexMap::new();
        for (key, value) in object {
            match value {
                Value::Object(child) => {
                    let child_path = join_path(path, key);
                    children.insert(key.clone(), Resource::from_json_object(&child_path, child));
                }
                other => {
                    properties.insert(key.clone(), other.clone());
                }
            }
        }
        let mut resource = Resource::new(path, properties);
        resource.children = children;
        resource
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Last path segment; empty for the repository root.
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or_default()
    }

    pub fn resource_type(&self) -> Option<&str> {
        self.resource_type.as_deref()
    }

    pub fn properties(&self) -> &ValueMap {
        &self.properties
    }

    pub fn child(&self, name: &str) -> Option<&Resource> {
        self.children.get(name)
    }

    pub fn children(&self) -> impl Iterator<Item = &Resource> {
        self.children.values()
    }

    /// Walks a relative path (`a/b/c`) below this node.
    pub fn descendant(&self, relative: &str) -> Option<&Resource> {
        relative
            .split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(self, |node, segment| node.child(segment))
    }
}

pub(crate) fn join_path(parent: &str, name: &str) -> String {
    if parent.ends_with('/') {
        format!("{parent}{name}")
    } else {
        format!("{parent}/{name}")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn splits_objects_into_children() {
        let document = json!({
            "jcr:primaryType": "nt:unstructured",
            "table": {
                "sling:resourceType": "core/fd/components/form/datatable/v1/datatable",
                "height": "400px"
            }
        });
        let root = Resource::from_json_object("/content", document.as_object().expect("object"));
        assert_eq!(root.name(), "content");
        assert_eq!(root.resource_type(), None);
        assert_eq!(root.properties().len(), 1);

        let table = root.child("table").expect("table child");
        assert_eq!(table.path(), "/content/table");
        assert_eq!(table.name(), "table");
        assert_eq!(table.resource_type(), Some("core/fd/components/form/datatable/v1/datatable"));
        assert_eq!(table.properties().get_str("height").as_deref(), Some("400px"));
    }

    #[test]
    fn walks_nested_descendants() {
        let document = json!({ "a": { "b": { "c": { "leaf": true } } } });
        let root = Resource::from_json_object("/", document.as_object().expect("object"));
        let leaf = root.descendant("a/b/c").expect("nested node");
        assert_eq!(leaf.path(), "/a/b/c");
        assert!(root.descendant("a/x").is_none());
        assert_eq!(root.descendant("").map(Resource::path), Some("/"));
    }
}
