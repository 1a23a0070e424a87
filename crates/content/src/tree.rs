//! In-memory content tree loaded from a JSON document.
//!
//! The document is mounted at an absolute path (for example `/content`), so
//! a top-level key `datatable` resolves as `/content/datatable`.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::ContentError;
use crate::resource::Resource;

#[derive(Debug, Clone)]
pub struct ContentTree {
    mount: String,
    root: Resource,
}

impl ContentTree {
    pub fn from_json_str(content: &str, mount: &str) -> Result<Self, ContentError> {
        let document: Value = serde_json::from_str(content)?;
        Self::from_json_value(&document, mount)
    }

    pub fn from_json_value(document: &Value, mount: &str) -> Result<Self, ContentError> {
        let mount = normalize_mount(mount)?;
        let Value::Object(object) = document else {
            return Err(ContentError::NotAnObject {
                found: json_kind(document),
            });
        };
        let root = Resource::from_json_object(&mount, object);
        debug!(mount = %mount, nodes = root.children().count(), "mounted content tree");
        Ok(Self { mount, root })
    }

    pub fn from_path(path: &Path, mount: &str) -> Result<Self, ContentError> {
        let content = fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content, mount)
    }

    pub fn mount(&self) -> &str {
        &self.mount
    }

    /// Resolves an absolute path, or a path relative to the mount point.
    pub fn resolve(&self, path: &str) -> Option<&Resource> {
        let trimmed = path.trim();
        let relative = if trimmed.starts_with('/') {
            strip_mount(&self.mount, trimmed)?
        } else {
            trimmed
        };
        self.root.descendant(relative)
    }

    pub fn require(&self, path: &str) -> Result<&Resource, ContentError> {
        self.resolve(path).ok_or_else(|| ContentError::NotFound(path.to_string()))
    }
}

fn normalize_mount(mount: &str) -> Result<String, ContentError> {
    let trimmed = mount.trim();
    if !trimmed.starts_with('/') {
        return Err(ContentError::InvalidMountPath(mount.to_string()));
    }
    let normalized = trimmed.trim_end_matches('/');
    Ok(if normalized.is_empty() { "/".to_string() } else { normalized.to_string() })
}

fn strip_mount<'a>(mount: &str, path: &'a str) -> Option<&'a str> {
    if mount == "/" {
        return Some(path);
    }
    let rest = path.strip_prefix(mount)?;
    // "/contentious" must not resolve under "/content"
    if rest.is_empty() || rest.starts_with('/') { Some(rest) } else { None }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTENT: &str = r#"{
        "form": {
            "table": { "sling:resourceType": "core/fd/components/form/datatable/v1/datatable" }
        }
    }"#;

    #[test]
    fn resolves_absolute_and_relative_paths() {
        let tree = ContentTree::from_json_str(CONTENT, "/content/").expect("load tree");
        assert_eq!(tree.mount(), "/content");
        let table = tree.resolve("/content/form/table").expect("absolute path");
        assert_eq!(table.path(), "/content/form/table");
        assert_eq!(tree.resolve("form/table").map(Resource::path), Some("/content/form/table"));
        assert_eq!(tree.resolve("/content").map(Resource::path), Some("/content"));
        assert!(tree.resolve("/contentious/form").is_none());
        assert!(tree.resolve("/other/form/table").is_none());
    }

    #[test]
    fn mounts_at_repository_root() {
        let tree = ContentTree::from_json_str(CONTENT, "/").expect("load tree");
        assert_eq!(tree.resolve("/form/table").map(Resource::path), Some("/form/table"));
    }

    #[test]
    fn rejects_relative_mounts_and_non_objects() {
        assert!(matches!(
            ContentTree::from_json_str(CONTENT, "content"),
            Err(ContentError::InvalidMountPath(_))
        ));
        assert!(matches!(
            ContentTree::from_json_str("[1, 2]", "/content"),
            Err(ContentError::NotAnObject { found: "an array" })
        ));
        assert!(matches!(ContentTree::from_json_str("{", "/content"), Err(ContentError::Json(_))));
    }

    #[test]
    fn require_reports_missing_paths() {
        let tree = ContentTree::from_json_str(CONTENT, "/content").expect("load tree");
        let err = tree.require("/content/missing").unwrap_err();
        assert_eq!(err.to_string(), "no resource at path: /content/missing");
    }
}
