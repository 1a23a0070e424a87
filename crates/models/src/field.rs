//! Generic form field capability shared by every field component.
//!
//! Field components embed a [`FieldMetadata`] and expose it through the
//! [`Field`] trait. The trait's default bodies describe a field with nothing
//! stored: every optional value is absent.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use afcore_content::Resource;
use afcore_types::{FieldType, property};

/// Caption rendered above a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Label {
    /// Caption text from `jcr:title`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// False when the author set `hideTitle`.
    pub visible: bool,
}

/// Read interface common to all form fields.
pub trait Field {
    /// Identifier of the kind of field, e.g. `data-table`.
    fn field_type(&self) -> &str;

    fn id(&self) -> Option<&str> {
        None
    }

    fn name(&self) -> Option<&str> {
        None
    }

    fn label(&self) -> Option<&Label> {
        None
    }

    fn description(&self) -> Option<&str> {
        None
    }

    fn is_visible(&self) -> Option<bool> {
        None
    }

    fn is_enabled(&self) -> Option<bool> {
        None
    }
}

/// Generic field values projected from a content node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMetadata {
    pub id: String,
    pub name: Option<String>,
    pub label: Option<Label>,
    pub description: Option<String>,
    pub visible: bool,
    pub enabled: bool,
    /// Raw `fieldType` as authored, if any.
    pub field_type: Option<String>,
}

impl FieldMetadata {
    pub fn from_resource(resource: &Resource) -> Self {
        let properties = resource.properties();
        let title = properties.get_str(property::TITLE);
        let hide_title = properties.get_bool_or(property::HIDE_TITLE, false);
        let label = (title.is_some() || hide_title).then(|| Label {
            value: title,
            visible: !hide_title,
        });

        Self {
            id: id_from_path(resource.path()),
            name: properties.get_str(property::NAME),
            label,
            description: properties.get_str(property::DESCRIPTION),
            visible: properties.get_bool_or(property::VISIBLE, true),
            enabled: properties.get_bool_or(property::ENABLED, true),
            field_type: properties.get_str(property::FIELD_TYPE),
        }
    }

    /// Stored `fieldType`, or `default` when the node has none.
    pub fn field_type_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.field_type.as_deref().unwrap_or(default)
    }

    /// Stored `fieldType` parsed into the known vocabulary. `None` when the
    /// node has none or holds a value outside it.
    pub fn typed_field_type(&self) -> Option<FieldType> {
        self.field_type.as_deref()?.trim().parse().ok()
    }
}

fn id_from_path(path: &str) -> String {
    path.split('/').filter(|segment| !segment.is_empty()).collect::<Vec<_>>().join("-")
}
