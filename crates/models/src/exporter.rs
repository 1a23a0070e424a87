//! JSON export of component models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::field::Label;

/// A model that can be written into the component export payload.
pub trait ComponentExporter {
    /// Resource type the payload is tagged with under `:type`.
    fn exported_type(&self) -> &str {
        ""
    }

    fn export(&self) -> Result<Value, serde_json::Error>;
}

/// Export payload of a data table field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DataTableExport {
    pub id: String,
    pub field_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub visible: bool,
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source: Option<String>,
    pub data_source_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_config: Option<String>,
    pub height: String,
    pub pagination: bool,
    pub page_size: i32,
    pub sortable: bool,
    pub filterable: bool,
    pub resizable_columns: bool,
    pub selectable_rows: bool,
    pub refresh_interval: i32,
    #[serde(rename = ":type")]
    pub exported_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Untyped;

    impl ComponentExporter for Untyped {
        fn export(&self) -> Result<Value, serde_json::Error> {
            Ok(Value::Null)
        }
    }

    #[test]
    fn exported_type_defaults_to_empty() {
        assert_eq!(Untyped.exported_type(), "");
    }

    #[test]
    fn schema_names_camel_case_properties() {
        let schema = schemars::schema_for!(DataTableExport);
        let value = serde_json::to_value(&schema).expect("serialize schema");
        let properties = value["properties"].as_object().expect("schema properties");
        assert!(properties.contains_key("pageSize"));
        assert!(properties.contains_key("resizableColumns"));
        assert!(properties.contains_key(":type"));
        let required: Vec<_> = value["required"]
            .as_array()
            .expect("required list")
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert!(required.contains(&"height"));
        assert!(!required.contains(&"dataSource"));
    }
}
