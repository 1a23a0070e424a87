//! Shared type definitions for the adaptive form core components.
//!
//! Holds the identifiers that bind content nodes to their models (resource
//! types and property names) and the small enumerations shared by the content
//! layer, the models, and the CLI.

use std::{error::Error, fmt, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Resource type of the data table form component, version 1.
pub const RT_FD_FORM_DATA_TABLE_V1: &str = "core/fd/components/form/datatable/v1/datatable";

/// Property names read off content nodes.
pub mod property {
    pub const RESOURCE_TYPE: &str = "sling:resourceType";

    // generic field
    pub const NAME: &str = "name";
    pub const TITLE: &str = "jcr:title";
    pub const HIDE_TITLE: &str = "hideTitle";
    pub const DESCRIPTION: &str = "description";
    pub const VISIBLE: &str = "visible";
    pub const ENABLED: &str = "enabled";
    pub const FIELD_TYPE: &str = "fieldType";

    // data table
    pub const DATA_SOURCE: &str = "dataSource";
    pub const DATA_SOURCE_TYPE: &str = "dataSourceType";
    pub const COLUMNS: &str = "columns";
    pub const VIEW_CONFIG: &str = "viewConfig";
    pub const HEIGHT: &str = "height";
    pub const PAGINATION: &str = "pagination";
    pub const PAGE_SIZE: &str = "pageSize";
    pub const SORTABLE: &str = "sortable";
    pub const FILTERABLE: &str = "filterable";
    pub const RESIZABLE_COLUMNS: &str = "resizableColumns";
    pub const SELECTABLE_ROWS: &str = "selectableRows";
    pub const REFRESH_INTERVAL: &str = "refreshInterval";
}

/// Identifies the kind of form field a component renders.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum FieldType {
    TextInput,
    NumberInput,
    DateInput,
    CheckboxGroup,
    RadioGroup,
    DropDown,
    FileInput,
    Panel,
    PlainText,
    Button,
    DataTable,
}

impl FieldType {
    /// Wire value stored in `fieldType` and written to export payloads.
    pub fn value(&self) -> &'static str {
        match self {
            Self::TextInput => "text-input",
            Self::NumberInput => "number-input",
            Self::DateInput => "date-input",
            Self::CheckboxGroup => "checkbox-group",
            Self::RadioGroup => "radio-group",
            Self::DropDown => "drop-down",
            Self::FileInput => "file-input",
            Self::Panel => "panel",
            Self::PlainText => "plain-text",
            Self::Button => "button",
            Self::DataTable => "data-table",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for FieldType {
    type Err = ParseFieldTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text-input" => Ok(Self::TextInput),
            "number-input" => Ok(Self::NumberInput),
            "date-input" => Ok(Self::DateInput),
            "checkbox-group" => Ok(Self::CheckboxGroup),
            "radio-group" => Ok(Self::RadioGroup),
            "drop-down" => Ok(Self::DropDown),
            "file-input" => Ok(Self::FileInput),
            "panel" => Ok(Self::Panel),
            "plain-text" => Ok(Self::PlainText),
            "button" => Ok(Self::Button),
            "data-table" => Ok(Self::DataTable),
            other => Err(ParseFieldTypeError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFieldTypeError(pub String);

impl fmt::Display for ParseFieldTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown field type '{}'", self.0)
    }
}

impl Error for ParseFieldTypeError {}

/// Typed view of the `dataSourceType` property.
///
/// The stored string stays authoritative; unrecognised values are kept in
/// [`DataSourceType::Other`] rather than rejected.
#[derive(Clone, Debug, Default, Hash, Eq, PartialEq)]
pub enum DataSourceType {
    /// `dataSource` holds the rows as inline JSON.
    #[default]
    Inline,
    /// `dataSource` is a URL the client fetches the rows from.
    Url,
    Other(String),
}

impl DataSourceType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Inline => "inline",
            Self::Url => "url",
            Self::Other(raw) => raw,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Url)
    }
}

impl From<&str> for DataSourceType {
    fn from(value: &str) -> Self {
        match value {
            "inline" => Self::Inline,
            "url" => Self::Url,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for DataSourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_type_parses_its_own_wire_value() {
        for field_type in [FieldType::TextInput, FieldType::Panel, FieldType::DataTable] {
            let parsed: FieldType = field_type.value().parse().expect("parse wire value");
            assert_eq!(parsed, field_type);
        }
        assert_eq!(FieldType::DataTable.value(), "data-table");
    }

    #[test]
    fn field_type_rejects_unknown_values() {
        let err = "spreadsheet".parse::<FieldType>().unwrap_err();
        assert_eq!(err.to_string(), "unknown field type 'spreadsheet'");
    }

    #[test]
    fn field_type_serializes_kebab_case() {
        let json = serde_json::to_string(&FieldType::DataTable).expect("serialize FieldType");
        assert_eq!(json, "\"data-table\"");
    }

    #[test]
    fn data_source_type_keeps_unknown_values() {
        assert_eq!(DataSourceType::from("inline"), DataSourceType::Inline);
        assert!(DataSourceType::from("url").is_remote());
        let other = DataSourceType::from("graphql");
        assert_eq!(other.as_str(), "graphql");
        assert!(!other.is_remote());
        assert_eq!(DataSourceType::default().to_string(), "inline");
    }
}
