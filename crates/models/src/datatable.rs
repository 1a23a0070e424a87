//! Data table form field.
//!
//! The model is a plain projection of the content node: each property is
//! read with a declared default and handed to consumers verbatim. The
//! `dataSource`, `columns`, and `viewConfig` blobs stay opaque; the client
//! table view interprets them.

use std::time::Duration;

use indexmap::IndexMap;
use tracing::debug;

use afcore_content::{Resource, ValueMap};
use afcore_types::{DataSourceType, FieldType, RT_FD_FORM_DATA_TABLE_V1, property};

use crate::exporter::{ComponentExporter, DataTableExport};
use crate::factory::AdaptError;
use crate::field::{Field, FieldMetadata, Label};

pub const DEFAULT_DATA_SOURCE_TYPE: &str = "inline";
pub const DEFAULT_HEIGHT: &str = "300px";
pub const DEFAULT_PAGINATION: bool = true;
pub const DEFAULT_PAGE_SIZE: i32 = 10;
pub const DEFAULT_SORTABLE: bool = true;
pub const DEFAULT_FILTERABLE: bool = true;
pub const DEFAULT_RESIZABLE_COLUMNS: bool = true;
pub const DEFAULT_SELECTABLE_ROWS: bool = false;
/// Seconds between client refreshes; zero disables polling.
pub const DEFAULT_REFRESH_INTERVAL: i32 = 0;

/// Read interface of a data table field.
///
/// Default bodies return the documented defaults, so an implementor with no
/// stored configuration still describes a renderable table.
pub trait DataTable: Field {
    /// Inline JSON rows or a URL, depending on [`DataTable::data_source_type`].
    fn data_source(&self) -> Option<&str> {
        None
    }

    /// `inline` or `url`.
    fn data_source_type(&self) -> &str {
        DEFAULT_DATA_SOURCE_TYPE
    }

    /// JSON-encoded column definitions.
    fn columns(&self) -> Option<&str> {
        None
    }

    /// JSON-encoded named views.
    fn view_config(&self) -> Option<&str> {
        None
    }

    fn height(&self) -> &str {
        DEFAULT_HEIGHT
    }

    fn is_pagination(&self) -> bool {
        DEFAULT_PAGINATION
    }

    fn page_size(&self) -> i32 {
        DEFAULT_PAGE_SIZE
    }

    fn is_sortable(&self) -> bool {
        DEFAULT_SORTABLE
    }

    fn is_filterable(&self) -> bool {
        DEFAULT_FILTERABLE
    }

    fn is_resizable_columns(&self) -> bool {
        DEFAULT_RESIZABLE_COLUMNS
    }

    fn is_selectable_rows(&self) -> bool {
        DEFAULT_SELECTABLE_ROWS
    }

    /// Refresh interval in seconds; `0` means disabled.
    fn refresh_interval(&self) -> i32 {
        DEFAULT_REFRESH_INTERVAL
    }
}

/// Typed data table configuration with declared defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataTableConfig {
    pub data_source: Option<String>,
    pub data_source_type: String,
    pub columns: Option<String>,
    pub view_config: Option<String>,
    pub height: String,
    pub pagination: bool,
    pub page_size: i32,
    pub sortable: bool,
    pub filterable: bool,
    pub resizable_columns: bool,
    pub selectable_rows: bool,
    pub refresh_interval: i32,
}

impl Default for DataTableConfig {
    fn default() -> Self {
        Self {
            data_source: None,
            data_source_type: DEFAULT_DATA_SOURCE_TYPE.to_string(),
            columns: None,
            view_config: None,
            height: DEFAULT_HEIGHT.to_string(),
            pagination: DEFAULT_PAGINATION,
            page_size: DEFAULT_PAGE_SIZE,
            sortable: DEFAULT_SORTABLE,
            filterable: DEFAULT_FILTERABLE,
            resizable_columns: DEFAULT_RESIZABLE_COLUMNS,
            selectable_rows: DEFAULT_SELECTABLE_ROWS,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
        }
    }
}

impl DataTableConfig {
    /// Reads every data table property, falling back to its default when the
    /// property is missing or cannot be coerced.
    pub fn from_value_map(properties: &ValueMap) -> Self {
        Self {
            data_source: properties.get_str(property::DATA_SOURCE),
            data_source_type: properties.get_str_or(property::DATA_SOURCE_TYPE, DEFAULT_DATA_SOURCE_TYPE),
            columns: properties.get_str(property::COLUMNS),
            view_config: properties.get_str(property::VIEW_CONFIG),
            height: properties.get_str_or(property::HEIGHT, DEFAULT_HEIGHT),
            pagination: properties.get_bool_or(property::PAGINATION, DEFAULT_PAGINATION),
            page_size: properties.get_i32_or(property::PAGE_SIZE, DEFAULT_PAGE_SIZE),
            sortable: properties.get_bool_or(property::SORTABLE, DEFAULT_SORTABLE),
            filterable: properties.get_bool_or(property::FILTERABLE, DEFAULT_FILTERABLE),
            resizable_columns: properties.get_bool_or(property::RESIZABLE_COLUMNS, DEFAULT_RESIZABLE_COLUMNS),
            selectable_rows: properties.get_bool_or(property::SELECTABLE_ROWS, DEFAULT_SELECTABLE_ROWS),
            refresh_interval: properties.get_i32_or(property::REFRESH_INTERVAL, DEFAULT_REFRESH_INTERVAL),
        }
    }
}

/// Data table model bound to a content node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataTableField {
    resource_type: String,
    metadata: FieldMetadata,
    config: DataTableConfig,
}

impl DataTableField {
    /// Projects a node without checking its resource type.
    pub fn from_resource(resource: &Resource) -> Self {
        let field = Self {
            resource_type: resource.resource_type().unwrap_or(RT_FD_FORM_DATA_TABLE_V1).to_string(),
            metadata: FieldMetadata::from_resource(resource),
            config: DataTableConfig::from_value_map(resource.properties()),
        };
        if let Some(stored) = field.metadata.field_type.as_deref()
            && field.metadata.typed_field_type() != Some(FieldType::DataTable)
        {
            debug!(path = resource.path(), stored, "ignoring stored fieldType on data table");
        }
        debug!(path = resource.path(), resource_type = %field.resource_type, "loaded data table");
        field
    }

    /// Projects a node whose resource type is exactly the data table's.
    pub fn adapt(resource: &Resource) -> Result<Self, AdaptError> {
        match resource.resource_type() {
            Some(RT_FD_FORM_DATA_TABLE_V1) => Ok(Self::from_resource(resource)),
            Some(other) => Err(AdaptError::UnsupportedResourceType {
                path: resource.path().to_string(),
                resource_type: other.to_string(),
            }),
            None => Err(AdaptError::MissingResourceType {
                path: resource.path().to_string(),
            }),
        }
    }

    pub fn metadata(&self) -> &FieldMetadata {
        &self.metadata
    }

    pub fn config(&self) -> &DataTableConfig {
        &self.config
    }

    pub fn data_source_kind(&self) -> DataSourceType {
        DataSourceType::from(self.config.data_source_type.as_str())
    }

    /// Polling period of the client table view.
    ///
    /// The view re-fetches a URL source every `data-cmp-refreshinterval`
    /// seconds when that attribute is positive; inline rows are never polled.
    /// The `attributes` command reports this period alongside the attributes.
    pub fn auto_refresh(&self) -> Option<Duration> {
        if !self.data_source_kind().is_remote() {
            return None;
        }
        let seconds = u64::try_from(self.config.refresh_interval).ok()?;
        (seconds > 0).then(|| Duration::from_secs(seconds))
    }

    /// `data-cmp-*` attributes written by the rendering template.
    pub fn data_attributes(&self) -> IndexMap<String, String> {
        let config = &self.config;
        let mut attributes = IndexMap::new();
        let mut put = |name: &str, value: String| {
            attributes.insert(format!("data-cmp-{name}"), value);
        };

        if let Some(data_source) = &config.data_source {
            put("datasource", data_source.clone());
        }
        put("datasourcetype", config.data_source_type.clone());
        if let Some(columns) = &config.columns {
            put("columns", columns.clone());
        }
        if let Some(view_config) = &config.view_config {
            put("viewconfig", view_config.clone());
        }
        put("height", config.height.clone());
        put("pagination", config.pagination.to_string());
        put("pagesize", config.page_size.to_string());
        put("sortable", config.sortable.to_string());
        put("filterable", config.filterable.to_string());
        put("resizablecolumns", config.resizable_columns.to_string());
        put("selectablerows", config.selectable_rows.to_string());
        put("refreshinterval", config.refresh_interval.to_string());
        attributes
    }

    pub fn to_export(&self) -> DataTableExport {
        let config = &self.config;
        DataTableExport {
            id: self.metadata.id.clone(),
            field_type: self.field_type().to_string(),
            name: self.metadata.name.clone(),
            label: self.metadata.label.clone(),
            description: self.metadata.description.clone(),
            visible: self.metadata.visible,
            enabled: self.metadata.enabled,
            data_source: config.data_source.clone(),
            data_source_type: config.data_source_type.clone(),
            columns: config.columns.clone(),
            view_config: config.view_config.clone(),
            height: config.height.clone(),
            pagination: config.pagination,
            page_size: config.page_size,
            sortable: config.sortable,
            filterable: config.filterable,
            resizable_columns: config.resizable_columns,
            selectable_rows: config.selectable_rows,
            refresh_interval: config.refresh_interval,
            exported_type: self.exported_type().to_string(),
        }
    }
}

impl Field for DataTableField {
    /// Always `data-table`; a stored `fieldType` does not change it.
    fn field_type(&self) -> &str {
        FieldType::DataTable.value()
    }

    fn id(&self) -> Option<&str> {
        Some(&self.metadata.id)
    }

    fn name(&self) -> Option<&str> {
        self.metadata.name.as_deref()
    }

    fn label(&self) -> Option<&Label> {
        self.metadata.label.as_ref()
    }

    fn description(&self) -> Option<&str> {
        self.metadata.description.as_deref()
    }

    fn is_visible(&self) -> Option<bool> {
        Some(self.metadata.visible)
    }

    fn is_enabled(&self) -> Option<bool> {
        Some(self.metadata.enabled)
    }
}

impl DataTable for DataTableField {
    fn data_source(&self) -> Option<&str> {
        self.config.data_source.as_deref()
    }

    fn data_source_type(&self) -> &str {
        &self.config.data_source_type
    }

    fn columns(&self) -> Option<&str> {
        self.config.columns.as_deref()
    }

    fn view_config(&self) -> Option<&str> {
        self.config.view_config.as_deref()
    }

    fn height(&self) -> &str {
        &self.config.height
    }

    fn is_pagination(&self) -> bool {
        self.config.pagination
    }

    fn page_size(&self) -> i32 {
        self.config.page_size
    }

    fn is_sortable(&self) -> bool {
        self.config.sortable
    }

    fn is_filterable(&self) -> bool {
        self.config.filterable
    }

    fn is_resizable_columns(&self) -> bool {
        self.config.resizable_columns
    }

    fn is_selectable_rows(&self) -> bool {
        self.config.selectable_rows
    }

    fn refresh_interval(&self) -> i32 {
        self.config.refresh_interval
    }
}

impl ComponentExporter for DataTableField {
    fn exported_type(&self) -> &str {
        &self.resource_type
    }

    fn export(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self.to_export())
    }
}
