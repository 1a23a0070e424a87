//! Binds resource types to component models.
//!
//! A content node is adapted by the model registered under its exact
//! `sling:resourceType`. There is no prefix or supertype matching.

use indexmap::IndexMap;
use thiserror::Error;
use tracing::debug;

use afcore_content::Resource;
use afcore_types::RT_FD_FORM_DATA_TABLE_V1;

use crate::datatable::DataTableField;
use crate::exporter::ComponentExporter;

/// Builds a model from a node already known to carry the bound resource type.
pub type ModelAdapter = fn(&Resource) -> Box<dyn ComponentExporter + Send + Sync>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdaptError {
    #[error("resource {path} has no resource type")]
    MissingResourceType { path: String },

    #[error("no model bound to resource type '{resource_type}' (resource {path})")]
    UnsupportedResourceType { path: String, resource_type: String },
}

#[derive(Debug, Clone, Default)]
pub struct ModelFactory {
    adapters: IndexMap<String, ModelAdapter>,
}

impl ModelFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory with every model shipped in this crate registered.
    pub fn with_defaults() -> Self {
        let mut factory = Self::new();
        factory.register(RT_FD_FORM_DATA_TABLE_V1, data_table_adapter);
        factory
    }

    /// Binds `resource_type` to `adapter`, replacing any earlier binding.
    pub fn register(&mut self, resource_type: impl Into<String>, adapter: ModelAdapter) {
        self.adapters.insert(resource_type.into(), adapter);
    }

    pub fn is_registered(&self, resource_type: &str) -> bool {
        self.adapters.contains_key(resource_type)
    }

    pub fn resource_types(&self) -> impl Iterator<Item = &str> {
        self.adapters.keys().map(String::as_str)
    }

    pub fn adapt(&self, resource: &Resource) -> Result<Box<dyn ComponentExporter + Send + Sync>, AdaptError> {
        let resource_type = resource.resource_type().ok_or_else(|| AdaptError::MissingResourceType {
            path: resource.path().to_string(),
        })?;
        let adapter = self
            .adapters
            .get(resource_type)
            .ok_or_else(|| AdaptError::UnsupportedResourceType {
                path: resource.path().to_string(),
                resource_type: resource_type.to_string(),
            })?;
        debug!(path = resource.path(), resource_type, "adapting resource");
        Ok(adapter(resource))
    }
}

fn data_table_adapter(resource: &Resource) -> Box<dyn ComponentExporter + Send + Sync> {
    Box::new(DataTableField::from_resource(resource))
}

#[cfg(test)]
mod tests {
    use afcore_content::ValueMap;
    use afcore_types::property;

    use super::*;

    fn node(resource_type: Option<&str>) -> Resource {
        let mut properties = ValueMap::new();
        if let Some(resource_type) = resource_type {
            properties.insert(property::RESOURCE_TYPE, resource_type);
        }
        properties.insert(property::HEIGHT, "420px");
        Resource::new("/content/table", properties)
    }

    #[test]
    fn adapts_bound_resource_type() {
        let factory = ModelFactory::with_defaults();
        assert!(factory.is_registered(RT_FD_FORM_DATA_TABLE_V1));

        let model = factory.adapt(&node(Some(RT_FD_FORM_DATA_TABLE_V1))).expect("adapt data table");
        assert_eq!(model.exported_type(), RT_FD_FORM_DATA_TABLE_V1);
        let payload = model.export().expect("export payload");
        assert_eq!(payload["height"], "420px");
    }

    #[test]
    fn refuses_near_miss_resource_types() {
        let factory = ModelFactory::with_defaults();
        for near_miss in [
            "core/fd/components/form/datatable/v1",
            "core/fd/components/form/datatable/v2/datatable",
            "Core/fd/components/form/datatable/v1/datatable",
        ] {
            let err = factory.adapt(&node(Some(near_miss))).err().expect("near miss must be refused");
            assert_eq!(
                err,
                AdaptError::UnsupportedResourceType {
                    path: "/content/table".to_string(),
                    resource_type: near_miss.to_string(),
                }
            );
        }
    }

    #[test]
    fn refuses_untyped_resources() {
        let factory = ModelFactory::with_defaults();
        let err = factory.adapt(&node(None)).err().expect("untyped node must be refused");
        assert_eq!(err.to_string(), "resource /content/table has no resource type");
    }

    #[test]
    fn empty_factory_binds_nothing() {
        let factory = ModelFactory::new();
        assert_eq!(factory.resource_types().count(), 0);
        assert!(factory.adapt(&node(Some(RT_FD_FORM_DATA_TABLE_V1))).is_err());
    }
}
