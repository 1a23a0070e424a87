//! Component models for adaptive form fields.
//!
//! A model is a read-only projection of a content node. Models are built per
//! adaptation, hold no shared state, and can be exported as JSON through
//! [`ComponentExporter`].

pub mod datatable;
pub mod exporter;
pub mod factory;
pub mod field;

pub use datatable::{DataTable, DataTableConfig, DataTableField};
pub use exporter::{ComponentExporter, DataTableExport};
pub use factory::{AdaptError, ModelAdapter, ModelFactory};
pub use field::{Field, FieldMetadata, Label};
