//! Content node model for adaptive form components.
//!
//! Components are backed by nodes in a hierarchical content repository. This
//! crate models a read-only snapshot of such nodes: the [`Resource`] with its
//! [`ValueMap`] property bag, and a [`ContentTree`] mounted from JSON test or
//! fixture content.

pub mod error;
pub mod resource;
pub mod tree;
pub mod value_map;

pub use error::{CoercionError, ContentError};
pub use resource::Resource;
pub use tree::ContentTree;
pub use value_map::ValueMap;
