//! Error types for content loading and property coercion.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building or querying a [`crate::ContentTree`].
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read content file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("content is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("content document must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("mount path must be absolute: '{0}'")]
    InvalidMountPath(String),

    #[error("no resource at path: {0}")]
    NotFound(String),
}

/// A stored property could not be read as the requested type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("property '{key}' holds {found}, expected {expected}")]
pub struct CoercionError {
    pub key: String,
    pub expected: &'static str,
    pub found: String,
}
