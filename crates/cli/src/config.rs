//! Export settings for the `afcore` CLI.
//!
//! Settings live in a small JSON file under the standard configuration
//! directory (`~/.config/afcore/export.json` on most platforms). A missing file
//! yields the defaults; a file that fails to parse is logged and ignored.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use dirs_next::{config_dir, home_dir};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Environment variable allowing callers to override the settings file path.
pub const EXPORT_CONFIG_PATH_ENV: &str = "AFCORE_EXPORT_CONFIG_PATH";

pub const EXPORT_CONFIG_FILE_NAME: &str = "export.json";

pub const DEFAULT_CONTENT_ROOT: &str = "/content";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read export settings {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportSettings {
    /// Pretty-print JSON output.
    pub pretty: bool,
    /// Path content fixtures are mounted at when `--root` is not given.
    pub content_root: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            pretty: true,
            content_root: DEFAULT_CONTENT_ROOT.to_string(),
        }
    }
}

impl ExportSettings {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path(&default_config_path())
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(data) => match serde_json::from_str(&data) {
                Ok(settings) => Ok(settings),
                Err(error) => {
                    warn!(
                        path = %path.display(),
                        error = %error,
                        "Failed to parse export settings; using defaults"
                    );
                    Ok(Self::default())
                }
            },
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

/// Resolves the settings file, honouring [`EXPORT_CONFIG_PATH_ENV`].
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = env::var(EXPORT_CONFIG_PATH_ENV)
        && !path.trim().is_empty()
    {
        return expand_tilde(&path);
    }

    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("afcore")
        .join(EXPORT_CONFIG_FILE_NAME)
}

fn expand_tilde(path: &str) -> PathBuf {
    let trimmed = path.trim();
    let home = || home_dir().unwrap_or_else(|| PathBuf::from("~"));
    if trimmed == "~" {
        return home();
    }
    match trimmed.strip_prefix("~/") {
        Some(rest) => home().join(rest),
        None => PathBuf::from(trimmed),
    }
}
