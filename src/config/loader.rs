// src/config/loader.rs

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::model::{
    GlobalConfig, RawDocument, RawGlobalConfig, RawSoftwareConfig, SoftwareConfig,
};
use crate::errors::{Result, StarterpackError};
use crate::fs::FileSystem;

/// Serialization format of a config document, picked from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Toml,
}

impl DocumentFormat {
    /// `.toml` is TOML; everything else is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => DocumentFormat::Toml,
            _ => DocumentFormat::Yaml,
        }
    }
}

/// Load a document from `path`.
///
/// Returns `Ok(None)` when the file does not exist or holds no data; callers
/// treat that as a non-fatal condition. Malformed content is a fatal
/// `ConfigParse` error.
pub fn load_document(fs: &dyn FileSystem, path: &Path) -> Result<Option<RawDocument>> {
    if !fs.is_file(path) {
        return Ok(None);
    }

    let contents = fs.read_to_string(path)?;
    if contents.trim().is_empty() {
        return Ok(None);
    }

    let value: Value = match DocumentFormat::from_path(path) {
        DocumentFormat::Yaml => serde_yaml::from_str(&contents).map_err(|e| parse_error(path, e))?,
        DocumentFormat::Toml => toml::from_str(&contents).map_err(|e| parse_error(path, e))?,
    };

    match value {
        Value::Null => Ok(None),
        Value::Object(map) if map.is_empty() => Ok(None),
        Value::Object(map) => Ok(Some(RawDocument(map))),
        _ => Err(parse_error(path, "top level must be a mapping")),
    }
}

pub fn load_global_config(fs: &dyn FileSystem, path: &Path) -> Result<Option<GlobalConfig>> {
    load_and_validate::<RawGlobalConfig, GlobalConfig>(fs, path)
}

pub fn load_software_config(fs: &dyn FileSystem, path: &Path) -> Result<Option<SoftwareConfig>> {
    load_and_validate::<RawSoftwareConfig, SoftwareConfig>(fs, path)
}

/// Deserialize a document into its raw struct `R`, then validate it into `T`.
fn load_and_validate<R, T>(fs: &dyn FileSystem, path: &Path) -> Result<Option<T>>
where
    R: DeserializeOwned,
    T: TryFrom<R, Error = String>,
{
    let Some(doc) = load_document(fs, path)? else {
        return Ok(None);
    };

    let raw: R = serde_json::from_value(doc.into_value()).map_err(|e| parse_error(path, e))?;
    let config = T::try_from(raw).map_err(|e| parse_error(path, e))?;
    Ok(Some(config))
}

/// Resolve a `software_configs` entry.
///
/// Relative paths are taken relative to the directory holding the global
/// document.
pub fn resolve_software_path(global_path: &Path, software_path: &Path) -> PathBuf {
    if software_path.is_absolute() {
        return software_path.to_path_buf();
    }
    match global_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(software_path),
        _ => software_path.to_path_buf(),
    }
}

pub(crate) fn parse_error(path: &Path, err: impl std::fmt::Display) -> StarterpackError {
    StarterpackError::ConfigParse {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}
