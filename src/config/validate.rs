// src/config/validate.rs

//! Semantic checks that turn deserialized documents into typed config views.
//!
//! Shape errors are reported by `serde` while deserializing the raw structs.
//! Errors here are plain messages; the loader attaches the document path and
//! turns them into `StarterpackError::ConfigParse`.

use std::collections::BTreeMap;

use crate::config::model::{GlobalConfig, RawGlobalConfig, RawSoftwareConfig, SoftwareConfig};

impl TryFrom<RawGlobalConfig> for GlobalConfig {
    type Error = String;

    fn try_from(raw: RawGlobalConfig) -> Result<Self, Self::Error> {
        let software_configs = raw.software_configs.unwrap_or_default();

        for (name, path) in &software_configs {
            if name.trim().is_empty() {
                return Err("software_configs contains an empty software name".to_string());
            }
            if path.as_os_str().is_empty() {
                return Err(format!("software_configs.{name} must not be an empty path"));
            }
        }

        Ok(GlobalConfig {
            software_configs,
            env_vars: raw.env_vars,
            extra: raw.extra,
        })
    }
}

impl TryFrom<RawSoftwareConfig> for SoftwareConfig {
    type Error = String;

    fn try_from(raw: RawSoftwareConfig) -> Result<Self, Self::Error> {
        let mut versions = BTreeMap::new();

        for (version, settings) in raw.versions.unwrap_or_default() {
            if version.trim().is_empty() {
                return Err("versions contains an empty version name".to_string());
            }
            versions.insert(version, settings.unwrap_or_default());
        }

        Ok(SoftwareConfig {
            env_vars: raw.env_vars,
            versions,
        })
    }
}

