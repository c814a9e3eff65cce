// src/config/resolver.rs

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::env::{ResolvedEnvironment, apply_nested_layers, merge_env_layers};
use crate::config::loader::{
    load_global_config, load_software_config, parse_error, resolve_software_path,
};
use crate::config::model::{GlobalConfig, Settings, SoftwareConfig};
use crate::errors::Result;
use crate::fs::FileSystem;

/// Environment variable naming the global config document.
pub const GLOBAL_CONFIG_ENV: &str = "WL_SP_CONFIG";

/// Outcome of picking the active version from a version table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSelection {
    /// The requested version exists.
    Requested(String),
    /// Nothing was requested; the greatest key was picked.
    Latest(String),
    /// The requested version is absent; its settings are empty.
    Missing(String),
    /// Nothing requested and the table is empty.
    None,
}

impl VersionSelection {
    pub fn version(&self) -> Option<&str> {
        match self {
            VersionSelection::Requested(v)
            | VersionSelection::Latest(v)
            | VersionSelection::Missing(v) => Some(v),
            VersionSelection::None => None,
        }
    }
}

/// Pick the active version of a software.
pub fn select_version(config: &SoftwareConfig, requested: Option<&str>) -> VersionSelection {
    match requested {
        Some(v) if config.versions.contains_key(v) => VersionSelection::Requested(v.to_string()),
        Some(v) => VersionSelection::Missing(v.to_string()),
        None => match config.latest_version() {
            Some(v) => VersionSelection::Latest(v.to_string()),
            None => VersionSelection::None,
        },
    }
}

/// Result of one resolution for one software.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedConfig {
    pub software: String,
    pub version: Option<String>,
    /// Settings of the active version; empty when there is none.
    pub settings: Settings,
    pub env: ResolvedEnvironment,
}

impl ResolvedConfig {
    /// A string setting of the active version.
    pub fn setting_str(&self, key: &str) -> Option<&str> {
        self.settings.get(key).and_then(|v| v.as_str())
    }
}

/// Loads the two-tier configuration and flattens it for one software.
#[derive(Clone)]
pub struct ConfigResolver {
    fs: Arc<dyn FileSystem>,
    global_path: Option<PathBuf>,
}

impl fmt::Debug for ConfigResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigResolver")
            .field("global_path", &self.global_path)
            .finish()
    }
}

impl ConfigResolver {
    pub fn new(fs: Arc<dyn FileSystem>, global_path: Option<PathBuf>) -> Self {
        Self { fs, global_path }
    }

    /// Take the global document path from `WL_SP_CONFIG`.
    pub fn from_env(fs: Arc<dyn FileSystem>) -> Self {
        let global_path = std::env::var_os(GLOBAL_CONFIG_ENV)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);
        Self::new(fs, global_path)
    }

    pub fn global_path(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Resolve active settings and the merged environment for `software`.
    ///
    /// Missing or empty documents only produce warnings; malformed ones are
    /// fatal.
    pub fn resolve(&self, software: &str, requested_version: Option<&str>) -> Result<ResolvedConfig> {
        let global = self.load_global()?;
        let software_doc = self.load_software(&global, software)?;

        let mut resolved = ResolvedConfig {
            software: software.to_string(),
            ..ResolvedConfig::default()
        };

        let software_env = software_doc
            .as_ref()
            .map(|(_, doc)| doc.env_vars.clone())
            .unwrap_or_default();
        resolved
            .env
            .apply_layer(&merge_env_layers(&global.env_vars, &software_env));

        if let Some(global_path) = &self.global_path {
            apply_nested_layers(&mut resolved.env, &global.extra, "global")
                .map_err(|e| parse_error(global_path, e))?;
        }

        if let Some((path, doc)) = &software_doc {
            let selection = select_version(doc, requested_version);
            match &selection {
                VersionSelection::Requested(v) => debug!(software, version = %v, "using requested version"),
                VersionSelection::Latest(v) => debug!(software, version = %v, "no version requested; using latest"),
                VersionSelection::Missing(v) => warn!(
                    software,
                    version = %v,
                    available = ?doc.versions.keys().collect::<Vec<_>>(),
                    "requested version is not configured; continuing without version settings"
                ),
                VersionSelection::None => warn!(software, "software config declares no versions"),
            }

            if let Some(settings) = selection.version().and_then(|v| doc.versions.get(v)) {
                resolved.settings = settings.clone();
            }
            resolved.version = selection.version().map(str::to_string);

            apply_nested_layers(&mut resolved.env, &resolved.settings, "version")
                .map_err(|e| parse_error(path, e))?;
        } else {
            resolved.version = requested_version.map(str::to_string);
        }

        debug!(
            software,
            version = ?resolved.version,
            env = ?resolved.env,
            "configuration resolved"
        );

        Ok(resolved)
    }

    fn load_global(&self) -> Result<GlobalConfig> {
        let loaded = match &self.global_path {
            Some(path) => load_global_config(self.fs.as_ref(), path)?,
            None => None,
        };

        Ok(loaded.unwrap_or_else(|| {
            warn!(
                "the global config is nonexistent or empty; ensure the env var {GLOBAL_CONFIG_ENV} is set"
            );
            GlobalConfig::default()
        }))
    }

    fn load_software(
        &self,
        global: &GlobalConfig,
        software: &str,
    ) -> Result<Option<(PathBuf, SoftwareConfig)>> {
        let Some(configured) = global.software_config_path(software) else {
            warn!(software, "no software config path is set inside the global config");
            return Ok(None);
        };

        let path = match &self.global_path {
            Some(global_path) => resolve_software_path(global_path, configured),
            None => configured.clone(),
        };

        match load_software_config(self.fs.as_ref(), &path)? {
            Some(doc) => Ok(Some((path, doc))),
            None => {
                warn!(software, path = %path.display(), "the software config is nonexistent or empty");
                Ok(None)
            }
        }
    }
}
