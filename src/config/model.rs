// src/config/model.rs

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Key under which every level of a document may carry an env-var layer.
pub const ENV_VARS_KEY: &str = "env_vars";

/// One env-var layer: variable name to value.
pub type EnvVars = BTreeMap<String, String>;

/// Free-form, vendor-specific settings of one software version.
pub type Settings = Map<String, Value>;

/// A non-empty configuration document as read from YAML or TOML.
///
/// YAML and TOML both go through `serde_json::Value` first, so numeric keys
/// such as `2024:` arrive here as strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDocument(pub Map<String, Value>);

impl RawDocument {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

/// The global document as deserialized, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawGlobalConfig {
    #[serde(default)]
    pub software_configs: Option<BTreeMap<String, PathBuf>>,

    #[serde(default, deserialize_with = "deserialize_env_layer")]
    pub env_vars: EnvVars,

    #[serde(flatten)]
    pub extra: Settings,
}

/// A software document as deserialized, before validation.
///
/// Unknown top-level keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSoftwareConfig {
    #[serde(default, deserialize_with = "deserialize_env_layer")]
    pub env_vars: EnvVars,

    /// A version declared with no body (`2023:`) is `None`.
    #[serde(default)]
    pub versions: Option<BTreeMap<String, Option<Settings>>>,
}

/// The global document, named by `WL_SP_CONFIG`.
///
/// ```yaml
/// software_configs:
///   afterfx: configs/afterfx.yaml
/// env_vars:
///   STUDIO_ROOT: /mnt/studio
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalConfig {
    /// Software name to the path of its software document.
    pub software_configs: BTreeMap<String, PathBuf>,

    /// Default env-var layer shared by every software.
    pub env_vars: EnvVars,

    /// Any other top-level keys. They are walked for nested `env_vars`.
    pub extra: Settings,
}

impl GlobalConfig {
    pub fn software_config_path(&self, software: &str) -> Option<&PathBuf> {
        self.software_configs.get(software)
    }
}

/// A per-software document.
///
/// ```yaml
/// env_vars:
///   AE_PLUGINS: /mnt/studio/ae/plugins
/// versions:
///   "2024":
///     bin_path: C:/Program Files/Adobe/After Effects 2024/Support Files/AfterFX.exe
///     env_vars:
///       AE_VERSION: "2024"
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SoftwareConfig {
    /// Overrides (never deletes) keys of the global layer.
    pub env_vars: EnvVars,

    /// Version string to version-specific settings.
    pub versions: BTreeMap<String, Settings>,
}

impl SoftwareConfig {
    /// Greatest version key under string ordering.
    pub fn latest_version(&self) -> Option<&str> {
        self.versions.keys().next_back().map(String::as_str)
    }
}

fn deserialize_env_layer<'de, D>(deserializer: D) -> Result<EnvVars, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    env_layer_from_value(&value, ENV_VARS_KEY).map_err(serde::de::Error::custom)
}

/// Read one `env_vars` layer.
///
/// Null is an empty layer. Scalar values are stringified so `FRAMES: 24`
/// behaves like `FRAMES: "24"`.
pub fn env_layer_from_value(value: &Value, context: &str) -> Result<EnvVars, String> {
    let entries = match value {
        Value::Null => return Ok(EnvVars::new()),
        Value::Object(entries) => entries,
        other => {
            return Err(format!(
                "{context} must be a mapping (got {})",
                value_kind(other)
            ));
        }
    };

    let mut layer = EnvVars::new();
    for (name, value) in entries {
        let value = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => {
                return Err(format!(
                    "{context}.{name} must be a scalar value (got {})",
                    value_kind(other)
                ));
            }
        };
        layer.insert(name.clone(), value);
    }
    Ok(layer)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
