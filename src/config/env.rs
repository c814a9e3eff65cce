// src/config/env.rs

//! Flattening of env-var layers into a [`ResolvedEnvironment`].
//!
//! A layer may appear at any nesting level of a document. Layers are applied
//! in walk order: the current level first, then every nested mapping in key
//! order. A later write for the same variable wins, so deeper layers override
//! shallower ones.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::config::model::{ENV_VARS_KEY, EnvVars, Settings, env_layer_from_value};

/// Flattened variable name to value mapping produced by one resolution.
///
/// It is never written into the launcher's own environment; the supervisor
/// applies it to the spawned child on top of the inherited environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedEnvironment {
    vars: BTreeMap<String, String>,
}

impl ResolvedEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay `layer`: same-named keys are overwritten, others are kept.
    pub fn apply_layer(&mut self, layer: &EnvVars) {
        for (name, value) in layer {
            self.vars.insert(name.clone(), value.clone());
        }
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Look `name` up here first, then in the inherited process environment.
    pub fn lookup(&self, name: &str) -> Option<String> {
        self.get(name)
            .map(str::to_string)
            .or_else(|| std::env::var(name).ok())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ResolvedEnvironment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut env = ResolvedEnvironment::new();
        for (k, v) in iter {
            env.set(k, v);
        }
        env
    }
}

/// Overlay the software layer on a copy of the global layer.
///
/// The global layer is never mutated and no key is ever dropped.
pub fn merge_env_layers(global: &EnvVars, software: &EnvVars) -> EnvVars {
    let mut merged = global.clone();
    merged.extend(software.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

/// Apply every `env_vars` layer found in `settings` and below it.
pub fn apply_nested_layers(
    env: &mut ResolvedEnvironment,
    settings: &Settings,
    context: &str,
) -> Result<(), String> {
    if let Some(layer) = settings.get(ENV_VARS_KEY) {
        let layer = env_layer_from_value(layer, &format!("{context}.{ENV_VARS_KEY}"))?;
        env.apply_layer(&layer);
    }

    for (key, value) in settings {
        if key == ENV_VARS_KEY {
            continue;
        }
        if let Value::Object(nested) = value {
            apply_nested_layers(env, nested, &format!("{context}.{key}"))?;
        }
    }

    Ok(())
}
