// src/launcher/args.rs

use std::collections::BTreeMap;

use crate::errors::{Result, StarterpackError};

/// One named launch option as handed over by an embedding application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Flag(bool),
    Text(String),
    List(Vec<String>),
}

/// Untyped named options for [`LauncherRegistry::launch`].
///
/// Each vendor converts the bag into its own typed options and rejects keys
/// it does not know.
///
/// [`LauncherRegistry::launch`]: crate::registry::LauncherRegistry::launch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchArgs {
    values: BTreeMap<String, ArgValue>,
}

impl LaunchArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_flag(mut self, name: &str, value: bool) -> Self {
        self.values.insert(name.to_string(), ArgValue::Flag(value));
        self
    }

    pub fn with_text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.values.insert(name.to_string(), ArgValue::Text(value.into()));
        self
    }

    pub fn with_list<I, S>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.values.insert(name.to_string(), ArgValue::List(values));
        self
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// A flag; absent means `false`.
    pub fn flag(&self, name: &str) -> Result<bool> {
        match self.values.get(name) {
            None => Ok(false),
            Some(ArgValue::Flag(b)) => Ok(*b),
            Some(other) => Err(wrong_type(name, "a flag", other)),
        }
    }

    pub fn text(&self, name: &str) -> Result<Option<&str>> {
        match self.values.get(name) {
            None => Ok(None),
            Some(ArgValue::Text(s)) => Ok(Some(s)),
            Some(other) => Err(wrong_type(name, "a text value", other)),
        }
    }

    /// A list; absent means empty.
    pub fn list(&self, name: &str) -> Result<&[String]> {
        match self.values.get(name) {
            None => Ok(&[]),
            Some(ArgValue::List(items)) => Ok(items),
            Some(other) => Err(wrong_type(name, "a list", other)),
        }
    }

    /// Fail on the first option not listed in `known`.
    pub fn ensure_known(&self, vendor: &str, known: &[&str]) -> Result<()> {
        match self.names().find(|name| !known.contains(name)) {
            Some(name) => Err(StarterpackError::InvalidArgument(format!(
                "unknown option '{name}' for {vendor} (expected one of: {})",
                known.join(", ")
            ))),
            None => Ok(()),
        }
    }
}

fn wrong_type(name: &str, expected: &str, got: &ArgValue) -> StarterpackError {
    StarterpackError::InvalidArgument(format!("option '{name}' must be {expected} (got {got:?})"))
}
