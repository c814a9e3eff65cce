// src/registry.rs

//! Vendor name to launcher factory.
//!
//! Every factory produces a `Box<dyn Launcher>`, so the "must provide
//! `execute`" check on registered launchers is enforced by the type system;
//! the remaining runtime checks happen in the catalog.

use std::collections::BTreeMap;
use std::fmt;

use tracing::{info, warn};

use crate::errors::{Result, StarterpackError};
use crate::launcher::{LaunchArgs, LaunchContext, LaunchStatus, Launcher, LauncherFactory};
use crate::plugin::PluginCatalog;

/// Launcher factories by vendor name.
#[derive(Default)]
pub struct LauncherRegistry {
    factories: BTreeMap<String, LauncherFactory>,
    loaded: bool,
}

impl fmt::Debug for LauncherRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LauncherRegistry")
            .field("vendors", &self.vendor_names())
            .field("loaded", &self.loaded)
            .finish()
    }
}

impl LauncherRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry populated from the core side of every registrable plugin.
    pub fn from_catalog(catalog: &PluginCatalog) -> Result<Self> {
        let mut registry = Self::new();
        registry.load_vendor_launchers(catalog)?;
        Ok(registry)
    }

    /// Register the launcher factory of every registrable plugin.
    ///
    /// Only the first call does any work.
    pub fn load_vendor_launchers(&mut self, catalog: &PluginCatalog) -> Result<()> {
        if self.loaded {
            return Ok(());
        }

        for plugin in catalog.load_core_plugins()? {
            let core = plugin.core().ok_or_else(|| {
                StarterpackError::ContractViolation(format!(
                    "plugin {} lost its core integration",
                    plugin.name()
                ))
            })?;
            self.register(plugin.name(), core.register_launcher());
        }

        self.loaded = true;
        Ok(())
    }

    /// Bind `vendor` to `factory`, replacing any previous binding.
    pub fn register(&mut self, vendor: impl Into<String>, factory: LauncherFactory) {
        let vendor = vendor.into();
        if self.factories.insert(vendor.clone(), factory).is_some() {
            warn!(vendor = %vendor, "launcher factory replaced");
        }
    }

    pub fn resolve(&self, vendor: &str) -> Result<&LauncherFactory> {
        self.factories
            .get(vendor)
            .ok_or_else(|| StarterpackError::UnknownVendor(vendor.to_string()))
    }

    pub fn contains(&self, vendor: &str) -> bool {
        self.factories.contains_key(vendor)
    }

    pub fn vendor_names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    /// Construct the launcher of `vendor` and execute it.
    ///
    /// The launcher is returned so the caller can keep the process handle or
    /// wait for it.
    pub fn launch(
        &self,
        vendor: &str,
        args: &LaunchArgs,
        ctx: &LaunchContext,
    ) -> Result<Box<dyn Launcher>> {
        let factory = self.resolve(vendor)?;
        let mut launcher = factory(args, ctx)?;

        match launcher.execute()? {
            LaunchStatus::Started { pid } => info!(vendor, pid = ?pid, "launched"),
            LaunchStatus::AlreadyRunning { name } => {
                info!(vendor, process = %name, "launch skipped")
            }
        }

        Ok(launcher)
    }
}
