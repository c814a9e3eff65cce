// src/plugin/catalog.rs

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::errors::{Result, StarterpackError};
use crate::plugin::VendorPlugin;

/// Namespace of the built-in vendors.
pub const VENDOR_NAMESPACE: &str = "starterpack::vendors";

/// Identity of an installed vendor plugin.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PluginIdentity {
    pub namespace: String,
    pub name: String,
}

impl fmt::Display for PluginIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.namespace, self.name)
    }
}

/// Which integration side is being loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Cli,
    Core,
}

impl Side {
    fn required(self) -> &'static str {
        match self {
            Side::Cli => "can_be_registered, register_cli, execute",
            Side::Core => "can_be_registered, register_launcher",
        }
    }
}

/// The set of installed vendor plugins, in registration order.
#[derive(Clone)]
pub struct PluginCatalog {
    namespace: String,
    plugins: Vec<Arc<dyn VendorPlugin>>,
}

impl fmt::Debug for PluginCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginCatalog")
            .field("namespace", &self.namespace)
            .field("plugins", &self.plugins.iter().map(|p| p.name()).collect::<Vec<_>>())
            .finish()
    }
}

impl PluginCatalog {
    /// Build a catalog; plugin names must be unique.
    pub fn new(
        namespace: impl Into<String>,
        plugins: Vec<Arc<dyn VendorPlugin>>,
    ) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for plugin in &plugins {
            if !seen.insert(plugin.name()) {
                return Err(StarterpackError::ContractViolation(format!(
                    "vendor name '{}' is provided by more than one plugin",
                    plugin.name()
                )));
            }
        }

        Ok(Self {
            namespace: namespace.into(),
            plugins,
        })
    }

    /// Vendors compiled into this binary.
    pub fn builtin() -> Result<Self> {
        Self::new(VENDOR_NAMESPACE, crate::vendors::builtin_plugins())
    }

    /// Identities of every installed plugin, registrable or not.
    pub fn discover(&self) -> Vec<PluginIdentity> {
        self.plugins
            .iter()
            .map(|p| PluginIdentity {
                namespace: self.namespace.clone(),
                name: p.name().to_string(),
            })
            .collect()
    }

    pub fn load(&self, identity: &PluginIdentity) -> Result<Arc<dyn VendorPlugin>> {
        if identity.namespace != self.namespace {
            return Err(StarterpackError::UnknownVendor(identity.to_string()));
        }
        self.plugins
            .iter()
            .find(|p| p.name() == identity.name)
            .cloned()
            .ok_or_else(|| StarterpackError::UnknownVendor(identity.to_string()))
    }

    /// Plugins usable from the CLI on this machine.
    ///
    /// Every plugin must provide the CLI side; the first one that does not
    /// aborts loading. Plugins that cannot be registered are skipped.
    pub fn load_cli_plugins(&self) -> Result<Vec<Arc<dyn VendorPlugin>>> {
        self.load_side(Side::Cli)
    }

    /// Plugins usable through the launcher registry on this machine.
    pub fn load_core_plugins(&self) -> Result<Vec<Arc<dyn VendorPlugin>>> {
        self.load_side(Side::Core)
    }

    fn load_side(&self, side: Side) -> Result<Vec<Arc<dyn VendorPlugin>>> {
        let mut loaded = Vec::new();

        for identity in self.discover() {
            let plugin = self.load(&identity)?;

            let provided = match side {
                Side::Cli => plugin.cli().is_some(),
                Side::Core => plugin.core().is_some(),
            };
            if !provided {
                return Err(StarterpackError::ContractViolation(format!(
                    "plugin {identity} does not provide its {side:?} integration ({})",
                    side.required()
                )));
            }

            if !plugin.can_be_registered() {
                debug!(plugin = %identity, "plugin cannot be registered here; skipping");
                continue;
            }

            debug!(plugin = %identity, side = ?side, "plugin loaded");
            loaded.push(plugin);
        }

        Ok(loaded)
    }
}
