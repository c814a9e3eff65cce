// src/plugin/mod.rs

//! Vendor plugin contract.
//!
//! Vendors are compiled in and listed by [`catalog::PluginCatalog`]. A plugin
//! exposes up to two integration sides:
//!
//! - the CLI side ([`VendorCli`]): declares vendor flags and launches from
//!   parsed arguments;
//! - the core side ([`VendorCore`]): hands a launcher factory to the
//!   [`LauncherRegistry`](crate::registry::LauncherRegistry).
//!
//! Loading a side a plugin does not provide is a contract violation.

pub mod catalog;

use clap::ArgMatches;

use crate::errors::Result;
use crate::launcher::{LaunchContext, Launcher, LauncherFactory};

pub use catalog::{PluginCatalog, PluginIdentity, VENDOR_NAMESPACE};

pub trait VendorPlugin: Send + Sync {
    /// Unique vendor name; also the CLI subcommand.
    fn name(&self) -> &'static str;

    /// False when the vendor cannot run here (e.g. unsupported platform).
    /// Such plugins are skipped, not rejected.
    fn can_be_registered(&self) -> bool;

    fn cli(&self) -> Option<&dyn VendorCli> {
        None
    }

    fn core(&self) -> Option<&dyn VendorCore> {
        None
    }
}

/// CLI integration of a vendor.
pub trait VendorCli: Send + Sync {
    /// Declare the vendor-specific flags on its subcommand.
    fn register_cli(&self, command: clap::Command) -> clap::Command;

    /// Build a launcher from parsed flags and execute it.
    fn execute(&self, matches: &ArgMatches, ctx: &LaunchContext) -> Result<Box<dyn Launcher>>;
}

/// Core (library) integration of a vendor.
pub trait VendorCore: Send + Sync {
    fn register_launcher(&self) -> LauncherFactory;
}
