// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod launcher;
pub mod logging;
pub mod plugin;
pub mod registry;
pub mod vendors;

use std::sync::Arc;

use tracing::{debug, info};

use crate::cli::Invocation;
use crate::errors::Result;
use crate::launcher::LaunchContext;
use crate::plugin::VendorPlugin;

pub use crate::errors::StarterpackError;
pub use crate::launcher::{LaunchArgs, Launcher};
pub use crate::plugin::PluginCatalog;
pub use crate::registry::LauncherRegistry;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - the vendor named on the command line
/// - config resolution and command building (inside the vendor)
/// - process supervision
///
/// Without a vendor, the top-level help is printed. Unless `--detach` was
/// given, this returns once the launched application has exited.
pub async fn run(
    invocation: Invocation,
    plugins: &[Arc<dyn VendorPlugin>],
    ctx: LaunchContext,
) -> Result<()> {
    let Some(vendor) = invocation.vendor else {
        cli::build_command(plugins).print_help()?;
        return Ok(());
    };

    let name = vendor.plugin.name();
    let cli = vendor.plugin.cli().ok_or_else(|| {
        StarterpackError::ContractViolation(format!("plugin {name} has no CLI integration"))
    })?;

    let detach = invocation.args.detach;
    let ctx = if detach { ctx.detached() } else { ctx };

    info!(vendor = name, detach, "launching");
    let mut launcher = cli.execute(&vendor.matches, &ctx)?;

    if detach {
        debug!(vendor = name, "detached; not waiting for the application");
        return Ok(());
    }

    launcher.wait().await;
    info!(vendor = name, "application exited");
    Ok(())
}
