// src/vendors/afterfx/mod.rs

//! Adobe After Effects.
//!
//! Scripts are run by passing `-s` followed by an inline ExtendScript
//! payload that sets up the script arguments and evaluates the real script
//! file.

pub mod cli;
pub mod command_builder;
pub mod launcher;
pub mod options;

use std::sync::Arc;

use crate::errors::Result;
use crate::launcher::{LaunchArgs, LaunchContext, Launcher, LauncherFactory};
use crate::plugin::{VendorCli, VendorCore, VendorPlugin};

pub use command_builder::AfterFxCommandBuilder;
pub use launcher::{AfterFxLauncher, create_launcher};
pub use options::AfterFxOptions;

/// Vendor name, also the CLI subcommand and the software config key.
pub const VENDOR_NAME: &str = "afterfx";

/// Fallback location of the binary when `--bin-path` is not given.
pub const AFTERFX_BIN_ENV: &str = "WL_SP_AFTERFX_BIN";

/// Process names of a running After Effects instance.
pub const PROCESS_NAMES: &[&str] = &["AfterFX", "AfterFX.exe"];

/// Accepted script extensions.
pub const SCRIPT_EXTENSIONS: &[&str] = &["js", "jsx"];

/// The After Effects plugin.
#[derive(Debug, Clone, Copy, Default)]
pub struct AfterFx;

impl VendorPlugin for AfterFx {
    fn name(&self) -> &'static str {
        VENDOR_NAME
    }

    /// After Effects ships for Windows and macOS only; elsewhere it can still
    /// be driven when a binary (e.g. a wrapper) is named explicitly.
    fn can_be_registered(&self) -> bool {
        cfg!(any(windows, target_os = "macos")) || std::env::var_os(AFTERFX_BIN_ENV).is_some()
    }

    fn cli(&self) -> Option<&dyn VendorCli> {
        Some(self)
    }

    fn core(&self) -> Option<&dyn VendorCore> {
        Some(self)
    }
}

impl VendorCore for AfterFx {
    fn register_launcher(&self) -> LauncherFactory {
        Arc::new(|args: &LaunchArgs, ctx: &LaunchContext| -> Result<Box<dyn Launcher>> {
            let options = AfterFxOptions::from_launch_args(args)?;
            Ok(Box::new(create_launcher(&options, ctx)?))
        })
    }
}
